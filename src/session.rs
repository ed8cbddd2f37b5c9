//! 会话存储 (Session Store)
//!
//! 持有当前登录的管理员身份，负责登录/登出与启动时的恢复。
//! 持久化顺序固定为"先写存储再改内存"（登录）与"先清存储再改内存"（登出），
//! 两者之间的状态不做持续对账。

use crate::api::CanteenApi;
use crate::error::{AdminError, AdminResult};
use crate::notify::Notifier;
use crate::request::HttpClient;
use crate::storage::{KEY_ADMIN, KEY_ADMIN_ID, KEY_ADMIN_TOKEN, KeyValueStore, SESSION_KEYS};
use canteen_shared::{AdminInfo, LoginRequest, LoginResponse};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[cfg(test)]
mod tests;

/// 已登录的管理员
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub info: AdminInfo,
    pub admin_id: String,
    pub token: String,
}

impl From<LoginResponse> for Session {
    fn from(resp: LoginResponse) -> Self {
        Self {
            info: resp.admin_info,
            admin_id: resp.admin_id,
            token: resp.admin_token,
        }
    }
}

/// 会话状态快照
///
/// `resolved` 在第一次 `restore` 之后为 true，路由守卫据此决定是否还在"加载中"。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub session: Option<Session>,
    pub resolved: bool,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn(&SessionState)>;

/// 会话存储
///
/// 通过构造函数注入 HTTP 客户端、持久化存储与提示出口，不依赖任何全局对象。
/// 所有方法都只借用 `&self`，内部状态用 `RefCell` 管理，且不会跨 await 持有借用。
pub struct SessionStore<C, S, N> {
    api: CanteenApi<C>,
    storage: S,
    notifier: N,
    state: RefCell<SessionState>,
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
    next_id: Cell<u64>,
}

impl<C, S, N> SessionStore<C, S, N>
where
    C: HttpClient,
    S: KeyValueStore,
    N: Notifier,
{
    pub fn new(api: CanteenApi<C>, storage: S, notifier: N) -> Self {
        Self {
            api,
            storage,
            notifier,
            state: RefCell::new(SessionState::default()),
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    pub fn api(&self) -> &CanteenApi<C> {
        &self.api
    }

    // =========================================================
    // 读取
    // =========================================================

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn current(&self) -> Option<Session> {
        self.state.borrow().session.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().session.is_some()
    }

    pub fn is_resolved(&self) -> bool {
        self.state.borrow().resolved
    }

    // =========================================================
    // 订阅
    // =========================================================

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&SessionState) + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners.borrow_mut().retain(|(sid, _)| *sid != id);
    }

    /// 替换状态；只有状态确实变化时才通知订阅者
    fn transition(&self, next: SessionState) {
        if *self.state.borrow() == next {
            return;
        }
        *self.state.borrow_mut() = next.clone();

        // 先复制一份监听器列表，回调中再次订阅/退订不会冲突
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in listeners {
            listener(&next);
        }
    }

    // =========================================================
    // 恢复
    // =========================================================

    /// 从持久化存储读取一次会话快照
    ///
    /// 三个键齐全且 `admin` 可解析时才视为已登录；从不写存储，也不发请求。
    pub fn restore(&self) -> SessionState {
        let session = self.read_snapshot();
        match &session {
            Some(s) => log::info!("[Session] restored session for {}", s.info.admin_email),
            None => log::debug!("[Session] no stored session"),
        }
        self.transition(SessionState {
            session,
            resolved: true,
        });
        self.state()
    }

    fn read_snapshot(&self) -> Option<Session> {
        let raw_admin = self.storage.get(KEY_ADMIN)?;
        let admin_id = self.storage.get(KEY_ADMIN_ID).filter(|v| !v.is_empty())?;
        let token = self.storage.get(KEY_ADMIN_TOKEN).filter(|v| !v.is_empty())?;

        match serde_json::from_str::<AdminInfo>(&raw_admin) {
            Ok(info) => Some(Session {
                info,
                admin_id,
                token,
            }),
            Err(e) => {
                log::warn!("[Session] stored admin snapshot is unreadable: {}", e);
                None
            }
        }
    }

    // =========================================================
    // 登录 / 登出
    // =========================================================

    pub async fn login(&self, email: &str, password: &str) -> AdminResult<Session> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            let err = AdminError::invalid_input("Please enter email and password")
                .in_op("session.login");
            self.notifier.error(err.user_message());
            return Err(err);
        }

        let req = LoginRequest {
            admin_email: email.to_string(),
            admin_password: password.to_string(),
        };

        let session = match self.api.login(&req).await {
            Ok(resp) => Session::from(resp),
            Err(e) => {
                let err = e.in_op_with("session.login", email);
                log::warn!("[Session] login failed: {}", err);
                self.notifier.error(err.user_message());
                return Err(err);
            }
        };

        if let Err(e) = self.persist(&session) {
            // 写了一半的键要清掉，保持存储与内存一致（都是未登录）
            self.clear_storage();
            let err = e.in_op("session.persist");
            log::error!("[Session] {}", err);
            let err = err.or_message("Could not save your session. Please try again.");
            self.notifier.error(err.user_message());
            return Err(err);
        }

        self.transition(SessionState {
            session: Some(session.clone()),
            resolved: true,
        });
        log::info!("[Session] logged in as {}", session.info.admin_email);
        self.notifier.success("Logged in successfully");
        Ok(session)
    }

    /// 登出：远端调用失败只记录日志，本地状态总是被清除
    pub async fn logout(&self) {
        if let Err(e) = self.api.logout().await {
            log::warn!("[Session] remote logout failed, clearing locally: {}", e);
        }

        self.clear_storage();
        self.transition(SessionState {
            session: None,
            resolved: true,
        });
        log::info!("[Session] logged out");
        self.notifier.success("Logged out successfully");
    }

    fn persist(&self, session: &Session) -> AdminResult<()> {
        let admin = serde_json::to_string(&session.info)
            .map_err(|e| AdminError::storage(format!("Could not save session: {}", e)))?;
        self.storage.set(KEY_ADMIN, &admin)?;
        self.storage.set(KEY_ADMIN_ID, &session.admin_id)?;
        self.storage.set(KEY_ADMIN_TOKEN, &session.token)?;
        Ok(())
    }

    fn clear_storage(&self) {
        for key in SESSION_KEYS {
            if let Err(e) = self.storage.delete(key) {
                log::warn!("[Session] failed to remove '{}': {}", key, e);
            }
        }
    }
}
