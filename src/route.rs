//! 路由定义与守卫 - 领域模型
//!
//! 纯粹的决策逻辑，不依赖于 DOM 或 web_sys。
//! 前端路由服务把当前路径与会话状态交给 `guard`，按结果渲染或重定向。

use crate::session::SessionState;
use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppRoute {
    /// 控制面板 (默认路由)
    #[default]
    Dashboard,
    Food,
    Order,
    Analytics,
    Feedback,
    Notifications,
    Profile,
    Login,
    SignUp,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 需要登录的全部路由
    pub const PROTECTED: [AppRoute; 7] = [
        AppRoute::Dashboard,
        AppRoute::Food,
        AppRoute::Order,
        AppRoute::Analytics,
        AppRoute::Feedback,
        AppRoute::Notifications,
        AppRoute::Profile,
    ];

    /// 将 URL path 解析为路由枚举
    ///
    /// 忽略查询串、片段与末尾的 '/'。
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" | "/dashboard" => Self::Dashboard,
            "/food" => Self::Food,
            "/order" => Self::Order,
            "/analytics" => Self::Analytics,
            "/feedback" => Self::Feedback,
            "/notifications" => Self::Notifications,
            "/profile" => Self::Profile,
            "/login" => Self::Login,
            "/signup" => Self::SignUp,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::Food => "/food",
            Self::Order => "/order",
            Self::Analytics => "/analytics",
            Self::Feedback => "/feedback",
            Self::Notifications => "/notifications",
            Self::Profile => "/profile",
            Self::Login => "/login",
            Self::SignUp => "/signup",
            Self::NotFound => "/404",
        }
    }

    /// 页面标题（导航栏）
    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Food => "Menu",
            Self::Order => "Orders",
            Self::Analytics => "Analytics",
            Self::Feedback => "Feedback",
            Self::Notifications => "Notifications",
            Self::Profile => "Profile",
            Self::Login => "Login",
            Self::SignUp => "Sign Up",
            Self::NotFound => "Not Found",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        Self::PROTECTED.contains(self)
    }

    /// 已认证用户是否应该离开此路由（登录页、注册页）
    pub fn guest_only(&self) -> bool {
        matches!(self, Self::Login | Self::SignUp)
    }

    /// 是否显示侧边栏与导航栏
    pub fn shows_chrome(&self) -> bool {
        self.requires_auth()
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

// =========================================================
// 守卫决策
// =========================================================

/// 守卫结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// 会话尚未恢复，显示加载占位
    Pending,
    Render(AppRoute),
    /// `from` 记录被拦截的原始路径，登录后可用于返回
    Redirect { to: AppRoute, from: Option<String> },
}

/// 根据会话状态决定如何处理请求的路由
pub fn guard(route: AppRoute, requested_path: &str, state: &SessionState) -> GuardDecision {
    if !state.resolved {
        return GuardDecision::Pending;
    }

    let authenticated = state.is_authenticated();

    if route == AppRoute::NotFound {
        let to = if authenticated {
            AppRoute::Dashboard
        } else {
            AppRoute::Login
        };
        return GuardDecision::Redirect { to, from: None };
    }

    if route.requires_auth() && !authenticated {
        return GuardDecision::Redirect {
            to: AppRoute::Login,
            from: Some(requested_path.to_string()),
        };
    }

    if route.guest_only() && authenticated {
        return GuardDecision::Redirect {
            to: AppRoute::Dashboard,
            from: None,
        };
    }

    GuardDecision::Render(route)
}
