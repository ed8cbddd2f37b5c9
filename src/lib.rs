//! 食堂管理端核心库
//!
//! 与平台无关的部分都在这里，可以在原生环境中完整测试：
//! - `request`: HTTP 客户端抽象（浏览器中由 fetch 实现）
//! - `api`: 类型化的后端接口
//! - `session`: 会话存储（登录、登出、启动恢复、订阅）
//! - `route`: 路由定义与守卫决策
//! - `screens`: 各页面的状态模型与远端操作
//! - `storage` / `notify` / `config` / `error`: 周边设施

pub mod api;
pub mod config;
pub mod error;
pub mod notify;
pub mod request;
pub mod route;
pub mod screens;
pub mod session;
pub mod storage;

pub use api::{CanteenApi, ImageUpload};
pub use config::AppConfig;
pub use error::{AdminError, AdminErrorKind, AdminResult};
pub use notify::{Notice, NoticeKind, Notifier};
pub use request::{FormPart, HttpClient, HttpMethod, HttpRequest, HttpResponse, RequestBody};
pub use route::{AppRoute, GuardDecision, guard};
pub use session::{Session, SessionState, SessionStore, SubscriptionId};
pub use storage::KeyValueStore;
