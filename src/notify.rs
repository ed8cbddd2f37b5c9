//! 提示消息（toast）出口

/// 提示类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// 一条面向用户的提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// 提示接收方
///
/// 前端实现负责展示与自动消失，核心只负责"发出一条"。
pub trait Notifier {
    fn notify(&self, notice: Notice);

    fn success(&self, message: &str) {
        self.notify(Notice::success(message));
    }

    fn error(&self, message: &str) {
        self.notify(Notice::error(message));
    }
}

impl<T: Notifier + ?Sized> Notifier for std::rc::Rc<T> {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice)
    }
}
