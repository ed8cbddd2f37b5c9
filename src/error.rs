use std::fmt;

// =========================================================
// 错误类型枚举
// =========================================================

/// 错误类型
///
/// 所有失败最终都会被归一化为一条提示消息，这里保留类型以便调用方区分处理。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminErrorKind {
    /// 网络/传输层失败（fetch 被拒绝）
    Network,
    /// 非 2xx 响应
    Http { status: u16 },
    /// 响应体与接口约定的结构不符
    Malformed,
    /// 本地校验失败（必填项、密码不一致等）
    InvalidInput,
    /// 本地持久化存储不可用或写入失败
    Storage,
}

impl AdminErrorKind {
    pub fn error_code(&self) -> &'static str {
        match self {
            AdminErrorKind::Network => "NETWORK_ERROR",
            AdminErrorKind::Http { .. } => "HTTP_ERROR",
            AdminErrorKind::Malformed => "MALFORMED_RESPONSE",
            AdminErrorKind::InvalidInput => "INVALID_INPUT",
            AdminErrorKind::Storage => "STORAGE_ERROR",
        }
    }
}

// =========================================================
// 错误上下文追踪
// =========================================================

/// 结构化的错误追踪片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSpan {
    /// 操作名称，如 "api.login", "session.persist"
    pub operation: String,
    pub detail: Option<String>,
}

impl ErrorSpan {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: None,
        }
    }

    pub fn with_detail(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: Some(detail.into()),
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// 管理端统一错误
///
/// - kind: 错误类型
/// - message: 面向用户的消息（直接用于 toast）
/// - spans: 调用追踪，只进入日志
#[derive(Debug, Clone)]
pub struct AdminError {
    pub kind: AdminErrorKind,
    pub message: String,
    spans: Vec<ErrorSpan>,
}

impl AdminError {
    pub fn new(kind: AdminErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            spans: Vec::new(),
        }
    }

    // --- Convenience constructors ---

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(AdminErrorKind::Network, message)
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::new(AdminErrorKind::Http { status }, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(AdminErrorKind::Malformed, message)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(AdminErrorKind::InvalidInput, message)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(AdminErrorKind::Storage, message)
    }

    // --- Context builders ---

    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::new(operation));
        self
    }

    pub fn in_op_with(mut self, operation: impl Into<String>, detail: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::with_detail(operation, detail));
        self
    }

    /// 用调用方给出的兜底消息替换过于技术化的消息（非 HTTP 错误）
    ///
    /// HTTP 错误的消息来自服务端 `{message}`，保持不变。
    pub fn or_message(mut self, fallback: impl Into<String>) -> Self {
        if !matches!(self.kind, AdminErrorKind::Http { .. } | AdminErrorKind::InvalidInput) {
            self.message = fallback.into();
        }
        self
    }

    // --- Accessors ---

    pub fn error_code(&self) -> &'static str {
        self.kind.error_code()
    }

    pub fn status(&self) -> Option<u16> {
        match self.kind {
            AdminErrorKind::Http { status } => Some(status),
            _ => None,
        }
    }

    /// toast 展示的消息
    pub fn user_message(&self) -> &str {
        &self.message
    }

    pub fn spans(&self) -> &[ErrorSpan] {
        &self.spans
    }
}

impl fmt::Display for AdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message)?;
        if let Some(status) = self.status() {
            write!(f, " (status {})", status)?;
        }

        if !self.spans.is_empty() {
            write!(f, " | trace: ")?;
            for (i, span) in self.spans.iter().enumerate() {
                if i > 0 {
                    write!(f, " -> ")?;
                }
                write!(f, "{}", span.operation)?;
                if let Some(detail) = &span.detail {
                    write!(f, "({})", detail)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for AdminError {}

pub type AdminResult<T> = std::result::Result<T, AdminError>;

impl From<serde_json::Error> for AdminError {
    fn from(e: serde_json::Error) -> Self {
        AdminError::malformed(format!("Unexpected response: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_code_status_and_trace() {
        let err = AdminError::http(401, "Invalid credentials")
            .in_op("api.login")
            .in_op_with("session.login", "a@b.c");
        assert_eq!(
            err.to_string(),
            "[HTTP_ERROR] Invalid credentials (status 401) | trace: api.login -> session.login(a@b.c)"
        );
        assert_eq!(err.user_message(), "Invalid credentials");
    }

    #[test]
    fn fallback_message_only_replaces_technical_errors() {
        let net = AdminError::network("TypeError: Failed to fetch").or_message("Failed to load");
        assert_eq!(net.user_message(), "Failed to load");

        let http = AdminError::http(500, "Server exploded").or_message("Failed to load");
        assert_eq!(http.user_message(), "Server exploded");
    }

    #[test]
    fn json_errors_become_malformed() {
        let err: AdminError = serde_json::from_str::<u32>("\"x\"").unwrap_err().into();
        assert_eq!(err.kind, AdminErrorKind::Malformed);
    }
}
