use crate::error::{AdminError, AdminResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

pub use canteen_shared::protocol::HttpMethod;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// multipart 表单中的一个字段
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

/// 请求体
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(String),
    Multipart(Vec<FormPart>),
}

/// 通用 HTTP 请求结构
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_json(mut self, body: serde_json::Value) -> Self {
        self.headers
            .push(("Content-Type".to_string(), "application/json".to_string()));
        self.body = RequestBody::Json(body.to_string());
        self
    }

    /// multipart 的 Content-Type（含 boundary）由浏览器生成，这里不设置
    pub fn with_form(mut self, parts: Vec<FormPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 检查响应是否成功 (2xx)
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> AdminResult<T> {
        serde_json::from_str(&self.body).map_err(AdminError::from)
    }
}

/// HTTP 客户端特性 (Trait)
///
/// 浏览器环境是单线程的，`fetch` 产生的 Future 不是 `Send`，因此使用 `?Send`。
/// 只有传输层失败才返回 `Err`；非 2xx 响应作为 `Ok(HttpResponse)` 交给调用方判断。
#[async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> AdminResult<HttpResponse>;
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// 记录下来的请求
    #[derive(Debug, Clone)]
    pub struct RecordedRequest {
        pub url: String,
        pub method: HttpMethod,
        pub headers: Vec<(String, String)>,
        pub body: RequestBody,
    }

    impl RecordedRequest {
        pub fn json_body(&self) -> Option<serde_json::Value> {
            match &self.body {
                RequestBody::Json(raw) => serde_json::from_str(raw).ok(),
                _ => None,
            }
        }

        pub fn header(&self, key: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v.as_str())
        }
    }

    enum Canned {
        Reply(u16, String),
        NetworkFailure,
    }

    /// 按 (Method, URL) 返回预设响应，并记录所有发出的请求
    pub struct MockHttpClient {
        responses: RefCell<HashMap<(String, String), Canned>>,
        pub requests: RefCell<Vec<RecordedRequest>>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self {
                responses: RefCell::new(HashMap::new()),
                requests: RefCell::new(Vec::new()),
            }
        }

        pub fn mock_response(
            &self,
            method: HttpMethod,
            url: &str,
            status: u16,
            body: serde_json::Value,
        ) {
            self.mock_raw(method, url, status, &body.to_string());
        }

        pub fn mock_raw(&self, method: HttpMethod, url: &str, status: u16, body: &str) {
            self.responses.borrow_mut().insert(
                (method.as_str().to_string(), url.to_string()),
                Canned::Reply(status, body.to_string()),
            );
        }

        pub fn mock_network_failure(&self, method: HttpMethod, url: &str) {
            self.responses.borrow_mut().insert(
                (method.as_str().to_string(), url.to_string()),
                Canned::NetworkFailure,
            );
        }

        pub fn requests_to(&self, method: HttpMethod, url: &str) -> Vec<RecordedRequest> {
            self.requests
                .borrow()
                .iter()
                .filter(|r| r.method == method && r.url == url)
                .cloned()
                .collect()
        }

        pub fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    #[async_trait(?Send)]
    impl HttpClient for MockHttpClient {
        async fn send(&self, req: HttpRequest) -> AdminResult<HttpResponse> {
            self.requests.borrow_mut().push(RecordedRequest {
                url: req.url.clone(),
                method: req.method,
                headers: req.headers.clone(),
                body: req.body.clone(),
            });

            let key = (req.method.as_str().to_string(), req.url.clone());
            match self.responses.borrow().get(&key) {
                Some(Canned::Reply(status, body)) => Ok(HttpResponse {
                    status: *status,
                    body: body.clone(),
                }),
                Some(Canned::NetworkFailure) => {
                    Err(AdminError::network("Failed to fetch").in_op_with("mock.send", &req.url))
                }
                None => Ok(HttpResponse {
                    status: 404,
                    body: r#"{"message":"Not Found"}"#.to_string(),
                }),
            }
        }
    }
}
