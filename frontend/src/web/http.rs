//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 实现核心库的 `HttpClient` 特性。
//! 所有请求都带 `credentials: include`，后端依赖 Cookie。

use async_trait::async_trait;
use canteen_admin::{AdminError, AdminResult, FormPart, HttpClient, HttpRequest, HttpResponse, RequestBody};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Headers, Request, RequestCredentials, RequestInit, Response};

/// 浏览器侧的 HTTP 错误
#[derive(Debug)]
pub enum HttpError {
    /// 请求构建失败
    RequestBuildFailed(String),
    /// 网络请求失败
    NetworkError(String),
    /// 响应解析失败
    ResponseParseFailed(String),
}

impl core::fmt::Display for HttpError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HttpError::RequestBuildFailed(msg) => write!(f, "请求构建失败: {}", msg),
            HttpError::NetworkError(msg) => write!(f, "网络错误: {}", msg),
            HttpError::ResponseParseFailed(msg) => write!(f, "响应解析失败: {}", msg),
        }
    }
}

impl From<HttpError> for AdminError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::ResponseParseFailed(_) => AdminError::malformed(e.to_string()),
            _ => AdminError::network(e.to_string()),
        }
    }
}

fn js_err(e: JsValue) -> String {
    format!("{:?}", e)
}

/// 把字节包装成带 MIME 类型的 Blob
fn bytes_to_blob(bytes: &[u8], content_type: &str) -> Result<Blob, HttpError> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&array);

    let opts = BlobPropertyBag::new();
    opts.set_type(content_type);
    Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
        .map_err(|e| HttpError::RequestBuildFailed(format!("创建 Blob 失败: {}", js_err(e))))
}

fn build_form(parts: &[FormPart]) -> Result<FormData, HttpError> {
    let form = FormData::new()
        .map_err(|e| HttpError::RequestBuildFailed(format!("创建 FormData 失败: {}", js_err(e))))?;

    for part in parts {
        let res = match part {
            FormPart::Text { name, value } => form.append_with_str(name, value),
            FormPart::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                let blob = bytes_to_blob(bytes, content_type)?;
                form.append_with_blob_and_filename(name, &blob, file_name)
            }
        };
        res.map_err(|e| HttpError::RequestBuildFailed(format!("追加表单字段失败: {}", js_err(e))))?;
    }
    Ok(form)
}

fn build_request(req: &HttpRequest) -> Result<Request, HttpError> {
    let headers = Headers::new()
        .map_err(|e| HttpError::RequestBuildFailed(format!("创建 Headers 失败: {}", js_err(e))))?;

    for (key, value) in &req.headers {
        headers
            .set(key, value)
            .map_err(|e| HttpError::RequestBuildFailed(format!("设置 Header 失败: {}", js_err(e))))?;
    }

    let opts = RequestInit::new();
    opts.set_method(req.method.as_str());
    opts.set_headers(&headers.into());
    opts.set_credentials(RequestCredentials::Include);

    match &req.body {
        RequestBody::Empty => {}
        RequestBody::Json(body) => opts.set_body(&JsValue::from_str(body)),
        // multipart 的 Content-Type 与 boundary 由浏览器生成
        RequestBody::Multipart(parts) => opts.set_body(&build_form(parts)?.into()),
    }

    Request::new_with_str_and_init(&req.url, &opts)
        .map_err(|e| HttpError::RequestBuildFailed(js_err(e)))
}

async fn fetch(req: HttpRequest) -> Result<HttpResponse, HttpError> {
    let request = build_request(&req)?;

    let window = web_sys::window()
        .ok_or_else(|| HttpError::NetworkError("无法获取 window 对象".to_string()))?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| HttpError::NetworkError(js_err(e)))?;

    let response: Response = resp_value.dyn_into().map_err(|e| {
        HttpError::ResponseParseFailed(format!("Response 类型转换失败: {}", js_err(e)))
    })?;

    let status = response.status();
    let promise = response
        .text()
        .map_err(|e| HttpError::ResponseParseFailed(js_err(e)))?;
    let text = JsFuture::from(promise)
        .await
        .map_err(|e| HttpError::ResponseParseFailed(js_err(e)))?;

    Ok(HttpResponse {
        status,
        body: text.as_string().unwrap_or_default(),
    })
}

/// 基于 fetch 的 HTTP 客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchClient;

#[async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> AdminResult<HttpResponse> {
        let method = req.method.as_str();
        let url = req.url.clone();
        log::debug!("[Http] {} {}", method, url);

        fetch(req)
            .await
            .map_err(|e| AdminError::from(e).in_op_with("fetch", url))
    }
}
