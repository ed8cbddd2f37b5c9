//! 文件读写封装
//!
//! - 读取 `<input type="file">` 选中的图片
//! - 通过 Blob + 临时链接触发下载

use canteen_admin::{AdminError, AdminResult, ImageUpload};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, HtmlInputElement, Url};

fn js_err(e: wasm_bindgen::JsValue) -> String {
    format!("{:?}", e)
}

/// 取出文件输入框中的第一个文件
pub fn selected_file(input: &HtmlInputElement) -> Option<web_sys::File> {
    input.files()?.get(0)
}

/// 读取文件内容，用于 multipart 上传
pub async fn read_upload(file: &web_sys::File) -> AdminResult<ImageUpload> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| AdminError::storage(js_err(e)).in_op_with("read_file", file.name()))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();

    let content_type = match file.type_() {
        t if t.is_empty() => "application/octet-stream".to_string(),
        t => t,
    };

    Ok(ImageUpload {
        file_name: file.name(),
        content_type,
        bytes,
    })
}

/// 把文本保存为本地文件
pub fn download_text(file_name: &str, content: &str, mime: &str) -> AdminResult<()> {
    let fail = |e: wasm_bindgen::JsValue| AdminError::storage(js_err(e)).in_op("download");

    let parts = js_sys::Array::new();
    parts.push(&wasm_bindgen::JsValue::from_str(content));
    let opts = BlobPropertyBag::new();
    opts.set_type(mime);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &opts).map_err(fail)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(fail)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| AdminError::storage("无法获取 document").in_op("download"))?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(fail)?
        .dyn_into()
        .map_err(|_| AdminError::storage("创建链接失败").in_op("download"))?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    Url::revoke_object_url(&url).map_err(fail)?;
    log::info!("[Download] {}", file_name);
    Ok(())
}
