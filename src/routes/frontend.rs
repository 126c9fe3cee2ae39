//! 前端页面与静态资源
//!
//! 使用 rust-embed 嵌入 `frontend/dist/`，支持：
//! - 上传表单页面的占位符渲染（`%SYSTEM_NAME%`、`%DOCUMENT_TYPE%`、`%RESULT%`）
//! - 自定义前端目录覆盖（开发用）
//! - `/assets/*` 静态资源

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode, web};
use rust_embed::Embed;
use std::path::Path;

use crate::utils::escape_html;

/// 嵌入前端静态资源
/// 编译时从 frontend/dist/ 目录读取文件
#[derive(Embed)]
#[folder = "frontend/dist/"]
struct FrontendAssets;

const INDEX_FILE: &str = "index.html";

/// 页面上展示的结果类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    fn css_class(self) -> &'static str {
        match self {
            MessageKind::Success => "result result-success",
            MessageKind::Error => "result result-error",
        }
    }
}

/// 附加在表单上的结果信息
#[derive(Debug, Clone)]
pub struct PageMessage {
    pub kind: MessageKind,
    pub title: String,
    pub correlation_id: Option<String>,
    /// 原样显示的文本（上游响应体）
    pub detail: Option<String>,
}

/// 上传表单页面的视图数据
#[derive(Debug, Clone, Default)]
pub struct UploadPage {
    pub document_type: String,
    pub message: Option<PageMessage>,
}

/// 获取文件的 MIME 类型
fn get_mime_type(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    match ext {
        "html" => "text/html; charset=utf-8",
        "js" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" => "application/json; charset=utf-8",
        "png" => "image/png",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "woff2" => "font/woff2",
        _ => "application/octet-stream",
    }
}

/// 检查是否应该设置缓存
fn should_cache(path: &str) -> bool {
    let ext = Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    matches!(ext, "js" | "css" | "png" | "svg" | "ico" | "woff2")
}

/// 尝试从自定义目录读取文件（开发用）
fn try_custom_file(path: &str) -> Option<Vec<u8>> {
    let custom_path = format!("./frontend-custom/{}", path);
    std::fs::read(&custom_path).ok()
}

/// 尝试从嵌入的资源中获取文件
fn get_embedded_file(path: &str) -> Option<Vec<u8>> {
    FrontendAssets::get(path).map(|f| f.data.to_vec())
}

/// 获取文件内容（优先自定义目录，然后嵌入资源）
fn get_file(path: &str) -> Option<Vec<u8>> {
    try_custom_file(path).or_else(|| get_embedded_file(path))
}

fn render_message(message: &PageMessage) -> String {
    let mut html = format!(
        r#"<section class="{}"><h2>{}</h2>"#,
        message.kind.css_class(),
        escape_html(&message.title)
    );
    if let Some(correlation_id) = &message.correlation_id {
        html.push_str(&format!(
            r#"<p>Correlation id: <code>{}</code></p>"#,
            escape_html(correlation_id)
        ));
    }
    if let Some(detail) = &message.detail {
        html.push_str(&format!("<pre>{}</pre>", escape_html(detail)));
    }
    html.push_str("</section>");
    html
}

/// 一次扫描完成所有占位符替换，替换进去的内容不会再被当作占位符
fn fill_placeholders(template: &str, values: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('%') {
        output.push_str(&rest[..pos]);
        rest = &rest[pos..];

        match values.iter().find(|(key, _)| rest.starts_with(key)) {
            Some((key, value)) => {
                output.push_str(value);
                rest = &rest[key.len()..];
            }
            None => {
                output.push('%');
                rest = &rest[1..];
            }
        }
    }

    output.push_str(rest);
    output
}

/// 处理 HTML 文件中的占位符替换
fn process_html(content: &[u8], page: &UploadPage, system_name: &str) -> String {
    let html = String::from_utf8_lossy(content);
    let result = page.message.as_ref().map(render_message).unwrap_or_default();
    let system_name = escape_html(system_name);
    let document_type = escape_html(&page.document_type);

    fill_placeholders(
        &html,
        &[
            ("%SYSTEM_NAME%", system_name.as_str()),
            ("%DOCUMENT_TYPE%", document_type.as_str()),
            ("%RESULT%", result.as_str()),
        ],
    )
}

/// 渲染上传表单页面
pub fn render_upload_page(status: StatusCode, page: &UploadPage, system_name: &str) -> HttpResponse {
    match get_file(INDEX_FILE) {
        Some(content) => HttpResponse::build(status)
            .content_type(get_mime_type(INDEX_FILE))
            .insert_header(("Cache-Control", "no-cache, no-store, must-revalidate"))
            .body(process_html(&content, page, system_name)),
        None => HttpResponse::InternalServerError()
            .content_type("text/html; charset=utf-8")
            .body(
                r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Upload Forwarder</title>
</head>
<body>
    <h1>Frontend Not Found</h1>
    <p>The upload form has not been embedded.</p>
</body>
</html>"#,
            ),
    }
}

/// 静态资源请求处理
pub async fn serve_asset(req: HttpRequest) -> ActixResult<HttpResponse> {
    let tail = req.match_info().query("tail").trim_start_matches('/');
    let path = format!("assets/{tail}");

    // 禁止目录穿越
    if tail.split('/').any(|segment| segment == "..") {
        return Ok(HttpResponse::NotFound().finish());
    }

    match get_file(&path) {
        Some(data) => {
            let mut response = HttpResponse::Ok();
            response.content_type(get_mime_type(&path));

            // 设置缓存头
            if should_cache(&path) {
                response.insert_header(("Cache-Control", "public, max-age=86400"));
            } else {
                response.insert_header(("Cache-Control", "no-cache, no-store, must-revalidate"));
            }

            Ok(response.body(data))
        }
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// 配置前端路由
pub fn configure_frontend_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/assets/{tail:.*}", web::get().to(serve_asset));
}
