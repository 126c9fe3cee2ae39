use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode, web};
use tracing::debug;

use super::frontend::{MessageKind, PageMessage, UploadPage, render_upload_page};
use crate::config::AppSettings;
use crate::errors::ForwarderError;
use crate::middlewares::ResolveIdentity;
use crate::models::upload::requests::UploadForm;
use crate::services::ForwarderService;

/// 错误类型对应的 HTTP 状态码
pub(crate) fn status_for(err: &ForwarderError) -> StatusCode {
    match err {
        ForwarderError::Validation(_)
        | ForwarderError::UploadRejected(_)
        | ForwarderError::Multipart(_) => StatusCode::BAD_REQUEST,
        ForwarderError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        ForwarderError::Transport(_) | ForwarderError::Serialization(_) => {
            StatusCode::BAD_GATEWAY
        }
        ForwarderError::Configuration(_) | ForwarderError::Token(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

// 显示空白上传表单
pub async fn show_form(settings: web::Data<AppSettings>) -> HttpResponse {
    render_upload_page(StatusCode::OK, &UploadPage::default(), &settings.system_name)
}

// 提交上传表单，结果附加在同一个表单页面上
pub async fn submit_form(
    request: HttpRequest,
    payload: Multipart,
    service: web::Data<ForwarderService>,
    settings: web::Data<AppSettings>,
) -> ActixResult<HttpResponse> {
    let intake = service.read_upload(payload).await;
    let form = intake.form;
    if let Some(err) = intake.error {
        debug!("Failed to read upload form: {}", err);
        // 已读到的文档类型仍然回填
        return Ok(render_error(&form, &err, &settings));
    }

    let identity = ResolveIdentity::extract_identity(&request);
    let page_document_type = form.document_type.clone().unwrap_or_default();

    match service.handle(form.to_request(), identity.as_ref()).await {
        Ok(receipt) => {
            let page = UploadPage {
                document_type: page_document_type,
                message: Some(PageMessage {
                    kind: MessageKind::Success,
                    title: format!("Upstream response (HTTP {})", receipt.upstream_status),
                    correlation_id: Some(receipt.correlation_id.to_string()),
                    detail: Some(receipt.body),
                }),
            };
            Ok(render_upload_page(
                StatusCode::OK,
                &page,
                &settings.system_name,
            ))
        }
        Err(err) => Ok(render_error(&form, &err, &settings)),
    }
}

fn render_error(form: &UploadForm, err: &ForwarderError, settings: &AppSettings) -> HttpResponse {
    let page = UploadPage {
        document_type: form.document_type.clone().unwrap_or_default(),
        message: Some(PageMessage {
            kind: MessageKind::Error,
            title: err.message().to_string(),
            correlation_id: None,
            detail: None,
        }),
    };
    render_upload_page(status_for(err), &page, &settings.system_name)
}

// 配置路由
pub fn configure_upload_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::get().to(show_form))
            .route(web::post().to(submit_form)),
    );
}
