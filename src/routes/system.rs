use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::models::ApiResponse;
use crate::services::ForwarderService;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    upstream_configured: bool,
}

// 存活检查；上游未配置不视为不健康
pub async fn health(service: web::Data<ForwarderService>) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(
        HealthResponse {
            status: "ok",
            upstream_configured: service.endpoint().is_some(),
        },
        "ok",
    ))
}

// 配置路由
pub fn configure_system_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/healthz", web::get().to(health));
}
