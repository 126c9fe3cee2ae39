use actix_web::{HttpResponse, Result as ActixResult, web};
use tracing::{error, info};

use crate::config::JwtConfig;
use crate::models::token::{IssueTokenRequest, IssueTokenResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::DemoTokenIssuer;
use crate::utils::jwt::DEMO_TOKEN_TTL_SECS;

// 签发演示 token（仅在 jwt.demo_endpoint = true 时注册）
pub async fn issue_demo_token(
    jwt: web::Data<JwtConfig>,
    body: web::Json<IssueTokenRequest>,
) -> ActixResult<HttpResponse> {
    let user_id = body.user_id.trim();
    if user_id.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "userId is required",
        )));
    }

    match DemoTokenIssuer::issue_token(user_id, &jwt.secret) {
        Ok(token) => {
            info!("Issued demo token for {}", user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                IssueTokenResponse {
                    token,
                    token_type: "Bearer",
                    expires_in: DEMO_TOKEN_TTL_SECS,
                },
                "Demo token issued",
            )))
        }
        Err(e) => {
            error!("Failed to issue demo token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::TokenIssueFailed,
                    e.message(),
                )),
            )
        }
    }
}

// 配置路由
pub fn configure_token_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/v1/demo/token", web::post().to(issue_demo_token));
}
