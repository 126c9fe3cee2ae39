/*!
 * 可选身份解析中间件
 *
 * 与强制认证不同，此中间件从不拒绝请求：
 *
 * 1. 请求头包含 `Authorization: Bearer <JWT_TOKEN>` 且校验通过时，
 *    把 `sub` 作为 `Identity` 写入请求扩展
 * 2. 缺失或无效的 token 只记录 debug 日志，请求照常继续
 * 3. 处理程序通过 `ResolveIdentity::extract_identity` 取出身份并显式传给转发器
 *
 * ```rust,ignore
 * App::new()
 *     .wrap(ResolveIdentity::new(config.jwt.secret.clone()))
 *     .route("/", web::post().to(handler))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    dev::{ServiceRequest, ServiceResponse},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::debug;

use crate::models::upload::entities::Identity;
use crate::utils::DemoTokenIssuer;

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Clone)]
pub struct ResolveIdentity {
    secret: Arc<str>,
}

impl ResolveIdentity {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// 从请求扩展中提取身份
    pub fn extract_identity(req: &actix_web::HttpRequest) -> Option<Identity> {
        req.extensions().get::<Identity>().cloned()
    }
}

// 辅助函数：提取并验证 bearer token
fn resolve_identity(req: &ServiceRequest, secret: &str) -> Option<Identity> {
    let token = req
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))?;

    // 未配置密钥时不解析身份
    if secret.is_empty() {
        debug!("Bearer token present but no JWT secret configured, ignoring");
        return None;
    }

    match DemoTokenIssuer::verify_token(token, secret) {
        Ok(claims) => Some(Identity::new(claims.sub)),
        Err(err) => {
            debug!("Ignoring invalid bearer token: {}", err);
            None
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ResolveIdentity
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = ResolveIdentityMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ResolveIdentityMiddleware {
            service: Rc::new(service),
            secret: self.secret.clone(),
        }))
    }
}

pub struct ResolveIdentityMiddleware<S> {
    service: Rc<S>,
    secret: Arc<str>,
}

impl<S, B> Service<ServiceRequest> for ResolveIdentityMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let secret = self.secret.clone();
        Box::pin(async move {
            if let Some(identity) = resolve_identity(&req, &secret) {
                debug!("Resolved identity {} for {}", identity.user_id, req.path());
                req.extensions_mut().insert(identity);
            }
            srv.call(req).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpRequest, HttpResponse, test, web};

    const SECRET: &str = "middleware-secret";

    async fn whoami(req: HttpRequest) -> HttpResponse {
        let user = ResolveIdentity::extract_identity(&req)
            .map(|identity| identity.user_id)
            .unwrap_or_else(|| "anonymous".to_string());
        HttpResponse::Ok().body(user)
    }

    async fn call(secret: &str, authorization: Option<String>) -> String {
        let app = test::init_service(
            App::new()
                .wrap(ResolveIdentity::new(secret))
                .route("/", web::get().to(whoami)),
        )
        .await;

        let mut req = test::TestRequest::get().uri("/");
        if let Some(value) = authorization {
            req = req.insert_header((AUTHORIZATION_HEADER, value));
        }
        let body = test::call_and_read_body(&app, req.to_request()).await;
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[actix_web::test]
    async fn test_valid_token_sets_identity() {
        let token = DemoTokenIssuer::issue_token("alice", SECRET).unwrap();
        assert_eq!(call(SECRET, Some(format!("Bearer {token}"))).await, "alice");
    }

    #[actix_web::test]
    async fn test_missing_or_invalid_token_is_anonymous() {
        assert_eq!(call(SECRET, None).await, "anonymous");
        assert_eq!(
            call(SECRET, Some("Bearer not-a-jwt".to_string())).await,
            "anonymous"
        );

        let token = DemoTokenIssuer::issue_token("alice", "other-secret").unwrap();
        assert_eq!(call(SECRET, Some(format!("Bearer {token}"))).await, "anonymous");
    }

    #[actix_web::test]
    async fn test_no_secret_ignores_token() {
        let token = DemoTokenIssuer::issue_token("alice", SECRET).unwrap();
        assert_eq!(call("", Some(format!("Bearer {token}"))).await, "anonymous");
    }
}
