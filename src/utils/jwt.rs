use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::errors::{ForwarderError, Result};

/// 演示 token 的签发者
pub const DEMO_ISSUER: &str = "demo";
/// 演示 token 的受众
pub const DEMO_AUDIENCE: &str = "billgo-demo";
/// 默认有效期：1 小时
pub const DEMO_TOKEN_TTL_SECS: i64 = 60 * 60;

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user ID)
    pub iss: String, // Issuer
    pub aud: String, // Audience
    pub exp: usize,  // Expiration time (时间戳)
    pub iat: usize,  // Issued at (签发时间)
}

/// 演示用 token 签发器（HS256）
///
/// 主流程不会调用它；上游目前不要求认证，只在启用演示接口时使用。
pub struct DemoTokenIssuer;

impl DemoTokenIssuer {
    fn check_secret(secret: &str) -> Result<()> {
        if secret.is_empty() {
            return Err(ForwarderError::token("JWT secret is not configured"));
        }
        Ok(())
    }

    // 签发 1 小时有效期的 token
    pub fn issue_token(user_id: &str, secret: &str) -> Result<String> {
        Self::issue_token_with_expiry(
            user_id,
            secret,
            chrono::Duration::seconds(DEMO_TOKEN_TTL_SECS),
        )
    }

    // 生成带自定义过期时间的 Token
    pub fn issue_token_with_expiry(
        user_id: &str,
        secret: &str,
        expiry_duration: chrono::Duration,
    ) -> Result<String> {
        Self::check_secret(secret)?;

        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = Claims {
            sub: user_id.to_string(),
            iss: DEMO_ISSUER.to_string(),
            aud: DEMO_AUDIENCE.to_string(),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &encoding_key)?)
    }

    // 验证 JWT token（签名、签发者、受众、过期时间）
    pub fn verify_token(token: &str, secret: &str) -> Result<Claims> {
        Self::check_secret(secret)?;

        let decoding_key = DecodingKey::from_secret(secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[DEMO_ISSUER]);
        validation.set_audience(&[DEMO_AUDIENCE]);

        Ok(decode::<Claims>(token, &decoding_key, &validation)?.claims)
    }
}
