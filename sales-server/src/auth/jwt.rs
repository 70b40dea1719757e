//! JWT 令牌服务
//!
//! 处理 JWT 令牌的生成、验证和解析。

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use shared::models::{Role, User};
use thiserror::Error;

use crate::utils::AppError;

/// Minimum accepted length of `JWT_SECRET`
pub const MIN_SECRET_LEN: usize = 32;

/// JWT 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// JWT 密钥 (应至少 32 字节)
    pub secret: String,
    /// 令牌过期时间 (分钟)
    pub expiration_minutes: i64,
    /// 令牌签发者
    pub issuer: String,
    /// 令牌受众
    pub audience: String,
}

impl JwtConfig {
    /// Read `JWT_SECRET`, `JWT_EXPIRATION_MINUTES`, `JWT_ISSUER` and `JWT_AUDIENCE`
    ///
    /// Debug builds without `JWT_SECRET` get a random printable secret, so
    /// tokens do not survive a restart. Release builds require the variable.
    pub fn from_env() -> Result<Self, JwtError> {
        Ok(Self {
            secret: load_jwt_secret()?,
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1440), // 默认 24 小时
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "sales-server".to_string()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "sales-clients".to_string()),
        })
    }

    /// Fixed configuration with the given secret, for tests and tools
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expiration_minutes: 1440,
            issuer: "sales-server".to_string(),
            audience: "sales-clients".to_string(),
        }
    }
}

/// 存储在令牌中的 JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 用户 ID (Subject)
    pub sub: String,
    /// 显示名
    pub name: String,
    pub role: Role,
    /// Bound tenant; empty for admins
    #[serde(default)]
    pub tenant_id: String,
    /// 令牌类型
    pub token_type: String,
    /// 过期时间戳
    pub exp: i64,
    /// 签发时间戳
    pub iat: i64,
    /// 签发者
    pub iss: String,
    /// 受众
    pub aud: String,
}

/// JWT 错误
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token expired")]
    ExpiredToken,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("token generation failed: {0}")]
    GenerationFailed(String),

    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl From<JwtError> for AppError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::ExpiredToken => AppError::token_expired(),
            JwtError::InvalidToken(_) | JwtError::InvalidSignature => {
                AppError::invalid_token("Invalid token")
            }
            JwtError::GenerationFailed(msg) | JwtError::ConfigError(msg) => AppError::internal(msg),
        }
    }
}

/// 生成可打印的安全 JWT 密钥 (用于开发环境)
pub fn generate_printable_secret() -> Result<String, JwtError> {
    const ALLOWED: &[u8] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+";

    let mut bytes = [0u8; 64];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| JwtError::ConfigError("failed to generate random secret".to_string()))?;

    Ok(bytes
        .iter()
        .map(|b| ALLOWED[*b as usize % ALLOWED.len()] as char)
        .collect())
}

/// 从环境变量安全地加载 JWT 密钥
fn load_jwt_secret() -> Result<String, JwtError> {
    match std::env::var("JWT_SECRET") {
        Ok(secret) if secret.len() < MIN_SECRET_LEN => Err(JwtError::ConfigError(format!(
            "JWT_SECRET must be at least {MIN_SECRET_LEN} characters long"
        ))),
        Ok(secret) => Ok(secret),
        Err(_) => {
            #[cfg(debug_assertions)]
            {
                tracing::warn!("JWT_SECRET not set, generating a temporary development key");
                generate_printable_secret()
            }
            #[cfg(not(debug_assertions))]
            {
                Err(JwtError::ConfigError(
                    "JWT_SECRET environment variable must be set in production".to_string(),
                ))
            }
        }
    }
}

/// JWT 令牌服务
#[derive(Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .field("expiration_minutes", &self.config.expiration_minutes)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    /// 使用指定配置创建新的 JWT 服务
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// 为用户生成新令牌
    pub fn generate_token(&self, user: &User) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: user.id.clone(),
            name: user.name.clone(),
            role: user.role,
            tenant_id: user.tenant_id.clone(),
            token_type: "access".to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// 验证并解码令牌
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }

    /// 从 Authorization 头提取令牌
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }

    /// 获取距离过期的剩余秒数
    pub fn expires_in(&self, claims: &Claims) -> i64 {
        (claims.exp - Utc::now().timestamp()).max(0)
    }
}

/// 当前用户上下文 (从 JWT Claims 解析)
///
/// 由认证中间件创建，注入到请求处理函数。
/// Tenant users only ever see their own tenant's data; [`CurrentUser::scope`]
/// resolves which tenant a request is allowed to touch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub role: Role,
    /// Empty for admins
    pub tenant_id: String,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            name: claims.name,
            role: claims.role,
            tenant_id: claims.tenant_id,
        }
    }
}

impl CurrentUser {
    /// 是否管理员
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Tenant a tenant-role request is bound to
    ///
    /// Admins have no bound tenant and get `None`.
    pub fn own_tenant(&self) -> Option<&str> {
        (!self.is_admin() && !self.tenant_id.is_empty()).then_some(self.tenant_id.as_str())
    }

    /// Resolve the tenant filter of a read request
    ///
    /// Admins may pass any tenant (or none, meaning all). Tenant users are
    /// pinned to their own tenant; asking for another one is forbidden.
    ///
    /// Uses the role and tenant carried by the token. Reads are not
    /// re-checked against the directory until the token expires.
    pub fn scope<'a>(&'a self, requested: Option<&'a str>) -> Result<Option<&'a str>, AppError> {
        if self.is_admin() {
            return Ok(requested.filter(|t| !t.is_empty()));
        }
        let own = self.own_tenant().ok_or_else(|| {
            AppError::forbidden("User is not bound to a tenant")
        })?;
        match requested {
            Some(t) if !t.is_empty() && t != own => {
                Err(AppError::forbidden("Access to another tenant's data is not allowed"))
            }
            _ => Ok(Some(own)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::with_config(JwtConfig::with_secret("x".repeat(MIN_SECRET_LEN)))
    }

    fn tenant_user() -> User {
        User {
            id: "tenantA".into(),
            name: "テナントAユーザー".into(),
            password: "A".into(),
            tenant_id: "1".into(),
            role: Role::Tenant,
        }
    }

    fn current(role: Role, tenant_id: &str) -> CurrentUser {
        CurrentUser {
            id: "u".into(),
            name: "u".into(),
            role,
            tenant_id: tenant_id.into(),
        }
    }

    #[test]
    fn test_jwt_generation_and_validation() {
        let service = service();
        let token = service.generate_token(&tenant_user()).unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.sub, "tenantA");
        assert_eq!(claims.role, Role::Tenant);
        assert_eq!(claims.tenant_id, "1");
        assert!(service.expires_in(&claims) > 0);

        let user = CurrentUser::from(claims);
        assert_eq!(user.own_tenant(), Some("1"));
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let token = service().generate_token(&tenant_user()).unwrap();
        let other = JwtService::with_config(JwtConfig::with_secret("y".repeat(MIN_SECRET_LEN)));
        assert!(matches!(
            other.validate_token(&token),
            Err(JwtError::InvalidSignature)
        ));
    }

    #[test]
    fn test_expired_token() {
        let mut config = JwtConfig::with_secret("x".repeat(MIN_SECRET_LEN));
        config.expiration_minutes = -10;
        let service = JwtService::with_config(config);
        let token = service.generate_token(&tenant_user()).unwrap();
        let err = service.validate_token(&token).unwrap_err();
        assert!(matches!(err, JwtError::ExpiredToken));
        assert_eq!(AppError::from(err).code, shared::ErrorCode::TokenExpired);
    }

    #[test]
    fn test_extract_from_header() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
    }

    #[test]
    fn test_scope_for_tenant_user() {
        let user = current(Role::Tenant, "1");
        assert_eq!(user.scope(None).unwrap(), Some("1"));
        assert_eq!(user.scope(Some("1")).unwrap(), Some("1"));
        assert!(user.scope(Some("2")).is_err());
    }

    #[test]
    fn test_scope_for_admin() {
        let admin = current(Role::Admin, "");
        assert!(admin.is_admin());
        assert_eq!(admin.own_tenant(), None);
        assert_eq!(admin.scope(None).unwrap(), None);
        assert_eq!(admin.scope(Some("2")).unwrap(), Some("2"));
        assert_eq!(admin.scope(Some("")).unwrap(), None);
    }

    #[test]
    fn test_printable_secret() {
        let a = generate_printable_secret().unwrap();
        let b = generate_printable_secret().unwrap();
        assert_eq!(a.len(), 64);
        assert!(a.len() >= MIN_SECRET_LEN);
        assert_ne!(a, b);
    }
}
