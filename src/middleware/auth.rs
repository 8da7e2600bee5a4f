use axum::{
    extract::{FromRef, FromRequestParts},
    http::header,
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use uuid::Uuid;

use crate::{
    domain::users::UserType,
    dto::auth::Claims,
    error::AppError,
    state::AppState,
};

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: String,
}

impl AuthUser {
    pub fn customer(user_id: Uuid) -> Self {
        Self {
            user_id,
            role: UserType::Customer.as_str().to_string(),
        }
    }

    pub fn business(user_id: Uuid) -> Self {
        Self {
            user_id,
            role: UserType::Business.as_str().to_string(),
        }
    }
}

pub fn ensure_role(user: &AuthUser, role: UserType) -> Result<(), AppError> {
    if user.role != role.as_str() {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub fn ensure_business(user: &AuthUser) -> Result<(), AppError> {
    ensure_role(user, UserType::Business)
}

pub fn ensure_customer(user: &AuthUser) -> Result<(), AppError> {
    ensure_role(user, UserType::Customer)
}

pub fn decode_token(token: &str, secret: &str) -> Result<AuthUser, AppError> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;

    let user_id = Uuid::parse_str(&decoded.claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid user id in token".into()))?;

    Ok(AuthUser {
        user_id,
        role: decoded.claims.role,
    })
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;
    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid Authorization header".into()))?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Invalid Authorization scheme".into()))?
            .trim();

        let app_state = AppState::from_ref(state);
        decode_token(token, &app_state.jwt.secret)
    }
}
