use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::OsRng;
use sqlx::FromRow;
use uuid::Uuid;

use crate::{
    audit::record,
    domain::users::UserType,
    dto::auth::{Claims, LoginRequest, LoginResponse, RegisterRequest, UpdateProfileRequest},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::User,
    response::{ApiResponse, Meta},
    state::AppState,
    validation::{MIN_PASSWORD_LEN, require_email, require_mobile, require_non_empty},
};

const EMAIL_TAKEN: &str = "Email is already taken";

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    mobile: String,
    address: String,
    photo_url: Option<String>,
    user_type: String,
    shop_name: Option<String>,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            mobile: row.mobile,
            address: row.address,
            photo_url: row.photo_url,
            user_type: row.user_type,
            shop_name: row.shop_name,
            created_at: row.created_at,
        }
    }
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

fn validate_registration(payload: &RegisterRequest) -> AppResult<()> {
    require_non_empty("name", &payload.name)?;
    require_email(&payload.email)?;
    require_mobile(&payload.mobile)?;
    if payload.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if payload.user_type == UserType::Business {
        require_non_empty("shop_name", payload.shop_name.as_deref().unwrap_or_default())?;
    }
    Ok(())
}

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<User>> {
    validate_registration(&payload)?;
    let email = payload.email.trim().to_lowercase();

    let exist: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(email.as_str())
        .fetch_optional(&state.pool)
        .await?;

    if exist.is_some() {
        return Err(AppError::bad_request(EMAIL_TAKEN));
    }

    let password_hash = hash_password(&payload.password)?;
    let shop_name = match payload.user_type {
        UserType::Business => payload.shop_name,
        UserType::Customer => None,
    };

    let row: UserRow = sqlx::query_as(
        r#"
        INSERT INTO users (id, name, email, mobile, address, photo_url, user_type, shop_name, password_hash)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(payload.name.trim())
    .bind(email.as_str())
    .bind(payload.mobile)
    .bind(payload.address)
    .bind(payload.photo_url)
    .bind(payload.user_type.as_str())
    .bind(shop_name)
    .bind(password_hash)
    .fetch_one(&state.pool)
    .await
    .map_err(|err| AppError::from(err).unique_as_bad_request(EMAIL_TAKEN))?;

    let user = User::from(row);
    tracing::info!(user_id = %user.id, user_type = %user.user_type, "user registered");
    record(
        &state.pool,
        user.id,
        "user_register",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success("User created", user, None))
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { email, password } = payload;
    let user: Option<UserRow> = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = $1")
        .bind(email.trim().to_lowercase())
        .fetch_optional(&state.pool)
        .await?;

    let user = match user {
        Some(u) => u,
        None => return Err(AppError::Unauthorized("Invalid email or password".into())),
    };

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    if Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(AppError::Unauthorized("Invalid email or password".into()));
    }

    let token = issue_token(state, user.id, &user.user_type)?;

    record(
        &state.pool,
        user.id,
        "user_login",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Logged in",
        LoginResponse {
            token: format!("Bearer {}", token),
            user_type: user.user_type,
        },
        Some(Meta::empty()),
    ))
}

pub fn issue_token(state: &AppState, user_id: Uuid, role: &str) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(state.jwt.ttl_hours))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user_id.to_string(),
        role: role.to_string(),
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.jwt.secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub async fn get_profile(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<User>> {
    let row: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(user.user_id)
        .fetch_optional(&state.pool)
        .await?;
    let row = row.ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Profile", User::from(row), None))
}

pub async fn update_profile(
    state: &AppState,
    user: &AuthUser,
    payload: UpdateProfileRequest,
) -> AppResult<ApiResponse<User>> {
    if let Some(name) = payload.name.as_deref() {
        require_non_empty("name", name)?;
    }
    if let Some(mobile) = payload.mobile.as_deref() {
        require_mobile(mobile)?;
    }
    if let Some(shop_name) = payload.shop_name.as_deref() {
        require_non_empty("shop_name", shop_name)?;
    }

    let existing: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(user.user_id)
        .fetch_optional(&state.pool)
        .await?;
    let existing = existing.ok_or(AppError::NotFound)?;

    if payload.shop_name.is_some() && existing.user_type != UserType::Business.as_str() {
        return Err(AppError::bad_request("Only business accounts have a shop name"));
    }

    let name = payload.name.unwrap_or(existing.name);
    let mobile = payload.mobile.unwrap_or(existing.mobile);
    let address = payload.address.unwrap_or(existing.address);
    let photo_url = payload.photo_url.or(existing.photo_url);
    let shop_name = payload.shop_name.or(existing.shop_name);

    let row: UserRow = sqlx::query_as(
        r#"
        UPDATE users
        SET name = $2, mobile = $3, address = $4, photo_url = $5, shop_name = $6
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user.user_id)
    .bind(name)
    .bind(mobile)
    .bind(address)
    .bind(photo_url)
    .bind(shop_name)
    .fetch_one(&state.pool)
    .await?;

    record(
        &state.pool,
        user.user_id,
        "profile_update",
        "users",
        serde_json::json!({ "user_id": user.user_id }),
    )
    .await;

    Ok(ApiResponse::success("Profile updated", User::from(row), None))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(user_type: UserType, shop_name: Option<&str>) -> RegisterRequest {
        RegisterRequest {
            name: "Sam".into(),
            email: "sam@example.com".into(),
            mobile: "0123456789".into(),
            address: String::new(),
            photo_url: None,
            user_type,
            shop_name: shop_name.map(str::to_string),
            password: "secret1".into(),
        }
    }

    #[test]
    fn business_registration_needs_shop_name() {
        assert!(validate_registration(&request(UserType::Business, None)).is_err());
        assert!(validate_registration(&request(UserType::Business, Some("Fixers"))).is_ok());
        assert!(validate_registration(&request(UserType::Customer, None)).is_ok());
    }

    #[test]
    fn registration_checks_contact_details() {
        let mut req = request(UserType::Customer, None);
        req.email = "sam@example".into();
        assert!(validate_registration(&req).is_err());

        let mut req = request(UserType::Customer, None);
        req.mobile = "12345".into();
        assert!(validate_registration(&req).is_err());

        let mut req = request(UserType::Customer, None);
        req.password = "abc".into();
        assert!(validate_registration(&req).is_err());
    }

    #[test]
    fn hashed_password_verifies() {
        let hash = hash_password("hunter22").unwrap();
        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(Argon2::default().verify_password(b"hunter22", &parsed).is_ok());
        assert!(Argon2::default().verify_password(b"wrong", &parsed).is_err());
    }
}
