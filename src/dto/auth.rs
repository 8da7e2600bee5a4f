use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::users::UserType;

#[derive(Deserialize, Debug, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub mobile: String,
    #[serde(default)]
    pub address: String,
    pub photo_url: Option<String>,
    pub user_type: UserType,
    /// Required when `user_type` is `business`.
    pub shop_name: Option<String>,
    pub password: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user_type: String,
}

#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub mobile: Option<String>,
    pub address: Option<String>,
    pub photo_url: Option<String>,
    pub shop_name: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}
