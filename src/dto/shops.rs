use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::reviews::RatingSummary,
    models::{RepairShop, Tool, Tutorial},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateShopRequest {
    pub shop_name: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub owner_name: String,
    pub hourly_rate: i64,
    pub tag: Option<String>,
    pub contact: String,
    pub image_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateShopRequest {
    pub shop_name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub owner_name: Option<String>,
    pub hourly_rate: Option<i64>,
    pub tag: Option<String>,
    pub contact: Option<String>,
    pub image_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AvailabilityRequest {
    pub is_available: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ShopList {
    pub items: Vec<RepairShop>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ShopDetail {
    pub shop: RepairShop,
    pub rating: RatingSummary,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ShopCatalog {
    pub tools: Vec<Tool>,
    pub tutorials: Vec<Tutorial>,
}
