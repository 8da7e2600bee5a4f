use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Tool;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateToolRequest {
    pub name: String,
    pub category: String,
    pub price: i64,
    #[serde(default)]
    pub description: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateToolRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<i64>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ToolList {
    #[schema(value_type = Vec<Tool>)]
    pub items: Vec<Tool>,
}
