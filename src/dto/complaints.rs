use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Complaint;

#[derive(Debug, Deserialize, ToSchema)]
pub struct FileComplaintRequest {
    pub shop_name: String,
    pub description: String,
    pub issue_type: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReplyComplaintRequest {
    pub reply: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ComplaintList {
    pub items: Vec<Complaint>,
}
