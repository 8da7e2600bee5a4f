use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::reviews::RatingSummary,
    models::{Feedback, ShopFeedback},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFeedbackRequest {
    pub name: String,
    pub content: String,
    pub rating: i16,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateShopFeedbackRequest {
    pub name: String,
    pub description: String,
    pub rating: i16,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FeedbackList {
    pub items: Vec<Feedback>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ShopFeedbackList {
    pub items: Vec<ShopFeedback>,
    pub summary: RatingSummary,
}
