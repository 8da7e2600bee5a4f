use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Tutorial;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTutorialRequest {
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub duration: String,
    /// Free-text list of the tools the tutorial needs.
    #[serde(default)]
    pub tools: String,
    #[serde(default)]
    pub description: String,
    pub video_url: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateTutorialRequest {
    pub title: Option<String>,
    pub category: Option<String>,
    pub duration: Option<String>,
    pub tools: Option<String>,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct TutorialList {
    #[schema(value_type = Vec<Tutorial>)]
    pub items: Vec<Tutorial>,
}
