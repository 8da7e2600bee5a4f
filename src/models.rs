use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{domain::catalog::Categorized, entity};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub address: String,
    pub photo_url: Option<String>,
    pub user_type: String,
    pub shop_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RepairShop {
    pub id: Uuid,
    pub user_id: Uuid,
    pub shop_name: String,
    pub category: String,
    pub description: String,
    pub owner_name: String,
    pub hourly_rate: i64,
    pub tag: Option<String>,
    pub contact: String,
    pub image_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Tool {
    pub id: Uuid,
    pub user_id: Uuid,
    pub shop_id: Uuid,
    pub name: String,
    pub category: String,
    pub price: i64,
    pub description: String,
    pub image_url: Option<String>,
    pub upload_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Tutorial {
    pub id: Uuid,
    pub user_id: Uuid,
    pub shop_id: Uuid,
    pub title: String,
    pub category: String,
    pub duration: String,
    pub tools: String,
    pub description: String,
    pub video_url: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Appointment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub shop_id: Uuid,
    pub shop_name: String,
    pub date: NaiveDate,
    #[schema(value_type = String, example = "14:30:00")]
    pub time: NaiveTime,
    pub rate: i64,
    pub status: String,
    pub estimated_time: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Complaint {
    pub id: Uuid,
    pub complaint_code: i32,
    pub shop_name: String,
    pub shop_id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    pub issue_type: String,
    pub image_url: Option<String>,
    pub status: String,
    pub reply: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Feedback {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub content: String,
    pub rating: i16,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShopFeedback {
    pub id: Uuid,
    pub user_id: Uuid,
    pub shop_id: Uuid,
    pub shop_name: String,
    pub name: String,
    pub description: String,
    pub rating: i16,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentMethod {
    pub id: Uuid,
    pub card_type: String,
    pub last4: String,
    pub nickname: Option<String>,
    pub exp_month: i16,
    pub exp_year: i16,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct CartItem {
    pub id: Uuid,
    pub tool_id: Uuid,
    pub user_id: Uuid,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub payment_method_id: Option<Uuid>,
    pub total_amount: i64,
    pub status: String,
    pub invoice_number: String,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub tool_id: Option<Uuid>,
    pub tool_name: String,
    pub quantity: i32,
    pub price: i64,
    pub created_at: DateTime<Utc>,
}

impl Categorized for Tool {
    fn category(&self) -> &str {
        &self.category
    }
}

impl Categorized for Tutorial {
    fn category(&self) -> &str {
        &self.category
    }
}

impl From<entity::users::Model> for User {
    fn from(model: entity::users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            mobile: model.mobile,
            address: model.address,
            photo_url: model.photo_url,
            user_type: model.user_type,
            shop_name: model.shop_name,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<entity::repair_shops::Model> for RepairShop {
    fn from(model: entity::repair_shops::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            shop_name: model.shop_name,
            category: model.category,
            description: model.description,
            owner_name: model.owner_name,
            hourly_rate: model.hourly_rate,
            tag: model.tag,
            contact: model.contact,
            image_url: model.image_url,
            latitude: model.latitude,
            longitude: model.longitude,
            is_available: model.is_available,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

impl From<entity::tools::Model> for Tool {
    fn from(model: entity::tools::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            shop_id: model.shop_id,
            name: model.name,
            category: model.category,
            price: model.price,
            description: model.description,
            image_url: model.image_url,
            upload_time: model.upload_time.with_timezone(&Utc),
        }
    }
}

impl From<entity::tutorials::Model> for Tutorial {
    fn from(model: entity::tutorials::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            shop_id: model.shop_id,
            title: model.title,
            category: model.category,
            duration: model.duration,
            tools: model.tools,
            description: model.description,
            video_url: model.video_url,
            image_url: model.image_url,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<entity::appointments::Model> for Appointment {
    fn from(model: entity::appointments::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            shop_id: model.shop_id,
            shop_name: model.shop_name,
            date: model.date,
            time: model.time,
            rate: model.rate,
            status: model.status,
            estimated_time: model.estimated_time,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

impl From<entity::complaints::Model> for Complaint {
    fn from(model: entity::complaints::Model) -> Self {
        Self {
            id: model.id,
            complaint_code: model.complaint_code,
            shop_name: model.shop_name,
            shop_id: model.shop_id,
            user_id: model.user_id,
            description: model.description,
            issue_type: model.issue_type,
            image_url: model.image_url,
            status: model.status,
            reply: model.reply,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

impl From<entity::feedback::Model> for Feedback {
    fn from(model: entity::feedback::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            content: model.content,
            rating: model.rating,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<entity::shop_feedback::Model> for ShopFeedback {
    fn from(model: entity::shop_feedback::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            shop_id: model.shop_id,
            shop_name: model.shop_name,
            name: model.name,
            description: model.description,
            rating: model.rating,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<entity::payment_methods::Model> for PaymentMethod {
    fn from(model: entity::payment_methods::Model) -> Self {
        Self {
            id: model.id,
            card_type: model.card_type,
            last4: model.last4,
            nickname: model.nickname,
            exp_month: model.exp_month,
            exp_year: model.exp_year,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<entity::cart_items::Model> for CartItem {
    fn from(model: entity::cart_items::Model) -> Self {
        Self {
            id: model.id,
            tool_id: model.tool_id,
            user_id: model.user_id,
            quantity: model.quantity,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<entity::orders::Model> for Order {
    fn from(model: entity::orders::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            payment_method_id: model.payment_method_id,
            total_amount: model.total_amount,
            status: model.status,
            invoice_number: model.invoice_number,
            paid_at: model.paid_at.map(|dt| dt.with_timezone(&Utc)),
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<entity::order_items::Model> for OrderItem {
    fn from(model: entity::order_items::Model) -> Self {
        Self {
            id: model.id,
            order_id: model.order_id,
            tool_id: model.tool_id,
            tool_name: model.tool_name,
            quantity: model.quantity,
            price: model.price,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
