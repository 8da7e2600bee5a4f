use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "appointments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub shop_id: Uuid,
    pub shop_name: String,
    pub date: Date,
    pub time: Time,
    pub rate: i64,
    pub status: String,
    pub estimated_time: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::repair_shops::Entity",
        from = "Column::ShopId",
        to = "super::repair_shops::Column::Id"
    )]
    RepairShops,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::repair_shops::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RepairShops.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
