use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "shop_feedback")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub shop_id: Uuid,
    pub shop_name: String,
    pub name: String,
    pub description: String,
    pub rating: i16,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::repair_shops::Entity",
        from = "Column::ShopId",
        to = "super::repair_shops::Column::Id"
    )]
    RepairShops,
}

impl Related<super::repair_shops::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RepairShops.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
