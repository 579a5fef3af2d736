use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub specification: String,
    #[sea_orm(column_type = "Decimal(None)")]
    pub price: Decimal,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::cart_line_items::Entity")]
    CartLineItems,
}

impl Related<super::cart_line_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CartLineItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
