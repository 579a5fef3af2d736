use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "carts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "Decimal(None)")]
    pub total: Decimal,
    pub finalized: bool,
    pub finalized_at: Option<DateTimeWithTimeZone>,
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
