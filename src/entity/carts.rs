use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "carts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub customer: String,
    pub paid: bool,
    pub payment_date: Option<Date>,
    pub total: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::products_in_carts::Entity")]
    ProductsInCarts,
}

impl Related<super::products_in_carts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductsInCarts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
