//! Order product entity - A purchased line, snapshotted from a cart item.
//!
//! The price is copied from the product at payment time so later catalog price
//! changes do not alter past orders. Selected variations are linked through
//! `order_product_variations`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order line database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_products")]
pub struct Model {
    /// Unique identifier for the order line
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Order this line belongs to
    pub order_id: i64,
    /// Payment that covered this line
    pub payment_id: Option<i64>,
    /// Account that bought the line
    pub user_id: i64,
    /// Product bought
    pub product_id: i64,
    /// Units bought
    pub quantity: i32,
    /// Unit price at purchase time
    pub product_price: f64,
    /// True once the line is part of a paid order
    pub ordered: bool,
    /// When the line was created
    pub created_at: DateTimeUtc,
    /// When the line was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between `OrderProduct` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line belongs to one order
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id"
    )]
    Order,
    /// Each line is covered by one payment
    #[sea_orm(
        belongs_to = "super::payment::Entity",
        from = "Column::PaymentId",
        to = "super::payment::Column::Id"
    )]
    Payment,
    /// Each line references one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
    /// Each line belongs to one account
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::UserId",
        to = "super::account::Column::Id"
    )]
    Account,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payment.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

/// Order lines reach their variations through `order_product_variations`.
impl Related<super::variation::Entity> for Entity {
    fn to() -> RelationDef {
        super::order_product_variation::Relation::Variation.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::order_product_variation::Relation::OrderProduct.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
