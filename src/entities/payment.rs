//! Payment entity - Record of an externally captured payment.
//!
//! Payments are written once, when the payment provider's confirmation is
//! relayed to the shop, and never updated afterwards.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    /// Unique identifier for the payment row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Account that paid
    pub user_id: i64,
    /// Transaction id assigned by the payment provider
    pub payment_id: String,
    /// Provider or method name, e.g. `"PayPal"`
    pub payment_method: String,
    /// Amount captured; copied from the order's grand total
    pub amount_paid: f64,
    /// Provider status string, e.g. `"COMPLETED"`
    pub status: String,
    /// When the confirmation was recorded
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Payment and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each payment belongs to one account
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::UserId",
        to = "super::account::Column::Id"
    )]
    Account,
    /// One payment settles orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
    /// One payment covers many order lines
    #[sea_orm(has_many = "super::order_product::Entity")]
    OrderProducts,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::order_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderProducts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
