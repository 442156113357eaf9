//! Order entity - A checkout submission and, once paid, a finalized purchase.
//!
//! An order is inserted without an order number, then immediately re-saved with
//! `order_number = YYYYMMDD || id`. `is_ordered` flips to true when the payment
//! confirmation for it arrives.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle status stored in [`Model::status`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Placed, not yet handled by the shop
    New,
    /// Accepted by the shop
    Accepted,
    /// Shipped and closed
    Completed,
    /// Cancelled by either side
    Cancelled,
}

impl OrderStatus {
    /// The string persisted in the `status` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Accepted => "Accepted",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Account that placed the order
    pub user_id: i64,
    /// Payment that settled the order, set on confirmation
    pub payment_id: Option<i64>,
    /// Human-readable order number; empty until the first save has produced an id
    pub order_number: String,
    /// Contact first name
    pub first_name: String,
    /// Contact last name
    pub last_name: String,
    /// Contact phone number
    pub phone: String,
    /// Contact email address
    pub email: String,
    /// Shipping address, first line
    pub address_line_1: String,
    /// Shipping address, second line
    pub address_line_2: Option<String>,
    /// Shipping country
    pub country: String,
    /// Shipping state or region
    pub state: String,
    /// Shipping city
    pub city: String,
    /// Free-form note left by the customer
    pub order_note: Option<String>,
    /// Grand total (cart total plus tax) at placement time
    pub order_total: f64,
    /// Tax charged at placement time
    pub tax: f64,
    /// One of the [`OrderStatus`] strings
    pub status: String,
    /// Client address the order was placed from
    pub ip: Option<String>,
    /// True once payment has been confirmed
    pub is_ordered: bool,
    /// When the order was placed
    pub created_at: DateTimeUtc,
    /// When the order was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order belongs to one account
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::UserId",
        to = "super::account::Column::Id"
    )]
    Account,
    /// Each paid order references one payment
    #[sea_orm(
        belongs_to = "super::payment::Entity",
        from = "Column::PaymentId",
        to = "super::payment::Column::Id"
    )]
    Payment,
    /// One order has many order lines
    #[sea_orm(has_many = "super::order_product::Entity")]
    OrderProducts,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payment.def()
    }
}

impl Related<super::order_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderProducts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
