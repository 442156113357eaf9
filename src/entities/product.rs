//! Product entity - Catalog items that can be placed in a cart.
//!
//! The checkout flow reads `price` when snapshotting order lines and decrements
//! `stock` once an order is paid. Stock is signed: it is never clamped at zero.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name of the product (e.g., "Denim Jacket")
    pub name: String,
    /// Current unit price
    pub price: f64,
    /// Units on hand; may go negative after overselling
    pub stock: i32,
    /// When the product was created
    pub created_at: DateTime,
    /// When the product was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One product has many selectable variations
    #[sea_orm(has_many = "super::variation::Entity")]
    Variations,
    /// One product appears in many cart items
    #[sea_orm(has_many = "super::cart_item::Entity")]
    CartItems,
    /// One product appears in many order lines
    #[sea_orm(has_many = "super::order_product::Entity")]
    OrderProducts,
}

impl Related<super::variation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Variations.def()
    }
}

impl Related<super::cart_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CartItems.def()
    }
}

impl Related<super::order_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderProducts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
