//! Cart item entity - One product line in a customer's open cart.
//!
//! Cart items are the source of order lines. They are deleted once the order
//! they fed has been paid.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Cart item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cart_items")]
pub struct Model {
    /// Unique identifier for the cart item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Account that owns the cart
    pub user_id: i64,
    /// Product being bought
    pub product_id: i64,
    /// Number of units
    pub quantity: i32,
    /// When the item was added to the cart
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `CartItem` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each cart item belongs to one account
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::UserId",
        to = "super::account::Column::Id"
    )]
    Account,
    /// Each cart item references one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

/// Cart items reach their selected variations through `cart_item_variations`.
impl Related<super::variation::Entity> for Entity {
    fn to() -> RelationDef {
        super::cart_item_variation::Relation::Variation.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::cart_item_variation::Relation::CartItem.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
