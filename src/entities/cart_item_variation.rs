//! Link table between cart items and the variations selected for them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Cart item / variation link model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cart_item_variations")]
pub struct Model {
    /// Cart item side of the link
    #[sea_orm(primary_key, auto_increment = false)]
    pub cart_item_id: i64,
    /// Variation side of the link
    #[sea_orm(primary_key, auto_increment = false)]
    pub variation_id: i64,
}

/// Both sides of the many-to-many link
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The linked cart item
    #[sea_orm(
        belongs_to = "super::cart_item::Entity",
        from = "Column::CartItemId",
        to = "super::cart_item::Column::Id"
    )]
    CartItem,
    /// The linked variation
    #[sea_orm(
        belongs_to = "super::variation::Entity",
        from = "Column::VariationId",
        to = "super::variation::Column::Id"
    )]
    Variation,
}

impl ActiveModelBehavior for ActiveModel {}
