//! Link table between order lines and the variations chosen for them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order line / variation link model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_product_variations")]
pub struct Model {
    /// Order line side of the link
    #[sea_orm(primary_key, auto_increment = false)]
    pub order_product_id: i64,
    /// Variation side of the link
    #[sea_orm(primary_key, auto_increment = false)]
    pub variation_id: i64,
}

/// Both sides of the many-to-many link
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The linked order line
    #[sea_orm(
        belongs_to = "super::order_product::Entity",
        from = "Column::OrderProductId",
        to = "super::order_product::Column::Id"
    )]
    OrderProduct,
    /// The linked variation
    #[sea_orm(
        belongs_to = "super::variation::Entity",
        from = "Column::VariationId",
        to = "super::variation::Column::Id"
    )]
    Variation,
}

impl ActiveModelBehavior for ActiveModel {}
