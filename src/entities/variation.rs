//! Variation entity - A selectable attribute of a product such as a size or color.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Variation database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "variations")]
pub struct Model {
    /// Unique identifier for the variation
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Product this variation belongs to
    pub product_id: i64,
    /// Attribute family, e.g. `"color"` or `"size"`
    pub category: String,
    /// Attribute value, e.g. `"red"` or `"XL"`
    pub value: String,
    /// Inactive variations are hidden from the storefront
    pub is_active: bool,
}

/// Defines relationships between Variation and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each variation belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
