//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod account;
pub mod cart_item;
pub mod cart_item_variation;
pub mod order;
pub mod order_product;
pub mod order_product_variation;
pub mod payment;
pub mod product;
pub mod variation;

// Re-export specific types to avoid conflicts
pub use account::{Column as AccountColumn, Entity as Account, Model as AccountModel};
pub use cart_item::{Column as CartItemColumn, Entity as CartItem, Model as CartItemModel};
pub use cart_item_variation::{
    Column as CartItemVariationColumn, Entity as CartItemVariation,
    Model as CartItemVariationModel,
};
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel, OrderStatus};
pub use order_product::{
    Column as OrderProductColumn, Entity as OrderProduct, Model as OrderProductModel,
};
pub use order_product_variation::{
    Column as OrderProductVariationColumn, Entity as OrderProductVariation,
    Model as OrderProductVariationModel,
};
pub use payment::{Column as PaymentColumn, Entity as Payment, Model as PaymentModel};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use variation::{Column as VariationColumn, Entity as Variation, Model as VariationModel};
