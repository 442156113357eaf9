//! Core business logic - framework-agnostic checkout, payment and completion operations.

/// Account registration and lookup
pub mod account;
/// Cart reads and clearing
pub mod cart;
/// Order completion view
pub mod completion;
/// Order placement
pub mod order;
/// Payment confirmation
pub mod payment;
/// Totals and tax arithmetic
pub mod pricing;
/// Catalog writes and stock bookkeeping
pub mod product;
