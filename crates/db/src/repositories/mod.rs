//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod portfolio_item_repo;

pub use portfolio_item_repo::PortfolioItemRepo;
