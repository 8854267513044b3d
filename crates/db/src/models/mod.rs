//! Row structs mapping database tables onto core domain types.

pub mod portfolio_item;
