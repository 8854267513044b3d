//! Porto core: portfolio domain model and the client-side admin pipeline.
//!
//! Holds everything that does not depend on a particular store backend or
//! HTTP framework: the item model and its validation, the list/filter view,
//! the image intake pipeline, the store trait with in-memory and timeout
//! wrappers, and the admin session that ties them together.

pub mod admin;
pub mod collection;
pub mod error;
pub mod filter;
pub mod hint;
pub mod image_intake;
pub mod portfolio;
pub mod profile;
pub mod store;
pub mod types;
