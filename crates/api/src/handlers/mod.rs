pub mod images;
pub mod portfolio;
pub mod profile;
