// Request/response models exposed through the OpenAPI layer
pub mod audit;
pub mod auth;
pub mod common;
pub mod images;
