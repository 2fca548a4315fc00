// Database entities - SeaORM models
pub mod api_log;
pub mod user;
