use sea_orm::entity::prelude::*;

/// SeaORM entity for the append-only api_logs table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "api_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub request_id: String,
    pub method: String,
    pub action_name: String,
    /// Serialized request parameters (JSON)
    pub body: String,
    /// Decoded token claims (JSON)
    pub claims: String,
    #[sea_orm(indexed)]
    pub subject: String,
    pub ip_address: Option<String>,
    /// RFC 3339 timestamp
    #[sea_orm(indexed)]
    pub collected_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
