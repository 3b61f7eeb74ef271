mod database_id;

pub use database_id::DatabaseId;
