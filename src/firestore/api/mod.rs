pub mod document;
pub mod query;

pub use document::{decode_all, decode_fields, Document, RawDocument};
pub use query::{CollectionSelector, Filter, FilterOperator, Filters, Query};
