pub mod connection;
pub mod datastore;
pub mod response;
pub mod rpc_error;
pub(crate) mod structured_query;

pub use connection::{Connection, ConnectionBuilder};
pub use datastore::{Datastore, HttpDatastore, HttpDatastoreBuilder, InMemoryDatastore};
pub use response::parse_response;
pub use rpc_error::RemoteErrorDetail;
