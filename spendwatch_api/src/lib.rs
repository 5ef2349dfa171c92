mod client;
mod errors;
mod query;
pub mod types;
pub use self::client::{Client, Credentials};
pub use self::errors::Error;
pub use self::query::{Column, FilterOp, Query, Resource, SortDirection, SpendQuery};
