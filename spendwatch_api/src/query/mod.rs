mod common;
pub use self::common::{FilterOp, Query, SortDirection};

mod spend;
pub use self::spend::{Column, Resource, SpendQuery};
