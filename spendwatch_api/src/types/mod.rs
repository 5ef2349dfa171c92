mod spend;
pub use self::spend::{SpendRecord, NO_CAMPAIGN};
