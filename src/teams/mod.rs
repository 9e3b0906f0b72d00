pub mod classifier;
pub mod table;
pub mod tier;

pub use classifier::{fold_key, Classification, TeamClassifier, UNKNOWN_CONFERENCE};
pub use table::ConferenceTable;
pub use tier::Tier;
