pub mod aggregate;
pub mod breakdown;
pub mod cli;
pub mod error;
pub mod generate;
pub mod git;
pub mod model;
pub mod nav;
pub mod records;
pub mod tui;
pub mod util;
pub mod view;

pub use aggregate::aggregate;
pub use error::{BugmapError, Result};
pub use model::{Breakdown, ChildEntry, DateRange, Record};
pub use nav::Navigation;
pub use records::{load_records, parse_records, ParsedRecords};
