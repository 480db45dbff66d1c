pub mod grouped;
pub mod standings;
pub mod submission;

pub use grouped::{ClassGroup, GroupedResults, HandicapGroup};
pub use standings::{ClassStandings, RaceScore, Standing};
pub use submission::{BulkReport, ResultEdit, ResultSubmission};
