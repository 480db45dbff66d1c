pub mod corrected_time;
pub mod grouping;
pub mod ledger;
pub mod points;
pub mod positions;
pub mod series;

pub use corrected_time::{correct_for_race, corrected_time};
pub use grouping::{class_label, group_results};
pub use ledger::ResultLedger;
pub use points::{assign_points, finisher_points};
pub use positions::{positions_are_consistent, recompute_positions};
pub use series::{class_standings, discarded_indices, overall_standings, series_total, standings};
