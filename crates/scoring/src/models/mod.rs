pub mod class;
pub mod elapsed;
pub mod event;
pub mod race;
pub mod result;
pub mod snapshot;
pub mod status;

pub use class::{Class, ONE_DESIGN_LABEL, UNKNOWN_CLASS_LABEL};
pub use elapsed::{ElapsedTime, format_seconds};
pub use event::{DiscardPolicy, Event};
pub use race::{HandicapSystem, HandicapTag, HandicapType, Race, ScoringSystem};
pub use result::{GroupKey, RaceResult, cmp_corrected};
pub use snapshot::Snapshot;
pub use status::PenaltyCode;
