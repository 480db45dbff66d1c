//! Scoring and results engine for sailing regattas.
//!
//! The engine is handed in-memory collections of events, races, classes and
//! results, and returns them with corrected times, positions and points
//! filled in. Series standings and filtered result views are computed on
//! demand. Nothing here touches storage or the network.

pub mod dto;
pub mod error;
pub mod filter;
pub mod models;
pub mod services;

pub use error::{Result, ScoringError};
pub use filter::{Comparison, FilterOp, HandicapFilter};
pub use services::ResultLedger;
