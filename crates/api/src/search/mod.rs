//! Property search orchestration.
//!
//! - [`orchestrator::PropertySearchService`] -- validates criteria, runs the
//!   query, and hands authenticated searches to the recorder.
//! - [`recorder::SearchHistoryRecorder`] -- appends `user_searches` rows off
//!   the request path.

pub mod orchestrator;
pub mod recorder;

pub use orchestrator::{PropertySearchService, SearchOutcome};
pub use recorder::SearchHistoryRecorder;
