//! Core types: time periods, analysis results, sessions, tracing

pub mod analysis;
pub mod period;
pub mod session;
pub mod tracing;

pub use analysis::{AnalysisResult, MeetingStats, StatValue};
pub use period::{PeriodParseError, TimePeriod};
pub use session::{Session, UserProfile};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
