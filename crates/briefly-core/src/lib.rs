pub mod config;
pub mod controller;
pub mod error;
pub mod picker;
pub mod style;
pub mod summary;
pub mod validate;

pub use config::BrieflyConfig;
pub use controller::{Completion, RequestState, Session, SubmitError, Summarizer};
pub use error::{BrieflyError, Result};
pub use style::SummaryStyle;
pub use summary::{SummaryRequest, SummaryResponse, SummaryResult};
pub use validate::ValidationError;
