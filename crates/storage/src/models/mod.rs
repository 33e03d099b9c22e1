mod entry;
mod event;
mod meet;
mod race_result;
mod swimmer;

pub use entry::{Entry, EntryStatus};
pub use event::{Event, Stroke};
pub use meet::Meet;
pub use race_result::RaceResult;
pub use swimmer::{OPEN_CLASSIFICATION, Swimmer, format_athlete_id};

#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
