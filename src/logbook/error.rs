use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogbookError {
    #[error("logbook capacity exceeded after {0} entries")]
    CapacityExceeded(usize),
}
