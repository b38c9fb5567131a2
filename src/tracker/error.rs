use thiserror::Error;

use crate::logbook::LogbookError;
use crate::navigation::NavigationError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackerError {
    #[error(transparent)]
    InvalidInput(#[from] NavigationError),
    #[error(transparent)]
    Logbook(#[from] LogbookError),
}
