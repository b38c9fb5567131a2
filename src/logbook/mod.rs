mod error;
mod position_log;

pub use error::LogbookError;
pub use position_log::PositionLog;
