mod ledger;
mod view;

pub use ledger::{
    format_eta, format_eta_duration, format_timestamp, ledger, LedgerRow, TIMESTAMP_FORMAT,
};
pub use view::{Marker, MarkerKind, RouteLabels, RouteView};
