//! dto2ts-logging - Logging setup for dto2ts hosts
//!
//! This crate provides:
//! - [`init_logging`] installing a stderr formatter behind a reloadable level filter
//! - [`ReloadHandle`] for changing the level after startup
//! - [`DiagnosticsLayer`] and [`Diagnostics`] counting the warnings a run produced

mod diagnostics;
mod layer;
mod reload;

pub use diagnostics::{Diagnostic, Diagnostics};
pub use dto2ts_core::LogLevel;
pub use layer::{DiagnosticsLayer, init_logging};
pub use reload::ReloadHandle;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{Diagnostics, DiagnosticsLayer, LogLevel, ReloadHandle, init_logging};
}
