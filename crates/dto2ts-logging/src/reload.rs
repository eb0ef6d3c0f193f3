//! Dynamic log level reloading support

use dto2ts_core::{GenerateError, GenerateResult, LogLevel};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::reload;

type FilterHandle = reload::Handle<LevelFilter, tracing_subscriber::Registry>;

/// Handle for changing the active level filter after [`crate::init_logging`]
pub struct ReloadHandle {
    handle: Mutex<Option<FilterHandle>>,
    level: Mutex<Option<LogLevel>>,
}

impl ReloadHandle {
    pub fn new() -> Self {
        Self {
            handle: Mutex::new(None),
            level: Mutex::new(None),
        }
    }

    /// Get the global reload handle
    pub fn global() -> &'static ReloadHandle {
        static INSTANCE: OnceCell<ReloadHandle> = OnceCell::new();
        INSTANCE.get_or_init(ReloadHandle::new)
    }

    pub(crate) fn set_handle(&self, handle: FilterHandle, level: LogLevel) {
        *self.handle.lock() = Some(handle);
        *self.level.lock() = Some(level);
    }

    pub fn is_initialized(&self) -> bool {
        self.handle.lock().is_some()
    }

    /// Level most recently applied, if logging was initialized
    pub fn current_level(&self) -> Option<LogLevel> {
        *self.level.lock()
    }

    /// Swap the filter to `level`
    pub fn reload_level(&self, level: LogLevel) -> GenerateResult<()> {
        let guard = self.handle.lock();
        let handle = guard.as_ref().ok_or_else(|| {
            GenerateError::ConfigError("logging has not been initialized".to_string())
        })?;
        handle
            .reload(level_filter(level))
            .map_err(|e| GenerateError::ConfigError(format!("failed to reload filter: {e}")))?;
        *self.level.lock() = Some(level);
        Ok(())
    }
}

impl Default for ReloadHandle {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Trace => LevelFilter::TRACE,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Off => LevelFilter::OFF,
    }
}
