//! Collected warnings and errors

use dto2ts_core::LogLevel;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Messages kept beyond this are only counted
const MAX_RETAINED: usize = 64;

static DIAGNOSTICS: OnceCell<Diagnostics> = OnceCell::new();

/// One recorded warning or error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: LogLevel,
    pub target: String,
    pub message: String,
}

/// Running tally of warn and error events
pub struct Diagnostics {
    warnings: AtomicUsize,
    errors: AtomicUsize,
    recent: RwLock<Vec<Diagnostic>>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            warnings: AtomicUsize::new(0),
            errors: AtomicUsize::new(0),
            recent: RwLock::new(Vec::new()),
        }
    }

    /// Get the process-wide instance fed by [`crate::DiagnosticsLayer::new`]
    pub fn global() -> &'static Diagnostics {
        DIAGNOSTICS.get_or_init(Diagnostics::new)
    }

    /// Record an event; levels below `Warn` are ignored
    pub fn record(&self, level: LogLevel, target: &str, message: &str) {
        match level {
            LogLevel::Warn => self.warnings.fetch_add(1, Ordering::SeqCst),
            LogLevel::Error => self.errors.fetch_add(1, Ordering::SeqCst),
            _ => return,
        };

        let mut recent = self.recent.write();
        if recent.len() < MAX_RETAINED {
            recent.push(Diagnostic {
                level,
                target: target.to_string(),
                message: message.to_string(),
            });
        }
    }

    pub fn warnings(&self) -> usize {
        self.warnings.load(Ordering::SeqCst)
    }

    pub fn errors(&self) -> usize {
        self.errors.load(Ordering::SeqCst)
    }

    /// Retained diagnostics in arrival order
    pub fn recent(&self) -> Vec<Diagnostic> {
        self.recent.read().clone()
    }

    pub fn is_clean(&self) -> bool {
        self.warnings() == 0 && self.errors() == 0
    }

    /// Forget everything recorded so far
    pub fn reset(&self) {
        self.warnings.store(0, Ordering::SeqCst);
        self.errors.store(0, Ordering::SeqCst);
        self.recent.write().clear();
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}
