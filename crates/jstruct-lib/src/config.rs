//! Per-file resource limits and batch options.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::{Duration, Instant};

pub const DEFAULT_EXEC_FUEL: u32 = 4_000_000;
pub const DEFAULT_RECURSION_FUEL: u32 = 256;
pub const DEFAULT_MAX_LEX_ERRORS: usize = 64;

/// Processing options shared by every file of a batch.
///
/// Fuel and deadline limits apply to each file separately; exhausting one
/// aborts that file only.
#[derive(Debug, Clone)]
pub struct Config {
    /// Token operations per file. `None` = unbounded.
    pub exec_fuel: Option<u32>,
    /// Type declaration / annotation nesting depth. `None` = unbounded.
    pub recursion_fuel: Option<u32>,
    /// Lexer diagnostics reported per file before going quiet.
    pub max_lex_errors: usize,
    /// Wall-clock budget per file, measured from the start of its parse.
    pub timeout: Option<Duration>,
    /// Checked periodically while parsing; set to `true` to abort.
    pub cancellation: Option<Arc<AtomicBool>>,
    /// Parse files on the rayon thread pool.
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exec_fuel: Some(DEFAULT_EXEC_FUEL),
            recursion_fuel: Some(DEFAULT_RECURSION_FUEL),
            max_lex_errors: DEFAULT_MAX_LEX_ERRORS,
            timeout: None,
            cancellation: None,
            parallel: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set execution fuel limit. None = infinite.
    ///
    /// Execution fuel never replenishes. It protects against large inputs.
    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.exec_fuel = limit;
        self
    }

    /// Set recursion depth limit. None = infinite.
    ///
    /// Recursion fuel restores when exiting recursion. It protects against
    /// deeply nested input.
    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.recursion_fuel = limit;
        self
    }

    pub fn with_max_lex_errors(mut self, limit: usize) -> Self {
        self.max_lex_errors = limit;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancellation = Some(flag);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Deadline for a parse starting now.
    pub fn deadline(&self) -> Option<Instant> {
        self.timeout.map(|timeout| Instant::now() + timeout)
    }
}
