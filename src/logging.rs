//! Operator-facing output gated by verbosity

/// Output verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Suppress all output except warnings
    Quiet,
    /// Epoch lines and checkpoint notices
    #[default]
    Normal,
    /// Per-step detail
    Verbose,
}

impl LogLevel {
    /// Level from the global `--verbose`/`--quiet` flags
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            LogLevel::Quiet
        } else if verbose {
            LogLevel::Verbose
        } else {
            LogLevel::Normal
        }
    }

    /// Whether a message at `required` is printed at this level
    pub fn permits(self, required: LogLevel) -> bool {
        match self {
            LogLevel::Quiet => false,
            LogLevel::Normal => required != LogLevel::Verbose,
            LogLevel::Verbose => true,
        }
    }
}

/// Log a message if the current level permits it
pub fn log(level: LogLevel, required: LogLevel, msg: &str) {
    if level.permits(required) {
        println!("{msg}");
    }
}

/// Warnings go to stderr regardless of level
pub fn warn(msg: &str) {
    eprintln!("warning: {msg}");
}
