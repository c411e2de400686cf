use iceoryx2_bb_log::{LogLevel, set_log_level};
use std::env::var;

/// Environment variable selecting the log level.
pub const LOG_LEVEL_VARIABLE: &str = "TFORTH_LOG_LEVEL";

/// Environment variable that, when set to 1 or true, keeps primitive output in memory.
pub const CAPTURE_OUTPUT_VARIABLE: &str = "TFORTH_CAPTURE_OUTPUT";

/// Settings for a runtime instance.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// How chatty the diagnostics should be.
    pub log_level: LogLevel,

    /// Send the print and newline words' text to an in-memory buffer instead of stdout.
    pub capture_output: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            log_level: LogLevel::Warn,
            capture_output: false,
        }
    }
}

impl RuntimeConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> RuntimeConfig {
        RuntimeConfig::from_lookup(|key| var(key).ok())
    }

    /// Read the configuration through an arbitrary key lookup.  Unset or unrecognized values fall
    /// back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> RuntimeConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = RuntimeConfig::default();

        let log_level = lookup(LOG_LEVEL_VARIABLE)
            .and_then(|text| parse_log_level(&text))
            .unwrap_or(defaults.log_level);

        let capture_output = lookup(CAPTURE_OUTPUT_VARIABLE)
            .map(|text| matches!(text.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(defaults.capture_output);

        RuntimeConfig {
            log_level,
            capture_output,
        }
    }

    /// Install the configured log level for the whole process.
    pub fn apply_log_level(&self) {
        set_log_level(self.log_level);
    }
}

/// Map a level name onto the logger's levels.
pub fn parse_log_level(text: &str) -> Option<LogLevel> {
    match text.trim().to_lowercase().as_str() {
        "trace" => Some(LogLevel::Trace),
        "debug" => Some(LogLevel::Debug),
        "info" => Some(LogLevel::Info),
        "warn" | "warning" => Some(LogLevel::Warn),
        "error" => Some(LogLevel::Error),
        "fatal" => Some(LogLevel::Fatal),
        _ => None,
    }
}
