use std::fmt;

/// Reasons a simulation refuses to start.
///
/// Construction is the only fallible stage: once a [`crate::Simulation`]
/// exists every tick runs to completion.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A configuration value is out of its accepted range.
    InvalidConfig(&'static str),
    /// A body spec at `index` breaks a body invariant.
    InvalidBody { index: usize, reason: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidConfig(reason) => write!(f, "invalid configuration: {reason}"),
            ConfigError::InvalidBody { index, reason } => {
                write!(f, "invalid body spec #{index}: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
