//! Registration-time validation.
//!
//! All programmer-facing configuration mistakes are rejected eagerly,
//! when a command or option is registered, never at parse time.

use thiserror::Error;

use crate::types::Signature;

/// Result alias for registration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while registering commands, options, and sub-programs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A global option was registered without a leading dash.
    #[error("global option '{0}' must start with a dash")]
    PositionalGlobalOption(String),

    /// A global option was registered with no spellings at all.
    #[error("global option requires at least one spelling")]
    EmptyOptionStrings,

    /// An option's storage name collides with an existing name at the
    /// same level.
    #[error("option destination '{0}' clashes with an existing name")]
    DuplicateOptionDest(String),

    /// A sub-program name collides with an existing name at the same
    /// level.
    #[error("sub-program '{0}' clashes with an existing name")]
    DuplicateSubprogram(String),

    /// A command name or alias collides with an existing name at the
    /// same level.
    #[error("command '{0}' clashes with an existing name")]
    DuplicateCommand(String),

    /// A signature declares the same parameter twice.
    #[error("command '{command}' declares parameter '{param}' more than once")]
    DuplicateParam {
        /// Command being registered.
        command: String,
        /// Offending parameter name.
        param: String,
    },

    /// A variadic parameter is followed by further parameters.
    #[error("variadic parameter '{param}' of command '{command}' must come last")]
    VariadicNotLast {
        /// Command being registered.
        command: String,
        /// Offending parameter name.
        param: String,
    },

    /// An override names a parameter the signature does not declare.
    #[error("override for unknown parameter '{param}' on command '{command}'")]
    UnknownOverrideParam {
        /// Command being registered.
        command: String,
        /// Offending parameter name.
        param: String,
    },
}

/// Check that a global option's spellings are present and dashed.
pub fn validate_option_strings(strings: &[String]) -> Result<()> {
    if strings.is_empty() {
        return Err(ConfigError::EmptyOptionStrings);
    }
    for s in strings {
        if !s.starts_with('-') {
            return Err(ConfigError::PositionalGlobalOption(s.clone()));
        }
    }
    Ok(())
}

/// Check a command signature for duplicate and misplaced parameters.
pub fn validate_signature(command: &str, signature: &Signature) -> Result<()> {
    let params = &signature.params;
    for (i, param) in params.iter().enumerate() {
        if params[..i].iter().any(|p| p.name == param.name) {
            return Err(ConfigError::DuplicateParam {
                command: command.to_string(),
                param: param.name.clone(),
            });
        }
        if param.variadic && i + 1 != params.len() {
            return Err(ConfigError::VariadicNotLast {
                command: command.to_string(),
                param: param.name.clone(),
            });
        }
    }
    Ok(())
}
