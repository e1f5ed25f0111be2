//! Error types for physics, persistence and configuration

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Undefined physical operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    /// A direction was requested from a zero-length vector
    ZeroMagnitude { operation: &'static str },
    /// Collision between two massless objects
    ZeroTotalMass,
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMagnitude { operation } => {
                write!(f, "{operation} is undefined for a zero-magnitude vector")
            }
            Self::ZeroTotalMass => write!(f, "collision between objects with zero total mass"),
        }
    }
}

impl std::error::Error for DomainError {}

/// Failure reading or writing a score file
#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: io::Error },
    Json { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Json { path, source } => {
                write!(f, "{}: invalid score document: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

/// Rejected engine configuration
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
    InvalidEnv { key: String, value: String },
    OutOfRange { field: &'static str, reason: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Parse { path, source } => write!(f, "{}: {source}", path.display()),
            Self::InvalidEnv { key, value } => {
                write!(f, "environment variable {key} has invalid value {value:?}")
            }
            Self::OutOfRange { field, reason } => write!(f, "config `{field}` {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}
