//! Error types for steelboard-core
//!
//! Provides an error hierarchy with thiserror plus a load report for graceful
//! degradation: one malformed metric should not blank the whole dashboard.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for steelboard operations
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================
    // IO Errors
    // ===================
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    // ===================
    // Parse Errors
    // ===================
    #[error("Failed to parse JSON in {path}: {message}")]
    JsonParse {
        path: PathBuf,
        message: String,
        #[source]
        source: serde_json::Error,
    },

    // ===================
    // Config Errors
    // ===================
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Severity level for errors during load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Non-critical, can continue with degraded functionality
    Warning,
    /// An output or input was skipped; the rest still completed
    Error,
}

/// Individual error entry in load report
#[derive(Debug, Clone)]
pub struct LoadError {
    pub source: String,
    pub message: String,
    pub severity: ErrorSeverity,
    /// Actionable suggestion for user (optional)
    pub suggestion: Option<String>,
}

impl LoadError {
    pub fn warning(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            message: message.into(),
            severity: ErrorSeverity::Warning,
            suggestion: None,
        }
    }

    /// Add an actionable suggestion to this error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Create user-friendly error from CoreError with context-aware suggestions
    pub fn from_core_error(source: impl Into<String>, error: &CoreError) -> Self {
        let source = source.into();
        let (message, suggestion) = match error {
            CoreError::FileNotFound { path } => (
                format!("File not found: {}", path.display()),
                Some(format!("Check if file exists: ls {}", path.display())),
            ),
            CoreError::FileRead { path, .. } => (
                format!("Cannot read file: {}", path.display()),
                Some(format!("Check permissions: chmod +r {}", path.display())),
            ),
            CoreError::FileWrite { path, .. } => (
                format!("Cannot write file: {}", path.display()),
                Some(format!(
                    "Check the output directory is writable: ls -ld {}",
                    path.parent().unwrap_or(path).display()
                )),
            ),
            CoreError::JsonParse { path, message, .. } => (
                format!("Invalid JSON in {}: {}", path.display(), message),
                Some("Validate JSON syntax with: jq . <file>".to_string()),
            ),
            _ => (error.to_string(), None),
        };

        Self {
            source,
            message,
            severity: ErrorSeverity::Error,
            suggestion,
        }
    }
}

/// Report of problems encountered while loading an analytics snapshot
///
/// Enables graceful degradation by tracking partial failures
/// instead of failing completely on any error.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub errors: Vec<LoadError>,
    pub trends_loaded: usize,
    pub forecast_loaded: bool,
    pub anomalies_loaded: usize,
    /// Series entries that were NaN/infinite and will render as 0
    pub values_coerced: usize,
}

impl LoadReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, error: LoadError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, source: impl Into<String>, message: impl Into<String>) {
        self.errors.push(LoadError::warning(source, message));
    }

    /// Returns true if there are any errors (including warnings)
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns only warnings
    pub fn warnings(&self) -> impl Iterator<Item = &LoadError> {
        self.errors
            .iter()
            .filter(|e| e.severity == ErrorSeverity::Warning)
    }

    /// Returns count by severity (warnings, errors)
    pub fn error_count(&self) -> (usize, usize) {
        self.errors
            .iter()
            .fold((0, 0), |(w, e), err| match err.severity {
                ErrorSeverity::Warning => (w + 1, e),
                ErrorSeverity::Error => (w, e + 1),
            })
    }

    /// Summarize the report as a dashboard health state
    pub fn degraded_state(&self) -> DegradedState {
        if !self.has_errors() {
            return DegradedState::Healthy;
        }

        let mut missing: Vec<String> = self.errors.iter().map(|e| e.source.clone()).collect();
        missing.sort();
        missing.dedup();

        let (warnings, errors) = self.error_count();
        DegradedState::PartialData {
            missing,
            reason: format!("{} warning(s), {} error(s)", warnings, errors),
        }
    }
}

/// Degraded state indicator for loaded analytics
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DegradedState {
    /// Everything loaded successfully
    Healthy,
    /// Some data missing or repaired but still displayable
    PartialData {
        missing: Vec<String>,
        reason: String,
    },
}

impl DegradedState {
    pub fn is_healthy(&self) -> bool {
        matches!(self, DegradedState::Healthy)
    }

    pub fn is_degraded(&self) -> bool {
        !self.is_healthy()
    }
}
