//! Parameter validation.
//!
//! Every check runs before any computation and all findings are collected
//! into a [`ValidationReport`], so callers see every problem at once rather
//! than the first. Under [`ParameterPolicy::Clamp`] an out-of-range window
//! size or top-k becomes a warning and the value is clamped; everything else
//! stays an error.

use std::fmt;

use serde::Serialize;

use crate::errors::{Error, Result};
use crate::filter::Selection;
use crate::types::{AnalysisConfig, ParameterPolicy, MAX_WINDOW_SIZE, MIN_WINDOW_SIZE};

// ─── Severity ───────────────────────────────────────────────────────────────

/// Whether a diagnostic is a hard error or a soft warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

// ─── Diagnostic ─────────────────────────────────────────────────────────────

/// A single finding about one parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    pub parameter: &'static str,
    pub message: String,
}

impl ValidationDiagnostic {
    pub fn error(parameter: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            parameter,
            message: message.into(),
        }
    }

    pub fn warning(parameter: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            parameter,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.parameter, self.message)
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Collected diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    fn push(&mut self, diagnostic: ValidationDiagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Iterate over error-severity diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationDiagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    /// Iterate over warning-severity diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &ValidationDiagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    /// Returns `true` if any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Returns `true` if there are no errors (warnings are acceptable).
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Log warnings and turn errors into [`Error::InvalidParameters`].
    fn finish<T>(self, value: T) -> Result<T> {
        for warning in self.warnings() {
            tracing::warn!(parameter = warning.parameter, "{}", warning.message);
        }
        if self.has_errors() {
            return Err(Error::InvalidParameters(self));
        }
        Ok(value)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for diagnostic in self.errors() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{diagnostic}")?;
            first = false;
        }
        Ok(())
    }
}

// ─── Checks ─────────────────────────────────────────────────────────────────

/// Validate an [`AnalysisConfig`], returning the (possibly clamped) config.
pub fn validate_config(config: &AnalysisConfig) -> Result<AnalysisConfig> {
    let mut report = ValidationReport::default();
    let mut config = config.clone();

    if !(MIN_WINDOW_SIZE..=MAX_WINDOW_SIZE).contains(&config.window_size) {
        let message = format!(
            "window size {} outside [{MIN_WINDOW_SIZE}, {MAX_WINDOW_SIZE}]",
            config.window_size
        );
        match config.parameter_policy {
            ParameterPolicy::Reject => {
                report.push(ValidationDiagnostic::error("window_size", message));
            }
            ParameterPolicy::Clamp => {
                let clamped = config.window_size.clamp(MIN_WINDOW_SIZE, MAX_WINDOW_SIZE);
                report.push(ValidationDiagnostic::warning(
                    "window_size",
                    format!("{message}, clamped to {clamped}"),
                ));
                config.window_size = clamped;
            }
        }
    }

    if !(config.damping > 0.0 && config.damping < 1.0) {
        report.push(ValidationDiagnostic::error(
            "damping",
            format!("damping {} must lie strictly between 0 and 1", config.damping),
        ));
    }

    if !(config.tolerance > 0.0 && config.tolerance.is_finite()) {
        report.push(ValidationDiagnostic::error(
            "tolerance",
            format!("tolerance {} must be positive and finite", config.tolerance),
        ));
    }

    if config.max_iterations == 0 {
        report.push(ValidationDiagnostic::error(
            "max_iterations",
            "at least one iteration is required",
        ));
    }

    if config.language.trim().is_empty() {
        report.push(ValidationDiagnostic::error("language", "language code is empty"));
    }

    report.finish(config)
}

/// Validate a [`Selection`], returning the (possibly clamped) selection.
pub fn validate_selection(selection: &Selection, policy: ParameterPolicy) -> Result<Selection> {
    let mut report = ValidationReport::default();
    let mut selection = selection.clone();

    if selection.top_k == 0 {
        match policy {
            ParameterPolicy::Reject => {
                report.push(ValidationDiagnostic::error("top_k", "top_k must be at least 1"));
            }
            ParameterPolicy::Clamp => {
                report.push(ValidationDiagnostic::warning(
                    "top_k",
                    "top_k 0 clamped to 1",
                ));
                selection.top_k = 1;
            }
        }
    }

    let base = selection.base_size_factor;
    let highlight = selection.highlight_size_factor;
    if !(base > 0.0 && base.is_finite()) {
        report.push(ValidationDiagnostic::error(
            "base_size_factor",
            format!("base size factor {base} must be positive and finite"),
        ));
    }
    if !(highlight > base && highlight.is_finite()) {
        report.push(ValidationDiagnostic::error(
            "highlight_size_factor",
            format!("highlight size factor {highlight} must exceed base size factor {base}"),
        ));
    }

    report.finish(selection)
}
