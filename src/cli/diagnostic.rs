//! Miette-based error diagnostics for CLI error presentation.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Configuration error with source location context.
///
/// Displays the configuration file content with a labeled span pointing
/// to the problematic location, along with an optional help message.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(vigless::config))]
pub struct ConfigDiagnostic {
    pub message: String,

    #[source_code]
    pub src: String,

    #[label("here")]
    pub span: SourceSpan,

    #[help]
    pub help: Option<String>,
}

impl ConfigDiagnostic {
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        src: impl Into<String>,
        offset: usize,
        len: usize,
    ) -> Self {
        Self {
            message: message.into(),
            src: src.into(),
            span: (offset, len).into(),
            help: None,
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Diagnostic for a TOML syntax or type error, if it carries a location.
    #[must_use]
    pub fn from_toml(err: &toml::de::Error, src: &str) -> Option<Self> {
        let span = err.span()?;
        Some(
            Self::new(
                format!("invalid configuration: {}", err.message().trim()),
                src,
                span.start,
                span.end.saturating_sub(span.start),
            )
            .with_help("see config.toml.example for every supported key"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_error_points_at_source() {
        let src = "[logging]\nlevel = \n";
        let err = toml::from_str::<toml::Table>(src).unwrap_err();
        let diag = ConfigDiagnostic::from_toml(&err, src).unwrap();
        assert!(diag.span.offset() <= src.len());
        assert!(diag.message.starts_with("invalid configuration"));
        assert!(diag.help.is_some());
    }
}
