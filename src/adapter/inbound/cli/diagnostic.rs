//! Miette-based diagnostics for configuration files.
//!
//! Renders a parse error with the offending file excerpt and a label on the
//! failing span.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(deployctl::config))]
pub struct ConfigDiagnostic {
    pub message: String,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("here")]
    pub span: SourceSpan,

    #[help]
    pub help: Option<String>,
}

impl ConfigDiagnostic {
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        name: impl AsRef<str>,
        src: impl Into<String>,
        offset: usize,
        len: usize,
    ) -> Self {
        Self {
            message: message.into(),
            src: NamedSource::new(name, src.into()),
            span: (offset, len).into(),
            help: None,
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Diagnostic for a TOML parse failure, when toml reported a location.
    #[must_use]
    pub fn from_toml(name: &str, src: &str, err: &toml::de::Error) -> Option<Self> {
        let span = err.span()?;
        Some(
            Self::new(err.message(), name, src, span.start, span.len())
                .with_help("see `deployctl config init` for a commented template"),
        )
    }
}
