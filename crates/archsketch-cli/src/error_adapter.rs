//! Error adapter for converting ArchsketchError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Each error gets a
//! stable code and, where the fix is known, a help line.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use archsketch::{ArchsketchError, export};

/// Adapter wrapping an [`ArchsketchError`] for miette rendering.
pub struct ErrorAdapter<'a>(pub &'a ArchsketchError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            ArchsketchError::Io(_) => "archsketch::io",
            ArchsketchError::Graph(_) => "archsketch::graph",
            ArchsketchError::Config(_) => "archsketch::config",
            ArchsketchError::Export(export::Error::EngineUnavailable) => {
                "archsketch::export::engine_unavailable"
            }
            ArchsketchError::Export(_) => "archsketch::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            ArchsketchError::Export(export::Error::EngineUnavailable) => {
                "install Graphviz (e.g. `brew install graphviz` or `apt install graphviz`) \
                 and make sure `dot` is on PATH, or use `--format dot`"
                    .to_string()
            }
            ArchsketchError::Config(_) => {
                "check the configuration file or the command-line flags".to_string()
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use archsketch::export::LayoutEngine;

    fn code_of(err: &ArchsketchError) -> Option<String> {
        ErrorAdapter(err).code().map(|code| code.to_string())
    }

    fn help_of(err: &ArchsketchError) -> Option<String> {
        ErrorAdapter(err).help().map(|help| help.to_string())
    }

    #[test]
    fn test_engine_unavailable_has_help() {
        let err = ArchsketchError::Export(export::Error::EngineUnavailable);

        assert_eq!(
            code_of(&err).as_deref(),
            Some("archsketch::export::engine_unavailable")
        );
        let help = help_of(&err).unwrap();
        assert!(help.contains("install Graphviz"));
        assert!(help.contains("`dot`"));
    }

    #[test]
    fn test_config_error() {
        let err = ArchsketchError::Config("bad theme".to_string());

        assert_eq!(code_of(&err).as_deref(), Some("archsketch::config"));
        assert!(help_of(&err).is_some());
        assert_eq!(
            ErrorAdapter(&err).to_string(),
            "Configuration error: bad theme"
        );
    }

    #[test]
    fn test_other_export_error_has_no_help() {
        let err = ArchsketchError::Export(export::Error::Engine {
            engine: LayoutEngine::Dot,
            message: "syntax error".to_string(),
        });

        assert_eq!(code_of(&err).as_deref(), Some("archsketch::export"));
        assert!(help_of(&err).is_none());
    }
}
