//! Error types for loading catalog datasets

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::model::LayerCode;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse dataset TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("layer code {code} is used by both '{first}' and '{second}'")]
    DuplicateLayerCode {
        code: LayerCode,
        first: String,
        second: String,
    },

    #[error("duplicate component id '{id}'")]
    DuplicateComponent { id: String },
}

impl DatasetError {
    /// Source span of the error, when it came from the TOML parser
    pub fn span(&self) -> Option<Span> {
        match self {
            DatasetError::Parse(err) => err.span(),
            _ => None,
        }
    }

    /// Format the error with source context using ariadne
    ///
    /// Errors without a source span render as their plain message.
    pub fn format(&self, source: &str, filename: &str) -> String {
        let (span, message) = match self {
            DatasetError::Parse(err) => match err.span() {
                Some(span) => (span, err.message().to_string()),
                None => return self.to_string(),
            },
            _ => return self.to_string(),
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message("invalid dataset")
            .with_label(
                Label::new((filename, span))
                    .with_message(message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}
