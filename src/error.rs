// Copyright (C) Pavel Grebnev 2025
// Distributed under the MIT License (license terms are at http://opensource.org/licenses/MIT).

use std::path::PathBuf;

use crate::color_utils::Channel;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColorError {
    #[error("'{token}' is not a valid channel value")]
    Parse { token: String },

    #[error("expected {expected} comma-separated components, found {found}")]
    Arity { expected: &'static str, found: usize },

    #[error("{channel} channel value {value} is outside of [0, 255]")]
    OutOfRange { channel: Channel, value: f64 },

    #[error("'{0}' is not a #rrggbb color")]
    InvalidHex(String),
}

/// A color error that happened while reading a file.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("line {line}: {source}")]
pub struct LineError {
    pub line: usize,
    pub source: ColorError,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SwatchError {
    #[error("a swatch needs at least one color")]
    Empty,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file '{path}' can't be read: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("config file '{path}' is not valid: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("config file '{path}' has an invalid value: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Color(#[from] ColorError),

    #[error(transparent)]
    Line(#[from] LineError),

    #[error(transparent)]
    Swatch(#[from] SwatchError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("can't read '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("display error: {0}")]
    Display(#[from] iced::Error),

    #[error("the display session ended before all colors were shown")]
    SessionInterrupted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_error_message_names_the_line() {
        let error = LineError {
            line: 3,
            source: ColorError::Parse {
                token: "abc".to_string(),
            },
        };

        assert_eq!(error.to_string(), "line 3: 'abc' is not a valid channel value");
    }

    #[test]
    fn test_app_error_is_transparent_for_color_errors() {
        let error: AppError = ColorError::Arity {
            expected: "3",
            found: 2,
        }
        .into();

        assert_eq!(
            error.to_string(),
            "expected 3 comma-separated components, found 2"
        );
    }

    #[test]
    fn test_out_of_range_message_names_the_channel() {
        let error = ColorError::OutOfRange {
            channel: Channel::Blue,
            value: 300.0,
        };

        assert_eq!(error.to_string(), "blue channel value 300 is outside of [0, 255]");
    }
}
