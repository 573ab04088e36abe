// Copyright (C) Pavel Grebnev 2025
// Distributed under the MIT License (license terms are at http://opensource.org/licenses/MIT).

use std::collections::VecDeque;
use std::path::Path;

use crate::color_utils::{self, ChannelPolicy, ColorTriplet, HexColor};
use crate::error::{AppError, LineError};

#[derive(Debug, Clone)]
enum PendingColor {
    // parsed only when it is its turn to be shown
    Line { number: usize, text: String },
    Converted(HexColor),
}

/// Colors waiting to be displayed, in the order they were given.
#[derive(Debug, Clone)]
pub struct ColorQueue {
    pending: VecDeque<PendingColor>,
    policy: ChannelPolicy,
}

impl ColorQueue {
    pub fn from_file(path: &Path, policy: ChannelPolicy) -> Result<Self, AppError> {
        let lines = read_lines(path)?;
        tracing::info!(path = %path.display(), lines = lines.len(), "read color file");
        Ok(Self::from_numbered_lines(lines, policy))
    }

    #[cfg(test)]
    pub fn from_lines<I, S>(lines: I, policy: ChannelPolicy) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines = lines
            .into_iter()
            .enumerate()
            .map(|(idx, text)| (idx + 1, text.into()))
            .collect();
        Self::from_numbered_lines(lines, policy)
    }

    pub fn from_colors(colors: impl IntoIterator<Item = HexColor>) -> Self {
        Self {
            pending: colors.into_iter().map(PendingColor::Converted).collect(),
            policy: ChannelPolicy::default(),
        }
    }

    fn from_numbered_lines(lines: Vec<(usize, String)>, policy: ChannelPolicy) -> Self {
        Self {
            pending: lines
                .into_iter()
                .map(|(number, text)| PendingColor::Line { number, text })
                .collect(),
            policy,
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Takes the next color, a line that can't be converted stops the whole queue.
    pub fn next_color(&mut self) -> Result<Option<HexColor>, LineError> {
        let Some(pending) = self.pending.pop_front() else {
            return Ok(None);
        };

        match pending {
            PendingColor::Converted(hex) => Ok(Some(hex)),
            PendingColor::Line { number, text } => {
                let hex = color_utils::rgb_to_hex_with_policy(&text, self.policy).map_err(
                    |source| {
                        self.pending.clear();
                        LineError {
                            line: number,
                            source,
                        }
                    },
                )?;
                tracing::debug!(line = number, input = %text.trim(), %hex, "converted color");
                Ok(Some(hex))
            }
        }
    }
}

/// Reads "r,g,b" or "r,g,b,a" lines, failing on the first line that can't be parsed.
pub fn read_triplets_from_file(path: &Path) -> Result<Vec<ColorTriplet>, AppError> {
    let lines = read_lines(path)?;
    let mut triplets = Vec::with_capacity(lines.len());
    for (line, text) in lines {
        let triplet = text
            .parse::<ColorTriplet>()
            .map_err(|source| LineError { line, source })?;
        triplets.push(triplet);
    }
    return Ok(triplets);
}

fn read_lines(path: &Path) -> Result<Vec<(usize, String)>, AppError> {
    let data = std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(data
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.to_string()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ColorError;
    use std::path::PathBuf;

    fn write_temp_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "swatcher_{}_{}_{}",
            name,
            std::process::id(),
            content.len()
        ));
        std::fs::write(&path, content).unwrap();
        path
    }

    fn drain(queue: &mut ColorQueue) -> Result<Vec<String>, LineError> {
        let mut result = Vec::new();
        while let Some(hex) = queue.next_color()? {
            result.push(hex.to_string());
        }
        Ok(result)
    }

    #[test]
    fn test_queue_from_file_yields_colors_in_order() {
        let path = write_temp_file("order", "255,0,0\n0,255,0\n0,0,255\n");

        let mut queue = ColorQueue::from_file(&path, ChannelPolicy::Clamp).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(queue.len(), 3);
        assert_eq!(
            drain(&mut queue).unwrap(),
            vec!["#ff0000", "#00ff00", "#0000ff"]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_queue_handles_windows_line_endings() {
        let mut queue = ColorQueue::from_lines("1,2,3\r\n4,5,6".lines(), ChannelPolicy::Clamp);

        assert_eq!(drain(&mut queue).unwrap(), vec!["#010203", "#040506"]);
    }

    #[test]
    fn test_queue_stops_on_the_first_bad_line() {
        let mut queue =
            ColorQueue::from_lines(["255,0,0", "abc,0,0", "0,0,255"], ChannelPolicy::Clamp);

        assert_eq!(queue.next_color().unwrap().unwrap(), "#ff0000");
        assert_eq!(
            queue.next_color(),
            Err(LineError {
                line: 2,
                source: ColorError::Parse {
                    token: "abc".to_string()
                }
            })
        );
        assert_eq!(queue.next_color(), Ok(None));
    }

    #[test]
    fn test_queue_blank_line_is_an_error() {
        let mut queue = ColorQueue::from_lines(["1,1,1", "", "2,2,2"], ChannelPolicy::Clamp);

        assert!(queue.next_color().is_ok());
        let error = queue.next_color().unwrap_err();
        assert_eq!(error.line, 2);
    }

    #[test]
    fn test_queue_uses_the_given_policy() {
        let mut clamping = ColorQueue::from_lines(["300,0,0"], ChannelPolicy::Clamp);
        let mut rejecting = ColorQueue::from_lines(["300,0,0"], ChannelPolicy::Reject);

        assert_eq!(clamping.next_color().unwrap().unwrap(), "#ff0000");
        assert!(matches!(
            rejecting.next_color(),
            Err(LineError {
                line: 1,
                source: ColorError::OutOfRange { .. }
            })
        ));
    }

    #[test]
    fn test_queue_from_colors_returns_them_unchanged() {
        let hex = HexColor::parse("#123456").unwrap();
        let mut queue = ColorQueue::from_colors([hex.clone()]);

        assert_eq!(queue.next_color(), Ok(Some(hex)));
        assert_eq!(queue.next_color(), Ok(None));
    }

    #[test]
    fn test_queue_from_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("swatcher_this_file_does_not_exist.txt");

        let result = ColorQueue::from_file(&path, ChannelPolicy::Clamp);

        assert!(matches!(result, Err(AppError::Io { .. })));
    }

    #[test]
    fn test_read_triplets_from_file_accepts_alpha() {
        let path = write_temp_file("triplets", "168,105,105\n71,91,104,255\n");

        let triplets = read_triplets_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(triplets.len(), 2);
        assert_eq!(triplets[0].alpha, None);
        assert_eq!(triplets[1].alpha, Some(255.0));
    }

    #[test]
    fn test_read_triplets_from_file_reports_the_bad_line() {
        let path = write_temp_file("bad_triplets", "1,2,3\n1,2\n");

        let result = read_triplets_from_file(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(
            result,
            Err(AppError::Line(LineError {
                line: 2,
                source: ColorError::Arity { found: 2, .. }
            }))
        ));
    }
}
