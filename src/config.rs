// Copyright (C) Pavel Grebnev 2023-2025
// Distributed under the MIT License (license terms are at http://opensource.org/licenses/MIT).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::app_arguments::{AppArguments, LayoutKind};
use crate::color_utils::ChannelPolicy;
use crate::error::ConfigError;

const DEFAULT_CONFIG_NAME: &str = "swatcher_config.json";
pub const DEFAULT_COLOR_WINDOW_TITLE: &str = "RGB Color Converter";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub always_on_top: bool,
    pub out_of_range: ChannelPolicy,
    pub color_window: ColorWindowConfig,
    pub swatch: SwatchConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ColorWindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SwatchConfig {
    pub layout: SwatchLayout,
    // size of one plot unit in pixels
    pub unit_size: f32,
    pub height_units: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SwatchLayout {
    // the window grows with the number of colors
    PerColor { units_per_color: f32 },
    // the same window width no matter how many colors are shown
    Fixed { width_units: f32 },
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            always_on_top: false,
            out_of_range: ChannelPolicy::Clamp,
            color_window: ColorWindowConfig::default(),
            swatch: SwatchConfig::default(),
        }
    }
}

impl Default for ColorWindowConfig {
    fn default() -> Self {
        ColorWindowConfig {
            title: DEFAULT_COLOR_WINDOW_TITLE.to_string(),
            width: 200.0,
            height: 200.0,
        }
    }
}

impl Default for SwatchConfig {
    fn default() -> Self {
        SwatchConfig {
            layout: SwatchLayout::default(),
            unit_size: 100.0,
            height_units: 2.0,
        }
    }
}

impl Default for SwatchLayout {
    fn default() -> Self {
        SwatchLayout::PerColor {
            units_per_color: 2.0,
        }
    }
}

impl SwatchLayout {
    pub fn fixed() -> Self {
        SwatchLayout::Fixed { width_units: 10.0 }
    }

    /// Switches to another layout kind, keeping the configured sizes if the kind is the same.
    pub fn with_kind(self, kind: LayoutKind) -> Self {
        match (kind, self) {
            (LayoutKind::PerColor, SwatchLayout::PerColor { .. })
            | (LayoutKind::Fixed, SwatchLayout::Fixed { .. }) => self,
            (LayoutKind::PerColor, _) => SwatchLayout::default(),
            (LayoutKind::Fixed, _) => SwatchLayout::fixed(),
        }
    }
}

impl AppConfig {
    pub fn apply_arguments(&mut self, app_arguments: &AppArguments) {
        if let Some(kind) = app_arguments.layout {
            self.swatch.layout = self.swatch.layout.with_kind(kind);
        }
        if app_arguments.reject_out_of_range {
            self.out_of_range = ChannelPolicy::Reject;
        }
    }

    /// Every size that ends up in a window has to be positive.
    pub fn validate(&self) -> Result<(), String> {
        let layout_size = match self.swatch.layout {
            SwatchLayout::PerColor { units_per_color } => {
                ("swatch.layout.units_per_color", units_per_color)
            }
            SwatchLayout::Fixed { width_units } => ("swatch.layout.width_units", width_units),
        };
        let sizes = [
            ("color_window.width", self.color_window.width),
            ("color_window.height", self.color_window.height),
            ("swatch.unit_size", self.swatch.unit_size),
            ("swatch.height_units", self.swatch.height_units),
            layout_size,
        ];

        for (name, value) in sizes {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("{} should be a positive number, got {}", name, value));
            }
        }
        Ok(())
    }
}

pub fn get_config_path(custom_config_path: Option<&str>) -> PathBuf {
    if let Some(config_path) = custom_config_path {
        PathBuf::from(config_path)
    } else {
        std::env::current_exe()
            .unwrap_or_default()
            .parent()
            .unwrap_or(Path::new(""))
            .join(DEFAULT_CONFIG_NAME)
    }
}

/// Reads the config, a missing file is created with the default values.
pub fn read_config(config_path: &Path) -> Result<AppConfig, ConfigError> {
    if !config_path.exists() {
        let default_config = AppConfig::default();
        save_config_to_file(&default_config, config_path);
        return Ok(default_config);
    }

    let data = std::fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
        path: config_path.to_path_buf(),
        source,
    })?;

    let config = parse_config(&data).map_err(|source| ConfigError::Parse {
        path: config_path.to_path_buf(),
        source,
    })?;
    config.validate().map_err(|reason| ConfigError::Invalid {
        path: config_path.to_path_buf(),
        reason,
    })?;
    tracing::debug!(path = %config_path.display(), "config loaded");
    Ok(config)
}

pub fn parse_config(data: &str) -> Result<AppConfig, serde_json::Error> {
    serde_json::from_str(data)
}

pub fn save_config_to_file(config: &AppConfig, config_path: &Path) {
    let data = match serde_json::to_string_pretty(config) {
        Ok(data) => data,
        Err(err) => {
            tracing::warn!("Can't serialize config file {}", err);
            return;
        }
    };
    if let Err(err) = std::fs::write(config_path, data) {
        tracing::warn!(
            "Can't write config file {}, error {}",
            config_path.display(),
            err
        );
    }
}
