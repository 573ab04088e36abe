// Copyright (C) Pavel Grebnev 2025
// Distributed under the MIT License (license terms are at http://opensource.org/licenses/MIT).

use iced::widget::{container, Row, Space};
use iced::window;
use iced::{Color, Element, Length, Size, Task};

use crate::color_utils::NormalizedTriplet;
use crate::config::{SwatchConfig, SwatchLayout};
use crate::error::{AppError, SwatchError};
use crate::style;

#[derive(Debug, Clone, Copy)]
pub enum SwatchMessage {}

pub struct SwatchWindow {
    title: String,
    patches: Vec<Color>,
}

impl SwatchWindow {
    pub fn new(colors: &[NormalizedTriplet], title: &str) -> Result<Self, SwatchError> {
        if colors.is_empty() {
            return Err(SwatchError::Empty);
        }

        Ok(Self {
            title: title.to_string(),
            patches: colors.iter().map(style::normalized_to_color).collect(),
        })
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn update(&mut self, message: SwatchMessage) -> Task<SwatchMessage> {
        match message {}
    }

    // patch i takes the cell [i, i + 1) of equal width and the whole height, no axes
    fn view(&self) -> Element<'_, SwatchMessage> {
        Row::with_children(self.patches.iter().map(|color| {
            container(Space::new(Length::Fill, Length::Fill))
                .width(Length::FillPortion(1))
                .height(Length::Fill)
                .style(style::solid_fill(*color))
                .into()
        }))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }
}

pub fn get_window_size(config: &SwatchConfig, color_count: usize) -> Size {
    let width_units = match config.layout {
        SwatchLayout::PerColor { units_per_color } => color_count as f32 * units_per_color,
        SwatchLayout::Fixed { width_units } => width_units,
    };
    Size::new(
        width_units * config.unit_size,
        config.height_units * config.unit_size,
    )
}

/// Blocks until the swatch window is closed.
pub fn show_swatch(
    colors: &[NormalizedTriplet],
    title: &str,
    config: &SwatchConfig,
    always_on_top: bool,
) -> Result<(), AppError> {
    let swatch = SwatchWindow::new(colors, title)?;
    let size = get_window_size(config, colors.len());

    tracing::info!(colors = colors.len(), %title, width = size.width, height = size.height, "showing swatch");
    iced::application(SwatchWindow::title, SwatchWindow::update, SwatchWindow::view)
        .window(window::Settings {
            size,
            position: window::Position::Centered,
            level: if always_on_top {
                window::Level::AlwaysOnTop
            } else {
                window::Level::Normal
            },
            ..Default::default()
        })
        .run_with(move || (swatch, Task::none()))?;
    Ok(())
}
