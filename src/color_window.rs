// Copyright (C) Pavel Grebnev 2025
// Distributed under the MIT License (license terms are at http://opensource.org/licenses/MIT).

use crossbeam_channel::Sender;
use iced::widget::{container, Space};
use iced::window;
use iced::{Element, Length, Size, Subscription, Task};

use crate::color_queue::ColorQueue;
use crate::color_utils::HexColor;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::style;

#[derive(Debug, Clone, PartialEq)]
pub struct ColorWindowSettings {
    pub title: String,
    pub size: Size,
    pub always_on_top: bool,
}

impl ColorWindowSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            title: config.color_window.title.clone(),
            size: Size::new(config.color_window.width, config.color_window.height),
            always_on_top: config.always_on_top,
        }
    }

    fn to_window_settings(&self) -> window::Settings {
        window::Settings {
            size: self.size,
            position: window::Position::Centered,
            level: if self.always_on_top {
                window::Level::AlwaysOnTop
            } else {
                window::Level::Normal
            },
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
pub enum ColorMessage {
    WindowOpened(window::Id),
    WindowClosed(window::Id),
}

struct DisplayedColor {
    window_id: window::Id,
    hex: HexColor,
}

// one display session, the windows are shown one at a time
pub struct ColorSession {
    queue: ColorQueue,
    settings: ColorWindowSettings,
    current: Option<DisplayedColor>,
    shown_count: usize,
    outcome: Sender<Result<usize, AppError>>,
}

impl ColorSession {
    fn start(
        queue: ColorQueue,
        settings: ColorWindowSettings,
        outcome: Sender<Result<usize, AppError>>,
    ) -> (Self, Task<ColorMessage>) {
        let mut session = Self {
            queue,
            settings,
            current: None,
            shown_count: 0,
            outcome,
        };
        let task = session.open_next();
        (session, task)
    }

    fn title(&self, _window_id: window::Id) -> String {
        self.settings.title.clone()
    }

    fn update(&mut self, message: ColorMessage) -> Task<ColorMessage> {
        match message {
            ColorMessage::WindowOpened(window_id) => {
                self.shown_count += 1;
                if let Some(current) = &self.current {
                    tracing::info!(?window_id, hex = %current.hex, "showing color");
                }
                Task::none()
            }
            ColorMessage::WindowClosed(window_id) => {
                let is_current = self
                    .current
                    .as_ref()
                    .is_some_and(|current| current.window_id == window_id);
                if !is_current {
                    return Task::none();
                }
                self.current = None;
                self.open_next()
            }
        }
    }

    fn view(&self, window_id: window::Id) -> Element<'_, ColorMessage> {
        let fill = match &self.current {
            Some(current) if current.window_id == window_id => style::hex_to_color(&current.hex),
            _ => iced::Color::BLACK,
        };

        container(Space::new(Length::Fill, Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(style::solid_fill(fill))
            .into()
    }

    fn subscription(&self) -> Subscription<ColorMessage> {
        window::close_events().map(ColorMessage::WindowClosed)
    }

    fn open_next(&mut self) -> Task<ColorMessage> {
        match self.queue.next_color() {
            Ok(Some(hex)) => {
                let (window_id, open) = window::open(self.settings.to_window_settings());
                self.current = Some(DisplayedColor { window_id, hex });
                open.map(ColorMessage::WindowOpened)
            }
            Ok(None) => {
                tracing::info!(shown = self.shown_count, "all colors were shown");
                self.finish(Ok(self.shown_count))
            }
            Err(err) => self.finish(Err(err.into())),
        }
    }

    fn finish(&mut self, outcome: Result<usize, AppError>) -> Task<ColorMessage> {
        if self.outcome.try_send(outcome).is_err() {
            tracing::warn!("display session outcome was already reported");
        }
        iced::exit()
    }

    #[cfg(test)]
    fn current_window(&self) -> Option<(window::Id, HexColor)> {
        self.current
            .as_ref()
            .map(|current| (current.window_id, current.hex.clone()))
    }
}

/// Shows the queued colors one window at a time, returns how many windows were opened.
pub fn display_colors_sequentially(
    queue: ColorQueue,
    settings: ColorWindowSettings,
) -> Result<usize, AppError> {
    let (sender, receiver) = crossbeam_channel::bounded(1);

    if queue.is_empty() {
        tracing::warn!("there are no colors to show");
    }
    tracing::info!(colors = queue.len(), title = %settings.title, "starting color display session");
    iced::daemon(ColorSession::title, ColorSession::update, ColorSession::view)
        .subscription(ColorSession::subscription)
        .run_with(move || ColorSession::start(queue, settings, sender))?;

    receiver
        .try_recv()
        .unwrap_or_else(|_| Err(AppError::SessionInterrupted))
}

/// Blocks until the window with the color is closed.
pub fn display_single_color(hex: HexColor, settings: ColorWindowSettings) -> Result<(), AppError> {
    display_colors_sequentially(ColorQueue::from_colors([hex]), settings).map(|_| ())
}
