// Copyright (C) Pavel Grebnev 2023-2025
// Distributed under the MIT License (license terms are at http://opensource.org/licenses/MIT).

mod app_arguments;
mod color_queue;
mod color_utils;
mod color_window;
mod config;
mod error;
mod style;
mod swatch_window;

use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::app_arguments::{Action, AppArguments};
use crate::color_utils::{ColorTriplet, HexColor, DEMO_PALETTE};
use crate::error::AppError;

const DEFAULT_LOG_DIRECTIVE: &str = "swatcher=info";

pub fn main() -> ExitCode {
    let app_arguments = app_arguments::get_app_arguments();
    if let Some(text) = &app_arguments.print_and_exit {
        println!("{}", text);
        return ExitCode::SUCCESS;
    }
    if let Some(error) = &app_arguments.read_error {
        eprintln!("{}", error);
        return ExitCode::FAILURE;
    }

    let Some(action) = &app_arguments.action else {
        eprintln!("Nothing to do\nUse --help to see the list of supported arguments");
        return ExitCode::FAILURE;
    };

    init_logging(app_arguments.log_level.as_deref());

    match run(action, &app_arguments) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(log_level: Option<&str>) {
    let env_filter = std::env::var(EnvFilter::DEFAULT_ENV)
        .ok()
        .filter(|filter| !filter.trim().is_empty());

    tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(log_level, env_filter.as_deref()))
        .with_writer(std::io::stderr)
        .init();
}

// --log-level wins over RUST_LOG, and both take the full filter syntax
fn build_env_filter(log_level: Option<&str>, env_filter: Option<&str>) -> EnvFilter {
    let Some(filter) = log_level.or(env_filter) else {
        return EnvFilter::new(DEFAULT_LOG_DIRECTIVE);
    };

    EnvFilter::try_new(filter).unwrap_or_else(|err| {
        eprintln!("Invalid log filter '{}': {}", filter, err);
        EnvFilter::new(DEFAULT_LOG_DIRECTIVE)
    })
}

fn run(action: &Action, app_arguments: &AppArguments) -> Result<(), AppError> {
    let config_path = config::get_config_path(app_arguments.custom_config_path.as_deref());
    let mut app_config = config::read_config(&config_path)?;
    app_config.apply_arguments(app_arguments);

    match action {
        Action::Hex(text) => {
            let hex = color_utils::rgb_to_hex_with_policy(text, app_config.out_of_range)?;
            println!("{}", hex.as_str());
        }
        Action::Color(text) => {
            let hex = if text.starts_with('#') {
                HexColor::parse(text)?
            } else {
                color_utils::rgb_to_hex_with_policy(text, app_config.out_of_range)?
            };
            color_window::display_single_color(
                hex,
                color_window::ColorWindowSettings::from_config(&app_config),
            )?;
        }
        Action::Convert(path) => {
            let queue = color_queue::ColorQueue::from_file(path, app_config.out_of_range)?;
            color_window::display_colors_sequentially(
                queue,
                color_window::ColorWindowSettings::from_config(&app_config),
            )?;
        }
        Action::Swatch(title) => {
            let triplets = get_swatch_triplets(app_arguments)?
                .iter()
                .map(|triplet| triplet.checked(app_config.out_of_range))
                .collect::<Result<Vec<_>, _>>()?;
            let colors = color_utils::normalize(&triplets);
            swatch_window::show_swatch(
                &colors,
                title,
                &app_config.swatch,
                app_config.always_on_top,
            )?;
        }
    }

    tracing::info!("done");
    Ok(())
}

fn get_swatch_triplets(app_arguments: &AppArguments) -> Result<Vec<ColorTriplet>, AppError> {
    if let Some(path) = &app_arguments.colors_file {
        return color_queue::read_triplets_from_file(path);
    }

    if app_arguments.rgb_values.is_empty() {
        tracing::info!("no colors were given, showing the demo palette");
        return Ok(DEMO_PALETTE
            .iter()
            .map(|[r, g, b]| ColorTriplet::new(*r, *g, *b))
            .collect());
    }

    let triplets = app_arguments
        .rgb_values
        .iter()
        .map(|text| text.parse::<ColorTriplet>())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(triplets)
}
