// Copyright (C) Pavel Grebnev 2023-2025
// Distributed under the MIT License (license terms are at http://opensource.org/licenses/MIT).

use iced::theme::Theme;
use iced::widget::container;
use iced::Color;

use crate::color_utils::{HexColor, NormalizedTriplet};

pub fn hex_to_color(hex: &HexColor) -> Color {
    let [r, g, b] = hex.to_rgb8();
    Color::from_rgb8(r, g, b)
}

pub fn normalized_to_color(triplet: &NormalizedTriplet) -> Color {
    // the renderer expects components within [0, 1]
    let [r, g, b] = triplet.to_array().map(|x| x.max(0.0).min(1.0));
    Color::from_rgb(r, g, b)
}

/// A borderless fill that ignores the theme palette.
pub fn solid_fill(color: Color) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(color.into()),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_color_uses_the_exact_bytes() {
        let hex = HexColor::parse("#ff8000").unwrap();

        assert_eq!(hex_to_color(&hex), Color::from_rgb8(255, 128, 0));
    }

    #[test]
    fn test_normalized_to_color_clamps_components() {
        let triplet = NormalizedTriplet {
            r: 1.5,
            g: -0.5,
            b: 0.25,
        };

        assert_eq!(normalized_to_color(&triplet), Color::from_rgb(1.0, 0.0, 0.25));
    }

    #[test]
    fn test_solid_fill_sets_background_only() {
        let color = Color::from_rgb(0.1, 0.2, 0.3);

        let style = solid_fill(color)(&Theme::Dark);

        assert_eq!(style.background, Some(color.into()));
        assert_eq!(style.text_color, None);
    }
}
