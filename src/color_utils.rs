// Copyright (C) Pavel Grebnev 2025
// Distributed under the MIT License (license terms are at http://opensource.org/licenses/MIT).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ColorError;

// colors shown by the swatch when nothing else is provided
pub const DEMO_PALETTE: [[f64; 3]; 8] = [
    [0.0, 0.0, 200.0],
    [0.0, 100.0, 200.0],
    [0.0, 200.0, 200.0],
    [100.0, 0.0, 0.0],
    [100.0, 0.0, 100.0],
    [0.0, 100.0, 0.0],
    [200.0, 100.0, 0.0],
    [200.0, 200.0, 0.0],
];

const MAX_CHANNEL_VALUE: f64 = 255.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        };
        f.write_str(name)
    }
}

/// What to do with a channel that ends up outside of [0, 255].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelPolicy {
    #[default]
    Clamp,
    Reject,
}

/// Raw channel values as they were written by the user, alpha is kept only to be ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorTriplet {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub alpha: Option<f64>,
}

impl ColorTriplet {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self {
            r,
            g,
            b,
            alpha: None,
        }
    }

    /// Accepts three or four finite components, the fourth one is alpha.
    pub fn from_components(components: &[f64]) -> Result<Self, ColorError> {
        if let Some(bad_value) = components.iter().find(|value| !value.is_finite()) {
            return Err(ColorError::Parse {
                token: bad_value.to_string(),
            });
        }

        match *components {
            [r, g, b] => Ok(Self::new(r, g, b)),
            [r, g, b, alpha] => Ok(Self {
                r,
                g,
                b,
                alpha: Some(alpha),
            }),
            _ => Err(ColorError::Arity {
                expected: "3 or 4",
                found: components.len(),
            }),
        }
    }

    pub fn channels(&self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// Applies the policy to every channel without rounding the values.
    pub fn checked(&self, policy: ChannelPolicy) -> Result<Self, ColorError> {
        let [r, g, b] = checked_channels(self.channels(), policy)?;
        Ok(Self {
            r,
            g,
            b,
            alpha: self.alpha,
        })
    }
}

impl FromStr for ColorTriplet {
    type Err = ColorError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let components = parse_components(text)?;
        Self::from_components(&components)
    }
}

/// `#rrggbb` with lowercase digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexColor(String);

impl HexColor {
    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        HexColor(format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2]))
    }

    pub fn parse(text: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidHex(text.to_string());

        let digits = text.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        Ok(HexColor(text.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_rgb8(&self) -> [u8; 3] {
        // the string is always validated on creation
        let byte = |idx: usize| u8::from_str_radix(&self.0[idx..idx + 2], 16).unwrap_or(0);
        [byte(1), byte(3), byte(5)]
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for HexColor {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedTriplet {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl NormalizedTriplet {
    #[allow(dead_code)]
    pub fn denormalize(&self) -> ColorTriplet {
        ColorTriplet::new(
            self.r as f64 * MAX_CHANNEL_VALUE,
            self.g as f64 * MAX_CHANNEL_VALUE,
            self.b as f64 * MAX_CHANNEL_VALUE,
        )
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// Converts "r,g,b" text into a hex code using the default policy.
#[allow(dead_code)]
pub fn rgb_to_hex(text: &str) -> Result<HexColor, ColorError> {
    rgb_to_hex_with_policy(text, ChannelPolicy::default())
}

pub fn rgb_to_hex_with_policy(text: &str, policy: ChannelPolicy) -> Result<HexColor, ColorError> {
    let components = parse_components(text)?;
    if components.len() != 3 {
        return Err(ColorError::Arity {
            expected: "3",
            found: components.len(),
        });
    }
    let triplet = ColorTriplet::from_components(&components)?;
    triplet_to_hex(&triplet, policy)
}

pub fn triplet_to_hex(triplet: &ColorTriplet, policy: ChannelPolicy) -> Result<HexColor, ColorError> {
    Ok(HexColor::from_rgb8(triplet_to_rgb8(triplet, policy)?))
}

pub fn triplet_to_rgb8(triplet: &ColorTriplet, policy: ChannelPolicy) -> Result<[u8; 3], ColorError> {
    let rounded = triplet.channels().map(f64::round_ties_even);
    let [r, g, b] = checked_channels(rounded, policy)?;
    // the values are whole numbers within [0, 255] at this point
    return Ok([r as u8, g as u8, b as u8]);
}

pub fn normalize(triplets: &[ColorTriplet]) -> Vec<NormalizedTriplet> {
    triplets.iter().map(normalize_triplet).collect()
}

pub fn normalize_triplet(triplet: &ColorTriplet) -> NormalizedTriplet {
    NormalizedTriplet {
        r: (triplet.r / MAX_CHANNEL_VALUE) as f32,
        g: (triplet.g / MAX_CHANNEL_VALUE) as f32,
        b: (triplet.b / MAX_CHANNEL_VALUE) as f32,
    }
}

fn parse_components(text: &str) -> Result<Vec<f64>, ColorError> {
    text.trim().split(',').map(parse_channel).collect()
}

fn parse_channel(token: &str) -> Result<f64, ColorError> {
    let token = token.trim();
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ColorError::Parse {
            token: token.to_string(),
        }),
    }
}

fn checked_channels(values: [f64; 3], policy: ChannelPolicy) -> Result<[f64; 3], ColorError> {
    let mut result = values;
    for (value, channel) in result.iter_mut().zip(Channel::ALL) {
        *value = checked_channel(channel, *value, policy)?;
    }
    Ok(result)
}

fn checked_channel(channel: Channel, value: f64, policy: ChannelPolicy) -> Result<f64, ColorError> {
    if (0.0..=MAX_CHANNEL_VALUE).contains(&value) {
        return Ok(value);
    }

    match policy {
        ChannelPolicy::Clamp => {
            tracing::warn!(%channel, value, "channel value is outside of [0, 255], clamping");
            Ok(value.clamp(0.0, MAX_CHANNEL_VALUE))
        }
        ChannelPolicy::Reject => Err(ColorError::OutOfRange { channel, value }),
    }
}
