// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Defines the `Color` type: an RGB triple parsed from hex strings, packed
//! integers or a small set of CSS names.

use serde::{Deserialize, Serialize};
use std::{fmt, ops, str::FromStr};

/// An RGB color with components nominally in `[0, 1]`.
///
/// Components are stored as given; values produced by the parsers are sRGB
/// encoded. Use [`Color::to_linear`] before doing lighting math on them.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize,
)]
#[repr(C)]
pub struct Color {
    /// The red component.
    pub r: f32,
    /// The green component.
    pub g: f32,
    /// The blue component.
    pub b: f32,
}

/// An error returned when a string cannot be turned into a [`Color`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// The text looked like a hex or numeric color but was malformed.
    InvalidHex(String),
    /// The text is not one of the recognised color names.
    UnknownName(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorParseError::InvalidHex(text) => write!(f, "Invalid hex color '{text}'"),
            ColorParseError::UnknownName(name) => write!(f, "Unknown color name '{name}'"),
        }
    }
}

impl std::error::Error for ColorParseError {}

/// The names accepted by [`Color::from_name`], with their packed values.
const NAMED_COLORS: [(&str, u32); 9] = [
    ("black", 0x000000),
    ("white", 0xffffff),
    ("red", 0xff0000),
    ("green", 0x00ff00),
    ("blue", 0x0000ff),
    ("fuchsia", 0xff00ff),
    ("cyan", 0x00ffff),
    ("yellow", 0xffff00),
    ("orange", 0xff8000),
];

impl Color {
    // --- Common Color Constants ---

    /// `#000000`.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    /// `#ffffff`.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    /// `#ff0000`.
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    /// `#00ff00`.
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);
    /// `#0000ff`.
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);
    /// `#ff00ff`.
    pub const FUCHSIA: Self = Self::new(1.0, 0.0, 1.0);
    /// `#00ffff`.
    pub const CYAN: Self = Self::new(0.0, 1.0, 1.0);
    /// `#ffff00`.
    pub const YELLOW: Self = Self::new(1.0, 1.0, 0.0);
    /// `#ff8000`.
    pub const ORANGE: Self = Self::new(1.0, 128.0 / 255.0, 0.0);

    /// Creates a color from explicit components.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Unpacks `0xRRGGBB`. Bits above the low 24 are ignored.
    #[inline]
    pub fn from_u32(value: u32) -> Self {
        Self::new(
            ((value >> 16) & 0xff) as f32 / 255.0,
            ((value >> 8) & 0xff) as f32 / 255.0,
            (value & 0xff) as f32 / 255.0,
        )
    }

    /// Parses `#rrggbb` or the short form `#rgb` (each digit doubled).
    /// The leading `#` is optional.
    ///
    /// # Example
    /// ```
    /// use lumen_core::math::Color;
    /// assert_eq!(Color::from_hex_str("#f80").unwrap(), Color::from_hex_str("#ff8800").unwrap());
    /// ```
    pub fn from_hex_str(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let invalid = || ColorParseError::InvalidHex(hex.to_string());

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(invalid()),
        };
        u32::from_str_radix(&expanded, 16)
            .map(Self::from_u32)
            .map_err(|_| invalid())
    }

    /// Looks up one of the named colors, ignoring case.
    pub fn from_name(name: &str) -> Result<Self, ColorParseError> {
        let lower = name.to_ascii_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(n, _)| *n == lower)
            .map(|&(_, value)| Self::from_u32(value))
            .ok_or_else(|| ColorParseError::UnknownName(name.to_string()))
    }

    /// Sets all three components.
    #[inline]
    pub fn set(&mut self, r: f32, g: f32, b: f32) -> &mut Self {
        *self = Self::new(r, g, b);
        self
    }

    /// Copies the components of `c`.
    #[inline]
    pub fn copy_from(&mut self, c: &Color) -> &mut Self {
        *self = *c;
        self
    }

    /// Returns `[r, g, b]`.
    #[inline]
    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Converts sRGB-encoded components to linear space.
    #[inline]
    pub fn to_linear(&self) -> Self {
        Self::new(
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
        )
    }

    /// Encodes linear components into sRGB space.
    #[inline]
    pub fn from_linear(linear: &Color) -> Self {
        Self::new(
            linear_to_srgb(linear.r),
            linear_to_srgb(linear.g),
            linear_to_srgb(linear.b),
        )
    }
}

// --- Helper functions for sRGB conversion ---

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    /// Accepts `#rgb`, `#rrggbb`, a packed integer in decimal or `0x` form,
    /// or a color name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let parsed = if text.starts_with('#') {
            Self::from_hex_str(text)
        } else if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
            u32::from_str_radix(hex, 16)
                .map(Self::from_u32)
                .map_err(|_| ColorParseError::InvalidHex(text.to_string()))
        } else if text.starts_with(|c: char| c.is_ascii_digit()) {
            text.parse::<u32>()
                .map(Self::from_u32)
                .map_err(|_| ColorParseError::InvalidHex(text.to_string()))
        } else {
            Self::from_name(text)
        };

        if let Err(e) = &parsed {
            log::warn!("{e}");
        }
        parsed
    }
}

impl From<[f32; 3]> for Color {
    #[inline]
    fn from(a: [f32; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }
}

impl ops::Index<usize> for Color {
    type Output = f32;
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.r,
            1 => &self.g,
            2 => &self.b,
            _ => panic!("Index out of bounds for Color"),
        }
    }
}

impl ops::IndexMut<usize> for Color {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match index {
            0 => &mut self.r,
            1 => &mut self.g,
            2 => &mut self.b,
            _ => panic!("Index out of bounds for Color"),
        }
    }
}

impl_approx_eq!(Color { r, g, b });
