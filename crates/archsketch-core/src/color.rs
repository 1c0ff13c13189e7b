//! Color handling for archsketch diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Any CSS color string is accepted on input; output is
//! always the `#rrggbb` / `#rrggbbaa` form understood by Graphviz.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{DynamicColor, Srgb};

/// Wrapper around the `DynamicColor` type from the color crate.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_hex().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string.
    ///
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)",
    /// "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use archsketch_core::color::Color;
    ///
    /// let background = Color::new("#1a1a2e").unwrap();
    /// let white = Color::new("white").unwrap();
    /// assert_eq!(white.to_hex(), "#ffffff");
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Returns the color as a lowercase hex string.
    ///
    /// Opaque colors are written as `#rrggbb`; translucent ones carry the alpha
    /// byte as `#rrggbbaa`, which Graphviz also accepts.
    ///
    /// ```
    /// use archsketch_core::color::Color;
    ///
    /// let color = Color::new("rgb(45, 106, 79)").unwrap();
    /// assert_eq!(color.to_hex(), "#2d6a4f");
    ///
    /// let faded = Color::new("rgba(45, 106, 79, 0)").unwrap();
    /// assert_eq!(faded.to_hex(), "#2d6a4f00");
    /// ```
    pub fn to_hex(&self) -> String {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        if rgba.a == u8::MAX {
            format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
        } else {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                rgba.r, rgba.g, rgba.b, rgba.a
            )
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
