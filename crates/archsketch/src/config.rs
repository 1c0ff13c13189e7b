//! Configuration types for archsketch rendering.
//!
//! This module provides configuration structures that control how the
//! diagram is rendered and styled. All types implement
//! [`serde::Deserialize`] for loading from external sources; every field is
//! optional and falls back to the defaults, which reproduce the stock
//! diagram.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining render and style settings.
//! - [`RenderConfig`] - Output format and Graphviz layout engine.
//! - [`StyleConfig`] - Theme, font and background color.
//!
//! # Example
//!
//! ```
//! # use archsketch::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.style().theme().is_ok());
//! ```

use serde::Deserialize;

use archsketch_core::color::Color;

use crate::{
    architecture::DEFAULT_FONT,
    export::{LayoutEngine, OutputFormat},
    theme::{Theme, ThemeName},
};

/// Top-level application configuration combining render and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified render and style configurations.
    pub fn new(render: RenderConfig, style: StyleConfig) -> Self {
        Self { render, style }
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns a mutable reference to the render configuration, used to
    /// apply command-line overrides.
    pub fn render_mut(&mut self) -> &mut RenderConfig {
        &mut self.render
    }

    /// Returns a mutable reference to the style configuration, used to
    /// apply command-line overrides.
    pub fn style_mut(&mut self) -> &mut StyleConfig {
        &mut self.style
    }
}

/// Output format and layout engine.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    format: OutputFormat,

    #[serde(default)]
    engine: LayoutEngine,
}

impl RenderConfig {
    pub fn new(format: OutputFormat, engine: LayoutEngine) -> Self {
        Self { format, engine }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn engine(&self) -> LayoutEngine {
        self.engine
    }

    pub fn set_format(&mut self, format: OutputFormat) {
        self.format = format;
    }

    pub fn set_engine(&mut self, engine: LayoutEngine) {
        self.engine = engine;
    }
}

/// Visual styling configuration.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Built-in palette.
    #[serde(default)]
    theme: ThemeName,

    /// Base font family. Cluster titles use its `-Bold` variant.
    #[serde(default)]
    font: Option<String>,

    /// Overrides the theme background, as a color string.
    #[serde(default)]
    background_color: Option<String>,
}

impl StyleConfig {
    pub fn theme_name(&self) -> ThemeName {
        self.theme
    }

    pub fn set_theme_name(&mut self, theme: ThemeName) {
        self.theme = theme;
    }

    /// Returns the configured font, or [`DEFAULT_FONT`].
    pub fn font(&self) -> &str {
        self.font.as_deref().unwrap_or(DEFAULT_FONT)
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Resolves the full [`Theme`], applying the background override.
    ///
    /// # Errors
    ///
    /// Returns an error if the background override is not a valid color.
    pub fn theme(&self) -> Result<Theme, String> {
        let theme = Theme::named(self.theme);
        Ok(match self.background_color()? {
            Some(background) => theme.with_background(background),
            None => theme,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_reproduce_stock_diagram() {
        let config = AppConfig::default();
        assert_eq!(config.render().format(), OutputFormat::Png);
        assert_eq!(config.render().engine(), LayoutEngine::Dot);
        assert_eq!(config.style().font(), "Helvetica");
        assert_eq!(config.style().theme().unwrap(), Theme::dark());
    }

    #[test]
    fn test_deserialize_full() {
        let config: AppConfig = toml::from_str(
            r##"
            [render]
            format = "svg"
            engine = "neato"

            [style]
            theme = "light"
            font = "Inter"
            background_color = "#ffffff"
            "##,
        )
        .unwrap();

        assert_eq!(config.render().format(), OutputFormat::Svg);
        assert_eq!(config.render().engine(), LayoutEngine::Neato);
        assert_eq!(config.style().theme_name(), ThemeName::Light);
        assert_eq!(config.style().font(), "Inter");

        let theme = config.style().theme().unwrap();
        assert_eq!(theme.background.to_hex(), "#ffffff");
        assert_eq!(theme.mobile, Theme::light().mobile);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: AppConfig = toml::from_str("[style]\ntheme = \"light\"\n").unwrap();
        assert_eq!(config.render().format(), OutputFormat::Png);
        assert_eq!(config.style().theme_name(), ThemeName::Light);
    }

    #[test]
    fn test_invalid_background_color() {
        let config: AppConfig =
            toml::from_str("[style]\nbackground_color = \"not-a-color\"\n").unwrap();
        let err = config.style().theme().unwrap_err();
        assert!(err.contains("Invalid background color"));
    }

    #[test]
    fn test_unknown_theme_rejected() {
        let result: Result<AppConfig, _> = toml::from_str("[style]\ntheme = \"neon\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = AppConfig::default();
        config.render_mut().set_format(OutputFormat::Dot);
        config.style_mut().set_theme_name(ThemeName::Light);

        assert_eq!(config.render().format(), OutputFormat::Dot);
        assert_eq!(config.style().theme_name(), ThemeName::Light);
    }
}
