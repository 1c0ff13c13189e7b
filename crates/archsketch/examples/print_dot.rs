//! Example: printing the DOT source of the architecture diagram
//!
//! Builds the diagram with the light theme and writes its DOT source to
//! stdout, so it can be piped into any Graphviz tool:
//!
//! ```text
//! cargo run -p archsketch --example print_dot | dot -Tsvg > diagram.svg
//! ```

use archsketch::{DiagramBuilder, config::AppConfig, theme::ThemeName};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::default();
    config.style_mut().set_theme_name(ThemeName::Light);

    let builder = DiagramBuilder::new(config);
    let graph = builder.build()?;

    println!("{}", builder.to_dot(&graph)?);
    Ok(())
}
