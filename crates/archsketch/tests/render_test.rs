//! Rendering tests against the real Graphviz executable.
//!
//! The outcome depends on whether `dot` is installed, so each test checks the
//! installed case and the missing case separately.

use std::{fs, process::Command};

use tempfile::tempdir;

use archsketch::{
    ArchsketchError, DiagramBuilder,
    config::AppConfig,
    export::{self, OutputFormat},
};

fn graphviz_installed() -> bool {
    Command::new("dot")
        .arg("-V")
        .output()
        .is_ok_and(|output| output.status.success())
}

fn builder(format: OutputFormat) -> DiagramBuilder {
    let mut config = AppConfig::default();
    config.render_mut().set_format(format);
    DiagramBuilder::new(config)
}

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

#[test]
fn test_png_render_writes_non_empty_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("architecture_diagram.png");

    let builder = builder(OutputFormat::Png);
    let graph = builder.build().unwrap();
    let result = builder.render_to_file(&graph, &path);

    if graphviz_installed() {
        result.expect("rendering should succeed with Graphviz installed");
        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(&PNG_SIGNATURE));
    } else {
        let err = result.unwrap_err();
        assert!(err.is_engine_unavailable(), "unexpected error: {err}");
        assert!(!path.exists(), "no file may be written on failure");
    }
}

#[test]
fn test_rendering_twice_is_identical() {
    if !graphviz_installed() {
        return;
    }

    let dir = tempdir().unwrap();
    let path = dir.path().join("architecture_diagram.svg");
    let builder = builder(OutputFormat::Svg);
    let graph = builder.build().unwrap();

    builder.render_to_file(&graph, &path).unwrap();
    let first = fs::read(&path).unwrap();
    builder.render_to_file(&graph, &path).unwrap();
    let second = fs::read(&path).unwrap();

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_failed_render_keeps_previous_file() {
    if graphviz_installed() {
        return;
    }

    let dir = tempdir().unwrap();
    let path = dir.path().join("architecture_diagram.png");
    fs::write(&path, b"previous render").unwrap();

    let builder = builder(OutputFormat::Png);
    let graph = builder.build().unwrap();
    let err = builder.render_to_file(&graph, &path).unwrap_err();

    assert!(matches!(
        err,
        ArchsketchError::Export(export::Error::EngineUnavailable)
    ));
    assert_eq!(fs::read(&path).unwrap(), b"previous render");
}

#[test]
fn test_dot_format_writes_source() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("architecture_diagram.dot");

    let builder = builder(OutputFormat::Dot);
    let graph = builder.build().unwrap();
    builder.render_to_file(&graph, &path).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, builder.to_dot(&graph).unwrap());
}
