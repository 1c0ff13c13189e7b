use std::{fs, process::Command};

use tempfile::tempdir;

use archsketch_cli::{Args, run};

fn graphviz_installed() -> bool {
    Command::new("dot")
        .arg("-V")
        .output()
        .is_ok_and(|output| output.status.success())
}

fn args_for(output: String) -> Args {
    Args {
        output: Some(output),
        format: None,
        theme: None,
        engine: None,
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_dot_output() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("architecture_diagram.dot");

    let written = run(&args_for(output_path.to_string_lossy().to_string()))
        .expect("DOT output does not need Graphviz");

    assert_eq!(written, output_path);
    let source = fs::read_to_string(&output_path).unwrap();
    assert!(source.starts_with("digraph RetailFixIt"));
    assert!(source.contains("subgraph cluster_azure"));
}

#[test]
fn e2e_smoke_test_png_output() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("architecture_diagram.png");

    let result = run(&args_for(output_path.to_string_lossy().to_string()));

    if graphviz_installed() {
        result.expect("PNG rendering should succeed");
        let metadata = fs::metadata(&output_path).unwrap();
        assert!(metadata.len() > 0);
    } else {
        let err = result.expect_err("PNG rendering needs Graphviz");
        assert!(err.is_engine_unavailable());
        assert!(!output_path.exists());
    }
}

#[test]
fn e2e_smoke_test_every_theme() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let mut sources = Vec::new();
    for theme in ["dark", "light"] {
        let output_path = temp_dir.path().join(format!("{theme}.dot"));
        let mut args = args_for(output_path.to_string_lossy().to_string());
        args.theme = Some(theme.parse().unwrap());

        run(&args).unwrap_or_else(|err| panic!("{theme} theme failed: {err}"));
        sources.push(fs::read_to_string(&output_path).unwrap());
    }

    assert_ne!(sources[0], sources[1]);
}

#[test]
fn e2e_smoke_test_config_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        "[render]\nformat = \"dot\"\n\n[style]\nfont = \"Inter\"\n",
    )
    .unwrap();

    let output_path = temp_dir.path().join("diagram.out");
    let mut args = args_for(output_path.to_string_lossy().to_string());
    args.config = Some(config_path.to_string_lossy().to_string());

    run(&args).expect("config-driven DOT output should succeed");

    let source = fs::read_to_string(&output_path).unwrap();
    assert!(source.contains("fontname=Inter"));
    assert!(source.contains("\"Inter-Bold\""));
}

#[test]
fn e2e_smoke_test_missing_config_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("diagram.dot");

    let mut args = args_for(output_path.to_string_lossy().to_string());
    args.config = Some(
        temp_dir
            .path()
            .join("missing.toml")
            .to_string_lossy()
            .to_string(),
    );

    assert!(run(&args).is_err());
    assert!(!output_path.exists());
}

#[test]
fn e2e_smoke_test_failure_reported_with_logging_off() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("diagram.dot");
    let config_path = temp_dir.path().join("missing.toml");

    let output = Command::new(env!("CARGO_BIN_EXE_archsketch"))
        .arg("--log-level")
        .arg("off")
        .arg("--config")
        .arg(&config_path)
        .arg("--output")
        .arg(&output_path)
        .output()
        .expect("Failed to run archsketch");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Missing configuration file"), "stderr: {stderr}");
    assert!(output.stdout.is_empty());
    assert!(!output_path.exists());
}
