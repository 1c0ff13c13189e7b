//! Rendering through the Graphviz executables and atomic output writes.

use std::{
    fmt, fs,
    io::{self, Write},
    path::Path,
    str::FromStr,
};

use graphviz_rust::{
    cmd::{CommandArg, Format, Layout},
    exec_dot,
};
use log::{debug, info};
use serde::Deserialize;
use tempfile::Builder;

use archsketch_core::graph::Graph;

use super::{Error, Exporter, dot};

/// Output artifact format.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
    Pdf,
    /// The DOT source, written without invoking Graphviz.
    Dot,
}

impl OutputFormat {
    /// File extension conventionally used for the format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
            Self::Dot => "dot",
        }
    }

    fn graphviz_format(self) -> Format {
        match self {
            Self::Png => Format::Png,
            Self::Svg => Format::Svg,
            Self::Pdf => Format::Pdf,
            Self::Dot => Format::Dot,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            "pdf" => Ok(Self::Pdf),
            "dot" | "gv" => Ok(Self::Dot),
            other => Err(format!(
                "unknown output format `{other}` (expected png, svg, pdf or dot)"
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Graphviz layout program.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutEngine {
    /// Hierarchical layout, used for the architecture diagram.
    #[default]
    Dot,
    Neato,
    Fdp,
    Circo,
    Twopi,
}

impl LayoutEngine {
    pub fn name(self) -> &'static str {
        match self {
            Self::Dot => "dot",
            Self::Neato => "neato",
            Self::Fdp => "fdp",
            Self::Circo => "circo",
            Self::Twopi => "twopi",
        }
    }

    fn graphviz_layout(self) -> Layout {
        match self {
            Self::Dot => Layout::Dot,
            Self::Neato => Layout::Neato,
            Self::Fdp => Layout::Fdp,
            Self::Circo => Layout::Circo,
            Self::Twopi => Layout::Twopi,
        }
    }
}

impl FromStr for LayoutEngine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dot" => Ok(Self::Dot),
            "neato" => Ok(Self::Neato),
            "fdp" => Ok(Self::Fdp),
            "circo" => Ok(Self::Circo),
            "twopi" => Ok(Self::Twopi),
            other => Err(format!(
                "unknown layout engine `{other}` (expected dot, neato, fdp, circo or twopi)"
            )),
        }
    }
}

impl fmt::Display for LayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Exporter that runs the Graphviz executable on the DOT source.
#[derive(Debug, Clone, Copy)]
pub struct GraphvizExporter {
    format: OutputFormat,
    engine: LayoutEngine,
}

impl GraphvizExporter {
    pub fn new(format: OutputFormat, engine: LayoutEngine) -> Self {
        Self { format, engine }
    }
}

impl Exporter for GraphvizExporter {
    fn export(&self, graph: &Graph) -> Result<Vec<u8>, Error> {
        let source = dot::to_dot_string(graph)?;

        info!(format:% = self.format, engine:% = self.engine; "Running Graphviz");
        let args = vec![
            CommandArg::Layout(self.engine.graphviz_layout()),
            CommandArg::Format(self.format.graphviz_format()),
        ];
        let bytes = exec_dot(source, args).map_err(|err| engine_error(self.engine, err))?;

        if bytes.is_empty() {
            return Err(Error::EmptyOutput(self.format));
        }

        debug!(bytes = bytes.len(); "Graphviz output received");
        Ok(bytes)
    }
}

/// `exec_dot` always spawns `dot` and selects the layout with `-K`, so a
/// missing executable is `dot` whatever the engine.
fn engine_error(engine: LayoutEngine, err: io::Error) -> Error {
    match err.kind() {
        io::ErrorKind::NotFound => Error::EngineUnavailable,
        _ => Error::Engine {
            engine,
            message: err.to_string(),
        },
    }
}

/// Writes `bytes` to `path`, replacing any existing file atomically.
///
/// The data goes to a temporary file in the destination directory first and
/// is renamed over `path` only once fully written, so a failure never leaves
/// a truncated artifact behind. A replaced file keeps its permissions; a new
/// one gets the usual `0o666` less the process umask.
///
/// # Errors
///
/// Returns [`Error::Io`] if the temporary file cannot be created, written or
/// persisted.
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let existing = fs::metadata(path).ok().map(|metadata| metadata.permissions());

    let mut temp = temp_file_builder().tempfile_in(dir)?;
    if let Some(permissions) = existing {
        temp.as_file().set_permissions(permissions)?;
    }
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|err| Error::Io(err.error))?;

    debug!(path = path.display().to_string(), bytes = bytes.len(); "Output written");
    Ok(())
}

/// Temp files default to `0o600`; request `0o666` so the umask applies as it
/// would for a plain `File::create`.
#[cfg(unix)]
fn temp_file_builder() -> Builder<'static, 'static> {
    use std::os::unix::fs::PermissionsExt;

    let mut builder = Builder::new();
    builder.permissions(fs::Permissions::from_mode(0o666));
    builder
}

#[cfg(not(unix))]
fn temp_file_builder() -> Builder<'static, 'static> {
    Builder::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use tempfile::tempdir;

    #[test]
    fn test_format_parsing() {
        assert_eq!("png".parse::<OutputFormat>(), Ok(OutputFormat::Png));
        assert_eq!("SVG".parse::<OutputFormat>(), Ok(OutputFormat::Svg));
        assert_eq!("gv".parse::<OutputFormat>(), Ok(OutputFormat::Dot));
        assert!("jpeg".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Pdf.to_string(), "pdf");
    }

    #[test]
    fn test_engine_parsing() {
        assert_eq!("dot".parse::<LayoutEngine>(), Ok(LayoutEngine::Dot));
        assert_eq!("Neato".parse::<LayoutEngine>(), Ok(LayoutEngine::Neato));
        assert!("osage".parse::<LayoutEngine>().is_err());
        assert_eq!(LayoutEngine::default().to_string(), "dot");
    }

    #[test]
    fn test_missing_executable_maps_to_unavailable() {
        let err = engine_error(
            LayoutEngine::Dot,
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        assert!(matches!(err, Error::EngineUnavailable));

        let err = engine_error(
            LayoutEngine::Neato,
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        assert!(matches!(err, Error::EngineUnavailable));
        assert!(err.to_string().contains("`dot`"));
        assert!(!err.to_string().contains("neato"));

        let err = engine_error(
            LayoutEngine::Fdp,
            io::Error::other("syntax error in line 3"),
        );
        assert!(matches!(err, Error::Engine { engine: LayoutEngine::Fdp, .. }));
    }

    #[test]
    fn test_write_output_replaces_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("diagram.png");

        fs::write(&path, b"old contents that are longer").unwrap();
        write_output(&path, b"new").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"new");
        let leftovers = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1, "temporary file should have been renamed away");
    }

    #[test]
    fn test_write_output_into_missing_directory_fails_cleanly() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("diagram.png");

        assert!(matches!(write_output(&path, b"data"), Err(Error::Io(_))));
        assert!(!path.exists());
    }

    #[cfg(unix)]
    fn mode(path: &Path) -> u32 {
        use std::os::unix::fs::PermissionsExt;

        fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[cfg(unix)]
    #[test]
    fn test_write_output_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        for original in [0o644, 0o640] {
            let path = dir.path().join(format!("diagram-{original:o}.png"));
            fs::write(&path, b"previous render").unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(original)).unwrap();

            write_output(&path, b"new").unwrap();

            assert_eq!(mode(&path), original, "mode {original:o} was not kept");
            assert_eq!(fs::read(&path).unwrap(), b"new");
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_write_output_new_file_follows_umask() {
        let dir = tempdir().unwrap();
        let reference = dir.path().join("reference.png");
        let path = dir.path().join("diagram.png");

        fs::write(&reference, b"plain create").unwrap();
        write_output(&path, b"new").unwrap();

        assert_eq!(mode(&path), mode(&reference));
    }
}
