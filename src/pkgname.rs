use std::fs;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;
use toml::{Table, Value};

pub const PYPROJECT_TOML: &str = "pyproject.toml";
pub const SETUP_CFG: &str = "setup.cfg";
pub const SETUP_PY: &str = "setup.py";

const DEFAULT_BUILD_BACKEND: &str = "setuptools.build_meta";

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unsupported build backend \"{0}\"")]
    UnsupportedBackend(String),

    #[error("{0} metadata is not present")]
    MissingMetadata(BuildBackend),
}

/// Build backend family, taken from the first dot-segment of
/// `build-system.build-backend` (`poetry.core.masonry.api` -> poetry).
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum BuildBackend {
    #[default]
    Setuptools,
    FlitCore,
    Poetry,
    Pdm,
}

/// Resolve the distribution name of the Python project at `root`.
///
/// A PEP 621 `[project].name` wins outright; otherwise the name is pulled
/// from the metadata of whichever build backend the project declares.
/// Projects without a `pyproject.toml` are treated as setuptools projects.
pub fn package_name(root: &Path) -> Result<String, Error> {
    let path = root.join(PYPROJECT_TOML);

    if !path.is_file() {
        eprintln!("{PYPROJECT_TOML} is not present, falling back to setuptools");
        return setuptools_name(root);
    }

    let doc = read_pyproject(&path)?;

    if let Some(name) = pep621_name(&doc) {
        return Ok(name);
    }

    let backend = build_backend(&doc)?;
    eprintln!("build backend used: {backend}");

    match backend {
        BuildBackend::Setuptools => setuptools_name(root),
        BuildBackend::FlitCore => flit_name(&doc).ok_or(Error::MissingMetadata(backend)),
        BuildBackend::Poetry => tool_name(&doc, "poetry").ok_or(Error::MissingMetadata(backend)),
        BuildBackend::Pdm => tool_name(&doc, "pdm").ok_or(Error::MissingMetadata(backend)),
    }
}

fn read_pyproject(path: &Path) -> Result<Table, Error> {
    let raw = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    raw.parse::<Table>().map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn build_backend(doc: &Table) -> Result<BuildBackend, Error> {
    // a missing [build-system] table means "build with setuptools" (PEP 518)
    let declared = doc
        .get("build-system")
        .and_then(Value::as_table)
        .and_then(|build| build.get("build-backend"))
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_BUILD_BACKEND);

    let family = declared.split_once('.').map_or(declared, |(family, _)| family);

    BuildBackend::from_str(family).map_err(|_| Error::UnsupportedBackend(declared.to_owned()))
}

fn pep621_name(doc: &Table) -> Option<String> {
    doc.get("project")?
        .as_table()?
        .get("name")?
        .as_str()
        .map(str::to_owned)
}

fn tool_table<'a>(doc: &'a Table, name: &str) -> Option<&'a Table> {
    doc.get("tool")?.as_table()?.get(name)?.as_table()
}

fn tool_name(doc: &Table, tool: &str) -> Option<String> {
    tool_table(doc, tool)?.get("name")?.as_str().map(str::to_owned)
}

fn flit_name(doc: &Table) -> Option<String> {
    let metadata = tool_table(doc, "flit")?.get("metadata")?.as_table()?;

    metadata
        .get("dist-name")
        .or_else(|| metadata.get("module"))?
        .as_str()
        .map(str::to_owned)
}

fn setuptools_name(root: &Path) -> Result<String, Error> {
    let cfg = root.join(SETUP_CFG);
    if cfg.is_file() {
        let file = fs::File::open(&cfg).map_err(|source| Error::Io {
            path: cfg.clone(),
            source,
        })?;

        if let Some(name) = impl_setup_cfg_name(file) {
            return Ok(name);
        }
    }

    let py = root.join(SETUP_PY);
    if py.is_file() {
        let src = fs::read_to_string(&py).map_err(|source| Error::Io {
            path: py.clone(),
            source,
        })?;

        if let Some(name) = setup_py_name(&src) {
            return Ok(name);
        }
    }

    Err(Error::MissingMetadata(BuildBackend::Setuptools))
}

fn impl_setup_cfg_name<T: Read>(buf: T) -> Option<String> {
    let mut in_metadata = false;

    for line in BufReader::new(buf).lines().map_while(Result::ok) {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if line.starts_with('[') {
            in_metadata = line == "[metadata]";
            continue;
        }

        if !in_metadata {
            continue;
        }

        // setup.cfg accepts both `name = x` and `name: x`
        let Some((key, value)) = line.split_once('=').or_else(|| line.split_once(':')) else {
            continue;
        };

        if key.trim() == "name" {
            let value = value.trim();
            if !value.is_empty() {
                return Some(value.to_owned());
            }
        }
    }

    None
}

// good-enough scan for a `name="..."` keyword argument in a setup() call;
// names computed at runtime are not supported
fn setup_py_name(src: &str) -> Option<String> {
    let call = src.find("setup(")?;
    let mut rest = &src[call + "setup(".len()..];

    while let Some(pos) = rest.find("name") {
        let word_start = pos == 0 || {
            let prev = rest.as_bytes()[pos - 1];
            !(prev.is_ascii_alphanumeric() || prev == b'_' || prev == b'.')
        };

        let after = rest[pos + "name".len()..].trim_start();
        if word_start && after.starts_with('=') && !after.starts_with("==") {
            if let Some(name) = string_literal(after[1..].trim_start()) {
                return Some(name);
            }
        }

        rest = &rest[pos + "name".len()..];
    }

    None
}

fn string_literal(s: &str) -> Option<String> {
    let quote = s.chars().next()?;
    if quote != '"' && quote != '\'' {
        return None;
    }

    let body = &s[1..];
    body.find(quote).map(|end| body[..end].to_owned())
}
