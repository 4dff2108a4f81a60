//! Request parameter loading for the command-line front end.
//!
//! Parameters mirror the string map a provisioner attaches to a create
//! request. They may come from a JSON object on disk, from repeated
//! `KEY=VALUE` arguments, or both; arguments override file entries.

use std::collections::BTreeMap;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::Dir};
use thiserror::Error;

/// Errors raised while assembling request parameters.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ParamsError {
    /// Raised when an argument is not of the form `KEY=VALUE`.
    #[error("invalid parameter `{entry}`: expected KEY=VALUE")]
    Malformed {
        /// Offending argument.
        entry: String,
    },
    /// Raised when a parameter key is empty.
    #[error("invalid parameter `{entry}`: key must not be empty")]
    EmptyKey {
        /// Offending argument.
        entry: String,
    },
    /// Raised when reading the parameters file fails.
    #[error("failed to read parameters file `{path}`: {message}")]
    FileRead {
        /// Path that failed to read.
        path: String,
        /// Underlying error message.
        message: String,
    },
    /// Raised when the parameters file is not a JSON object of strings.
    #[error("failed to parse parameters file `{path}`: {message}")]
    FileParse {
        /// Path that failed to parse.
        path: String,
        /// Parser error message.
        message: String,
    },
}

/// Splits a `KEY=VALUE` argument. The value may itself contain `=`.
///
/// # Errors
///
/// Returns [`ParamsError`] when the separator is missing or the key is blank.
pub fn parse_parameter(entry: &str) -> Result<(String, String), ParamsError> {
    let Some((key, value)) = entry.split_once('=') else {
        return Err(ParamsError::Malformed {
            entry: entry.to_owned(),
        });
    };
    let trimmed_key = key.trim();
    if trimmed_key.is_empty() {
        return Err(ParamsError::EmptyKey {
            entry: entry.to_owned(),
        });
    }
    Ok((trimmed_key.to_owned(), value.to_owned()))
}

/// Merges parameters from an optional JSON file and `KEY=VALUE` arguments.
///
/// # Errors
///
/// Returns [`ParamsError`] when the file cannot be read or parsed, or an
/// argument is malformed.
pub fn load_parameters(
    file: Option<&Utf8Path>,
    entries: &[String],
) -> Result<BTreeMap<String, String>, ParamsError> {
    let mut parameters = match file {
        Some(path) => read_parameters_file(path)?,
        None => BTreeMap::new(),
    };
    for entry in entries {
        let (key, value) = parse_parameter(entry)?;
        parameters.insert(key, value);
    }
    Ok(parameters)
}

fn read_parameters_file(path: &Utf8Path) -> Result<BTreeMap<String, String>, ParamsError> {
    let content = read_to_string_ambient(path).map_err(|message| ParamsError::FileRead {
        path: path.to_string(),
        message,
    })?;
    serde_json::from_str(&content).map_err(|err| ParamsError::FileParse {
        path: path.to_string(),
        message: err.to_string(),
    })
}

fn read_to_string_ambient(path: &Utf8Path) -> Result<String, String> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_str().is_empty() => dir,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| format!("path has no file name: {path}"))?;

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|err| err.to_string())?;
    dir.read_to_string(file_name).map_err(|err| err.to_string())
}
