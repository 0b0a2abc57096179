//! Script files.
//!
//! A TOML script is an array of `[[op]]` tables; a JSON script is a bare
//! array of operation objects. Both use the tagged operation form, e.g.
//! `{ op = "type", text = "Hello" }`.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;
use typist_core::{Operation, Script};

use crate::error::ConfigError;

/// On-disk encoding of a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptFormat {
    Toml,
    Json,
}

impl ScriptFormat {
    /// Pick a format from the file extension. Anything but `.json` is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ScriptFormat::Json,
            _ => ScriptFormat::Toml,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TomlScript {
    #[serde(default)]
    op: Vec<Operation>,
}

/// Read a script file. The script is not validated.
pub fn load_script(path: &Path) -> Result<Script, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let script = parse_script(&content, ScriptFormat::from_path(path), path)?;
    debug!(path = %path.display(), operations = script.len(), "loaded script");
    Ok(script)
}

/// Parse script text; `origin` is only used in error messages.
pub fn parse_script(
    content: &str,
    format: ScriptFormat,
    origin: &Path,
) -> Result<Script, ConfigError> {
    let operations = match format {
        ScriptFormat::Toml => {
            let file: TomlScript = toml::from_str(content).map_err(|source| ConfigError::Toml {
                path: origin.to_path_buf(),
                source,
            })?;
            file.op
        }
        ScriptFormat::Json => {
            serde_json::from_str::<Vec<Operation>>(content).map_err(|source| {
                ConfigError::Json {
                    path: origin.to_path_buf(),
                    source,
                }
            })?
        }
    };
    Ok(Script::new(operations))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ScriptFormat::from_path(Path::new("a/greeting.JSON")),
            ScriptFormat::Json
        );
        assert_eq!(
            ScriptFormat::from_path(Path::new("greeting.toml")),
            ScriptFormat::Toml
        );
        assert_eq!(ScriptFormat::from_path(Path::new("greeting")), ScriptFormat::Toml);
    }

    #[test]
    fn test_load_toml_script() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("greeting.toml");
        fs::write(
            &path,
            r#"
            [[op]]
            op = "type"
            text = "Hallo Welt"

            [[op]]
            op = "pause"
            ms = 100

            [[op]]
            op = "delete"
            count = 10
            "#,
        )
        .unwrap();

        let script = load_script(&path).unwrap();
        assert_eq!(
            script.operations(),
            &[
                Operation::type_text("Hallo Welt"),
                Operation::pause(100),
                Operation::delete_chars(10),
            ]
        );
        assert_eq!(script.final_len().unwrap(), 0);
    }

    #[test]
    fn test_load_json_script() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("greeting.json");
        fs::write(
            &path,
            r#"[{"op":"type_delay","ms":5},{"op":"type","text":"世界您好！"}]"#,
        )
        .unwrap();

        let script = load_script(&path).unwrap();
        assert_eq!(script.len(), 2);
        assert_eq!(script.final_len().unwrap(), 5);
    }

    #[test]
    fn test_empty_toml_script() {
        let script = parse_script("", ScriptFormat::Toml, Path::new("empty.toml")).unwrap();
        assert!(script.is_empty());
    }

    #[test]
    fn test_bad_script_reports_path() {
        let err = parse_script(
            r#"[{"op":"jump"}]"#,
            ScriptFormat::Json,
            Path::new("bad.json"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn test_missing_script_is_io_error() {
        let err = load_script(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
