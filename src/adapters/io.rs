//! Reading records and form values from files, and rendering results.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{OutputFormat, OutputSettings};
use crate::schema::LayoutError;

/// Result type for file input and rendering
pub type IoResult<T> = Result<T, ProvisioningError>;

#[derive(Debug, thiserror::Error)]
pub enum ProvisioningError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported file format: {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(PathBuf),

    #[error("Layout validation failed:\n{}", format_layout_errors(.0))]
    InvalidLayout(Vec<LayoutError>),
}

fn format_layout_errors(errors: &[LayoutError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Load a JSON or YAML document, picking the parser from the file extension.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> IoResult<T> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    if !matches!(ext, "json" | "yaml" | "yml") {
        return Err(ProvisioningError::UnsupportedFormat(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|source| ProvisioningError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Loaded {} bytes from {}", content.len(), path.display());

    let document = if ext == "json" {
        serde_json::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };
    Ok(document)
}

/// Serialize `value` for display according to the output settings.
pub fn render<T: Serialize + ?Sized>(value: &T, settings: &OutputSettings) -> IoResult<String> {
    let rendered = match settings.format {
        OutputFormat::Json if settings.pretty => serde_json::to_string_pretty(value)?,
        OutputFormat::Json => serde_json::to_string(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Field, FormValues, ProvisioningRecord};
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_json_and_yaml() {
        let dir = TempDir::new().unwrap();
        let json_path = dir.path().join("record.json");
        fs::write(&json_path, r#"{"name": "engine", "currentState": "RUNNING"}"#).unwrap();
        let yaml_path = dir.path().join("values.yml");
        fs::write(&yaml_path, "region: us-west-2\ncontainerCount: 3\n").unwrap();

        let record: ProvisioningRecord = load_document(&json_path).unwrap();
        assert_eq!(record.name.as_ref().and_then(|v| v.as_str()), Some("engine"));

        let values: FormValues = load_document(&yaml_path).unwrap();
        assert_eq!(values.get(Field::Region), Some(&json!("us-west-2")));
        assert_eq!(values.get(Field::ContainerCount), Some(&json!(3)));
    }

    #[test]
    fn test_unsupported_extension() {
        let result: IoResult<FormValues> = load_document(Path::new("values.toml"));
        assert!(matches!(result, Err(ProvisioningError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_file() {
        let result: IoResult<FormValues> = load_document(Path::new("/nonexistent/values.json"));
        assert!(matches!(result, Err(ProvisioningError::Io { .. })));
    }

    #[test]
    fn test_render_formats() {
        let values = FormValues::new().with(Field::Name, "engine");

        let compact = OutputSettings {
            format: OutputFormat::Json,
            pretty: false,
        };
        assert_eq!(render(&values, &compact).unwrap(), r#"{"name":"engine"}"#);

        let yaml = OutputSettings {
            format: OutputFormat::Yaml,
            pretty: true,
        };
        assert_eq!(render(&values, &yaml).unwrap(), "name: engine\n");
    }

    #[test]
    fn test_invalid_layout_message() {
        let error = ProvisioningError::InvalidLayout(vec![
            LayoutError::MissingField(Field::Vpc),
            LayoutError::NoOptions(Field::Region),
        ]);
        assert_eq!(
            error.to_string(),
            "Layout validation failed:\nField has no form element: vpc\nChoice field has no options: region"
        );
    }
}
