//! Placeholder template extraction for `helm values`.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::placeholder::{extract_keys, VariableTemplate};

/// Rendering format for a variable template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            other => Err(Error::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Yaml => f.write_str("yaml"),
        }
    }
}

/// Reads `path` and collects its placeholder keys.
pub fn extract_from_file(path: &Path) -> Result<VariableTemplate> {
    let text = fs::read_to_string(path).map_err(Error::io("read values", path))?;
    Ok(extract_keys(&text))
}

/// Renders `template` as pretty JSON or as YAML. The result has no trailing
/// newline.
pub fn render(template: &VariableTemplate, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(template)?,
        OutputFormat::Yaml => serde_yaml::to_string(template)?,
    };
    Ok(rendered.trim_end().to_string())
}
