use std::collections::HashMap;
use std::path::Path;

use super::value::ConfigValue;
use super::ConfigError;

/// Load and flatten a YAML file. A missing file is not an error.
pub(crate) fn load_yaml_file(
    path: &Path,
    values: &mut HashMap<String, ConfigValue>,
) -> Result<(), ConfigError> {
    if !path.exists() {
        return Ok(());
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Load(format!("{}: {e}", path.display())))?;
    load_yaml_str(&content, values)
        .map_err(|e| ConfigError::Load(format!("{}: {e}", path.display())))
}

pub(crate) fn load_yaml_str(
    content: &str,
    values: &mut HashMap<String, ConfigValue>,
) -> Result<(), ConfigError> {
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| ConfigError::Load(e.to_string()))?;
    flatten_yaml("", &yaml, values);
    Ok(())
}

/// Flatten a YAML tree into dot-separated keys.
fn flatten_yaml(prefix: &str, value: &serde_yaml::Value, out: &mut HashMap<String, ConfigValue>) {
    match value {
        serde_yaml::Value::Mapping(map) => {
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    other => format!("{other:?}"),
                };
                let full_key = if prefix.is_empty() {
                    key
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_yaml(&full_key, v, out);
            }
        }
        leaf => {
            if !prefix.is_empty() {
                out.insert(prefix.to_string(), ConfigValue::from_yaml(leaf));
            }
        }
    }
}

/// Overlay environment variables onto the loaded values.
///
/// A variable replaces every existing key whose env form matches it
/// (`database.max_connections` <-> `DATABASE_MAX_CONNECTIONS`), and is also
/// stored under its naive dotted form (`DATABASE_URL` -> `database.url`) so
/// keys absent from YAML can still be supplied from the environment.
pub(crate) fn overlay_env(
    vars: impl IntoIterator<Item = (String, String)>,
    values: &mut HashMap<String, ConfigValue>,
) {
    let by_env_name: HashMap<String, String> = values
        .keys()
        .map(|key| (env_name(key), key.clone()))
        .collect();

    for (name, value) in vars {
        if let Some(key) = by_env_name.get(&name) {
            values.insert(key.clone(), ConfigValue::String(value.clone()));
        }
        let dotted = name.to_lowercase().replace('_', ".");
        values.insert(dotted, ConfigValue::String(value));
    }
}

fn env_name(key: &str) -> String {
    key.to_uppercase().replace('.', "_")
}
