use super::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

    let config: Config = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse YAML config: {}", path.as_ref().display()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("phish-verdict-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let path = temp_path("partial.yaml");
        fs::write(&path, "model:\n  path: /opt/models/tree.json\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.model.path, "/opt/models/tree.json");
        assert_eq!(config.model.max_depth, Config::default().model.max_depth);
        assert_eq!(config.logging.level, "info");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_config_is_an_error() {
        let path = temp_path("does-not-exist.yaml");

        let err = load_config(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read config file"));
    }

    #[test]
    fn test_empty_mapping_is_default() {
        let path = temp_path("empty.yaml");
        fs::write(&path, "{}\n").unwrap();

        assert_eq!(load_config(&path).unwrap(), Config::default());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let path = temp_path("invalid.yaml");
        fs::write(&path, "model: [unclosed").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse YAML config"));

        fs::remove_file(&path).unwrap();
    }
}
