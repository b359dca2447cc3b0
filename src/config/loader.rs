//! Loading configuration files

use super::schema::TrainConfig;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Load a `TrainConfig` from a YAML (or JSON) file
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<TrainConfig> {
    let yaml_content = fs::read_to_string(config_path.as_ref()).map_err(|e| {
        Error::ConfigError(format!(
            "Failed to read config file {}: {}",
            config_path.as_ref().display(),
            e
        ))
    })?;

    serde_yaml::from_str(&yaml_content)
        .map_err(|e| Error::ConfigError(format!("Failed to parse YAML config: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_file() {
        let mut file = NamedTempFile::new().expect("temp file creation should succeed");
        writeln!(file, "OPTIM:\n  TYPE: AdamW\n  PARAM:\n    lr: 0.0003").expect("write");

        let config = load_config(file.path()).expect("load should succeed");
        assert_eq!(config.optim.kind.as_name(), Some("AdamW"));
        assert_eq!(config.optim.param.get_f64("lr"), Some(0.0003));
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config("/nonexistent/ajustar.yaml").expect_err("file is missing");
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_bad_yaml() {
        let mut file = NamedTempFile::new().expect("temp file creation should succeed");
        writeln!(file, "OPTIM: [unclosed").expect("write");

        let err = load_config(file.path()).expect_err("invalid yaml");
        assert!(matches!(err, Error::ConfigError(_)));
    }
}
