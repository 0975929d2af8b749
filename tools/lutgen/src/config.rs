//! Loading and printing JSON configuration.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use lut::prelude::LutParams;

/// Load parameters from a JSON file, or the eight-colour preset.
pub fn load_params(path: Option<&Path>) -> Result<LutParams> {
    let Some(path) = path else {
        return Ok(LutParams::eight_color());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let params: LutParams = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    params
        .validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(params)
}

/// Print the default configuration.
pub fn print_default() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&LutParams::default())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_path_gives_preset() {
        assert_eq!(load_params(None).unwrap(), LutParams::eight_color());
    }

    #[test]
    fn load_written_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");
        let params = LutParams::eight_color().with_layer_count(3).with_target_count(64);
        fs::write(&path, serde_json::to_string(&params).unwrap()).unwrap();
        assert_eq!(load_params(Some(&path)).unwrap(), params);
    }

    #[test]
    fn invalid_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");
        let params = LutParams::eight_color().with_layer_count(0);
        fs::write(&path, serde_json::to_string(&params).unwrap()).unwrap();
        let err = load_params(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("invalid config"));
    }

    #[test]
    fn malformed_json_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_params(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }
}
