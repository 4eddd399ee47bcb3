use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use anyhow::anyhow;
use serde::Deserialize;
use serde::Serialize;
use skyfare_amadeus::AmadeusConfig;
use skyfare_core::PipelineConfig;

pub const SKYFARE_HOME_ENV_VAR: &str = "SKYFARE_HOME";
const CONFIG_FILE: &str = "config.toml";

/// Contents of `config.toml`. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub pipeline: PipelineConfig,

    #[serde(default)]
    pub amadeus: AmadeusConfig,
}

/// `$SKYFARE_HOME`, or `~/.skyfare` when unset.
pub fn find_skyfare_home() -> Result<PathBuf> {
    if let Ok(env_home) = std::env::var(SKYFARE_HOME_ENV_VAR)
        && !env_home.is_empty()
    {
        return Ok(PathBuf::from(env_home));
    }

    let mut home = dirs::home_dir().ok_or_else(|| anyhow!("Could not locate home directory"))?;
    home.push(".skyfare");
    Ok(home)
}

/// Loads the configuration. A missing default file yields defaults; a missing explicit file is
/// an error.
pub fn load_config(explicit: Option<&Path>) -> Result<CliConfig> {
    let (path, required) = match explicit {
        Some(path) => (path.to_path_buf(), true),
        None => (find_skyfare_home()?.join(CONFIG_FILE), false),
    };

    if !path.exists() {
        if required {
            return Err(anyhow!("config file {} does not exist", path.display()));
        }
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(CliConfig::default());
    }

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config: CliConfig =
        toml::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))?;
    config
        .pipeline
        .validate()
        .with_context(|| format!("invalid [pipeline] section in {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use skyfare_protocol::PriceSort;
    use tempfile::TempDir;

    #[test]
    fn reads_sections_and_fills_defaults() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            r#"
[pipeline]
page_size = 5
default_sort = "highest"

[amadeus]
base_url = "http://localhost:9999"
"#,
        )?;

        let config = load_config(Some(&path))?;
        assert_eq!(config.pipeline.page_size, 5);
        assert_eq!(config.pipeline.default_sort, PriceSort::Highest);
        assert_eq!(config.pipeline.debounce_ms, 300);
        assert_eq!(config.amadeus.base_url, "http://localhost:9999");
        assert_eq!(config.amadeus.location_page_limit, 20);
        Ok(())
    }

    #[test]
    fn invalid_pipeline_values_are_rejected() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[pipeline]\npage_size = 0\n")?;

        let err = load_config(Some(&path)).expect_err("page_size 0");
        assert!(format!("{err:#}").contains("page_size must be > 0"));
        Ok(())
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = load_config(Some(Path::new("/definitely/not/here.toml"))).expect_err("missing");
        assert!(err.to_string().contains("does not exist"));
    }
}
