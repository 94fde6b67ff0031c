//! Board configuration.
//!
//! Sources, from lowest to highest precedence:
//! 1. built-in defaults (Omega2 register base, `/dev/mem`, `warn` logging)
//! 2. a toml file, given explicitly or through `DEVMEM_CONFIG_PATH`
//! 3. `DEVMEM_REG_BASE`, `DEVMEM_DEVICE` and `DEVMEM_LOG_LEVEL`
//! 4. command-line flags
//!
//! ```toml
//! reg_base = "0x10000000"
//! device = "/dev/mem"
//!
//! [logging]
//! level = "info"
//! format = "compact"
//! ```

use std::{
    env, fmt, fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use regmem_core::{check_reg_base, parse_u32, AddressResolver, DEFAULT_DEVICE, DEFAULT_REG_BASE};
use serde::{de, Deserialize, Deserializer, Serialize};

pub const CONFIG_PATH_ENV: &str = "DEVMEM_CONFIG_PATH";
pub const REG_BASE_ENV: &str = "DEVMEM_REG_BASE";
pub const DEVICE_ENV: &str = "DEVMEM_DEVICE";
pub const LOG_LEVEL_ENV: &str = "DEVMEM_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Register base merged into every address
    #[serde(
        default = "BoardConfig::default_reg_base",
        deserialize_with = "deserialize_reg_base"
    )]
    pub reg_base: u32,

    /// Physical memory device
    #[serde(default = "BoardConfig::default_device")]
    pub device: PathBuf,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BoardConfig {
    // These are needed for serde's `default` attribute
    pub const fn default_reg_base() -> u32 {
        DEFAULT_REG_BASE
    }

    pub fn default_device() -> PathBuf {
        PathBuf::from(DEFAULT_DEVICE)
    }

    /// Loads the configuration file, if any, and applies the environment overrides.
    ///
    /// `config_path` takes precedence over `DEVMEM_CONFIG_PATH`. A file that was asked for but
    /// cannot be read is an error; without any file the defaults are used.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config_path = config_path
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));

        let mut config = match config_path {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::default(),
        };

        config.apply_env_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid config file '{}'", path.display()))
    }

    /// Applies `DEVMEM_*` overrides, looking variables up through `lookup`
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(text) = lookup(REG_BASE_ENV) {
            let Some(reg_base) = parse_u32(&text) else {
                bail!("{REG_BASE_ENV}: invalid 32-bit number '{text}'");
            };
            self.reg_base = check_reg_base(reg_base).context(REG_BASE_ENV)?;
        }

        if let Some(device) = lookup(DEVICE_ENV) {
            self.device = PathBuf::from(device);
        }

        if let Some(level) = lookup(LOG_LEVEL_ENV) {
            self.logging.level = level;
        }

        Ok(())
    }

    /// Apply CLI overrides to the configuration
    ///
    /// Every `-v` raises the log level one step: info, debug, trace.
    pub fn apply_cli_overrides(
        &mut self,
        reg_base: Option<u32>,
        device: Option<PathBuf>,
        verbose: u8,
    ) {
        if let Some(reg_base) = reg_base {
            self.reg_base = reg_base;
        }

        if let Some(device) = device {
            self.device = device;
        }

        match verbose {
            0 => {}
            1 => self.logging.level = "info".to_string(),
            2 => self.logging.level = "debug".to_string(),
            _ => self.logging.level = "trace".to_string(),
        }
    }

    pub fn resolver(&self) -> AddressResolver {
        AddressResolver::new(self.reg_base)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            reg_base: Self::default_reg_base(),
            device: Self::default_device(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn default_level() -> String {
        "warn".to_string()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: Self::default_level(), format: LogFormat::default() }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogFormat {
    #[serde(rename = "json")]
    Json,
    #[serde(rename = "pretty")]
    Pretty,
    #[default]
    #[serde(rename = "compact")]
    Compact,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Json => write!(f, "json"),
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Compact => write!(f, "compact"),
        }
    }
}

/// Accepts either a toml integer or a string in any of the command-line number forms, as long
/// as the base is word aligned
fn deserialize_reg_base<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Literal {
        Number(u32),
        Text(String),
    }

    let reg_base = match Literal::deserialize(deserializer)? {
        Literal::Number(number) => number,
        Literal::Text(text) => parse_u32(&text)
            .ok_or_else(|| de::Error::custom(format!("invalid 32-bit number '{text}'")))?,
    };
    check_reg_base(reg_base).map_err(de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_config_defaults() {
        let config = BoardConfig::default();
        assert_eq!(config.reg_base, 0x1000_0000);
        assert_eq!(config.device, PathBuf::from("/dev/mem"));
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert_eq!(config.resolver().resolve(0xd24).address, 0x1000_0d24);
    }

    #[test]
    fn test_config_from_toml() {
        let config: BoardConfig = toml::from_str(
            r#"
            reg_base = "0x1f00_0000"
            device = "/dev/fake-mem"

            [logging]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.reg_base, 0x1f00_0000);
        assert_eq!(config.device, PathBuf::from("/dev/fake-mem"));
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Json);

        let config: BoardConfig = toml::from_str("reg_base = 268435456").unwrap();
        assert_eq!(config.reg_base, 0x1000_0000);
        assert_eq!(config.device, PathBuf::from("/dev/mem"));

        assert!(toml::from_str::<BoardConfig>("reg_base = \"0xnope\"").is_err());
        assert!(toml::from_str::<BoardConfig>("reg_base = -1").is_err());

        let err = toml::from_str::<BoardConfig>("reg_base = \"0x10000001\"").unwrap_err();
        assert!(err.to_string().contains("not word aligned"), "{err}");
        assert!(toml::from_str::<BoardConfig>("reg_base = 268435458").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> =
            [(REG_BASE_ENV, "0"), (DEVICE_ENV, "/tmp/mem"), (LOG_LEVEL_ENV, "debug")].into();

        let mut config = BoardConfig::default();
        config.apply_env_overrides(|key| vars.get(key).map(|v| v.to_string())).unwrap();
        assert_eq!(config.reg_base, 0);
        assert_eq!(config.device, PathBuf::from("/tmp/mem"));
        assert_eq!(config.logging.level, "debug");

        let err = BoardConfig::default()
            .apply_env_overrides(|key| (key == REG_BASE_ENV).then(|| "ten".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains(REG_BASE_ENV));

        let mut config = BoardConfig::default();
        let err = config
            .apply_env_overrides(|key| (key == REG_BASE_ENV).then(|| "0x10000003".to_string()))
            .unwrap_err();
        assert!(format!("{err:#}").contains("not word aligned"), "{err:#}");
        assert_eq!(config.reg_base, 0x1000_0000);
    }

    #[test]
    fn test_cli_overrides_win() {
        let mut config = BoardConfig::default();
        config.apply_cli_overrides(Some(0x1e00_0000), Some(PathBuf::from("/dev/other")), 2);
        assert_eq!(config.reg_base, 0x1e00_0000);
        assert_eq!(config.device, PathBuf::from("/dev/other"));
        assert_eq!(config.logging.level, "debug");

        config.apply_cli_overrides(None, None, 0);
        assert_eq!(config.reg_base, 0x1e00_0000);
        assert_eq!(config.logging.level, "debug");

        config.apply_cli_overrides(None, None, 5);
        assert_eq!(config.logging.level, "trace");
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let path = env::temp_dir().join(format!("regmem-{}-no-such.toml", std::process::id()));
        let err = BoardConfig::load_from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
