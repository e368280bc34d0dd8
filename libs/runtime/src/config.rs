use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Application configuration: typed global sections plus a per-module bag.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Host process settings.
    pub server: ServerConfig,
    /// Logging configuration (optional, uses defaults if None).
    pub logging: Option<LoggingConfig>,
    /// Per-module configuration bag: module_name → arbitrary JSON/YAML value.
    #[serde(default)]
    pub modules: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Base directory for relative paths (log files). Empty means the
    /// current working directory; normalized to an absolute path on load.
    #[serde(default)]
    pub home_dir: String,
}

/// Logging configuration - maps subsystem names to their logging settings.
/// Key "default" is the catch-all for logs that don't match explicit subsystems.
pub type LoggingConfig = HashMap<String, Section>;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Section {
    pub console_level: String, // "info", "debug", "error", "off"
    #[serde(default)]
    pub file: String, // "logs/ledger.log"; empty disables the file sink
    #[serde(default)]
    pub file_level: String,
    #[serde(default)]
    pub max_backups: Option<usize>, // How many rotated files to keep
    #[serde(default)]
    pub max_size_mb: Option<u64>, // Rotate once the file passes this size
}

/// Create a default logging configuration.
pub fn default_logging_config() -> LoggingConfig {
    let mut logging = HashMap::new();
    logging.insert(
        "default".to_string(),
        Section {
            console_level: "info".to_string(),
            file: "logs/ledger.log".to_string(),
            file_level: "debug".to_string(),
            max_backups: Some(3),
            max_size_mb: Some(100),
        },
    );
    logging
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: Some(default_logging_config()),
            modules: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration with layered loading: defaults → YAML file → environment variables.
    /// Also normalizes `server.home_dir` into an absolute path.
    pub fn load_layered<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        use figment::{
            providers::{Env, Format, Serialized, Yaml},
            Figment,
        };

        let path = config_path.as_ref();
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        // Optional sections stay None unless YAML/ENV provide them.
        let base = AppConfig {
            server: ServerConfig::default(),
            logging: None,
            modules: HashMap::new(),
        };

        let figment = Figment::new()
            .merge(Serialized::defaults(base))
            .merge(Yaml::file(path))
            // Example: APP__SERVER__HOME_DIR=/var/lib/ledger maps to server.home_dir
            .merge(Env::prefixed("APP__").split("__"));

        let mut config: AppConfig = figment
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        normalize_home_dir_inplace(&mut config.server)
            .context("Failed to resolve server.home_dir")?;

        Ok(config)
    }

    /// Load configuration from file or fall back to defaults.
    pub fn load_or_default<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_layered(path),
            None => {
                let mut c = Self::default();
                normalize_home_dir_inplace(&mut c.server)
                    .context("Failed to resolve server.home_dir (defaults)")?;
                Ok(c)
            }
        }
    }

    /// Serialize configuration to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config to YAML")
    }

    /// Apply overrides from command line arguments.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        // -v / -vv raise the console level of the "default" section.
        let logging = self.logging.get_or_insert_with(default_logging_config);
        if let Some(default_section) = logging.get_mut("default") {
            match args.verbose {
                0 => {}
                1 => default_section.console_level = "debug".to_string(),
                _ => default_section.console_level = "trace".to_string(),
            }
        }
    }

    /// Deserialize one module's section of the bag; missing sections yield `T::default()`.
    pub fn module_config<T>(&self, module_name: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        match self.modules.get(module_name) {
            Some(raw) => serde_json::from_value(raw.clone())
                .with_context(|| format!("Invalid config for module '{module_name}'")),
            None => Ok(T::default()),
        }
    }
}

/// Command line arguments structure.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config: Option<String>,
    pub print_config: bool,
    pub verbose: u8,
}

/// Make `server.home_dir` absolute: empty → cwd, `~/x` → `$HOME/x`, relative → cwd-joined.
fn normalize_home_dir_inplace(server: &mut ServerConfig) -> Result<()> {
    let cwd = std::env::current_dir().context("cannot read current directory")?;
    let raw = server.home_dir.trim();

    let resolved: PathBuf = if raw.is_empty() {
        cwd
    } else if let Some(rest) = raw.strip_prefix("~/") {
        let home = std::env::var_os("HOME").context("HOME is not set, cannot expand '~'")?;
        PathBuf::from(home).join(rest)
    } else {
        let p = PathBuf::from(raw);
        if p.is_absolute() {
            p
        } else {
            cwd.join(p)
        }
    };

    server.home_dir = resolved.to_string_lossy().to_string();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct DemoModuleConfig {
        #[serde(default)]
        limit: u32,
    }

    #[test]
    fn test_default_config_structure() {
        let config = AppConfig::default();

        // raw (not yet normalized)
        assert_eq!(config.server.home_dir, "");

        let logging = config.logging.as_ref().unwrap();
        let default_section = &logging["default"];
        assert_eq!(default_section.console_level, "info");
        assert_eq!(default_section.file, "logs/ledger.log");

        assert!(config.modules.is_empty());
    }

    #[test]
    fn test_load_layered_reads_yaml() {
        let tmp = tempdir().unwrap();
        let cfg_path = tmp.path().join("cfg.yaml");
        let home = tmp.path().join("home");

        let yaml = format!(
            r#"
server:
  home_dir: "{}"

logging:
  default:
    console_level: debug
    file: "logs/default.log"

modules:
  demo:
    limit: 7
"#,
            home.to_string_lossy().replace('\\', "/")
        );
        fs::write(&cfg_path, yaml).unwrap();

        let config = AppConfig::load_layered(&cfg_path).unwrap();

        assert!(Path::new(&config.server.home_dir).is_absolute());
        assert!(config.server.home_dir.ends_with("home"));

        let def = &config.logging.as_ref().unwrap()["default"];
        assert_eq!(def.console_level, "debug");
        assert_eq!(def.file, "logs/default.log");
        assert_eq!(def.file_level, "");

        let demo: DemoModuleConfig = config.module_config("demo").unwrap();
        assert_eq!(demo, DemoModuleConfig { limit: 7 });
    }

    #[test]
    fn test_load_layered_minimal_yaml_keeps_optional_sections_empty() {
        let tmp = tempdir().unwrap();
        let cfg_path = tmp.path().join("cfg.yaml");
        fs::write(&cfg_path, "server: {}\n").unwrap();

        let config = AppConfig::load_layered(&cfg_path).unwrap();

        assert!(config.logging.is_none());
        assert!(config.modules.is_empty());
        assert!(Path::new(&config.server.home_dir).is_absolute());
    }

    #[test]
    fn test_load_layered_rejects_unknown_fields() {
        let tmp = tempdir().unwrap();
        let cfg_path = tmp.path().join("cfg.yaml");
        fs::write(&cfg_path, "server: {}\nbogus: 1\n").unwrap();

        assert!(AppConfig::load_layered(&cfg_path).is_err());
    }

    #[test]
    fn test_load_layered_missing_file_fails() {
        let tmp = tempdir().unwrap();
        assert!(AppConfig::load_layered(tmp.path().join("absent.yaml")).is_err());
    }

    #[test]
    fn test_load_or_default_without_path() {
        let config = AppConfig::load_or_default::<&str>(None).unwrap();
        assert!(Path::new(&config.server.home_dir).is_absolute());
        assert!(config.logging.is_some());
    }

    #[test]
    fn test_module_config_missing_section_uses_default() {
        let config = AppConfig::default();
        let demo: DemoModuleConfig = config.module_config("demo").unwrap();
        assert_eq!(demo, DemoModuleConfig::default());
    }

    #[test]
    fn test_module_config_type_mismatch_errors() {
        let mut config = AppConfig::default();
        config
            .modules
            .insert("demo".into(), serde_json::json!({"limit": "lots"}));
        let res: Result<DemoModuleConfig> = config.module_config("demo");
        assert!(res.is_err());
    }

    #[test]
    fn test_cli_overrides_verbosity() {
        let mut config = AppConfig::default();

        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config.logging.as_ref().unwrap()["default"].console_level, "info");

        config.apply_cli_overrides(&CliArgs {
            verbose: 1,
            ..CliArgs::default()
        });
        assert_eq!(config.logging.as_ref().unwrap()["default"].console_level, "debug");

        config.apply_cli_overrides(&CliArgs {
            verbose: 3,
            ..CliArgs::default()
        });
        assert_eq!(config.logging.as_ref().unwrap()["default"].console_level, "trace");
    }

    #[test]
    fn test_cli_overrides_fill_missing_logging() {
        let mut config = AppConfig {
            logging: None,
            ..AppConfig::default()
        };
        config.apply_cli_overrides(&CliArgs {
            verbose: 1,
            ..CliArgs::default()
        });
        assert_eq!(config.logging.as_ref().unwrap()["default"].console_level, "debug");
    }

    #[test]
    fn test_to_yaml_round_trips_sections() {
        let config = AppConfig::default();
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("server:"));
        assert!(yaml.contains("console_level: info"));
    }

    #[test]
    fn test_normalize_relative_home_dir() {
        let mut server = ServerConfig {
            home_dir: "data/ledger".into(),
        };
        normalize_home_dir_inplace(&mut server).unwrap();
        let p = PathBuf::from(&server.home_dir);
        assert!(p.is_absolute());
        assert!(p.ends_with("data/ledger"));
    }
}
