//! Configuration loading and root folder resolution
//!
//! The root folder holds everything a Lithos install owns locally: the
//! SQLite catalog database and the pending-enquiry file. Service endpoints
//! and third-party credentials live in one TOML config file shared by both
//! services.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Environment variable overriding the root folder location
pub const ROOT_FOLDER_ENV: &str = "LITHOS_ROOT";

/// File name of the SQLite database inside the root folder
pub const DATABASE_FILE: &str = "lithos.db";

/// File name of the pending-enquiry store inside the root folder
pub const PENDING_ENQUIRY_FILE: &str = "pending_enquiry.json";

/// Resolve the root folder in priority order:
/// 1. Command-line argument (highest priority)
/// 2. LITHOS_ROOT environment variable
/// 3. `root_folder` key in the TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&str>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = default_config_file() {
        if let Ok(config) = SiteConfig::load(&config_path) {
            if let Some(root_folder) = config.root_folder {
                return PathBuf::from(root_folder);
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// Ensure the root folder exists, creating it if needed
pub fn ensure_root_folder(root: &Path) -> Result<()> {
    std::fs::create_dir_all(root)?;
    Ok(())
}

/// Path of the SQLite database inside the root folder
pub fn database_path(root: &Path) -> PathBuf {
    root.join(DATABASE_FILE)
}

/// Path of the pending-enquiry store inside the root folder
pub fn pending_enquiry_path(root: &Path) -> PathBuf {
    root.join(PENDING_ENQUIRY_FILE)
}

/// Default configuration file path for the platform
pub fn default_config_file() -> Result<PathBuf> {
    let user_config = dirs::config_dir()
        .map(|d| d.join("lithos").join("config.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

    if user_config.exists() {
        return Ok(user_config);
    }

    // System-wide fallback on Linux installs
    let system_config = PathBuf::from("/etc/lithos/config.toml");
    if system_config.exists() {
        return Ok(system_config);
    }

    Err(Error::Config(format!(
        "Config file not found: {}",
        user_config.display()
    )))
}

/// OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("lithos"))
        .unwrap_or_else(|| PathBuf::from("./lithos_data"))
}

/// Full site configuration, deserialized from the TOML config file
///
/// Every section has a usable default so a missing or partial config file
/// still yields a runnable (development) configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteConfig {
    /// Root folder override (lowest-priority source, see resolve_root_folder)
    #[serde(default)]
    pub root_folder: Option<String>,
    #[serde(default)]
    pub shop: ShopConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub document_store: DocumentStoreConfig,
    #[serde(default)]
    pub mail: MailConfig,
    #[serde(default)]
    pub object_store: ObjectStoreConfig,
}

/// Shopfront service settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8780,
        }
    }
}

/// Admin back-office service settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub host: String,
    pub port: u16,
    /// Admin password. Empty string disables the login gate (development).
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8781,
            password: String::new(),
        }
    }
}

/// Hosted document-store connection settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DocumentStoreConfig {
    pub base_url: String,
    pub database: String,
    pub api_key: String,
}

impl Default for DocumentStoreConfig {
    fn default() -> Self {
        Self {
            base_url: "https://docstore.example.com".to_string(),
            database: "lithos".to_string(),
            api_key: String::new(),
        }
    }
}

/// Transactional mail provider settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    pub endpoint: String,
    pub api_key: String,
    /// Where enquiry notifications are delivered
    pub to_address: String,
    /// Disable the mail side channel entirely (e.g. local development)
    pub enabled: bool,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://mail.example.com".to_string(),
            api_key: String::new(),
            to_address: "enquiries@example.com".to_string(),
            enabled: true,
        }
    }
}

/// Object storage settings for site-content image uploads
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObjectStoreConfig {
    pub base_url: String,
    pub bucket: String,
    pub api_key: String,
}

impl Default for ObjectStoreConfig {
    fn default() -> Self {
        Self {
            base_url: "https://objects.example.com".to_string(),
            bucket: "lithos-site".to_string(),
            api_key: String::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load the platform config file, falling back to defaults when absent
    ///
    /// A missing file is normal on first run; a present-but-broken file is
    /// reported and replaced by defaults rather than aborting startup.
    pub fn load_default() -> Self {
        match default_config_file() {
            Ok(path) => match Self::load(&path) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Ignoring unreadable config file: {}", e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Socket address string for the shop service
    pub fn shop_bind_addr(&self) -> String {
        format!("{}:{}", self.shop.host, self.shop.port)
    }

    /// Socket address string for the admin service
    pub fn admin_bind_addr(&self) -> String {
        format!("{}:{}", self.admin.host, self.admin.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn defaults_are_runnable() {
        let config = SiteConfig::default();
        assert_eq!(config.shop_bind_addr(), "127.0.0.1:8780");
        assert_eq!(config.admin_bind_addr(), "127.0.0.1:8781");
        assert!(config.admin.password.is_empty());
        assert!(config.mail.enabled);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            [shop]
            port = 9000

            [admin]
            password = "granite"
            "#,
        )
        .unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.shop.port, 9000);
        assert_eq!(config.shop.host, "127.0.0.1");
        assert_eq!(config.admin.password, "granite");
        assert_eq!(config.admin.port, 8781);
    }

    #[test]
    fn broken_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "shop = 'not a table").unwrap();
        assert!(SiteConfig::load(&path).is_err());
    }

    #[test]
    #[serial]
    fn cli_argument_wins_over_environment() {
        std::env::set_var(ROOT_FOLDER_ENV, "/tmp/from-env");
        let resolved = resolve_root_folder(Some("/tmp/from-cli"));
        std::env::remove_var(ROOT_FOLDER_ENV);
        assert_eq!(resolved, PathBuf::from("/tmp/from-cli"));
    }

    #[test]
    #[serial]
    fn environment_wins_over_defaults() {
        std::env::set_var(ROOT_FOLDER_ENV, "/tmp/from-env");
        let resolved = resolve_root_folder(None);
        std::env::remove_var(ROOT_FOLDER_ENV);
        assert_eq!(resolved, PathBuf::from("/tmp/from-env"));
    }
}
