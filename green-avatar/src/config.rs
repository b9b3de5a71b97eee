use anyhow::{Context, Result, bail};
use log::debug;
use once_cell::sync::Lazy;
use platform_dirs::AppDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

const CARGO_TOML: &str = include_str!("../Cargo.toml");
static CONFIG: Lazy<Mutex<Config>> = Lazy::new(|| Mutex::new(Config::default()));

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct Config {
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(skip)]
    pub download_dir: PathBuf,

    #[serde(skip)]
    pub is_first_run: bool,

    #[serde(skip)]
    pub app_name: String,

    #[serde(default)]
    pub output: Output,
}

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct Output {
    /// Directory for downloaded images. Empty means `<data_dir>/downloads`.
    #[serde(default)]
    pub save_dir: String,
}

impl Config {
    /// Initializes the configuration
    ///
    /// Reads the package name, creates the platform directories and loads
    /// the configuration file.
    pub fn init(&mut self) -> Result<()> {
        self.app_name = app_name()?;

        let app_dirs = AppDirs::new(Some(&self.app_name), true)
            .with_context(|| "resolve platform directories failed")?;
        self.crate_dirs(&app_dirs.config_dir, &app_dirs.data_dir)?;
        self.load().with_context(|| "load config file failed")?;
        debug!("{:?}", self);
        Ok(())
    }

    /// Creates application directories and sets up paths
    fn crate_dirs(&mut self, config_dir: &Path, data_dir: &Path) -> Result<()> {
        self.config_path = config_dir.join(format!("{}.toml", self.app_name));
        self.download_dir = data_dir.join("downloads");

        fs::create_dir_all(config_dir)?;
        fs::create_dir_all(data_dir)?;

        Ok(())
    }

    /// Loads configuration from file or creates default if not exists
    ///
    /// An unreadable file is backed up to `<name>.toml.bak` and replaced by
    /// the defaults.
    fn load(&mut self) -> Result<()> {
        let text = match fs::read_to_string(&self.config_path) {
            Ok(text) => text,
            Err(_) => return self.reset(),
        };

        match toml::from_str::<Config>(&text) {
            Ok(mut c) => {
                c.config_path = self.config_path.clone();
                c.download_dir = self.download_dir.clone();
                c.is_first_run = self.is_first_run;
                c.app_name = self.app_name.clone();
                *self = c;

                Ok(())
            }
            Err(e) => {
                log::warn!("parse {} failed: {e}", self.config_path.display());

                let mut bak_file = self.config_path.clone().into_os_string();
                bak_file.push(".bak");
                _ = fs::copy(&self.config_path, bak_file);

                self.reset()
            }
        }
    }

    fn reset(&mut self) -> Result<()> {
        self.is_first_run = true;
        self.output = Output::default();
        self.save()
    }

    /// Saves the current configuration to file
    pub fn save(&self) -> Result<()> {
        match toml::to_string_pretty(self) {
            Ok(text) => Ok(fs::write(&self.config_path, text)
                .with_context(|| "save config failed".to_string())?),
            Err(e) => bail!(format!("convert config to toml format failed. {e:?}")),
        }
    }

    /// Directory where downloads are written.
    pub fn save_dir(&self) -> PathBuf {
        if self.output.save_dir.trim().is_empty() {
            self.download_dir.clone()
        } else {
            PathBuf::from(&self.output.save_dir)
        }
    }
}

/// Package name from the embedded `Cargo.toml`.
fn app_name() -> Result<String> {
    let metadata =
        toml::from_str::<toml::Table>(CARGO_TOML).with_context(|| "parse Cargo.toml error")?;

    metadata
        .get("package")
        .and_then(|package| package.get("name"))
        .and_then(|name| name.as_str())
        .map(|name| name.to_string())
        .with_context(|| "package name is missing in Cargo.toml")
}

/// Initializes the global configuration
///
/// This should be called once at application startup.
pub fn init() -> Result<()> {
    let mut config = CONFIG.lock().map_err(|e| anyhow::anyhow!("{e}"))?;
    config.init()
}

/// Returns a clone of the current configuration
pub fn all() -> Config {
    match CONFIG.lock() {
        Ok(config) => config.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}
