use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::DomainError;
use crate::store::catalog::Catalog;
use crate::store::seed::{build_catalog, builtin_seeds, ProductSeed};

pub const CONFIG_FILE_CANDIDATES: [&str; 2] = ["storefront.toml", "config/storefront.toml"];

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub shop: ShopConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct ShopConfig {
    pub currency_symbol: String,
    pub color: bool,
    pub banner: bool,
    pub pause_after_action: bool,
}

#[derive(Clone, Debug, Default)]
pub struct CatalogConfig {
    /// Replaces the built-in stock when set.
    pub products: Option<Vec<ProductSeed>>,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub log_level: Option<String>,
    pub color: Option<bool>,
    pub currency_symbol: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            shop: ShopConfig {
                currency_symbol: "$".to_string(),
                color: true,
                banner: true,
                pause_after_action: true,
            },
            catalog: CatalogConfig::default(),
            logging: LoggingConfig { level: "warn".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl CatalogConfig {
    pub fn seeds(&self) -> Vec<ProductSeed> {
        self.products.clone().unwrap_or_else(builtin_seeds)
    }

    pub fn build(&self) -> Result<Catalog, DomainError> {
        match &self.products {
            Some(products) => build_catalog(products),
            None => build_catalog(&builtin_seeds()),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file || options.config_path.is_some() {
            let expected = options
                .config_path
                .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_CANDIDATES[0]));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(shop) = patch.shop {
            if let Some(currency_symbol) = shop.currency_symbol {
                self.shop.currency_symbol = currency_symbol;
            }
            if let Some(color) = shop.color {
                self.shop.color = color;
            }
            if let Some(banner) = shop.banner {
                self.shop.banner = banner;
            }
            if let Some(pause_after_action) = shop.pause_after_action {
                self.shop.pause_after_action = pause_after_action;
            }
        }

        if let Some(catalog) = patch.catalog {
            if let Some(products) = catalog.products {
                self.catalog.products = Some(products);
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("STOREFRONT_SHOP_CURRENCY_SYMBOL") {
            self.shop.currency_symbol = value;
        }
        if let Some(value) = read_env("STOREFRONT_SHOP_COLOR") {
            self.shop.color = parse_bool("STOREFRONT_SHOP_COLOR", &value)?;
        }
        if let Some(value) = read_env("STOREFRONT_SHOP_BANNER") {
            self.shop.banner = parse_bool("STOREFRONT_SHOP_BANNER", &value)?;
        }
        if let Some(value) = read_env("STOREFRONT_SHOP_PAUSE_AFTER_ACTION") {
            self.shop.pause_after_action =
                parse_bool("STOREFRONT_SHOP_PAUSE_AFTER_ACTION", &value)?;
        }

        let log_level =
            read_env("STOREFRONT_LOGGING_LEVEL").or_else(|| read_env("STOREFRONT_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("STOREFRONT_LOGGING_FORMAT").or_else(|| read_env("STOREFRONT_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(color) = overrides.color {
            self.shop.color = color;
        }
        if let Some(currency_symbol) = overrides.currency_symbol {
            self.shop.currency_symbol = currency_symbol;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_shop(&self.shop)?;
        validate_catalog(&self.catalog)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

/// Path of the config file `load` would read, if any.
pub fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    CONFIG_FILE_CANDIDATES.into_iter().map(PathBuf::from).find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_shop(shop: &ShopConfig) -> Result<(), ConfigError> {
    if shop.currency_symbol.trim().is_empty() {
        return Err(ConfigError::Validation(
            "shop.currency_symbol must not be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_catalog(catalog: &CatalogConfig) -> Result<(), ConfigError> {
    if let Some(products) = &catalog.products {
        if products.is_empty() {
            return Err(ConfigError::Validation(
                "catalog.products must list at least one product when present".to_string(),
            ));
        }
    }

    catalog
        .build()
        .map(|_| ())
        .map_err(|error| ConfigError::Validation(format!("catalog.products: {error}")))
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value.trim().parse::<bool>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    shop: Option<ShopPatch>,
    catalog: Option<CatalogPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct ShopPatch {
    currency_symbol: Option<String>,
    color: Option<bool>,
    banner: Option<bool>,
    pause_after_action: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogPatch {
    products: Option<Vec<ProductSeed>>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
