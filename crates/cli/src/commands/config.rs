use std::env;
use std::fs;
use std::path::Path;

use storefront_core::config::{resolve_config_path, AppConfig, LoadOptions};
use toml::Value;

use crate::commands::CommandResult;

pub fn run(options: &LoadOptions) -> CommandResult {
    let config = match AppConfig::load(options.clone()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "config",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let config_file_path = resolve_config_path(options.config_path.as_deref());
    let source = Sources {
        doc: load_config_file_doc(config_file_path.as_deref()),
        path: config_file_path.as_deref(),
    };

    let overrides = &options.overrides;
    let mut lines =
        vec!["effective config (source precedence: flag > env > file > default):".to_string()];

    lines.push(render_line(
        "shop.currency_symbol",
        &format!("{:?}", config.shop.currency_symbol),
        overridden(overrides.currency_symbol.is_some(), "override", || {
            source.of("shop.currency_symbol", Some("STOREFRONT_SHOP_CURRENCY_SYMBOL"))
        }),
    ));
    lines.push(render_line(
        "shop.color",
        &config.shop.color.to_string(),
        overridden(overrides.color.is_some(), "flag (--no-color)", || {
            source.of("shop.color", Some("STOREFRONT_SHOP_COLOR"))
        }),
    ));
    lines.push(render_line(
        "shop.banner",
        &config.shop.banner.to_string(),
        source.of("shop.banner", Some("STOREFRONT_SHOP_BANNER")),
    ));
    lines.push(render_line(
        "shop.pause_after_action",
        &config.shop.pause_after_action.to_string(),
        source.of("shop.pause_after_action", Some("STOREFRONT_SHOP_PAUSE_AFTER_ACTION")),
    ));

    let products = match &config.catalog.products {
        Some(products) => format!("{} configured", products.len()),
        None => format!("{} built-in", config.catalog.seeds().len()),
    };
    lines.push(render_line("catalog.products", &products, source.of("catalog.products", None)));

    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        overridden(overrides.log_level.is_some(), "override", || {
            source.of_aliased("logging.level", &["STOREFRONT_LOGGING_LEVEL", "STOREFRONT_LOG_LEVEL"])
        }),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format),
        source.of_aliased(
            "logging.format",
            &["STOREFRONT_LOGGING_FORMAT", "STOREFRONT_LOG_FORMAT"],
        ),
    ));

    CommandResult::text(lines.join("\n"))
}

struct Sources<'a> {
    doc: Option<Value>,
    path: Option<&'a Path>,
}

impl Sources<'_> {
    fn of(&self, key_path: &str, env_key: Option<&str>) -> String {
        match env_key {
            Some(env_key) => self.of_aliased(key_path, &[env_key]),
            None => self.of_aliased(key_path, &[]),
        }
    }

    fn of_aliased(&self, key_path: &str, env_keys: &[&str]) -> String {
        if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
            return format!("env ({env_key})");
        }

        if let Some(doc) = &self.doc {
            if contains_path(doc, key_path) {
                let file_path = self
                    .path
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "config file".to_string());
                return format!("file ({file_path})");
            }
        }

        "default".to_string()
    }
}

fn overridden(is_set: bool, label: &str, fallback: impl FnOnce() -> String) -> String {
    if is_set {
        label.to_string()
    } else {
        fallback()
    }
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
