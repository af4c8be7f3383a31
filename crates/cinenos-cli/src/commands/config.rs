use super::prompts;
use crate::context::{load_credentials, AppContext};
use crate::output::Output;
use cine_config::{Config, PathManager, API_KEY_ENV};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use serde_json::json;

/// Where the API key would come from, masked for display
fn api_key_status(ctx: &AppContext) -> Result<String> {
    if let Some(key) = std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty()) {
        return Ok(format!("{} (from {})", mask_string(key.trim()), API_KEY_ENV));
    }
    let credentials = ctx.credentials()?;
    Ok(match credentials.get_tmdb_api_key() {
        Some(key) => format!("{} (from credentials.toml)", mask_string(key)),
        None => "not set".to_string(),
    })
}

pub fn run_show(ctx: &AppContext, output: &Output) -> Result<()> {
    let config = &ctx.config;
    let tmdb = &config.tmdb;
    let api_key = api_key_status(ctx)?;
    let providers = tmdb
        .provider_ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join("|");
    let excluded = tmdb
        .excluded_genre_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "none".to_string());

    output.json(&json!({
        "config_file": ctx.paths.config_file(),
        "data_dir": ctx.paths.data_dir(),
        "api_key": api_key,
        "config": config,
    }));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![Cell::new("Setting"), Cell::new("Value")]);
    table.add_row(vec!["API key".to_string(), api_key]);
    table.add_row(vec!["Base URL".to_string(), tmdb.base_url.clone()]);
    table.add_row(vec!["Language".to_string(), tmdb.language.clone()]);
    table.add_row(vec!["Region".to_string(), tmdb.region.clone()]);
    table.add_row(vec!["Providers".to_string(), providers]);
    table.add_row(vec!["Excluded genre".to_string(), excluded]);
    table.add_row(vec!["Timeout".to_string(), format!("{}s", tmdb.timeout_secs)]);
    table.add_row(vec!["Cache TTL".to_string(), format!("{}s", config.cache.ttl_secs)]);
    table.add_row(vec!["Data directory".to_string(), ctx.paths.data_dir().display().to_string()]);

    output.println(format!("{}", "Configuration".bold().cyan()));
    output.println(format!("{}", ctx.paths.config_file().display().dimmed()));
    output.println(table.to_string());

    if let Err(e) = config.validate() {
        output.warn(e.to_string());
    }
    Ok(())
}

/// Works from paths alone so a broken config.toml can be replaced
pub fn run_init(paths: &PathManager, force: bool, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    if config_file.exists() && !force {
        output.warn(format!(
            "{} already exists. Use --force to overwrite it.",
            config_file.display()
        ));
        return Ok(());
    }

    paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create configuration directories: {}", e))?;
    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))?;

    output.success(format!("Wrote default configuration to {}", config_file.display()));
    Ok(())
}

pub fn run_set_key(paths: &PathManager, key: Option<String>, output: &Output) -> Result<()> {
    let key = match key {
        Some(key) => key,
        None => prompts::prompt_password("TMDB API key")?,
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(eyre!("The API key cannot be empty"));
    }

    let credentials_file = paths.credentials_file();
    let mut credentials = load_credentials(paths)?;
    credentials.set_tmdb_api_key(key.to_string());
    credentials
        .save()
        .map_err(|e| eyre!("Failed to save credentials to {}: {}", credentials_file.display(), e))?;

    output.success(format!("API key saved to {}", credentials_file.display()));
    Ok(())
}

/// Keep the first and last four characters visible
fn mask_string(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}{}", head, "*".repeat(chars.len() - 8), tail)
}
