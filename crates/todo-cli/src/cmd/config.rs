use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;
use todo_core::config::{Config, WarnLevel};

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Print the effective config (defaults when no file exists)
    Show,

    /// Validate the config for common mistakes
    Validate,

    /// Change one setting and save the config file
    Set {
        /// prompt | confirm_delete | show_ids | history_limit
        key: String,
        value: String,
    },
}

pub fn run(root: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(root, json),
        ConfigSubcommand::Validate => validate(root, json),
        ConfigSubcommand::Set { key, value } => set(root, &key, &value),
    }
}

fn show(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load_or_default(root).context("failed to load config")?;
    if json {
        print_json(&config)?;
    } else {
        print!("{}", serde_yaml::to_string(&config)?);
    }
    Ok(())
}

fn validate(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let warnings = config.validate();

    if json {
        print_json(&serde_json::json!({ "warnings": warnings }))?;
    } else if warnings.is_empty() {
        println!("Config is valid. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    if warnings.iter().any(|w| w.level == WarnLevel::Error) {
        anyhow::bail!("config validation found errors");
    }
    Ok(())
}

fn set(root: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let mut config = Config::load_or_default(root).context("failed to load config")?;
    apply(&mut config, key, value)?;
    config.save(root).context("failed to save config")?;
    println!("Set {key} = {value}");
    Ok(())
}

fn apply(config: &mut Config, key: &str, value: &str) -> anyhow::Result<()> {
    match key {
        "prompt" => config.prompt = value.to_string(),
        "confirm_delete" => {
            config.confirm_delete = value
                .parse::<bool>()
                .with_context(|| format!("confirm_delete must be true or false, got '{value}'"))?
        }
        "show_ids" => {
            config.show_ids = value
                .parse::<bool>()
                .with_context(|| format!("show_ids must be true or false, got '{value}'"))?
        }
        "history_limit" => {
            config.history_limit = value
                .parse::<usize>()
                .with_context(|| format!("history_limit must be a number, got '{value}'"))?
        }
        _ => anyhow::bail!(
            "unknown config key '{key}' (expected prompt, confirm_delete, show_ids or history_limit)"
        ),
    }
    Ok(())
}
