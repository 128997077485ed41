//! `hasher config` - CLI configuration management.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;
use crate::output::OutputFormat;

pub fn execute(ctx: &Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(ctx),
        ConfigCommands::Set { key, value } => set_config(ctx, &key, &value),
        ConfigCommands::Path => show_path(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = &ctx.config;

    if ctx.output_format == OutputFormat::Json {
        // Never print the key itself
        let masked = Config {
            key: config.masked_key(),
            ..config.clone()
        };
        println!("{}", serde_json::to_string_pretty(&masked)?);
        return Ok(());
    }

    println!("{}", "Current Configuration:".bold());
    println!();

    let key_display = config
        .masked_key()
        .unwrap_or_else(|| "(not set)".dimmed().to_string());
    println!("  {} {}", "key:".bold(), key_display);

    let origin_display = config
        .origin_domain
        .clone()
        .unwrap_or_else(|| "(not set)".dimmed().to_string());
    println!("  {} {}", "origin_domain:".bold(), origin_display);

    println!(
        "  {} {}",
        "output_format:".bold(),
        config.output_format.unwrap_or_default()
    );
    println!("  {} {}", "make_wildcard:".bold(), config.make_wildcard);

    Ok(())
}

fn set_config(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let mut config = ctx.config.clone();

    let message = match key {
        "key" => {
            config.key = Some(value.to_string());
            "Key set.".to_string()
        }
        "origin_domain" | "origin" => {
            // Catch bad origins now rather than on every hash run
            hashedrpz_core::LengthBudget::from_origin(value)?;
            config.origin_domain = Some(value.to_string());
            format!("Origin domain set to {}.", value.cyan())
        }
        "output_format" | "output" => {
            config.output_format = Some(value.parse()?);
            format!("Output format set to {}.", value.cyan())
        }
        "make_wildcard" => {
            config.make_wildcard = value.parse()?;
            format!("make_wildcard set to {value}.")
        }
        _ => {
            anyhow::bail!(
                "Unknown config key: {}\n\n\
                 Available keys:\n  \
                 key            - Your HashedRPZ key\n  \
                 origin_domain  - Zone the hashed names go under (e.g. rpz.example.com)\n  \
                 output_format  - Default output format (plain/json/csv)\n  \
                 make_wildcard  - Wildcard too-long names (true/false)",
                key
            );
        }
    };

    config.save_to(&ctx.config_path)?;
    println!("{} {}", "Success:".green().bold(), message);

    Ok(())
}

fn show_path(ctx: &Context) -> Result<()> {
    println!("{}", ctx.config_path.display());
    Ok(())
}
