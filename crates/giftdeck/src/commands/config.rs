use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> anyhow::Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> anyhow::Result<()> {
    let config = Config::load_or_default();
    let path = Config::path()?;

    println!("{} {}", "Config file:".bold(), path.display());
    println!(
        "  provider.url      = {}",
        config.provider_url().unwrap_or("(unset)")
    );
    println!("  defaults.windowed = {}", config.windowed());
    println!("  defaults.volume   = {}", config.volume());
    Ok(())
}

fn set(key: &str, value: &str) -> anyhow::Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    println!(
        "{} {key} = {value} ({})",
        "Saved:".green().bold(),
        path.display()
    );
    Ok(())
}
