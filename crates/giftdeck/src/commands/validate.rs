use std::path::Path;

use colored::Colorize;

use crate::content::provider;

/// `giftdeck validate <file>`: parse the content file and report timeline
/// problems without opening a window.
pub fn run(file: &Path) -> anyhow::Result<()> {
    if !file.exists() {
        anyhow::bail!("File not found: {}", file.display());
    }

    let bundle = provider::load_bundle_for_inspection(file)?;
    let report = bundle.validate();

    println!(
        "{} {} slides, {:.1}s soundtrack",
        "Parsed:".bold(),
        bundle.slides.len(),
        bundle.total_duration
    );

    for warning in &report.warnings {
        println!("  {} {warning}", "warning:".yellow().bold());
    }
    for error in &report.errors {
        println!("  {} {error}", "error:".red().bold());
    }

    if report.errors.is_empty() {
        println!("{}", "Timeline OK".green().bold());
        Ok(())
    } else {
        anyhow::bail!(
            "{} error(s) in {}",
            report.errors.len(),
            file.display()
        );
    }
}
