use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use colored::Colorize;

use crate::content::provider;
use crate::media::preloader::{self, PreloadEvent};

/// `giftdeck preload <file>`: run the media preloader headless and report
/// which assets resolved, so broken references surface before the gift is
/// handed over.
pub fn run(file: &Path) -> anyhow::Result<()> {
    if !file.exists() {
        anyhow::bail!("File not found: {}", file.display());
    }

    let bundle = Arc::new(provider::load_bundle_for_inspection(file)?);
    let base = file
        .parent()
        .unwrap_or(Path::new("."))
        .to_path_buf();

    let refs = preloader::media_refs(&bundle);
    if refs.is_empty() {
        println!("{}", "No media referenced.".dimmed());
        return Ok(());
    }
    println!("{} {} media items", "Preloading".bold(), refs.len());

    let events = preloader::spawn(Arc::clone(&bundle), base);
    let mut cache = None;
    for event in events.iter() {
        match event {
            PreloadEvent::Progress { loaded, total } => {
                print!("\r  {loaded}/{total}");
                let _ = std::io::stdout().flush();
            }
            PreloadEvent::Ready(result) => cache = Some(result),
            PreloadEvent::Failed(message) => {
                println!();
                anyhow::bail!("Preload failed: {message}");
            }
        }
    }
    println!();

    let cache = cache.ok_or_else(|| anyhow::anyhow!("Preloader exited without a result"))?;
    let mut missing = 0;
    for item in &refs {
        if cache.get(&item.url).is_some() {
            println!("  {} {}", "ok".green(), item.url);
        } else {
            println!("  {} {}", "failed".red().bold(), item.url);
            missing += 1;
        }
    }

    if missing == 0 {
        println!("{}", "All media reachable".green().bold());
        Ok(())
    } else {
        anyhow::bail!("{missing} of {} media items failed to load", refs.len());
    }
}
