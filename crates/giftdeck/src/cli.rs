use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::config::Config;
use crate::store::UnlockStore;

#[derive(Parser)]
#[command(name = "giftdeck")]
#[command(author, version, about)]
#[command(long_about = "A pincode-gated, music-synchronized gift slideshow.\n\n\
    Unlock a gift with its pincode and watch the slides follow the soundtrack.\n\n\
    Examples:\n  \
    giftdeck content.yaml                 Unlock and present (fullscreen)\n  \
    giftdeck content.yaml --pincode 1234  Skip the prompt\n  \
    giftdeck validate content.yaml        Check the timeline for authoring errors\n  \
    giftdeck spec                         Print the content format specification")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Content source: a manifest file, or an http(s) provider endpoint.
    /// Falls back to `provider.url` from the config.
    pub source: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Pincode to unlock with (prompted for interactively if omitted)
    #[arg(long, global = false)]
    pub pincode: Option<String>,

    /// Launch in a window instead of fullscreen
    #[arg(long, global = false)]
    pub windowed: bool,

    /// Discard the remembered pincode before unlocking
    #[arg(long, global = false)]
    pub forget_pincode: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a content file's timeline for authoring errors
    Validate {
        /// Manifest or bare content file
        file: std::path::PathBuf,
    },

    /// Fetch all media referenced by a content file and report failures
    Preload {
        /// Manifest or bare content file
        file: std::path::PathBuf,
    },

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print the giftdeck content format specification
    Spec {
        /// Print a concise quick-reference card instead of the full spec
        #[arg(long)]
        short: bool,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. provider.url, defaults.windowed, defaults.volume)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Validate { file }) => crate::commands::validate::run(&file),
            Some(Commands::Preload { file }) => crate::commands::preload::run(&file),
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Spec { short }) => {
                crate::commands::spec::run(short);
                Ok(())
            }
            Some(Commands::Version) => {
                crate::banner::print_banner_with_version();
                Ok(())
            }
            None => present(self),
        }
    }
}

/// Default invocation: resolve a pincode against the content source and
/// run the presentation.
fn present(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load_or_default();

    let source = match cli.source.or_else(|| config.provider_url().map(String::from)) {
        Some(source) => source,
        None => {
            anyhow::bail!(
                "No content source. Pass a file or URL, or set one with `giftdeck config set provider.url <url>`."
            );
        }
    };
    if !crate::content::provider::is_remote(&source)
        && !std::path::Path::new(&source).exists()
    {
        anyhow::bail!("File not found: {source}");
    }

    let mut store = UnlockStore::load();
    if cli.forget_pincode {
        store.forget_pincode();
    }

    let pincode = match cli.pincode.or_else(|| store.pincode.clone()) {
        Some(pincode) => pincode,
        None => inquire::Password::new("Pincode:")
            .without_confirmation()
            .with_display_mode(inquire::PasswordDisplayMode::Masked)
            .prompt()?,
    };

    let response = crate::content::provider::resolve(&source, &pincode);
    if !response.success {
        let message = response
            .message
            .unwrap_or_else(|| "Invalid pincode".to_string());
        anyhow::bail!("{message}");
    }
    let bundle = response
        .data
        .ok_or_else(|| anyhow::anyhow!("Provider accepted the pincode but sent no content"))?;
    bundle.ensure_valid()?;

    store.save_pincode(&pincode);
    if let Err(e) = store.save() {
        log::warn!("could not persist unlock state: {e:#}");
    }

    let base = if crate::content::provider::is_remote(&source) {
        std::env::current_dir()?
    } else {
        std::path::Path::new(&source)
            .parent()
            .unwrap_or(std::path::Path::new("."))
            .to_path_buf()
    };

    let windowed = cli.windowed || config.windowed();
    crate::app::run(bundle, base, windowed, config.volume(), store)
}
