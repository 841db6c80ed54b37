//! Masthead - a terminal page viewer with a scroll-aware masthead.
//!
//! # Usage
//!
//! ```bash
//! masthead index.txt
//! masthead --watch index.txt
//! masthead --no-form index.txt
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use masthead::app::App;
use masthead::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};

/// A terminal page viewer with a scroll-aware masthead
#[derive(Parser, Debug)]
#[command(name = "masthead", version, about, long_about = None)]
struct Cli {
    /// Page text file to view
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Watch file for changes and auto-reload
    #[arg(short, long)]
    watch: bool,

    /// Omit the contact form section
    #[arg(long)]
    no_form: bool,

    /// Masthead title (defaults to the file name)
    #[arg(long, value_name = "TITLE")]
    title: Option<String>,

    /// Treat the message as accepted by the server and start the form blank
    #[arg(long)]
    message_sent: bool,

    /// Save current command-line flags as defaults in .mastheadrc
    #[arg(long)]
    save: bool,

    /// Clear saved defaults in .mastheadrc
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    // The server notifies a handled submission through this variable when the
    // viewer is spawned from the publishing pipeline.
    let message_sent = cli.message_sent
        || std::env::var_os("MASTHEAD_MESSAGE_SENT")
            .is_some_and(|value| value == "1" || value.eq_ignore_ascii_case("true"));

    // Verify file exists
    if !cli.file.exists() {
        anyhow::bail!("File not found: {}", cli.file.display());
    }

    // Run the application
    let local_override = local_path.exists().then_some(local_path);
    let mut app = App::new(cli.file)
        .with_watch(effective.watch)
        .with_form(!effective.no_form)
        .with_message_sent(message_sent)
        .with_title(effective.title)
        .with_config_paths(Some(global_path), local_override);

    app.run().context("Application error")
}
