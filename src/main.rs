use clap::Parser;
use form_autofill::cli::commands::{cmd_analyze, cmd_fill, cmd_scan};
use form_autofill::cli::config::{Cli, Commands, build_fill_config, load_config};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Scan { html } => {
            cmd_scan(&html, &cli.format)?;
        }
        Commands::Analyze { html, profile } => {
            let complete = cmd_analyze(&html, &profile, &cli.format, &config)?;
            if !complete {
                std::process::exit(2);
            }
        }
        Commands::Fill {
            url,
            profile,
            force,
            handler,
            typing_delay_min,
            typing_delay_max,
        } => {
            // CLI > config > defaults
            let fill_config =
                build_fill_config(&config.autofill, typing_delay_min, typing_delay_max);
            let filled = cmd_fill(
                &url,
                &profile,
                force,
                handler.as_deref(),
                fill_config,
                &cli.format,
                &config,
            )?;
            if filled == 0 {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// RUST_LOG wins; otherwise -v raises the level from warn.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
