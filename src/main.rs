//! netviz CLI - Inspect, lay out, color and combine biological interaction networks.

use clap::Parser;
use netviz::cli::{Cli, Commands, ConfigCommands};
use netviz::commands::{self, ColorArgs, Output};
use netviz::config::{ConfigOverrides, OutputFormat, ResolvedSettings, load_settings};
use std::process;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Environment variable holding the log filter, e.g. `NV_LOG=netviz=debug`
const LOG_ENV: &str = "NV_LOG";

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let mut overrides = ConfigOverrides::new();
    if cli.human_readable {
        overrides = overrides.with_output_format(OutputFormat::Human);
    }

    // config.kdl may itself ask for human output
    let (result, human) = match load_settings(cli.config_path.as_deref(), &overrides) {
        Ok(settings) => {
            let human = settings.output_format() == OutputFormat::Human;
            (run_command(cli.command, &settings, human), human)
        }
        Err(e) => (Err(e), cli.human_readable),
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "Command failed");
        if human {
            eprintln!("Error: {}", e);
        } else {
            eprintln!(r#"{{"error": "{}"}}"#, e);
        }
        process::exit(1);
    }
}

/// Log to stderr so stdout stays parseable. Quiet unless `NV_LOG` is set.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn run_command(
    command: Commands,
    settings: &ResolvedSettings,
    human: bool,
) -> Result<(), netviz::Error> {
    match command {
        Commands::Inspect { file } => {
            let result = commands::inspect(&file)?;
            output(&result, human);
        }
        Commands::Intersect { main, side } => {
            let result = commands::intersect(&main, &side, settings)?;
            output(&result, human);
        }
        Commands::Merge {
            main,
            side,
            output: out,
        } => {
            let result = commands::merge(&main, &side, out.as_deref(), settings)?;
            output(&result, human);
        }
        Commands::Layout {
            file,
            side,
            layout,
            show_hidden,
            output: out,
        } => {
            let result = commands::layout(
                &file,
                side.as_deref(),
                layout,
                show_hidden,
                out.as_deref(),
                settings,
            )?;
            output(&result, human);
        }
        Commands::Color {
            file,
            weight,
            min,
            max,
            threshold,
            neg,
            pos,
            alt_type,
            alt_weight,
        } => {
            let args = ColorArgs {
                weight,
                min,
                max,
                threshold,
                negative: neg,
                positive: pos,
                alternate: alt_type.zip(alt_weight),
            };
            let result = commands::color(&file, &args, settings)?;
            output(&result, human);
        }
        Commands::Search {
            file,
            substring,
            side,
        } => {
            let result = commands::search(&file, &substring, side.as_deref(), settings)?;
            output(&result, human);
        }
        Commands::Render {
            file,
            layout,
            show_hidden,
            output: out,
        } => {
            let result = commands::render(&file, layout, show_hidden, &out, settings)?;
            output(&result, human);
        }
        Commands::Config { command } => match command {
            ConfigCommands::Show => {
                let result = commands::config_show(settings);
                output(&result, human);
            }
        },
        Commands::Version => {
            let result = commands::version();
            output(&result, human);
        }
    }
    Ok(())
}

/// Print output in JSON or human-readable format.
fn output<T: Output>(result: &T, human: bool) {
    if human {
        println!("{}", result.to_human());
    } else {
        println!("{}", result.to_json());
    }
}
