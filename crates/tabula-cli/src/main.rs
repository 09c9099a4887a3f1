//! Tabula CLI - tabular data analysis from the command line and over HTTP.

mod cli;
mod commands;
mod export;
mod server;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = match cli.command {
        Commands::Analyze { file, json } => commands::analyze::run(file, json, cli.verbose),

        Commands::Profile { file, json } => commands::profile::run(file, json, cli.verbose),

        Commands::Insights { file, limit, json } => {
            commands::insights::run(file, limit, json, cli.verbose)
        }

        Commands::Filter {
            file,
            search,
            filters,
            sort,
            desc,
            format,
        } => commands::filter::run(file, search, filters, sort, desc, format),

        Commands::Chart {
            file,
            chart_type,
            x,
            y,
            limit,
            format,
        } => commands::chart::run(file, chart_type, x, y, limit, format),

        Commands::Model {
            file,
            target,
            features,
            json,
        } => commands::model::run(file, target, features, json, cli.verbose),

        Commands::Importance { file, target, json } => {
            commands::importance::run(file, target, json, cli.verbose)
        }

        Commands::Drift {
            file,
            reference,
            threshold,
            json,
        } => commands::drift::run(file, reference, threshold, json, cli.verbose),

        Commands::Clean {
            file,
            op,
            column,
            strategy,
            fill,
            format,
        } => commands::clean::run(file, op, column, strategy, fill, format),

        Commands::Serve {
            host,
            port,
            max_rows,
        } => commands::serve::run(host, port, max_rows),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
