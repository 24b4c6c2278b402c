mod api;
mod cache;
mod cli;
mod client;
mod commands;
mod config;
mod error;
mod form;
mod header;
mod output;
mod route;
mod store;
mod sync;
mod types;
mod view;

#[cfg(test)]
mod testing;

use std::error::Error;
use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use api::KanbanApi;
use cli::{Cli, Commands, IssueCommands};
use client::KanbanClient;
use config::Config;
use error::Result;
use store::IssueStore;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    setup_tracing(verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");

        // Show error chain if verbose flag was passed
        if verbose {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = cause.source();
            }
        }

        std::process::exit(1);
    }
}

fn setup_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("KANBAN_LOG").unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("kanban=debug,warn")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {

    output::set_format(cli.output_format());
    output::set_quiet(cli.quiet);

    match cli.command {
        // Commands that don't need the API
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "kanban", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run().await?;
        }
        command => {
            let config = Config::load()?;
            let client = KanbanClient::new(&config.api_url(), config.timeout())?;
            let mut api = KanbanApi::new(client);
            let mut store = IssueStore::default();

            match command {
                Commands::Boards => {
                    commands::boards::list(&mut api).await?;
                }
                Commands::Board(args) => {
                    commands::board::show(&mut api, &mut store, args).await?;
                }
                Commands::Users => {
                    commands::users::list(&mut api).await?;
                }
                Commands::Open { route } => {
                    commands::open::run(&mut api, &mut store, &route).await?;
                }
                Commands::Issues(args) => {
                    commands::issues::list(&mut api, &mut store, args).await?;
                }
                Commands::Issue { action } => match action {
                    IssueCommands::List(args) => {
                        commands::issues::list(&mut api, &mut store, args).await?;
                    }
                    IssueCommands::View { id } => {
                        commands::issues::view(&mut api, id).await?;
                    }
                    IssueCommands::Create(args) => {
                        commands::issues::create(&mut api, &mut store, &config, args).await?;
                    }
                    IssueCommands::Update(args) => {
                        commands::issues::update(&mut api, &mut store, args).await?;
                    }
                    IssueCommands::Move { id, status } => {
                        commands::issues::move_to(&mut api, &mut store, id, status).await?;
                    }
                },
                Commands::Completions { .. } | Commands::Init => {
                    // Already handled above
                }
            }
        }
    }

    Ok(())
}
