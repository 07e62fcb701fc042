//! `resultbook` command-line front end.
//!
//! # Responsibility
//! - Map terminal commands onto `ResultStore`/`ResultsView` use-cases.
//! - Stand in for the confirmation dialogs with explicit `--yes` flags.

mod cli;
mod output;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
use log::info;
use resultbook_core::{
    init_logging, AddOutcome, RawResultInput, ResultStore, ResultsView, StoreConfig,
};

fn main() {
    if let Err(error) = run() {
        eprintln!("resultbook error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Ping => {
            println!("resultbook_core ping={}", resultbook_core::ping());
            return Ok(());
        }
        Commands::Version => {
            println!("resultbook_core version={}", resultbook_core::core_version());
            return Ok(());
        }
        _ => {}
    }

    let cwd = std::env::current_dir().context("failed to resolve working directory")?;
    let config = cli
        .store_config()
        .normalized(&cwd)
        .map_err(anyhow::Error::msg)?;
    init_cli_logging(&config)?;

    let adapter = config
        .open_adapter()
        .with_context(|| format!("failed to open store at {}", config.data_path().display()))?;
    info!(
        "event=cli_start module=cli status=ok backend={} data_path={}",
        config.backend,
        config.data_path().display()
    );

    let mut store = ResultStore::new(adapter);
    let mut view = ResultsView::new();

    match &cli.command {
        Commands::Add(args) => {
            let input = RawResultInput::from(args);
            match view.submit(&mut store, &input)? {
                AddOutcome::Added { record, message } => {
                    println!("{message} (id={})", record.id);
                }
                AddOutcome::Rejected { errors, banner } => {
                    eprintln!("{}", output::render_field_errors(&errors, banner));
                    anyhow::bail!("result not added: {} invalid field(s)", errors.len());
                }
            }
        }
        Commands::List => output::print_page(&view.render(&store), cli.format)?,
        Commands::Stats => output::print_stats(&store.stats(), cli.format)?,
        Commands::Delete { id, yes } => {
            view.request_delete(*id);
            if *yes {
                view.confirm_delete(&mut store)?;
                println!("Deleted result {id} (if it existed).");
            } else {
                view.cancel_delete();
                println!("Not deleted. Re-run with --yes to delete result {id}.");
            }
        }
        Commands::Clear { yes } => {
            if view.clear_all(&mut store, *yes)? {
                println!("All results deleted.");
            } else {
                println!(
                    "Not cleared. Re-run with --yes to delete ALL results; this cannot be undone."
                );
            }
        }
        Commands::Ping | Commands::Version => {}
    }

    Ok(())
}

fn init_cli_logging(config: &StoreConfig) -> anyhow::Result<()> {
    let Some(log_dir) = &config.log_dir else {
        return Ok(());
    };
    init_logging(&config.log_level, log_dir).map_err(anyhow::Error::msg)
}
