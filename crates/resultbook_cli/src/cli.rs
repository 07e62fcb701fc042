//! Command-line surface.

use clap::{Args, Parser, Subcommand, ValueEnum};
use resultbook_core::{Backend, RawResultInput, ResultId, StoreConfig};
use std::path::PathBuf;

/// Output format for listing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Top-level parser.
#[derive(Debug, Parser)]
#[command(name = "resultbook", about = "Student results manager", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the result store.
    #[arg(long, global = true, env = "RESULTBOOK_DATA_DIR", default_value = ".resultbook")]
    pub data_dir: PathBuf,

    /// Storage backend (json|sqlite).
    #[arg(long, global = true, env = "RESULTBOOK_BACKEND", default_value = "json")]
    pub backend: Backend,

    /// Log level (trace|debug|info|warn|error).
    #[arg(long, global = true, env = "RESULTBOOK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Directory for rolling log files; logging is off when unset.
    #[arg(long, global = true, env = "RESULTBOOK_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl Cli {
    /// Store settings before path normalization.
    pub fn store_config(&self) -> StoreConfig {
        let mut config = StoreConfig::new(self.data_dir.clone());
        config.backend = self.backend;
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        config.log_dir = self.log_dir.clone();
        config
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Add a result.
    Add(AddArgs),
    /// List results sorted by roll number, with statistics.
    List,
    /// Show statistics only.
    Stats,
    /// Delete one result by id.
    Delete {
        id: ResultId,
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
    /// Delete every result. Cannot be undone.
    Clear {
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
    /// Print `pong` from the core crate.
    Ping,
    /// Print the core crate version.
    Version,
}

/// Raw add-form fields; validation happens in the core store.
#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long, default_value = "")]
    pub roll_no: String,
    #[arg(long, default_value = "")]
    pub name: String,
    /// Date of birth as YYYY-MM-DD.
    #[arg(long, default_value = "")]
    pub dob: String,
    #[arg(long, default_value = "")]
    pub score: String,
}

impl From<&AddArgs> for RawResultInput {
    fn from(args: &AddArgs) -> Self {
        RawResultInput::new(
            args.roll_no.as_str(),
            args.name.as_str(),
            args.dob.as_str(),
            args.score.as_str(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands, OutputFormat};
    use clap::Parser;
    use resultbook_core::{Backend, RawResultInput};

    #[test]
    fn parses_add_with_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "resultbook",
            "add",
            "--roll-no",
            "A1",
            "--name",
            "Jane Doe",
            "--dob",
            "2000-01-01",
            "--score",
            "85",
            "--backend",
            "sqlite",
            "--data-dir",
            "/tmp/rb",
        ])
        .unwrap();

        assert_eq!(cli.backend, Backend::Sqlite);
        let Commands::Add(args) = &cli.command else {
            panic!("expected add command");
        };
        assert_eq!(
            RawResultInput::from(args),
            RawResultInput::new("A1", "Jane Doe", "2000-01-01", "85")
        );
    }

    #[test]
    fn missing_add_fields_default_to_empty() {
        let cli = Cli::try_parse_from(["resultbook", "add", "--roll-no", "A1"]).unwrap();
        let Commands::Add(args) = &cli.command else {
            panic!("expected add command");
        };
        assert!(args.score.is_empty());
    }

    #[test]
    fn parses_delete_confirmation_and_format() {
        let cli =
            Cli::try_parse_from(["resultbook", "--format", "json", "delete", "42", "--yes"])
                .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, Commands::Delete { id: 42, yes: true }));
    }

    #[test]
    fn rejects_unknown_backend() {
        assert!(Cli::try_parse_from(["resultbook", "--backend", "redis", "list"]).is_err());
    }
}
