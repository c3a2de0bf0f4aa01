use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gpcsv::SchemaMode;
use gpcsv_cli::{
    config::{CliConfig, RuleArgs},
    export::{run_export_command, run_header_command},
    import::{import, run_import_command},
    view::print_view,
};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "gpcsv", author, version, about, long_about = None)]
struct Args {
    /// Log what the codec is doing to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML file with default `mode`, `project` and `locale` values
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Export a JSON array of entries as CSV.
    Export {
        /// The JSON file holding the entries
        #[arg(short, long)]
        input: PathBuf,

        /// The CSV file to write; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        rule: RuleArgs,

        /// Column schema: strict or minimal
        #[arg(long)]
        mode: Option<SchemaMode>,

        /// Project name handed to export hooks
        #[arg(long)]
        project: Option<String>,
    },

    /// Import a CSV file and print its entries as JSON.
    Import {
        /// The CSV file to import
        #[arg(short, long)]
        input: PathBuf,

        /// The JSON file to write; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Column schema: strict or minimal
        #[arg(long)]
        mode: Option<SchemaMode>,
    },

    /// Print the header row an export would use.
    Header {
        #[command(flatten)]
        rule: RuleArgs,

        /// Column schema: strict or minimal
        #[arg(long)]
        mode: Option<SchemaMode>,
    },

    /// View the entries of a CSV file.
    View {
        /// The CSV file to view
        #[arg(short, long)]
        input: PathBuf,

        /// Column schema: strict or minimal
        #[arg(long)]
        mode: Option<SchemaMode>,

        /// Display full values without truncation
        #[arg(long)]
        full: bool,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(args: Args) -> Result<(), String> {
    let config = CliConfig::load(args.config.as_deref())?;

    match args.commands {
        Commands::Export {
            input,
            output,
            rule,
            mode,
            project,
        } => {
            let rule = rule.resolve(&config)?;
            run_export_command(
                &input,
                output.as_deref(),
                &rule,
                config.codec_options(mode, project),
            )
        }
        Commands::Import {
            input,
            output,
            mode,
        } => run_import_command(&input, output.as_deref(), config.codec_options(mode, None)),
        Commands::Header { rule, mode } => {
            let rule = rule.resolve(&config)?;
            run_header_command(&rule, config.codec_options(mode, None));
            Ok(())
        }
        Commands::View { input, mode, full } => {
            let collection = import(&input, config.codec_options(mode, None))?;
            print_view(&collection, full);
            Ok(())
        }
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
