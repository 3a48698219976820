//! rio command line
//!
//! Inspect raster datasets and extract their bounds as GeoJSON.

use clap::{ArgAction, Parser, Subcommand};
use log::error;

use rio::{commands, logging};

#[derive(Debug, Parser)]
#[command(name = "rio")]
#[command(version)]
#[command(about = "Inspect raster datasets and extract their bounds as GeoJSON", long_about = None)]
struct Cli {
    /// Increase verbosity, repeat for more
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Decrease verbosity, repeat for less
    #[arg(short, long, action = ArgAction::Count, global = true)]
    quiet: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn verbosity(&self) -> i8 {
        (self.verbose.min(i8::MAX as u8) as i8).saturating_sub(self.quiet.min(i8::MAX as u8) as i8)
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print metadata, tags or a single property of a dataset
    Info(commands::info::InfoArgs),
    /// Open a dataset in an interactive inspector
    Insp(commands::insp::InspArgs),
    /// Write dataset bounds as GeoJSON
    Bounds(commands::bounds::BoundsArgs),
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbosity());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = match cli.command {
        Commands::Info(args) => commands::info::execute(args, &mut out),
        Commands::Insp(args) => {
            commands::insp::execute(args, std::io::stdin().lock(), &mut out)
        }
        Commands::Bounds(args) => commands::bounds::execute(args, &mut out),
    };

    if let Err(e) = result {
        error!("{e}");
        std::process::exit(1);
    }
}
