use clap::{ArgAction, Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use qaa::batch::{BatchProcessor, ChlaStatistics, write_results};
use qaa::config::Config;
use qaa::iop::{BAND_COUNT, Spectrum, compute};
use qaa::logging;
use qaa::sat_bands::{SatBands, Satellites};

#[derive(Debug, Parser)]
#[command(
    name = "qaa",
    version,
    about = "Inherent optical properties from ocean colour (QAA v6)"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run QAA on one Rrs spectrum (410,443,490,555,670 nm)
    Compute {
        #[arg(value_delimiter = ',', allow_negative_numbers = true, required = true)]
        rrs: Vec<f64>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run QAA on every sample of a configuration file
    Batch {
        #[arg(short, long)]
        config: PathBuf,

        /// Overrides the output file of the configuration
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show which sensor band feeds each QAA band
    Bands { sensor: Satellites },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging(logging::level_from_verbosity(cli.verbose));

    match cli.command {
        Command::Compute { rrs, json } => {
            let values = <[f64; BAND_COUNT]>::try_from(rrs.as_slice())
                .map_err(|_| format!("expected {} Rrs values, got {}", BAND_COUNT, rrs.len()))?;

            let result = compute(Spectrum::new(values));
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", result);
                for message in result.get_messages() {
                    println!("  - {}", message);
                }
            }
        }
        Command::Batch { config, output } => {
            info!("Starting QAA batch processing from {}", config.display());

            let config = Config::from_file(&config)?;
            let output = output.or_else(|| config.output().map(PathBuf::from));

            let processor = BatchProcessor::new(config);
            let results = processor.process()?;

            println!("{}", ChlaStatistics::from_results(&results));

            if let Some(path) = output {
                write_results(&results, &path)?;
            }
        }
        Command::Bands { sensor } => {
            let bands = SatBands::new(sensor);
            println!("{}", bands);
            for (band, wavelength) in bands.band_mapping().bands() {
                println!("  {} <- {}nm", band, wavelength);
            }
        }
    }

    Ok(())
}
