mod common;
mod heatmap_alg;
mod run_encode;
mod run_heatmap;
mod run_simulate;

use common::*;
use run_encode::*;
use run_heatmap::*;
use run_simulate::*;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "LENTIL",
    long_about = "Latent ENcoding of Titles and other Irregular Labels\n\
		  Interpret a dirty categorical column by a small set of\n\
		  latent topics instead of thousands of one-hot columns."
)]
struct Cli {
    #[command(subcommand)]
    commands: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Encode a dirty categorical column with latent topics",
        long_about = "Fit a topic encoder on one dirty column in the three stages: \n\
		      (1) Overlay a backup column onto the primary one\n\
		      (2) Fit the encoder and report top labels per topic\n\
		      (3) Save the per-row topic activation matrix.\n"
    )]
    Encode(EncodeArgs),

    #[command(
        about = "Render a topic activation heatmap for the leading rows",
        long_about = "Fit a topic encoder on one dirty column and draw a heatmap: \n\
		      (1) Overlay a backup column onto the primary one\n\
		      (2) Fit the encoder and take the leading rows\n\
		      (3) Draw per-row topic activations with topic labels.\n"
    )]
    Heatmap(HeatmapArgs),

    #[command(
        about = "Simulate a dirty categorical table with known topics",
        long_about = "Generate job titles from a known topic assignment, \n\
		      mangle them with typographic noise, and blank out a \n\
		      fraction of the primary column for overlay testing.\n"
    )]
    Simulate(SimulateArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.commands {
        Commands::Encode(args) => {
            run_encode(args)?;
        }
        Commands::Heatmap(args) => {
            run_heatmap(args)?;
        }
        Commands::Simulate(args) => {
            run_simulate(args)?;
        }
    }
    info!("Done");
    Ok(())
}
