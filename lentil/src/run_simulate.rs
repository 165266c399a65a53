use crate::common::*;

use dirty_data::simulate::{generate_dirty_table, write_simulated_table, SimArgs};
use table_util::common_io::write_lines;

#[derive(Args, Debug)]
pub struct SimulateArgs {
    #[arg(
        short = 'n',
        long,
        default_value_t = 1000,
        help = "Number of rows",
        long_help = "Number of rows (observations) in the simulated table."
    )]
    rows: usize,

    #[arg(
        short = 'k',
        long,
        default_value_t = 10,
        help = "Number of latent topics",
        long_help = "Number of latent topics behind the simulated titles.\n\
		     Each topic has its own title vocabulary and salary level."
    )]
    topics: usize,

    #[arg(
        long,
        default_value_t = 0.3,
        help = "Missing rate of the primary column",
        long_help = "Fraction of rows whose primary title is blanked out.\n\
		     Those rows keep a detailed title in the backup column,\n\
		     so an overlay of the two leaves no hole behind."
    )]
    null_rate: f32,

    #[arg(
        long,
        default_value_t = 42,
        help = "Random seed",
        long_help = "Seed of the simulation's random number generator."
    )]
    rseed: u64,

    #[arg(
        long,
        short,
        required = true,
        help = "Output header",
        long_help = "Output header for results.\n\
		     Specify the output file or prefix for generated files:\n\
		     - {out}.table.tsv.gz\n\
		     - {out}.membership.txt.gz\n"
    )]
    out: Box<str>,

    #[arg(
        long,
        short,
        help = "verbosity",
        long_help = "Enable verbose output `RUST_LOG=info`"
    )]
    verbose: bool,
}

pub fn run_simulate(args: &SimulateArgs) -> anyhow::Result<()> {
    if args.verbose {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    // create output directory
    io::mkdir(&args.out)?;

    let sim_args = SimArgs {
        rows: args.rows,
        topics: args.topics,
        null_rate: args.null_rate,
        rseed: args.rseed,
    };

    let sim = generate_dirty_table(&sim_args)?;

    let table_file = args.out.to_string() + ".table.tsv.gz";
    write_simulated_table(&sim, &table_file)?;
    info!("simulated table: {:?}", &table_file);

    let membership_out: Vec<Box<str>> = sim
        .topic_membership
        .iter()
        .map(|&x| Box::from(x.to_string()))
        .collect();

    let membership_file = args.out.to_string() + ".membership.txt.gz";
    write_lines(&membership_out, &membership_file)?;
    info!("topic membership: {:?}", &membership_file);

    Ok(())
}
