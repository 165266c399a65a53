use crate::common::*;

use rayon::ThreadPoolBuilder;
use table_util::mat_io::MatIo;
use topic_encoder::hash_encoder::HashTopicEncoder;
use topic_encoder::report::TopicReport;

#[derive(Args, Debug)]
pub struct EncodeArgs {
    #[arg(
        short = 't',
        long,
        help = "Delimited table file",
        long_help = "Headered table file (`.tsv`, `.csv`, optionally gzipped).\n\
		     Empty fields and `NA` are treated as missing values.\n\
		     When omitted, a bundled employee title sample is used."
    )]
    table_file: Option<Box<str>>,

    #[arg(
        long,
        help = "Numeric target column",
        long_help = "Name of a numeric column to split out of the table.\n\
		     The target is carried along but not used by the encoder."
    )]
    target_column: Option<Box<str>>,

    #[arg(
        short = 'c',
        long,
        default_value = "employee_position_title",
        help = "Dirty column to encode",
        long_help = "Name of the free-text categorical column to encode.\n\
		     Example: employee_position_title"
    )]
    column: Box<str>,

    #[arg(
        short = 'b',
        long,
        default_value = "underfilled_job_title",
        help = "Backup column for the overlay step",
        long_help = "Column whose values fill missing entries of the primary\n\
		     column. Present primary values are never overwritten.\n\
		     The backup column is removed from the table afterwards."
    )]
    other_column: Box<str>,

    #[arg(
        short = 'k',
        long,
        default_value_t = 10,
        help = "Number of latent topics",
        long_help = "Number of latent topic components in the encoder.\n\
		     Each row activation vector will have this many entries."
    )]
    n_topics: usize,

    #[arg(
        long,
        default_value_t = 42,
        help = "Random seed",
        long_help = "Seed for the encoder's hashing stage.\n\
		     The same seed always yields the same encoding."
    )]
    rseed: u64,

    #[arg(
        long,
        default_value_t = 3,
        help = "Top labels reported per topic",
        long_help = "Number of representative labels printed for each topic.\n\
		     Example: `Topic n°0: [Firefighter, Fire Fighter, ...]`"
    )]
    labels_per_topic: usize,

    #[arg(
        long,
        short,
        required = true,
        help = "Output header",
        long_help = "Output header for results.\n\
		     Specify the output file or prefix for generated files:\n\
		     - {out}.encoded.parquet\n\
		     - {out}.topics.txt\n\
		     - {out}.topics.json\n"
    )]
    out: Box<str>,

    #[arg(
        long,
        default_value_t = 16,
        help = "Maximum number of threads",
        long_help = "Maximum number of threads to use for parallel processing. \n\
		     Choose the right number in HPC environments."
    )]
    max_threads: usize,

    #[arg(
        long,
        short,
        help = "verbosity",
        long_help = "Enable verbose output `RUST_LOG=info`"
    )]
    verbose: bool,
}

pub fn run_encode(args: &EncodeArgs) -> anyhow::Result<()> {
    if args.verbose {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    // create output directory
    io::mkdir(&args.out)?;

    let max_threads = num_cpus::get().min(args.max_threads);

    ThreadPoolBuilder::new()
        .num_threads(max_threads)
        .build_global()?;

    info!("will use {} threads", rayon::current_num_threads());

    let provider = choose_provider(args.table_file.as_deref(), args.target_column.as_deref());

    let dataset = provider.fetch()?;
    info!("{}", dataset.description);

    let mut table = dataset.table;
    table.overlay_column(&args.column, &args.other_column)?;
    let labels = table.dirty_column(&args.column)?;

    info!("encoding {} rows of `{}`", labels.len(), args.column);

    let config = EncoderConfig {
        n_components: args.n_topics,
        random_state: args.rseed,
    };

    let mut encoder = HashTopicEncoder::new(config)?;
    let activations = encoder.fit_transform(&labels)?;

    let report = TopicReport::from_encoder(&encoder, args.labels_per_topic)?;
    for line in report.lines() {
        println!("{}", line);
    }

    report.write_lines_to(&(args.out.to_string() + ".topics.txt"))?;
    report.to_json(&(args.out.to_string() + ".topics.json"))?;

    let topic_names: Vec<Box<str>> = (0..encoder.n_components())
        .map(|k| format!("topic_{}", k).into_boxed_str())
        .collect();

    activations.to_parquet_with_names(
        &(args.out.to_string() + ".encoded.parquet"),
        (Some(&labels), Some("label")),
        Some(&topic_names),
    )?;

    info!("wrote {}.encoded.parquet", args.out);

    Ok(())
}
