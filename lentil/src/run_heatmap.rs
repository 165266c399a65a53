use crate::common::*;
use crate::heatmap_alg::*;

use rayon::ThreadPoolBuilder;
use table_util::mat_io::MatIo;
use topic_encoder::hash_encoder::HashTopicEncoder;
use topic_encoder::report::TopicReport;

#[derive(ValueEnum, Clone, Debug, PartialEq)]
#[clap(rename_all = "lowercase")]
enum ImageFormat {
    Svg,
    Png,
}

#[derive(Args, Debug)]
pub struct HeatmapArgs {
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
        help = "Top labels per topic tick",
        long_help = "Number of representative labels in each topic's tick\n\
		     label on the horizontal axis of the heatmap."
    )]
    labels_per_topic: usize,

    #[arg(
        short = 'n',
        long,
        default_value_t = 20,
        help = "Number of leading rows to draw",
        long_help = "Number of leading rows shown in the heatmap.\n\
		     Clipped silently when the column has fewer rows."
    )]
    rows: usize,

    #[arg(
        long,
        value_enum,
        default_value = "svg",
        help = "Image format",
        long_help = "Image format of the rendered heatmap (`svg` or `png`)."
    )]
    image_format: ImageFormat,

    #[arg(
        long,
        short,
        required = true,
        help = "Output header",
        long_help = "Output header for results.\n\
		     Specify the output file or prefix for generated files:\n\
		     - {out}.activations.svg or {out}.activations.png\n\
		     - {out}.activations.parquet\n"
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

pub fn run_heatmap(args: &HeatmapArgs) -> anyhow::Result<()> {
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

    let config = EncoderConfig {
        n_components: args.n_topics,
        random_state: args.rseed,
    };

    let mut encoder = HashTopicEncoder::new(config)?;
    encoder.fit_transform(&labels)?;

    let report = TopicReport::from_encoder(&encoder, args.labels_per_topic)?;
    for line in report.lines() {
        println!("{}", line);
    }

    let sample = bounded_sample(&labels, args.rows);
    let activations = encoder.transform(sample)?;

    info!("drawing {} of {} rows", sample.len(), labels.len());

    let topic_names: Vec<Box<str>> = (0..encoder.n_components())
        .map(|k| format!("topic_{}", k).into_boxed_str())
        .collect();

    activations.to_parquet_with_names(
        &(args.out.to_string() + ".activations.parquet"),
        (Some(sample), Some("label")),
        Some(&topic_names),
    )?;

    let spec = HeatmapSpec::new(
        activations,
        report.group_labels(),
        sample.to_vec(),
        ACTIVATION_LEGEND,
    )?;

    match args.image_format {
        ImageFormat::Svg => {
            let image_file = args.out.to_string() + ".activations.svg";
            render_svg(&spec, &image_file)?;
            info!("wrote {}", image_file);
        }
        ImageFormat::Png => {
            let image_file = args.out.to_string() + ".activations.png";
            render_png(&spec, &image_file)?;
            info!("wrote {}", image_file);
        }
    }

    Ok(())
}
