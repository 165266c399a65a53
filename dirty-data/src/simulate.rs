#![allow(dead_code)]

use crate::dataset::table_delimiter;
use crate::feature_table::FeatureTable;
use table_util::common_io::write_lines;
use table_util::DVec;

use rand::Rng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal, Uniform};

pub struct SimArgs {
    pub rows: usize,
    pub topics: usize,
    pub null_rate: f32,
    pub rseed: u64,
}

pub struct SimOut {
    pub table: FeatureTable,
    pub target: DVec,
    pub topic_membership: Vec<usize>,
}

const DEPARTMENTS: &[&str] = &[
    "Police",
    "Fire Rescue",
    "Transit",
    "Health Services",
    "Public Works",
    "Finance",
    "Libraries",
    "Recreation",
];

const ROLES: &[&str] = &[
    "Officer",
    "Technician",
    "Coordinator",
    "Specialist",
    "Manager",
    "Aide",
    "Supervisor",
    "Analyst",
];

const LEVELS: &[&str] = &["", "I", "II", "III", "Senior", "Lead"];

const QUALIFIERS: &[&str] = &["Grade 1", "Grade 2", "Night Shift", "Part Time"];

///
/// Generate a synthetic table of dirty position titles
///
/// * `args`: SimArgs
///
/// Each row draws a topic, composes a title from that topic's
/// department and role vocabulary, and randomly mangles the spelling.
/// The primary column is missing at `null_rate`; whenever it is
/// missing, the secondary column carries a more detailed variant, so
/// an overlay of the two leaves no hole behind.
///
/// ```text
/// title(i) ~ mangle( vocab(topic(i)) )
/// salary(i) ~ N( mean(topic(i)), sd )
/// ```
///
pub fn generate_dirty_table(args: &SimArgs) -> anyhow::Result<SimOut> {
    let kk = args.topics.max(1);
    let null_rate = args.null_rate.clamp(0., 1.);

    let mut rng = rand::rngs::StdRng::seed_from_u64(args.rseed);

    let runif_topic = Uniform::new(0, kk)?;

    let salary_by_topic: Vec<Normal<f32>> = (0..kk)
        .map(|k| Normal::new(42_000.0 + 7_500.0 * (k as f32), 4_000.0))
        .collect::<Result<Vec<_>, _>>()?;

    let mut titles: Vec<Option<Box<str>>> = Vec::with_capacity(args.rows);
    let mut extras: Vec<Option<Box<str>>> = Vec::with_capacity(args.rows);
    let mut salaries: Vec<f32> = Vec::with_capacity(args.rows);
    let mut topic_membership: Vec<usize> = Vec::with_capacity(args.rows);

    for _ in 0..args.rows {
        let k = runif_topic.sample(&mut rng);
        let (dirty, detailed) = compose_title(k, &mut rng);

        if rng.random::<f32>() < null_rate {
            titles.push(None);
            extras.push(Some(detailed));
        } else {
            titles.push(Some(dirty));
            let extra = if rng.random::<f32>() < 0.2 {
                Some(detailed)
            } else {
                None
            };
            extras.push(extra);
        }

        salaries.push(salary_by_topic[k].sample(&mut rng));
        topic_membership.push(k);
    }

    let column_names: Vec<Box<str>> = vec![
        "employee_position_title".into(),
        "underfilled_job_title".into(),
    ];

    let table = FeatureTable::new(column_names, vec![titles, extras])?;

    Ok(SimOut {
        table,
        target: DVec::from_vec(salaries),
        topic_membership,
    })
}

/// Compose a (dirty, detailed) title pair for one topic
fn compose_title(topic: usize, rng: &mut impl Rng) -> (Box<str>, Box<str>) {
    let dept = DEPARTMENTS[topic % DEPARTMENTS.len()];
    let role = ROLES[(topic / DEPARTMENTS.len()) % ROLES.len()];
    let level = LEVELS[rng.random_range(0..LEVELS.len())];

    let base = if level.is_empty() {
        format!("{} {}", dept, role)
    } else {
        format!("{} {} {}", dept, role, level)
    };

    let qualifier = QUALIFIERS[rng.random_range(0..QUALIFIERS.len())];
    let detailed = format!("{} - {}", base, qualifier);

    let mut dirty = base;
    if rng.random::<f32>() < 0.3 {
        dirty = dirty.replace("Senior", "Sr.");
    }
    if rng.random::<f32>() < 0.15 {
        dirty = dirty.to_lowercase();
    }
    if rng.random::<f32>() < 0.1 {
        dirty = dirty.replace(' ', "/");
    }

    (dirty.into_boxed_str(), detailed.into_boxed_str())
}

///
/// Write the simulated table as a headered delimited file
///
/// * `sim` - simulated table
/// * `table_file` - output file (`.tsv`, `.txt`, `.csv`; `.gz` fine)
///
/// The salary target goes in as a `current_annual_salary` column so
/// the file round-trips through the delimited dataset provider.
///
pub fn write_simulated_table(sim: &SimOut, table_file: &str) -> anyhow::Result<()> {
    let delim = table_delimiter(table_file)?;

    let nrows = sim.table.nrows();
    anyhow::ensure!(sim.target.len() == nrows, "target does not match rows");

    let mut columns = Vec::with_capacity(sim.table.ncols());
    for name in sim.table.column_names() {
        columns.push(sim.table.column(name)?);
    }

    let mut lines: Vec<Box<str>> = Vec::with_capacity(nrows + 1);

    let mut header: Vec<&str> = sim
        .table
        .column_names()
        .iter()
        .map(|x| x.as_ref())
        .collect();
    header.push("current_annual_salary");
    lines.push(header.join(delim).into_boxed_str());

    for i in 0..nrows {
        let mut fields: Vec<String> = columns
            .iter()
            .map(|col| col[i].as_deref().unwrap_or("").to_string())
            .collect();
        fields.push(format!("{:.2}", sim.target[i]));
        lines.push(fields.join(delim).into_boxed_str());
    }

    write_lines(&lines, table_file)?;
    Ok(())
}
