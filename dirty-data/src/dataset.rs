use crate::feature_table::FeatureTable;
use table_util::common_io::{basename, extension, read_delimited_fields};
use table_util::DVec;

/// A feature table with an optional row-aligned numeric target
pub struct Dataset {
    pub table: FeatureTable,
    pub target: Option<DVec>,
    pub description: Box<str>,
}

/// Anything that can hand over a complete dataset in one call
pub trait DatasetProvider {
    fn fetch(&self) -> anyhow::Result<Dataset>;
}

///
/// Read a headered delimited text file into a dataset
///
/// * `table_file` - `.tsv`, `.txt` (tab) or `.csv` (comma), gzipped or not
/// * `target_column` - if set, split this numeric column out of the table
///
/// Empty fields and `NA` become missing values.
///
pub struct DelimitedTable {
    pub table_file: Box<str>,
    pub target_column: Option<Box<str>>,
}

impl DatasetProvider for DelimitedTable {
    fn fetch(&self) -> anyhow::Result<Dataset> {
        let delim = table_delimiter(&self.table_file)?;
        let out = read_delimited_fields(self.table_file.as_ref(), delim, 0)?;

        anyhow::ensure!(
            !out.header.is_empty(),
            "no header line in {}",
            self.table_file
        );

        let ncols = out.header.len();
        let mut columns: Vec<Vec<Option<Box<str>>>> =
            vec![Vec::with_capacity(out.lines.len()); ncols];

        for (i, row) in out.lines.iter().enumerate() {
            anyhow::ensure!(
                row.len() == ncols,
                "row {} has {} fields, expected {}",
                i,
                row.len(),
                ncols
            );
            for (j, field) in row.iter().enumerate() {
                columns[j].push(missing_or_value(field));
            }
        }

        let mut column_names = out.header;

        let target = match &self.target_column {
            Some(tt) => {
                let jj = column_names
                    .iter()
                    .position(|x| x == tt)
                    .ok_or(anyhow::anyhow!("no target column: {}", tt))?;
                column_names.remove(jj);
                let yy = columns.remove(jj);
                Some(parse_target(&yy, tt)?)
            }
            None => None,
        };

        let table = FeatureTable::new(column_names, columns)?;
        let description = format!("delimited table read from {}", self.table_file).into_boxed_str();

        Ok(Dataset {
            table,
            target,
            description,
        })
    }
}

///
/// A small in-memory sample of the county employee salary table, so
/// the whole pipeline and its tests can run without touching any
/// external file. The `underfilled_job_title` column is mostly empty
/// and occasionally carries a more detailed variant of the position
/// title.
///
pub struct EmployeeTitlesSample;

impl DatasetProvider for EmployeeTitlesSample {
    fn fetch(&self) -> anyhow::Result<Dataset> {
        let mut titles = Vec::with_capacity(SAMPLE_ROWS.len());
        let mut underfilled = Vec::with_capacity(SAMPLE_ROWS.len());
        let mut salaries = Vec::with_capacity(SAMPLE_ROWS.len());

        for &(title, extra, salary) in SAMPLE_ROWS {
            titles.push(missing_or_value(title));
            underfilled.push(missing_or_value(extra));
            salaries.push(salary);
        }

        let column_names: Vec<Box<str>> = vec![
            "employee_position_title".into(),
            "underfilled_job_title".into(),
        ];

        let table = FeatureTable::new(column_names, vec![titles, underfilled])?;

        Ok(Dataset {
            table,
            target: Some(DVec::from_vec(salaries)),
            description: Box::from(
                "Annual salary records of permanent county employees; position \
                 titles are free text and the underfilled_job_title column \
                 occasionally carries a more detailed variant",
            ),
        })
    }
}

/// Empty fields and `NA` mean missing
pub fn missing_or_value(field: &str) -> Option<Box<str>> {
    let field = field.trim();
    if field.is_empty() || field == "NA" {
        None
    } else {
        Some(Box::from(field))
    }
}

/// Pick the field delimiter from the file extension (`.gz` peeled off)
pub fn table_delimiter(file: &str) -> anyhow::Result<&'static str> {
    let mut ext = extension(file)?;
    if ext.as_ref() == "gz" {
        ext = extension(basename(file)?.as_ref())?;
    }
    match ext.as_ref() {
        "tsv" | "txt" => Ok("\t"),
        "csv" => Ok(","),
        _ => Err(anyhow::anyhow!("unknown table format: {}", file)),
    }
}

fn parse_target(column: &[Option<Box<str>>], name: &str) -> anyhow::Result<DVec> {
    let mut values = Vec::with_capacity(column.len());
    for (i, x) in column.iter().enumerate() {
        let x = x
            .as_deref()
            .ok_or(anyhow::anyhow!("missing target at row {} of {}", i, name))?;
        let y = x
            .parse::<f32>()
            .map_err(|_| anyhow::anyhow!("bad target value at row {} of {}: {}", i, name, x))?;
        values.push(y);
    }
    Ok(DVec::from_vec(values))
}

const SAMPLE_ROWS: &[(&str, &str, f32)] = &[
    ("Office Services Coordinator", "", 69222.18),
    ("Master Police Officer", "", 97392.47),
    ("Social Worker IV", "", 77694.85),
    ("Police Officer III", "", 86252.33),
    ("Firefighter/Rescuer III", "", 63629.03),
    ("Bus Operator", "", 51590.33),
    ("Manager III", "", 102736.52),
    ("Police Aide", "", 37340.97),
    ("Electrician I", "", 52632.66),
    ("School Health Room Technician I", "", 35987.02),
    ("Fire/Rescue Captain", "", 121324.30),
    ("Income Assistance Program Specialist II", "", 57517.07),
    ("Library Assistant I", "", 33236.89),
    ("Public Safety Communications Specialist III", "", 59909.83),
    ("", "Sr. Information Technology Specialist", 94222.10),
    ("Manager", "Sr. Manager", 104038.40),
    ("Accountant/Auditor II", "", 62284.51),
    ("Mechanic Technician II", "", 57945.72),
    ("Correctional Officer III (Corporal)", "", 64862.27),
    ("", "Firefighter", 45261.21),
    ("Crossing Guard", "", 17862.73),
    ("Liquor Store Clerk I", "", 34403.28),
    ("Community Health Nurse II", "", 72094.53),
    ("Legislative Analyst II", "", 82169.27),
];
