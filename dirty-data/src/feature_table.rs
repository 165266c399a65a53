use std::collections::HashSet;

/// A table of named string columns where any cell may be missing.
/// Rows stay aligned across columns; the set of columns only changes
/// through an explicit overlay.
pub struct FeatureTable {
    column_names: Vec<Box<str>>,
    columns: Vec<Vec<Option<Box<str>>>>,
    nrows: usize,
}

impl FeatureTable {
    ///
    /// Assemble a table from named columns
    ///
    /// * `column_names` - one name per column, no duplicates
    /// * `columns` - row-aligned cells, `None` = missing
    ///
    pub fn new(
        column_names: Vec<Box<str>>,
        columns: Vec<Vec<Option<Box<str>>>>,
    ) -> anyhow::Result<Self> {
        anyhow::ensure!(
            column_names.len() == columns.len(),
            "{} column names for {} columns",
            column_names.len(),
            columns.len()
        );

        let uniq: HashSet<&str> = column_names.iter().map(|x| x.as_ref()).collect();
        anyhow::ensure!(uniq.len() == column_names.len(), "duplicate column names");

        let nrows = columns.first().map(|x| x.len()).unwrap_or(0);
        for (j, column) in columns.iter().enumerate() {
            anyhow::ensure!(
                column.len() == nrows,
                "column {} has {} rows, expected {}",
                column_names[j],
                column.len(),
                nrows
            );
        }

        Ok(Self {
            column_names,
            columns,
            nrows,
        })
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> &[Box<str>] {
        &self.column_names
    }

    /// Look at one column's cells
    pub fn column(&self, name: &str) -> anyhow::Result<&[Option<Box<str>>]> {
        let jj = self
            .position(name)
            .ok_or(anyhow::anyhow!("unknown column: {}", name))?;
        Ok(&self.columns[jj])
    }

    ///
    /// Fill missing entries of the `primary` column from the
    /// `secondary` column, row by row, then drop `secondary` from the
    /// table. A present primary value is never overwritten, and the
    /// number of rows does not change.
    ///
    pub fn overlay_column(&mut self, primary: &str, secondary: &str) -> anyhow::Result<()> {
        anyhow::ensure!(
            primary != secondary,
            "cannot overlay column {} onto itself",
            primary
        );

        let pp = self
            .position(primary)
            .ok_or(anyhow::anyhow!("unknown column: {}", primary))?;
        let ss = self
            .position(secondary)
            .ok_or(anyhow::anyhow!("unknown column: {}", secondary))?;

        let donor = self.columns.remove(ss);
        self.column_names.remove(ss);

        // removing the donor may shift the primary's position
        let pp = if ss < pp { pp - 1 } else { pp };

        for (cell, fill) in self.columns[pp].iter_mut().zip(donor.into_iter()) {
            if cell.is_none() {
                *cell = fill;
            }
        }
        Ok(())
    }

    ///
    /// Project one column onto raw labels. Any row still missing
    /// after the overlay is an error; nothing is imputed here.
    ///
    pub fn dirty_column(&self, name: &str) -> anyhow::Result<Vec<Box<str>>> {
        let jj = self
            .position(name)
            .ok_or(anyhow::anyhow!("unknown column: {}", name))?;

        self.columns[jj]
            .iter()
            .enumerate()
            .map(|(i, x)| {
                x.clone()
                    .ok_or(anyhow::anyhow!("missing value at row {} of {}", i, name))
            })
            .collect()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.column_names.iter().position(|x| x.as_ref() == name)
    }
}
