use crate::common_io::{read_lines_of_types, write_lines, Delimiter};
use crate::parquet::*;
use crate::Mat;

/// A dense matrix carried along with its row and column names
pub struct MatWithNames<M> {
    pub rows: Vec<Box<str>>,
    pub cols: Vec<Box<str>>,
    pub mat: M,
}

/// Read and write dense matrices with optional row and column names
pub trait MatIo {
    type Mat;

    fn read_file_delim(
        file: &str,
        delim: impl Into<Delimiter>,
        skip: Option<usize>,
    ) -> anyhow::Result<Self::Mat>;

    fn from_tsv(tsv_file: &str, skip: Option<usize>) -> anyhow::Result<Self::Mat> {
        Self::read_file_delim(tsv_file, "\t", skip)
    }

    fn write_file_delim(&self, file: &str, delim: &str) -> anyhow::Result<()>;

    fn to_tsv(&self, tsv_file: &str) -> anyhow::Result<()> {
        self.write_file_delim(tsv_file, "\t")
    }

    fn to_parquet_with_names(
        &self,
        file_path: &str,
        row_names: (Option<&[Box<str>]>, Option<&str>),
        column_names: Option<&[Box<str>]>,
    ) -> anyhow::Result<()>;

    fn from_parquet_with_indices_names(
        file_path: &str,
        row_name_index: Option<usize>,
        column_indices: Option<&[usize]>,
        column_names: Option<&[Box<str>]>,
    ) -> anyhow::Result<MatWithNames<Self::Mat>>;

    fn from_parquet(file_path: &str) -> anyhow::Result<MatWithNames<Self::Mat>> {
        Self::from_parquet_with_indices_names(file_path, None, None, None)
    }
}

impl MatIo for Mat {
    type Mat = Self;

    fn read_file_delim(
        file: &str,
        delim: impl Into<Delimiter>,
        skip: Option<usize>,
    ) -> anyhow::Result<Self::Mat> {
        let hdr_line = match skip {
            Some(skip) => skip as i64,
            None => -1, // no skipping
        };

        let data = read_lines_of_types::<f32>(file, delim, hdr_line)?.lines;

        if data.is_empty() {
            return Err(anyhow::anyhow!("No data in file"));
        }

        let ncols = data[0].len();
        let nrows = data.len();
        let data = data.into_iter().flatten().collect::<Vec<_>>();

        Ok(Mat::from_row_iterator(nrows, ncols, data))
    }

    fn write_file_delim(&self, file: &str, delim: &str) -> anyhow::Result<()> {
        // par_iter() or par_bridge() would mess up the row order
        let lines = self
            .row_iter()
            .map(|row| {
                row.iter()
                    .map(|x| format!("{}", *x))
                    .collect::<Vec<String>>()
                    .join(delim)
                    .into_boxed_str()
            })
            .collect::<Vec<_>>();

        write_lines(&lines, file)?;
        Ok(())
    }

    fn to_parquet_with_names(
        &self,
        file_path: &str,
        row_names: (Option<&[Box<str>]>, Option<&str>),
        column_names: Option<&[Box<str>]>,
    ) -> anyhow::Result<()> {
        let (nrows, ncols) = (self.nrows(), self.ncols());
        let (row_names_slice, row_field) = row_names;

        let writer = ParquetWriter::new(
            file_path,
            (nrows, ncols),
            (row_names_slice, column_names),
            row_field,
        )?;

        let row_names = writer.row_names_vec();

        if row_names.len() != nrows {
            return Err(anyhow::anyhow!("row names don't match"));
        }

        let mut file_writer = writer.get_writer()?;
        let mut row_group_writer = file_writer.next_row_group()?;
        parquet_add_bytearray(&mut row_group_writer, row_names)?;

        for j in 0..ncols {
            let column_j: Vec<f64> = self.column(j).iter().map(|&x| x as f64).collect();
            parquet_add_double_column(&mut row_group_writer, &column_j)?;
        }

        row_group_writer.close()?;
        file_writer.close()?;
        Ok(())
    }

    fn from_parquet_with_indices_names(
        file_path: &str,
        row_name_index: Option<usize>,
        column_indices: Option<&[usize]>,
        column_names: Option<&[Box<str>]>,
    ) -> anyhow::Result<MatWithNames<Self>> {
        let parquet = ParquetReader::new(file_path, row_name_index, column_indices, column_names)?;

        let ParquetReader {
            row_major_data,
            row_names,
            column_names,
        } = parquet;

        let nrows = row_names.len();
        let ncols = column_names.len();
        let data = row_major_data.into_iter().map(|x| x as f32);

        Ok(MatWithNames {
            rows: row_names,
            cols: column_names,
            mat: Mat::from_row_iterator(nrows, ncols, data),
        })
    }
}
