use table_util::common_io::{create_temp_dir_file, read_delimited_fields, write_lines};
use table_util::mat_io::MatIo;
use table_util::sampling::{rnorm, runif};
use table_util::Mat;

#[test]
fn dmatrix_tsv_roundtrip() -> anyhow::Result<()> {
    let xx = runif(50, 20);

    let tsv_file = create_temp_dir_file("txt.gz")?;
    xx.to_tsv(&tsv_file.to_str().unwrap())?;

    let yy = Mat::from_tsv(&tsv_file.to_str().unwrap(), None)?;

    approx::assert_abs_diff_eq!(xx, yy);

    Ok(())
}

#[test]
fn dmatrix_parquet_roundtrip() -> anyhow::Result<()> {
    let xx = rnorm(30, 5);

    let row_names: Vec<Box<str>> = (0..30).map(|i| format!("r{}", i).into_boxed_str()).collect();
    let column_names: Vec<Box<str>> = (0..5)
        .map(|k| format!("topic_{}", k).into_boxed_str())
        .collect();

    let parquet_file = create_temp_dir_file(".parquet")?;
    xx.to_parquet_with_names(
        parquet_file.to_str().unwrap(),
        (Some(&row_names), Some("label")),
        Some(&column_names),
    )?;

    let yy = Mat::from_parquet(parquet_file.to_str().unwrap())?;

    assert_eq!(yy.rows, row_names);
    assert_eq!(yy.cols, column_names);
    approx::assert_abs_diff_eq!(xx, yy.mat);

    Ok(())
}

#[test]
fn delimited_fields_keep_empty_cells() -> anyhow::Result<()> {
    let lines: Vec<Box<str>> = vec![
        "name,title".into(),
        "alice,".into(),
        ",firefighter".into(),
    ];

    let csv_file = create_temp_dir_file(".csv")?;
    write_lines(&lines, csv_file.to_str().unwrap())?;

    let out = read_delimited_fields(csv_file.to_str().unwrap(), ",", 0)?;

    assert_eq!(out.header.len(), 2);
    assert_eq!(out.lines.len(), 2);
    assert_eq!(out.lines[0][0].as_ref(), "alice");
    assert_eq!(out.lines[0][1].as_ref(), "");
    assert_eq!(out.lines[1][0].as_ref(), "");
    assert_eq!(out.lines[1][1].as_ref(), "firefighter");

    Ok(())
}
