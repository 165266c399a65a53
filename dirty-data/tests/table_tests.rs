use dirty_data::dataset::*;
use dirty_data::feature_table::FeatureTable;

fn two_column_table() -> anyhow::Result<FeatureTable> {
    let column_names: Vec<Box<str>> = vec![
        "employee_position_title".into(),
        "underfilled_job_title".into(),
    ];

    let titles: Vec<Option<Box<str>>> = vec![Some("Manager".into()), None];
    let extras: Vec<Option<Box<str>>> =
        vec![Some("Sr. Manager".into()), Some("Firefighter".into())];

    FeatureTable::new(column_names, vec![titles, extras])
}

#[test]
fn overlay_keeps_present_values_and_drops_donor() -> anyhow::Result<()> {
    let mut table = two_column_table()?;
    table.overlay_column("employee_position_title", "underfilled_job_title")?;

    assert_eq!(table.nrows(), 2);
    assert_eq!(table.ncols(), 1);
    assert!(table
        .column_names()
        .iter()
        .all(|x| x.as_ref() != "underfilled_job_title"));

    let merged = table.dirty_column("employee_position_title")?;
    assert_eq!(merged[0].as_ref(), "Manager");
    assert_eq!(merged[1].as_ref(), "Firefighter");

    Ok(())
}

#[test]
fn overlay_rejects_unknown_and_self_columns() -> anyhow::Result<()> {
    let mut table = two_column_table()?;

    assert!(table
        .overlay_column("employee_position_title", "no_such_column")
        .is_err());
    assert!(table
        .overlay_column("no_such_column", "underfilled_job_title")
        .is_err());
    assert!(table
        .overlay_column("employee_position_title", "employee_position_title")
        .is_err());

    Ok(())
}

#[test]
fn dirty_column_errors_on_residual_missing() -> anyhow::Result<()> {
    let column_names: Vec<Box<str>> = vec!["a".into(), "b".into()];
    let aa: Vec<Option<Box<str>>> = vec![Some("x".into()), None];
    let bb: Vec<Option<Box<str>>> = vec![None, None];

    let mut table = FeatureTable::new(column_names, vec![aa, bb])?;
    table.overlay_column("a", "b")?;

    assert!(table.dirty_column("a").is_err());

    Ok(())
}

#[test]
fn employee_sample_runs_through_overlay() -> anyhow::Result<()> {
    let data = EmployeeTitlesSample.fetch()?;
    let nrows = data.table.nrows();

    let target = data.target.as_ref().expect("sample carries salaries");
    assert_eq!(target.len(), nrows);

    let mut table = data.table;
    table.overlay_column("employee_position_title", "underfilled_job_title")?;
    assert_eq!(table.nrows(), nrows);

    let dirty = table.dirty_column("employee_position_title")?;
    assert_eq!(dirty.len(), nrows);

    // rows missing the primary title get the detailed one
    assert!(dirty.iter().any(|x| x.as_ref() == "Firefighter"));

    // a present primary title never gets replaced
    assert!(dirty.iter().any(|x| x.as_ref() == "Manager"));
    assert!(dirty.iter().all(|x| x.as_ref() != "Sr. Manager"));

    Ok(())
}
