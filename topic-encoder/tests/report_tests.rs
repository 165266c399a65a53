use table_util::common_io::{create_temp_dir_file, read_lines};
use topic_encoder::hash_encoder::HashTopicEncoder;
use topic_encoder::report::TopicReport;
use topic_encoder::traits::*;

const TITLES: &[&str] = &[
    "Police Officer III",
    "police officer",
    "Firefighter/Rescuer II",
    "Fire/Rescue Captain",
    "Office Services Coordinator",
    "office assistant",
    "Bus Operator",
    "bus operator senior",
];

fn fitted_encoder(kk: usize) -> anyhow::Result<HashTopicEncoder> {
    let config = EncoderConfig {
        n_components: kk,
        random_state: 42,
    };
    let column: Vec<Box<str>> = TITLES.iter().map(|&x| Box::from(x)).collect();

    let mut enc = HashTopicEncoder::new(config)?;
    enc.fit_transform(&column)?;
    Ok(enc)
}

#[test]
fn report_follows_topic_order() -> anyhow::Result<()> {
    let enc = fitted_encoder(4)?;
    let report = TopicReport::from_encoder(&enc, 2)?;

    assert_eq!(report.len(), 4);
    assert!(!report.is_empty());

    for (k, (kk, group)) in report.pairs().enumerate() {
        assert_eq!(k, kk);
        assert_eq!(group.labels.len(), 2);
    }

    let lines = report.lines();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("Topic n°0: ["));
    assert!(lines[3].starts_with("Topic n°3: ["));
    assert!(lines.iter().all(|x| x.ends_with(']')));

    let ticks = report.group_labels();
    assert_eq!(ticks.len(), 4);
    for (tick, (_, group)) in ticks.iter().zip(report.pairs()) {
        assert_eq!(tick.as_ref(), group.to_string());
    }

    Ok(())
}

#[test]
fn report_files_roundtrip() -> anyhow::Result<()> {
    let enc = fitted_encoder(3)?;
    let report = TopicReport::from_encoder(&enc, 2)?;

    let txt_file = create_temp_dir_file(".txt")?;
    report.write_lines_to(txt_file.to_str().unwrap())?;
    let lines = read_lines(txt_file.to_str().unwrap())?;
    assert_eq!(lines, report.lines());

    let json_file = create_temp_dir_file(".json")?;
    report.to_json(json_file.to_str().unwrap())?;

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_file)?)?;
    let topics = value["topics"].as_array().expect("topics array");
    assert_eq!(topics.len(), 3);
    assert_eq!(topics[0]["labels"].as_array().expect("labels").len(), 2);

    Ok(())
}

#[test]
fn display_format_for_label_groups() {
    let group = LabelGroup {
        labels: vec!["a".into(), "b".into(), "c".into()],
    };
    assert_eq!(group.to_string(), "[a, b, c]");
}

#[test]
fn unfitted_encoder_cannot_be_reported() -> anyhow::Result<()> {
    let config = EncoderConfig::default();
    let enc = HashTopicEncoder::new(config)?;
    assert!(TopicReport::from_encoder(&enc, 3).is_err());
    Ok(())
}
