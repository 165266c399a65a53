use topic_encoder::hash_encoder::HashTopicEncoder;
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
    "Library Assistant I",
    "Manager III",
];

fn title_column() -> Vec<Box<str>> {
    TITLES.iter().map(|&x| Box::from(x)).collect()
}

#[test]
fn fit_transform_shapes_and_mass() -> anyhow::Result<()> {
    let config = EncoderConfig {
        n_components: 7,
        random_state: 42,
    };

    let mut enc = HashTopicEncoder::new(config)?;
    let column = title_column();
    let zz = enc.fit_transform(&column)?;

    assert_eq!(zz.nrows(), column.len());
    assert_eq!(zz.ncols(), 7);
    assert!(zz.iter().all(|&x| x >= 0.0));

    // every title here has n-grams, so every row carries unit mass
    for i in 0..zz.nrows() {
        let total: f32 = zz.row(i).iter().sum();
        approx::assert_abs_diff_eq!(total, 1.0, epsilon = 1e-4);
    }

    Ok(())
}

#[test]
fn label_without_ngrams_encodes_to_zero_mass() -> anyhow::Result<()> {
    let config = EncoderConfig {
        n_components: 7,
        random_state: 42,
    };

    let mut enc = HashTopicEncoder::new(config)?;
    let column: Vec<Box<str>> =
        vec!["Police Officer III".into(), "X".into(), "Bus Operator".into()];
    let zz = enc.fit_transform(&column)?;

    // one character gives no n-grams; that row stays all zero, not NaN
    assert!(zz.row(1).iter().all(|&x| x == 0.0));
    assert!(zz.iter().all(|&x| x.is_finite()));

    for i in [0, 2] {
        let total: f32 = zz.row(i).iter().sum();
        approx::assert_abs_diff_eq!(total, 1.0, epsilon = 1e-4);
    }

    Ok(())
}

#[test]
fn transform_requires_fit() -> anyhow::Result<()> {
    let enc = HashTopicEncoder::new(EncoderConfig::default())?;

    assert!(enc.transform(&title_column()).is_err());
    assert!(enc.label_summary(3).is_err());

    Ok(())
}

#[test]
fn transform_agrees_with_fit_transform() -> anyhow::Result<()> {
    let config = EncoderConfig {
        n_components: 7,
        random_state: 42,
    };

    let mut enc = HashTopicEncoder::new(config)?;
    let column = title_column();
    let zz = enc.fit_transform(&column)?;

    let ww = enc.transform(&column[..4])?;
    assert_eq!(ww.nrows(), 4);
    approx::assert_abs_diff_eq!(zz.rows(0, 4).into_owned(), ww);

    // labels never seen at fit time still encode
    let unseen: Vec<Box<str>> = vec!["Crossing Guard".into()];
    let uu = enc.transform(&unseen)?;
    assert_eq!(uu.nrows(), 1);
    assert_eq!(uu.ncols(), 7);
    assert!(uu.iter().all(|&x| x >= 0.0));

    Ok(())
}

#[test]
fn seeded_encoding_is_deterministic() -> anyhow::Result<()> {
    let config = EncoderConfig {
        n_components: 5,
        random_state: 13,
    };
    let column = title_column();

    let mut enc_a = HashTopicEncoder::new(config)?;
    let mut enc_b = HashTopicEncoder::new(config)?;
    let zz_a = enc_a.fit_transform(&column)?;
    let zz_b = enc_b.fit_transform(&column)?;
    assert_eq!(zz_a, zz_b);

    let mut enc_c = HashTopicEncoder::new(EncoderConfig {
        n_components: 5,
        random_state: 14,
    })?;
    let zz_c = enc_c.fit_transform(&column)?;
    assert_ne!(zz_a, zz_c);

    Ok(())
}

#[test]
fn label_summary_shapes() -> anyhow::Result<()> {
    let config = EncoderConfig {
        n_components: 5,
        random_state: 42,
    };

    let mut enc = HashTopicEncoder::new(config)?;
    let column = title_column();
    enc.fit_transform(&column)?;

    let groups = enc.label_summary(3)?;
    assert_eq!(groups.len(), 5);

    for group in &groups {
        assert_eq!(group.labels.len(), 3);
        for label in &group.labels {
            assert!(TITLES.contains(&label.as_ref()));
        }
    }

    // summaries of the same fit are stable
    assert_eq!(enc.label_summary(3)?, groups);

    // more labels per topic than distinct labels seen
    assert!(enc.label_summary(TITLES.len() + 1).is_err());
    assert!(enc.label_summary(0).is_err());

    Ok(())
}

#[test]
fn default_component_count_on_a_larger_column() -> anyhow::Result<()> {
    // 50 rows cycling through the titles above
    let column: Vec<Box<str>> = (0..50).map(|i| Box::from(TITLES[i % TITLES.len()])).collect();

    let mut enc = HashTopicEncoder::new(EncoderConfig::default())?;
    let zz = enc.fit_transform(&column)?;

    assert_eq!(zz.nrows(), 50);
    assert_eq!(zz.ncols(), 10);

    let groups = enc.label_summary(3)?;
    assert_eq!(groups.len(), 10);
    assert!(groups.iter().all(|g| g.labels.len() == 3));

    Ok(())
}

#[test]
fn zero_components_rejected() {
    let config = EncoderConfig {
        n_components: 0,
        random_state: 42,
    };
    assert!(HashTopicEncoder::new(config).is_err());
}
