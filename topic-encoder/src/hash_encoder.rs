use crate::ngram::char_ngrams;
use crate::traits::{EncoderConfig, LabelGroup, TopicEncoder};

use fnv::FnvHashMap as HashMap;
use fnv::FnvHasher;
use indicatif::ParallelProgressIterator;
use rayon::prelude::*;
use std::hash::Hasher;
use table_util::Mat;

///
/// Deterministic baseline encoder. Character n-grams of each label
/// fall into `n_components` buckets through a seed-salted FNV hash,
/// and each row is normalized to unit mass (a label with no n-grams
/// keeps an all-zero row). No factorization happens here; the point
/// is a fitted encoder with stable topic indices that the report and
/// the heatmap can share.
///
pub struct HashTopicEncoder {
    config: EncoderConfig,
    fitted: Option<Vec<FittedLabel>>,
}

/// Per-label statistics remembered at fit time
struct FittedLabel {
    label: Box<str>,
    activation: Vec<f32>,
    count: usize,
}

impl HashTopicEncoder {
    pub fn new(config: EncoderConfig) -> anyhow::Result<Self> {
        anyhow::ensure!(config.n_components > 0, "need at least one component");
        Ok(Self {
            config,
            fitted: None,
        })
    }

    fn bucket(&self, gram: &str) -> usize {
        let mut hasher = FnvHasher::with_key(self.config.random_state);
        hasher.write(gram.as_bytes());
        (hasher.finish() as usize) % self.config.n_components
    }

    fn encode_label(&self, label: &str) -> Vec<f32> {
        let mut row = vec![0.0f32; self.config.n_components];
        for gram in char_ngrams(label) {
            row[self.bucket(gram.as_ref())] += 1.0;
        }

        let total: f32 = row.iter().sum();
        if total > 0.0 {
            for x in row.iter_mut() {
                *x /= total;
            }
        }
        row
    }

    /// Encode a column, hashing each distinct label only once
    fn encode_rows(&self, column: &[Box<str>]) -> Mat {
        let mut first_seen: HashMap<&str, usize> = HashMap::default();
        let mut order: Vec<&str> = Vec::new();

        for label in column {
            if !first_seen.contains_key(label.as_ref()) {
                first_seen.insert(label.as_ref(), order.len());
                order.push(label.as_ref());
            }
        }

        let encoded: Vec<Vec<f32>> = order
            .par_iter()
            .map(|label| self.encode_label(label))
            .collect();

        let mut zz = Mat::zeros(column.len(), self.config.n_components);
        for (i, label) in column.iter().enumerate() {
            let row = &encoded[first_seen[label.as_ref()]];
            for (k, &x) in row.iter().enumerate() {
                zz[(i, k)] = x;
            }
        }
        zz
    }
}

impl TopicEncoder for HashTopicEncoder {
    fn n_components(&self) -> usize {
        self.config.n_components
    }

    fn fit_transform(&mut self, column: &[Box<str>]) -> anyhow::Result<Mat> {
        anyhow::ensure!(!column.is_empty(), "empty input column");

        let mut first_seen: HashMap<Box<str>, usize> = HashMap::default();
        let mut order: Vec<Box<str>> = Vec::new();
        let mut counts: Vec<usize> = Vec::new();

        for label in column {
            match first_seen.get(label.as_ref()) {
                Some(&idx) => counts[idx] += 1,
                None => {
                    first_seen.insert(label.clone(), order.len());
                    order.push(label.clone());
                    counts.push(1);
                }
            }
        }

        let encoded: Vec<Vec<f32>> = order
            .par_iter()
            .progress_count(order.len() as u64)
            .map(|label| self.encode_label(label))
            .collect();

        let mut zz = Mat::zeros(column.len(), self.config.n_components);
        for (i, label) in column.iter().enumerate() {
            let row = &encoded[first_seen[label.as_ref()]];
            for (k, &x) in row.iter().enumerate() {
                zz[(i, k)] = x;
            }
        }

        let fitted: Vec<FittedLabel> = order
            .into_iter()
            .zip(encoded)
            .zip(counts)
            .map(|((label, activation), count)| FittedLabel {
                label,
                activation,
                count,
            })
            .collect();

        self.fitted = Some(fitted);
        Ok(zz)
    }

    fn transform(&self, column: &[Box<str>]) -> anyhow::Result<Mat> {
        anyhow::ensure!(self.fitted.is_some(), "encoder has not been fitted");
        anyhow::ensure!(!column.is_empty(), "empty input column");
        Ok(self.encode_rows(column))
    }

    fn label_summary(&self, labels_per_topic: usize) -> anyhow::Result<Vec<LabelGroup>> {
        let fitted = self
            .fitted
            .as_ref()
            .ok_or(anyhow::anyhow!("encoder has not been fitted"))?;

        anyhow::ensure!(labels_per_topic > 0, "need at least one label per topic");
        anyhow::ensure!(
            fitted.len() >= labels_per_topic,
            "only {} distinct labels for {} per topic",
            fitted.len(),
            labels_per_topic
        );

        let kk = self.config.n_components;
        let mut groups = Vec::with_capacity(kk);

        for k in 0..kk {
            let mut idx: Vec<usize> = (0..fitted.len()).collect();
            // highest activation first; break ties by frequency, then label
            idx.sort_by(|&a, &b| {
                fitted[b].activation[k]
                    .partial_cmp(&fitted[a].activation[k])
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(fitted[b].count.cmp(&fitted[a].count))
                    .then(fitted[a].label.cmp(&fitted[b].label))
            });

            let labels = idx
                .into_iter()
                .take(labels_per_topic)
                .map(|i| fitted[i].label.clone())
                .collect();

            groups.push(LabelGroup { labels });
        }
        Ok(groups)
    }
}
