use serde::Serialize;
use table_util::Mat;

/// Options recognized by every topic encoder
#[derive(Clone, Copy, Debug)]
pub struct EncoderConfig {
    pub n_components: usize,
    pub random_state: u64,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            n_components: 10,
            random_state: 42,
        }
    }
}

/// Representative raw labels for one latent topic, most
/// representative first. Shows up as `[a, b, c]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LabelGroup {
    pub labels: Vec<Box<str>>,
}

impl std::fmt::Display for LabelGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, label) in self.labels.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", label)?;
        }
        write!(f, "]")
    }
}

///
/// The encoder capability the pipeline depends on. One value gets
/// fitted once and then serves both the topic report and any number
/// of `transform` calls, so topic index `k` keeps meaning the same
/// latent dimension throughout.
///
pub trait TopicEncoder {
    fn n_components(&self) -> usize;

    /// Fit on raw labels and return their activations: one row per
    /// input row, `n_components` columns, all non-negative
    fn fit_transform(&mut self, column: &[Box<str>]) -> anyhow::Result<Mat>;

    /// Encode with the already fitted state. Labels never seen at fit
    /// time are fine; an unfitted encoder is an error.
    fn transform(&self, column: &[Box<str>]) -> anyhow::Result<Mat>;

    /// Exactly `n_components` groups of exactly `labels_per_topic`
    /// labels each, in topic index order. Errors if unfitted or if
    /// fewer distinct labels were seen than requested per topic.
    fn label_summary(&self, labels_per_topic: usize) -> anyhow::Result<Vec<LabelGroup>>;
}
