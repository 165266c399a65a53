use crate::traits::{LabelGroup, TopicEncoder};
use serde::Serialize;
use std::io::Write;
use table_util::common_io::{open_buf_writer, write_lines};

/// Topic-by-topic reading of a fitted encoder
#[derive(Serialize)]
pub struct TopicReport {
    topics: Vec<LabelGroup>,
}

impl TopicReport {
    /// Summarize a fitted encoder with `labels_per_topic` labels per topic
    pub fn from_encoder(
        encoder: &dyn TopicEncoder,
        labels_per_topic: usize,
    ) -> anyhow::Result<Self> {
        let topics = encoder.label_summary(labels_per_topic)?;
        Ok(Self { topics })
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn groups(&self) -> &[LabelGroup] {
        &self.topics
    }

    /// Topic index and label group, in index order from zero
    pub fn pairs(&self) -> impl Iterator<Item = (usize, &LabelGroup)> {
        self.topics.iter().enumerate()
    }

    /// One printable line per topic
    pub fn lines(&self) -> Vec<Box<str>> {
        self.pairs()
            .map(|(k, group)| format!("Topic n°{}: {}", k, group).into_boxed_str())
            .collect()
    }

    /// Rendered label groups, one string per topic, in topic order
    pub fn group_labels(&self) -> Vec<Box<str>> {
        self.topics
            .iter()
            .map(|group| group.to_string().into_boxed_str())
            .collect()
    }

    /// Write the plain text lines
    pub fn write_lines_to(&self, output_file: &str) -> anyhow::Result<()> {
        write_lines(&self.lines(), output_file)
    }

    /// Write the report as JSON
    pub fn to_json(&self, output_file: &str) -> anyhow::Result<()> {
        let mut buf = open_buf_writer(output_file)?;
        serde_json::to_writer_pretty(&mut buf, self)?;
        writeln!(buf)?;
        buf.flush()?;
        Ok(())
    }
}
