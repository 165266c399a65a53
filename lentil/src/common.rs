#![allow(unused)]

pub use table_util::common_io as io;
pub use table_util::{DVec, Mat};

pub use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
pub use env_logger;

pub use log::info;
pub use std::path::Path;

pub use indicatif::ParallelProgressIterator;
pub use rayon::prelude::*;

pub use dirty_data::dataset::{Dataset, DatasetProvider, DelimitedTable, EmployeeTitlesSample};
pub use topic_encoder::traits::{EncoderConfig, TopicEncoder};

/// Resolve the dataset provider from command line arguments. A user
/// file takes precedence over the bundled employee title sample.
pub fn choose_provider(
    table_file: Option<&str>,
    target_column: Option<&str>,
) -> Box<dyn DatasetProvider> {
    match table_file {
        Some(file) => Box::new(DelimitedTable {
            table_file: file.into(),
            target_column: target_column.map(|x| x.into()),
        }),
        None => Box::new(EmployeeTitlesSample),
    }
}
