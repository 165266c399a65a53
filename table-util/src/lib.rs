pub mod common_io; // delimited and gzipped text files
pub mod mat_io; // dense matrices with row and column names
pub mod parquet; // parquet-backed matrix storage
pub mod sampling; // random matrices for tests

pub type Mat = nalgebra::DMatrix<f32>;
pub type DVec = nalgebra::DVector<f32>;
