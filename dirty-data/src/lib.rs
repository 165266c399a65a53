pub mod dataset; // dataset providers
pub mod feature_table; // nullable string columns, row-aligned
pub mod simulate; // synthetic dirty category tables
