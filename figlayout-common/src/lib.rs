pub mod binning;
pub mod error;
pub mod types;
pub mod units;
pub mod value;
