pub mod csv;

pub use csv::load_csv;

/// File name the recorder writes by default, looked up in the working directory
pub const DEFAULT_DATA_FILE: &str = "traffic_samples.csv";
