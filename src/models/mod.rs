pub mod config;
pub mod options;
pub mod report;

pub use config::*;
pub use options::*;
pub use report::*;
