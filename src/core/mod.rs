pub mod batcher;
pub mod config;
pub mod grouping;
pub mod reader;
pub mod splitter;
pub mod writer;

pub use batcher::*;
pub use config::*;
pub use grouping::*;
pub use reader::*;
pub use splitter::*;
pub use writer::*;
