pub mod col;

pub use col::*;
