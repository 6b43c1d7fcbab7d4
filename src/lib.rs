pub mod error;
pub mod key;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod stats;
