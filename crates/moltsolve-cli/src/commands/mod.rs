pub mod auto;
pub mod config;
pub mod parse;
pub mod solve;
