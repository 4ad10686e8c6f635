pub mod cli;
pub mod parser;
pub mod setup;
