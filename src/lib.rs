pub mod catalog;
pub mod cliopt;
pub mod error;
pub mod filter;
pub mod geocode;
pub mod insight;
pub mod model;
pub mod output;
pub mod parser;
pub mod runner;
