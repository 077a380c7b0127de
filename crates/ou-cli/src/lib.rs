pub mod config;
pub mod reporters;
pub mod runner;
