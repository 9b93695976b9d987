pub mod cache;
pub mod candy_machine;
pub mod cli;
pub mod common;
pub mod config;
pub mod constants;
pub mod deploy;
pub mod errors;
pub mod mint;
pub mod parse;
pub mod pdas;
pub mod setup;
pub mod upload;
pub mod utils;
pub mod validate;
