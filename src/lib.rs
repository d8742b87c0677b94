pub mod app;
pub mod cli;
pub mod config;
pub mod menu;
pub mod record;
pub mod render;
pub mod runner;
pub mod source;
pub mod template;
pub mod utils;

#[cfg(test)]
mod tests;
