pub mod app;
pub mod audit;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod guide;
pub mod i18n;
pub mod output;
pub mod resolver;
pub mod search;
pub mod state;
pub mod view;

#[cfg(test)]
mod tests;
