//! Load tree-list and vector benchmark results, smooth them by block
//! averaging and chart the timings of each operation side by side.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod export;
pub mod state;
pub mod ui;
