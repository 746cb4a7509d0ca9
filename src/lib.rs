//! GrubTrack - food ordering in the terminal with live order tracking
//!
//! The progress core lives in [`progress`]; everything else is the app built
//! around it.

pub mod app;
pub mod cart;
pub mod config;
pub mod data;
pub mod logging;
pub mod profile;
pub mod progress;
pub mod search;
pub mod session;
pub mod tracking;
pub mod types;
pub mod ui;
pub mod views;
