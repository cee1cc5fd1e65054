//! Seagallery - species gallery front end
//!
//! This library provides functionality to:
//! - Fetch a species collection and single records from the remote API
//! - Resolve thumbnail and detail images through ordered field fallbacks
//! - Drive a grid and a detail overlay through the `GalleryView` seam
//! - Run in the browser (feature `wasm`) or the terminal (feature `cli`)

pub mod api;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod controller;
#[cfg(feature = "wasm")]
pub mod dom;
pub mod models;
pub mod placeholder;
pub mod resolve;
pub mod terminal;
pub mod view;
#[cfg(feature = "wasm")]
pub mod wasm;
