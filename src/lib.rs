//! Celestial object classifier: validates SDSS-style photometry, derives
//! extinction-corrected colour features and classifies objects as galaxy,
//! quasar or star with a pre-trained model.

pub mod app;
pub mod classifier;
pub mod color;
pub mod config;
pub mod data;
pub mod pipeline;
pub mod state;
pub mod ui;
