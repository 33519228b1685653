//! live-dither library crate.
//!
//! Turns a photo into a continuously animated black/orange bitmap:
//! [`dither`] holds the image pipeline and animation engine, [`surface`] the
//! places frames can be shown, and [`event_loop`] the paced loop tying them
//! together.

pub mod cli;
pub mod config;
pub mod dither;
pub mod event_loop;
pub mod surface;
