//! Core application module
//!
//! This module contains:
//! - The shell application: message handling and the stdin/lookup loop
//! - The line-oriented control interface that turns text into messages

pub mod app;
pub mod control;
