//! Grid Snake - a tick-based snake simulation with smooth interpolation
//!
//! This library provides:
//! - Core simulation (game module): grid, clock, engine and session facade
//! - Configuration file loading (config module)
//! - Terminal input mapping and rendering (input, render modules)
//! - Session and batch statistics (metrics module)
//! - Interactive and headless hosts (modes module)

pub mod config;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
