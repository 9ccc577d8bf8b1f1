// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Stride Insights
//!
//! A local analysis engine for running workouts. Given workout samples (pace,
//! heart rate, cadence) and a newest-first workout history, it derives pace
//! stability, aerobic efficiency and its trend, an optimal cadence band, heart
//! rate zone distribution, overtraining risk, and long-term progress.
//!
//! ## Features
//!
//! - **Pure analysis**: every analyzer is a deterministic function of its
//!   inputs and configuration, with no global state and no I/O
//! - **Explicit insufficient data**: degenerate input yields a defined result
//!   carrying an insufficient-data classification, never an error or panic
//! - **Tunable thresholds**: all limits live in [`config::EngineConfig`] and
//!   can be overridden from a TOML file
//! - **Async friendly**: [`intelligence::AnalysisFacade::history_report_async`]
//!   keeps heavy histories off an async executor
//!
//! ## Architecture
//!
//! - **Models**: workout records borrowed from the caller
//! - **Intelligence**: statistics primitives, one analyzer per concern, and the
//!   facade composing them
//! - **Config**: engine thresholds with defaults from `constants`
//! - **Logging**: structured `tracing` setup for binaries embedding the engine
//!
//! ## Example Usage
//!
//! ```rust
//! use stride_insights::config::EngineConfig;
//! use stride_insights::intelligence::{AnalysisFacade, RiskLevel};
//! use stride_insights::models::Workout;
//! use chrono::{Duration, Utc};
//!
//! let newest = Utc::now();
//! let history: Vec<Workout> = (0..6)
//!     .map(|i| {
//!         let mut workout = Workout::new(format!("run-{i}"), newest - Duration::days(2 * i));
//!         workout.distance_km = 8.0;
//!         workout.average_pace = 320.0;
//!         workout.average_heart_rate = 148.0;
//!         workout
//!     })
//!     .collect();
//!
//! let facade = AnalysisFacade::new(EngineConfig::default());
//! let report = facade.history_report(&history);
//! assert_eq!(report.overtraining.level, RiskLevel::Low);
//! ```

/// Workout and sample records consumed by the engine
pub mod models;

/// Engine configuration, loading and validation
pub mod config;

/// Named default thresholds and message texts
pub mod constants;

/// Workout analyzers and the analysis facade
pub mod intelligence;

/// Structured logging setup
pub mod logging;
