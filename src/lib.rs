//! Reconstruct per-judgment hit statistics of an osu! score from summary
//! values and feed them into a difficulty and performance engine.
//!
//! Most score sources only expose an accuracy percentage, a miss count and a
//! max combo. Performance calculation however wants a full judgment
//! breakdown. This library inverts the accuracy into a plausible breakdown
//! for each of the four modes, or uses an explicit breakdown verbatim when
//! one is available, and hands the result to a [`ScoringEngine`].
//!
//! ## Usage
//!
//! ```no_run
//! use rosu_hitstats::{engine::rosu::RosuEngine, Calculator, ChartSource, RawMod, ScoreRequest};
//!
//! let calculator = Calculator::new(RosuEngine::new());
//!
//! let request = ScoreRequest::new(ChartSource::path("./resources/sample.osu"), 0)
//!     .mods(vec![RawMod::from("HD"), RawMod::from("dt")])
//!     .accuracy(97.5)
//!     .misses(2)
//!     .combo(120);
//!
//! match calculator.calculate(&request) {
//!     Ok(attrs) => println!("{:.2}* {:.2}pp {:?}", attrs.stars, attrs.pp, attrs.judgments),
//!     Err(err) => println!("{} ({:?})", err, err.kind()),
//! }
//! ```
//!
//! Explicit statistics take precedence over the accuracy:
//!
//! ```no_run
//! # use rosu_hitstats::{engine::rosu::RosuEngine, Calculator, ChartSource, ScoreRequest};
//! use rosu_hitstats::PartialStatistics;
//!
//! let statistics: PartialStatistics =
//!     serde_json::from_str(r#"{ "great": 299, "ok": 26, "meh": 1, "miss": 1 }"#).unwrap();
//!
//! let request = ScoreRequest::new(ChartSource::path("./resources/sample.osu"), 0)
//!     .accuracy(94.13)
//!     .combo(295)
//!     .statistics(statistics);
//!
//! let outcome = Calculator::new(RosuEngine::new()).calculate_outcome(&request);
//! println!("{}", serde_json::to_string(&outcome).unwrap());
//! ```
//!
//! ## Features
//!
//! | Flag | Description |
//! | - | - |
//! | `default` | No features enabled |
//! | `tracing` | Forward parsing diagnostics of the underlying engine to `tracing` |
//! | `capi` | Expose a C API around [`Calculator::calculate`] |
//!
//! [`ScoringEngine`]: engine::ScoringEngine

#![deny(rustdoc::broken_intra_doc_links, missing_debug_implementations)]
#![warn(clippy::missing_const_for_fn, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap,
    clippy::must_use_candidate,
    clippy::missing_errors_doc
)]

#[doc(inline)]
pub use self::{
    any::{
        CalculationOutcome, Calculator, HitResultSource, Reconstructor, ScoreAttributes,
        ScoreContext, ScoreRequest, ScoreWarning,
    },
    engine::{ChartMetadata, ChartSource},
    error::{CalculateError, ErrorKind},
    model::{
        census::ObjectCensus,
        judgment::{Judgment, JudgmentCounts},
        mode::GameMode,
        mods::{ModCatalogue, ModSelection, ModWarning, RawMod},
        statistics::PartialStatistics,
    },
};

/// Types shared by all modes, most notably the [`Calculator`].
pub mod any;

/// Boundary to the chart decoder and the difficulty and performance engine.
pub mod engine;

/// Hit statistics reconstruction for osu!standard.
pub mod osu;

/// Hit statistics reconstruction for osu!taiko.
pub mod taiko;

/// Hit statistics reconstruction for osu!catch.
pub mod catch;

/// Hit statistics reconstruction for osu!mania.
pub mod mania;

/// Judgments, object census, statistics and mods.
pub mod model;

mod error;
mod util;

#[cfg(feature = "capi")]
pub mod capi;
