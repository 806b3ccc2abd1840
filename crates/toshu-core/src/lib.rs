//! Core library for toshu.
//!
//! Everything the `toshu` CLI and MCP server do lives here: plain-text
//! statistics, style heuristics, similarity scoring, and the small on-disk
//! state store backing the editor (document, references, sticky notes).
//!
//! # Modules
//!
//! - [`markup`] - Tag stripping and markdown-to-prose extraction
//! - [`text`] - Word counting and tokenization
//! - [`stats`] - Document statistics
//! - [`style`] - Style heuristics
//! - [`similarity`] - Jaccard, cosine and vocabulary-overlap scores
//! - [`store`] - Persistent editor state
//! - [`report`] - Timestamped report files
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use toshu_core::{check_style, compute_stats};
//!
//! let stats = compute_stats("<p>Hello there, world.</p>");
//! assert_eq!(stats.word_count, 3);
//! assert!(check_style("Too short.").is_empty());
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod markup;
pub mod report;
pub mod similarity;
pub mod stats;
pub mod store;
pub mod style;
pub mod text;

pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use error::{
    AnalysisError, AnalysisResult, ConfigError, ConfigResult, StoreError, StoreResult,
};
pub use report::save_report;
pub use similarity::{SimilarityScore, compare};
pub use stats::{DetailedStats, DocumentStats, compute_detailed_stats, compute_stats};
pub use store::{
    CustomTheme, CustomThemePatch, Reference, StorePaths, StateStore, ThemeName,
};
pub use style::{IssueCategory, Severity, StyleIssue, check_style};

/// Default maximum input size: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
