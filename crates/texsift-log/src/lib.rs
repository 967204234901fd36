//! # Texsift Log Filter
//!
//! Streaming filter for TeX engine terminal output with condensed,
//! classified chunks as the result.
//!
//! ## Overview
//!
//! TeX engines interleave structural markers and diagnostics with a large
//! amount of noise. This crate consumes that stream one line at a time and
//! turns it into a short sequence of [`Chunk`](ir::Chunk)s:
//!
//! - **Page markers** (`[12]`) update a page counter and disappear.
//! - **File markers** (`(./chapter1.tex` ... `)`) maintain a stack of open
//!   files so diagnostics can name the document file they belong to.
//! - **Warnings, errors and box reports** are reframed as highlighted
//!   diagnostics, including the multi-line forms that span several
//!   physical lines.
//! - Everything unrecognized passes through verbatim.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   feed_line()   ┌─────────────┐
//! │ engine output│ ───────────────▸│  LogFilter  │──▸ Vec<Chunk>
//! │  (one line)  │                 │             │
//! └──────────────┘                 └─────────────┘
//!                                        │
//!            Registry ── combined regex ─┤
//!            file stack / page counter ──┤
//!            open diagnostic context ────┘
//! ```
//!
//! The combined pattern is one alternation built by the
//! [`Registry`](registry::Registry); registration order decides which
//! pattern wins when several could fire on the same region. A multi-line
//! diagnostic keeps a context open on the engine: each following line is
//! offered to that diagnostic first and only re-enters normal matching if
//! the diagnostic declines it.
//!
//! ## Examples
//!
//! Markers are consumed silently; with every file reported present, a
//! clean transcript produces no output at all:
//!
//! ```
//! use texsift_log::LogFilter;
//!
//! let filter = LogFilter::new().with_probe(|_| true);
//! let chunks = filter.filter("(ch1.tex\n[1]\n[2] [3]\n)\n");
//! assert!(chunks.is_empty());
//! ```
//!
//! Diagnostics come back framed and classified:
//!
//! ```
//! use texsift_log::{LogFilter, StyleClass};
//!
//! let mut filter = LogFilter::new();
//! let chunks = filter.feed_line("LaTeX Warning: Citation `knuth' undefined.");
//! assert_eq!(chunks.len(), 4); // rule, location, body, rule
//! assert_eq!(chunks[2].class, StyleClass::Warning);
//! ```
//!
//! Anomalies (an empty-stack pop, an unparseable page number) never abort
//! the run; they flow through the [`DiagnosticSink`](ir::DiagnosticSink)
//! given at construction and the stream continues.

/// Output chunk model and diagnostics channel.
pub mod ir;
/// Ordered pattern table and combined-regex construction.
pub mod registry;

mod engine;


pub use engine::LogFilter;
pub use ir::{Anomaly, Chunk, DiagnosticSink, LogSink, StyleClass};
pub use registry::{PatternError, PatternKind, Registry};
