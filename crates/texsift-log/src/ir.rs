use serde::{Deserialize, Serialize};

/// Visual class of an output chunk.
///
/// The engine decides *what* a piece of output is; mapping a class to
/// concrete terminal attributes happens at the display edge, so the core
/// stays byte-for-byte deterministic and easy to assert against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleClass {
    /// Unmatched text passed through verbatim.
    Plain,
    /// Divider rule framing a diagnostic.
    Rule,
    /// The "file, page" line under the opening rule.
    Location,
    /// Warning body text.
    Warning,
    /// Error body text.
    Error,
    /// Overfull/underfull box report body.
    BoxReport,
}

/// One line of rendered output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub class: StyleClass,
    pub text: String,
}

impl Chunk {
    pub fn new(class: StyleClass, text: impl Into<String>) -> Self {
        Self {
            class,
            text: text.into(),
        }
    }
}

/// Recoverable parse anomalies.
///
/// None of these abort a run; they are surfaced through the
/// [`DiagnosticSink`] and processing continues on the next line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Anomaly {
    #[error("page marker carries an unparseable number `{token}`")]
    BadPageNumber { token: String },
    #[error("file close marker with no file open")]
    EmptyStackPop,
    #[error("combined pattern matched `{text}` but no group fired")]
    UnattributedMatch { text: String },
}

/// Receiver for parse anomalies.
///
/// The engine never logs directly; callers inject a sink at construction
/// so anomalies stay observable in tests without capturing process-wide
/// output.
pub trait DiagnosticSink {
    fn report(&mut self, anomaly: Anomaly);
}

/// Default sink: forwards anomalies to the `log` facade.
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, anomaly: Anomaly) {
        log::warn!("{anomaly}");
    }
}
