use regex::Captures;

use crate::ir::{Anomaly, Chunk, DiagnosticSink, LogSink, StyleClass};
use crate::registry::{PatternKind, Registry};

/// Divider framing every diagnostic.
const RULE: &str = "----------------------------------------------------------------";

/// Prefix carried by continuation lines of a font warning.
const FONT_CONTINUATION: &str = "(Font)";

/// Multi-line diagnostic state. At most one context is open at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    Idle,
    Open { pattern: PatternKind, aux: bool },
}

/// What the continuation handler did with the current line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineDisposition {
    /// The line belongs to the diagnostic (printed or swallowed there);
    /// normal pattern matching is skipped.
    Consumed,
    /// The context closed without consuming the line; it is fresh input.
    Rescan,
}

/// A streaming filter for TeX engine terminal output.
///
/// `LogFilter` consumes the engine's transcript one line at a time,
/// consumes structural markers (pages, file opens/closes), extracts
/// warnings, errors and box reports into framed diagnostics, and passes
/// everything unrecognized through verbatim. It maintains a stack of open
/// files to attribute diagnostics to the document file being processed.
pub struct LogFilter {
    registry: Registry,
    file_stack: Vec<Option<String>>,
    local_file: String,
    page: u32,
    state: Context,
    line: String,
    probe: Box<dyn Fn(&str) -> bool>,
    diagnostics: Box<dyn DiagnosticSink>,
}

impl Default for LogFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl LogFilter {
    /// Creates a filter with the standard pattern set, the host
    /// filesystem as the file probe, and anomalies routed to the `log`
    /// facade.
    pub fn new() -> Self {
        Self {
            registry: Registry::standard(),
            file_stack: Vec::new(),
            local_file: String::new(),
            page: 0,
            state: Context::Idle,
            line: String::new(),
            probe: Box::new(|name| std::path::Path::new(name).exists()),
            diagnostics: Box::new(LogSink),
        }
    }

    /// Replaces the existence probe used by file-open markers. Paths are
    /// handed over verbatim, relative to the working directory.
    pub fn with_probe(mut self, probe: impl Fn(&str) -> bool + 'static) -> Self {
        self.probe = Box::new(probe);
        self
    }

    /// Replaces the anomaly sink.
    pub fn with_diagnostics(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.diagnostics = Box::new(sink);
        self
    }

    /// Last page number seen in a page marker.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Current depth of the file-inclusion stack.
    pub fn file_depth(&self) -> usize {
        self.file_stack.len()
    }

    /// Most recently opened file matching the local naming convention.
    /// Empty until one has been seen.
    pub fn local_file(&self) -> &str {
        &self.local_file
    }

    /// Whether a multi-line diagnostic is currently open.
    pub fn in_context(&self) -> bool {
        self.state != Context::Idle
    }

    /// Processes one line of engine output and returns the rendered
    /// chunks it produced. Trailing whitespace is trimmed on ingest.
    pub fn feed_line(&mut self, raw: &str) -> Vec<Chunk> {
        let mut out = Vec::new();
        self.line = raw.trim_end().to_string();

        if let Context::Open { pattern, aux } = self.state {
            if self.continue_context(pattern, aux, &mut out) == LineDisposition::Consumed {
                return out;
            }
        }
        self.scan_line(&mut out);
        out
    }

    /// Ends the stream. An unterminated diagnostic is dropped.
    pub fn finish(self) -> Vec<Chunk> {
        Vec::new()
    }

    /// Convenience: feeds every line of `input` and finishes.
    pub fn filter(mut self, input: &str) -> Vec<Chunk> {
        let mut out = Vec::new();
        for line in input.lines() {
            out.extend(self.feed_line(line));
        }
        out.extend(self.finish());
        out
    }

    /// Offers the current line to the open diagnostic before any pattern
    /// matching happens.
    fn continue_context(
        &mut self,
        pattern: PatternKind,
        aux: bool,
        out: &mut Vec<Chunk>,
    ) -> LineDisposition {
        match pattern {
            PatternKind::LatexFontWarning => {
                if self.line.starts_with(FONT_CONTINUATION) {
                    out.push(Chunk::new(StyleClass::Warning, self.line.clone()));
                    LineDisposition::Consumed
                } else {
                    self.close_context(out);
                    LineDisposition::Rescan
                }
            }
            PatternKind::LatexError | PatternKind::LatexError2 => {
                out.push(Chunk::new(StyleClass::Error, self.line.clone()));
                if self.line.starts_with("l.") {
                    // A terminator carries a line number. Bare `!` errors
                    // can mention `l.` without one; such a line arms the
                    // flag and the next `l.` line closes.
                    let numbered = self.line[2..].starts_with(|c: char| c.is_ascii_digit());
                    if pattern == PatternKind::LatexError || numbered || aux {
                        self.close_context(out);
                    } else {
                        self.state = Context::Open { pattern, aux: true };
                    }
                }
                LineDisposition::Consumed
            }
            PatternKind::FullBox => {
                // One line of lookahead: the offending typeset material.
                out.push(Chunk::new(StyleClass::BoxReport, self.line.clone()));
                self.close_context(out);
                LineDisposition::Consumed
            }
            // Only the patterns above ever open a context.
            _ => {
                self.state = Context::Idle;
                LineDisposition::Rescan
            }
        }
    }

    /// Runs the combined pattern over the current line, dispatching each
    /// match and passing unmatched segments through.
    fn scan_line(&mut self, out: &mut Vec<Chunk>) {
        let line = self.line.clone();
        let Some(re) = self.registry.combined().cloned() else {
            self.emit_unmatched(&line, out);
            return;
        };

        let mut last_end = 0;
        for caps in re.captures_iter(&line) {
            let Some(whole) = caps.get(0) else { continue };
            if self.state == Context::Idle {
                self.emit_unmatched(&line[last_end..whole.start()], out);
            }
            let handled = match self.registry.resolve(&caps) {
                Some(kind) => self.dispatch(kind, &caps, out),
                None => {
                    self.diagnostics.report(Anomaly::UnattributedMatch {
                        text: whole.as_str().to_string(),
                    });
                    false
                }
            };
            if !handled && self.state == Context::Idle {
                self.emit_unmatched(whole.as_str(), out);
            }
            last_end = whole.end();
        }
        if self.state == Context::Idle {
            self.emit_unmatched(&line[last_end..], out);
        }
    }

    fn dispatch(&mut self, kind: PatternKind, caps: &Captures, out: &mut Vec<Chunk>) -> bool {
        match kind {
            PatternKind::Page => self.on_page(caps),
            PatternKind::FileNew => self.on_file_new(caps),
            PatternKind::FileClose => {
                self.pop_file();
                true
            }
            PatternKind::LatexWarning => self.on_warning(caps, out),
            PatternKind::LatexFontWarning => self.on_font_warning(caps, out),
            PatternKind::LatexError | PatternKind::LatexError2 => self.on_error(kind, caps, out),
            PatternKind::FullBox => self.on_full_box(caps, out),
            PatternKind::Chapter => true,
        }
    }

    fn on_page(&mut self, caps: &Captures) -> bool {
        let token = caps.name("page_num").map(|m| m.as_str()).unwrap_or("");
        match token.parse::<u32>() {
            Ok(number) => self.page = number,
            Err(_) => self.diagnostics.report(Anomaly::BadPageNumber {
                token: token.to_string(),
            }),
        }
        true
    }

    fn on_file_new(&mut self, caps: &Captures) -> bool {
        let Some(name) = caps.name("file_name") else {
            return false;
        };
        let name = name.as_str();
        let closes = caps
            .get(0)
            .is_some_and(|whole| whole.as_str().ends_with(')'));

        let handled = if (self.probe)(name) {
            self.push_file(Some(name.to_string()));
            true
        } else {
            // Likely an engine-internal token, not a real file. Push the
            // sentinel so the matching close still balances, but let the
            // raw marker stay visible.
            self.push_file(None);
            false
        };
        if closes {
            self.pop_file();
        }
        handled
    }

    fn on_warning(&mut self, caps: &Captures, out: &mut Vec<Chunk>) -> bool {
        self.emit_header(out);
        out.push(Chunk::new(StyleClass::Warning, &caps[0]));
        self.emit_footer(out);
        true
    }

    fn on_font_warning(&mut self, caps: &Captures, out: &mut Vec<Chunk>) -> bool {
        self.emit_header(out);
        out.push(Chunk::new(StyleClass::Warning, &caps[0]));
        self.state = Context::Open {
            pattern: PatternKind::LatexFontWarning,
            aux: false,
        };
        true
    }

    fn on_error(&mut self, kind: PatternKind, caps: &Captures, out: &mut Vec<Chunk>) -> bool {
        self.emit_header(out);
        out.push(Chunk::new(StyleClass::Error, &caps[0]));
        self.state = Context::Open {
            pattern: kind,
            aux: false,
        };
        true
    }

    fn on_full_box(&mut self, caps: &Captures, out: &mut Vec<Chunk>) -> bool {
        self.emit_header(out);
        out.push(Chunk::new(StyleClass::BoxReport, &caps[0]));
        if caps.name("box_lines").is_some() {
            self.state = Context::Open {
                pattern: PatternKind::FullBox,
                aux: false,
            };
        } else {
            // `\output is active`: nothing useful follows.
            self.emit_footer(out);
        }
        true
    }

    fn push_file(&mut self, entry: Option<String>) {
        if let Some(name) = entry.as_deref() {
            if is_local(name) {
                self.local_file = name.to_string();
            }
        }
        self.file_stack.push(entry);
    }

    fn pop_file(&mut self) {
        match self.file_stack.pop() {
            Some(entry) => {
                if entry.as_deref().is_some_and(is_local) {
                    self.local_file = self
                        .file_stack
                        .iter()
                        .rev()
                        .filter_map(|e| e.as_deref())
                        .find(|name| is_local(name))
                        .unwrap_or("")
                        .to_string();
                }
            }
            None => self.diagnostics.report(Anomaly::EmptyStackPop),
        }
    }

    fn emit_header(&self, out: &mut Vec<Chunk>) {
        out.push(Chunk::new(StyleClass::Rule, RULE));
        let location = if self.local_file.is_empty() {
            format!("page {}", self.page + 1)
        } else {
            format!("{} page {}", self.local_file, self.page + 1)
        };
        out.push(Chunk::new(StyleClass::Location, location));
    }

    fn emit_footer(&self, out: &mut Vec<Chunk>) {
        out.push(Chunk::new(StyleClass::Rule, RULE));
    }

    fn close_context(&mut self, out: &mut Vec<Chunk>) {
        self.emit_footer(out);
        self.state = Context::Idle;
    }

    fn emit_unmatched(&self, segment: &str, out: &mut Vec<Chunk>) {
        if !segment.trim().is_empty() {
            out.push(Chunk::new(StyleClass::Plain, segment));
        }
    }
}

/// Files named by a relative path belong to the document being built;
/// absolute paths come out of the TeX distribution.
fn is_local(name: &str) -> bool {
    !name.starts_with('/')
}
