use texsift_log::{Anomaly, DiagnosticSink, LogFilter, StyleClass};

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<Anomaly>>>);

impl DiagnosticSink for Recorder {
    fn report(&mut self, anomaly: Anomaly) {
        self.0.borrow_mut().push(anomaly);
    }
}

#[test]
fn open_and_close_track_depth_and_local_file() {
    let mut filter = LogFilter::new().with_probe(|_| true);
    assert!(filter.feed_line("(chapter1.tex").is_empty());
    assert_eq!(filter.file_depth(), 1);
    assert_eq!(filter.local_file(), "chapter1.tex");

    assert!(filter.feed_line(")").is_empty());
    assert_eq!(filter.file_depth(), 0);
    assert_eq!(filter.local_file(), "");
}

#[test]
fn local_file_reverts_to_enclosing_local_file() {
    let mut filter = LogFilter::new().with_probe(|_| true);
    filter.feed_line("(main.tex");
    filter.feed_line("(/usr/share/texmf/article.cls");
    // Distribution files never become the local file.
    assert_eq!(filter.local_file(), "main.tex");
    filter.feed_line("(chapter1.tex");
    assert_eq!(filter.local_file(), "chapter1.tex");
    filter.feed_line(")");
    assert_eq!(filter.local_file(), "main.tex");
    assert_eq!(filter.file_depth(), 2);
}

#[test]
fn nonexistent_file_marker_stays_visible() {
    let mut filter = LogFilter::new().with_probe(|_| false);
    let chunks = filter.feed_line("(chapter1.tex");
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].class, StyleClass::Plain);
    assert_eq!(chunks[0].text, "(chapter1.tex");
    // The sentinel still balances the eventual close.
    assert_eq!(filter.file_depth(), 1);
    assert!(filter.feed_line(")").is_empty());
    assert_eq!(filter.file_depth(), 0);
}

#[test]
fn single_token_open_close_pushes_then_pops() {
    let mut filter = LogFilter::new().with_probe(|_| true);
    assert!(filter.feed_line("(fontenc.sty)").is_empty());
    assert_eq!(filter.file_depth(), 0);
    // A local single-token include still leaves its mark.
    assert_eq!(filter.local_file(), "");
}

#[test]
fn single_token_close_restores_previous_local_file() {
    let mut filter = LogFilter::new().with_probe(|_| true);
    filter.feed_line("(main.tex");
    filter.feed_line("(refs.bib)");
    assert_eq!(filter.file_depth(), 1);
    assert_eq!(filter.local_file(), "main.tex");
}

#[test]
fn nested_markers_on_one_line_interleave_strictly() {
    let mut filter = LogFilter::new().with_probe(|_| true);
    let chunks = filter.feed_line("(a.tex (b.sty) x)");
    // `(a.tex` push, `(b.sty)` push+pop, `x` passes through, `)` pop.
    assert_eq!(filter.file_depth(), 0);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].text, " x");
    assert_eq!(filter.local_file(), "");
}

#[test]
fn deep_same_line_nesting_balances() {
    let mut filter = LogFilter::new().with_probe(|_| true);
    assert!(filter.feed_line("(a.tex (b.tex (c.sty)))").is_empty());
    assert_eq!(filter.file_depth(), 0);
}

#[test]
fn surplus_close_on_nested_line_is_reported() {
    let recorder = Recorder::default();
    let mut filter = LogFilter::new()
        .with_probe(|_| true)
        .with_diagnostics(recorder.clone());
    filter.feed_line("(a.sty))");
    assert_eq!(filter.file_depth(), 0);
    assert_eq!(recorder.0.borrow().as_slice(), &[Anomaly::EmptyStackPop]);
}

#[test]
fn default_probe_checks_the_real_filesystem() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("part.tex");
    std::fs::write(&path, "\\section{x}").unwrap();

    let mut filter = LogFilter::new();
    let marker = format!("({}", path.display());
    assert!(filter.feed_line(&marker).is_empty());
    assert_eq!(filter.file_depth(), 1);

    let mut filter = LogFilter::new();
    let missing = format!("({}", dir.path().join("absent.tex").display());
    assert_eq!(filter.feed_line(&missing).len(), 1);
}
