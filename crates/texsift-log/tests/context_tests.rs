use texsift_log::{Chunk, LogFilter, StyleClass};

fn classes(chunks: &[Chunk]) -> Vec<StyleClass> {
    chunks.iter().map(|c| c.class).collect()
}

#[test]
fn undefined_control_sequence_closes_on_line_marker() {
    let mut filter = LogFilter::new();
    let first = filter.feed_line("! Undefined control sequence.");
    assert!(filter.in_context());
    assert_eq!(
        classes(&first),
        vec![StyleClass::Rule, StyleClass::Location, StyleClass::Error]
    );

    let second = filter.feed_line("l.5 \\foo");
    assert!(!filter.in_context());
    assert_eq!(classes(&second), vec![StyleClass::Error, StyleClass::Rule]);
    assert_eq!(second[0].text, "l.5 \\foo");
    // The terminator is consumed into the diagnostic, never re-emitted
    // as unmatched text.
    assert!(second.iter().filter(|c| c.text == "l.5 \\foo").count() == 1);
}

#[test]
fn latex_error_body_is_echoed_until_line_marker() {
    let input = "\
! LaTeX Error: Environment foo undefined.

See the LaTeX manual or LaTeX Companion for explanation.
Type  H <return>  for immediate help.
 ...

l.5 \\begin{foo}
after";
    let chunks = LogFilter::new().filter(input);
    let bodies: Vec<&str> = chunks
        .iter()
        .filter(|c| c.class == StyleClass::Error)
        .map(|c| c.text.as_str())
        .collect();
    assert_eq!(bodies[0], "! LaTeX Error: Environment foo undefined.");
    assert!(bodies.contains(&"Type  H <return>  for immediate help."));
    assert_eq!(*bodies.last().unwrap(), "l.5 \\begin{foo}");
    // The line after the terminator is ordinary input again.
    assert_eq!(chunks.last().unwrap().class, StyleClass::Plain);
    assert_eq!(chunks.last().unwrap().text, "after");
}

#[test]
fn bare_error_line_marker_mention_needs_digits_to_close() {
    let mut filter = LogFilter::new();
    filter.feed_line("! Missing number, treated as zero.");
    // An `l.` line with no number is a mention, not the terminator.
    filter.feed_line("l.h.s. appears in the message");
    assert!(filter.in_context());
    // Any later `l.` line closes once a mention has been seen.
    filter.feed_line("l.c. another mention");
    assert!(!filter.in_context());
}

#[test]
fn font_warning_context_spans_prefixed_lines() {
    let mut filter = LogFilter::new();
    let opened = filter.feed_line("LaTeX Font Warning: Font shape `OT1/cmr/bx/sc' undefined");
    assert_eq!(
        classes(&opened),
        vec![StyleClass::Rule, StyleClass::Location, StyleClass::Warning]
    );
    for _ in 0..3 {
        let cont = filter.feed_line("(Font)              using `OT1/cmr/bx/n' instead");
        assert_eq!(classes(&cont), vec![StyleClass::Warning]);
        assert!(filter.in_context());
    }

    // The first line without the prefix closes the context and is then
    // treated as independent input, not swallowed.
    let closing = filter.feed_line("[4]");
    assert!(!filter.in_context());
    assert_eq!(classes(&closing), vec![StyleClass::Rule]);
    assert_eq!(filter.page(), 4);
}

#[test]
fn overfull_box_captures_one_line_of_lookahead() {
    let mut filter = LogFilter::new();
    let opened =
        filter.feed_line("Overfull \\hbox (15.3pt too wide) in paragraph at lines 12--13");
    assert!(filter.in_context());
    assert_eq!(opened.last().unwrap().class, StyleClass::BoxReport);

    let captured = filter.feed_line("\\OT1/cmr/m/n/10 stretched beyond the margin");
    assert!(!filter.in_context());
    assert_eq!(
        classes(&captured),
        vec![StyleClass::BoxReport, StyleClass::Rule]
    );

    // The very next line is back to normal matching.
    assert!(filter.feed_line("[7]").is_empty());
    assert_eq!(filter.page(), 7);
}

#[test]
fn underfull_box_while_output_active_has_no_lookahead() {
    let mut filter = LogFilter::new();
    let chunks =
        filter.feed_line("Underfull \\vbox (badness 10000) has occurred while \\output is active");
    assert!(!filter.in_context());
    assert_eq!(
        classes(&chunks),
        vec![
            StyleClass::Rule,
            StyleClass::Location,
            StyleClass::BoxReport,
            StyleClass::Rule
        ]
    );
}

#[test]
fn diagnostic_header_names_the_local_file() {
    let mut filter = LogFilter::new().with_probe(|_| true);
    filter.feed_line("(main.tex");
    filter.feed_line("(chapter2.tex");
    filter.feed_line("[41]");
    let chunks = filter.feed_line("LaTeX Warning: Reference `fig:x' on page 42 undefined.");
    assert_eq!(chunks[1].text, "chapter2.tex page 42");
}

#[test]
fn abandoned_context_is_dropped_at_end_of_stream() {
    let mut filter = LogFilter::new();
    filter.feed_line("! Interrupted.");
    assert!(filter.in_context());
    assert!(filter.finish().is_empty());
}

#[test]
fn markers_are_ignored_while_a_context_is_open() {
    let mut filter = LogFilter::new().with_probe(|_| true);
    filter.feed_line("! Undefined control sequence.");
    // A body line full of marker lookalikes is plain diagnostic text.
    let body = filter.feed_line("<recently read> (main.tex [3]");
    assert_eq!(classes(&body), vec![StyleClass::Error]);
    assert_eq!(filter.file_depth(), 0);
    assert_eq!(filter.page(), 0);
    filter.feed_line("l.9 \\x");
    assert!(!filter.in_context());
}

#[test]
fn identical_input_yields_identical_chunks() {
    let input = "\
(main.tex
[1]
LaTeX Warning: Citation `adams' on page 2 undefined.
Overfull \\hbox (3.0pt too wide) in paragraph at lines 8--9
[]\\OT1/cmr/m/n/10 some box material
[2] some stray text
)";
    let first = LogFilter::new().with_probe(|_| true).filter(input);
    let second = LogFilter::new().with_probe(|_| true).filter(input);
    assert_eq!(first, second);
    assert!(!first.is_empty());
}
