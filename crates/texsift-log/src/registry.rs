use regex::{Captures, Regex};

/// The closed set of recognized patterns.
///
/// Registration order in [`Registry::standard`] defines match precedence
/// when more than one group could fire on the same region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Page,
    FileNew,
    FileClose,
    LatexWarning,
    LatexFontWarning,
    LatexError,
    LatexError2,
    FullBox,
    Chapter,
}

#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("pattern fragment for `{name}` does not compile: {source}")]
    BadFragment { name: String, source: regex::Error },
}

struct Entry {
    kind: PatternKind,
    name: String,
    fragment: String,
}

/// Ordered pattern table compiled into one alternation regex.
///
/// Each fragment lives in its own named capture group; the groups are
/// joined under one outer group so a single scan of the line yields every
/// match, and the firing sub-pattern is resolved by checking group names
/// in insertion order.
pub struct Registry {
    entries: Vec<Entry>,
    combined: Option<Regex>,
}

/// The built-in pattern set, in precedence order. Case-sensitive.
const STANDARD_PATTERNS: &[(PatternKind, &str, &str)] = &[
    (PatternKind::Page, "page", r"\[(?P<page_num>\d+)[^\]]*\]"),
    (PatternKind::FileNew, "file_new", r"\((?P<file_name>[^\s)]+)\)?"),
    (PatternKind::FileClose, "file_close", r"\)"),
    (PatternKind::LatexWarning, "latex_warning", r"^LaTeX Warning: .*"),
    (
        PatternKind::LatexFontWarning,
        "latex_font_warning",
        r"^LaTeX Font Warning: .*",
    ),
    (PatternKind::LatexError, "latex_error", r"^! LaTeX Error: .*"),
    (PatternKind::LatexError2, "latex_error2", r"^! .*"),
    (
        PatternKind::FullBox,
        "full_box",
        r"^(?:Over|Under)full \\[hv]box .*?(?:at (?P<box_lines>lines \d+--\d+)|\\output is (?P<box_active>active))",
    ),
    (PatternKind::Chapter, "chapter", r"^Chapter \d+\.$"),
];

impl Registry {
    fn empty() -> Self {
        Self {
            entries: Vec::new(),
            combined: None,
        }
    }

    /// Builds the fixed pattern set used by the filter.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        for (kind, name, fragment) in STANDARD_PATTERNS {
            registry
                .register(*kind, name, fragment)
                .expect("built-in pattern set compiles");
        }
        registry
    }

    /// Appends a pattern and recompiles the combined regex.
    ///
    /// The fragment is wrapped in a named capture group if it is not
    /// already wrapped; insertion order is match-precedence order. On a
    /// fragment that does not compile the registry is left unchanged.
    pub fn register(
        &mut self,
        kind: PatternKind,
        name: &str,
        fragment: &str,
    ) -> Result<(), PatternError> {
        let wrapped = if fragment.starts_with(&format!("(?P<{name}>")) {
            fragment.to_string()
        } else {
            format!("(?P<{name}>{fragment})")
        };
        self.entries.push(Entry {
            kind,
            name: name.to_string(),
            fragment: wrapped,
        });
        match self.recompile() {
            Ok(()) => Ok(()),
            Err(err) => {
                self.entries.pop();
                Err(err)
            }
        }
    }

    fn recompile(&mut self) -> Result<(), PatternError> {
        let alternation = self
            .entries
            .iter()
            .map(|e| e.fragment.as_str())
            .collect::<Vec<_>>()
            .join("|");
        match Regex::new(&format!("(?P<token>{alternation})")) {
            Ok(combined) => {
                self.combined = Some(combined);
                Ok(())
            }
            Err(source) => Err(PatternError::BadFragment {
                name: self
                    .entries
                    .last()
                    .map(|e| e.name.clone())
                    .unwrap_or_default(),
                source,
            }),
        }
    }

    /// The compiled alternation, or `None` before any registration.
    pub fn combined(&self) -> Option<&Regex> {
        self.combined.as_ref()
    }

    /// Resolves which pattern fired for a set of captures: first entry, in
    /// registration order, whose named group is populated.
    pub fn resolve(&self, caps: &Captures) -> Option<PatternKind> {
        self.entries
            .iter()
            .find(|e| caps.name(&e.name).is_some())
            .map(|e| e.kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
