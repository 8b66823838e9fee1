//! Context-aware completion of Git configuration names.
//!
//! The key catalog ships as a bundled JSON resource and is parsed once
//! per process. Queries answer from three contexts: inside a `[...]`
//! header the known section names are offered, in key position the keys
//! of the enclosing section, and in value position nothing. Parameterized
//! sections like `credential.<url>` serve both as insertion templates
//! and as fallback key sources for any concrete subsection.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::config::syntax;
use crate::document::{Document, DocumentMetadata, Span, SyntaxContext};

const KEY_TABLE_JSON: &str = include_str!("../resources/config-keys.json");

const EMPTY_KEYS: &[String] = &[];

/// A single completion item offered to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    /// Display label.
    pub label: String,
    /// Kind annotation shown alongside the label.
    pub annotation: &'static str,
    /// Text inserted on acceptance. Section templates carry a `${1:...}`
    /// tab-stop placeholder.
    pub insert: String,
}

/// Outcome of a completion query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionResult {
    pub items: Vec<Completion>,
    /// When set, the host should suppress its generic word completions
    /// even though `items` may be empty.
    pub inhibit_word_completions: bool,
}

#[derive(Debug, Deserialize)]
struct Catalog {
    sections: Vec<Section>,
}

#[derive(Debug, Deserialize)]
struct Section {
    name: String,
    keys: Vec<String>,
}

fn catalog() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(|| serde_json::from_str(KEY_TABLE_JSON).expect("valid key table"))
}

fn catalog_index() -> &'static HashMap<&'static str, &'static Section> {
    static INDEX: OnceLock<HashMap<&'static str, &'static Section>> = OnceLock::new();
    INDEX.get_or_init(|| {
        catalog()
            .sections
            .iter()
            .map(|section| (section.name.as_str(), section))
            .collect()
    })
}

/// Completion provider for Git config documents.
pub struct GitConfigCompletions;

impl GitConfigCompletions {
    /// Whether the provider should engage for a document.
    pub fn is_applicable(metadata: &DocumentMetadata) -> bool {
        metadata.syntax.contains(syntax::GIT_CONFIG)
    }

    /// Completions for the active cursors.
    ///
    /// `None` means the provider has nothing to say and the host should
    /// proceed as usual: value position, or several simultaneous cursors
    /// whose sections could disagree.
    pub fn completions(doc: &dyn Document, locations: &[usize]) -> Option<CompletionResult> {
        let &[location] = locations else {
            return None;
        };
        match doc.context_at(location) {
            SyntaxContext::SectionHeader => Some(CompletionResult {
                items: section_completions().to_vec(),
                inhibit_word_completions: false,
            }),
            SyntaxContext::Value => None,
            SyntaxContext::Key => Some(key_completions(doc, location)),
        }
    }
}

/// Normalized name of the section enclosing `offset`: the nearest header
/// starting at or before it, brackets and quoting stripped, subsections
/// joined with a dot (`[branch "main"]` becomes `branch.main`). `None`
/// before the first header.
pub fn section_name_at(doc: &dyn Document, offset: usize) -> Option<String> {
    let mut found = None;
    for span in doc.section_header_spans() {
        if span.start > offset {
            break;
        }
        found = Some(span);
    }
    let raw = doc.slice(found?);
    let stripped = raw.trim_matches(|c| matches!(c, '[' | ']' | '\t' | ' ' | '"'));
    let name = stripped.replace(" \"", ".").replace(' ', "");
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Keys known for `section`, in catalog order.
///
/// An exact match wins; otherwise a dotted name falls back to the first
/// parameterized template sharing its prefix, so `branch.main` answers
/// with the `branch.<name>` keys. Unknown sections yield an empty slice.
pub fn keys_for(section: &str) -> &'static [String] {
    if let Some(found) = catalog_index().get(section) {
        if !found.keys.is_empty() {
            return &found.keys;
        }
    }
    if let Some(dot) = section.find('.') {
        let prefix = &section[..=dot];
        if let Some(template) = catalog()
            .sections
            .iter()
            .find(|candidate| candidate.name.starts_with(prefix))
        {
            return &template.keys;
        }
    }
    EMPTY_KEYS
}

/// The section-name completion list, rendered once per process.
///
/// Parameterized names split into `base "<param>"` labels whose insert
/// text carries a tab-stop placeholder; plain names insert as-is.
pub fn section_completions() -> &'static [Completion] {
    static SECTIONS: OnceLock<Vec<Completion>> = OnceLock::new();
    SECTIONS.get_or_init(|| {
        catalog()
            .sections
            .iter()
            .map(|section| match section.name.split_once('.') {
                Some((base, param)) => Completion {
                    label: format!("{base} \"{param}\""),
                    annotation: "section",
                    insert: format!("{base} \"${{1:{param}}}\""),
                },
                None => Completion {
                    label: section.name.clone(),
                    annotation: "section",
                    insert: section.name.clone(),
                },
            })
            .collect()
    })
}

fn key_completions(doc: &dyn Document, offset: usize) -> CompletionResult {
    let Some(section) = section_name_at(doc, offset) else {
        return CompletionResult {
            items: Vec::new(),
            inhibit_word_completions: true,
        };
    };

    // Skip the ` = ` suffix when the line already has its assignment.
    let line = doc.line_span(offset);
    let rest = Span::new(offset.clamp(line.start, line.end), line.end);
    let sep = if doc.slice(rest).contains('=') { "" } else { " = " };

    let items = keys_for(&section)
        .iter()
        .map(|key| Completion {
            label: key.clone(),
            annotation: "key",
            insert: format!("{key}{sep}"),
        })
        .collect();
    CompletionResult {
        items,
        inhibit_word_completions: true,
    }
}
