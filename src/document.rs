//! Document model for the editor boundary.
//!
//! The [`Document`] trait is the surface quill expects from a host editor:
//! text access, line/word boundary queries, structural queries over a
//! config document, and text replacement. Offsets are byte offsets into
//! UTF-8 text; selections and query results are [`Span`]s.
//!
//! The structural and boundary queries have provided implementations that
//! scan the plain text, so a minimal host only supplies `text` and
//! `replace`. Hosts with a real syntax engine should override
//! `section_header_spans` and `context_at` with its results.
//! [`TextDocument`] is the bundled in-memory implementation used by the
//! CLI host and the test suite.

/// Half-open byte range `[start, end)` into a document's text.
///
/// An empty span is a cursor. Constructors normalize reversed endpoints,
/// so hosts may pass selections in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Create a span, swapping the endpoints if they arrive reversed.
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// An empty span marking a cursor position.
    pub fn cursor(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Syntactic role of an offset within a config document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxContext {
    /// Inside a `[section "subsection"]` header.
    SectionHeader,
    /// After the `=` of a key/value entry.
    Value,
    /// Anywhere else an entry key could be typed.
    Key,
}

/// Host-provided facts about a document that are not part of its text.
#[derive(Debug, Clone, Default)]
pub struct DocumentMetadata {
    /// Identifier of the syntax assigned to the document, in whatever
    /// scheme the host uses. Applicability checks match on substrings.
    pub syntax: String,
}

/// The editor-provided text surface.
pub trait Document {
    /// The full document text.
    fn text(&self) -> &str;

    /// Replace `span` with `replacement`, shifting subsequent text.
    /// Out-of-range spans are clamped; nothing panics.
    fn replace(&mut self, span: Span, replacement: &str);

    fn len(&self) -> usize {
        self.text().len()
    }

    /// The text covered by `span`, clamped to the document.
    fn slice(&self, span: Span) -> &str {
        let text = self.text();
        let start = clamp_boundary(text, span.start);
        let end = clamp_boundary(text, span.end.max(span.start));
        &text[start..end.max(start)]
    }

    /// The span of the line containing `offset`, excluding its terminator
    /// (`\n` or `\r\n`).
    fn line_span(&self, offset: usize) -> Span {
        line_span(self.text(), offset)
    }

    /// The span of the word containing `offset`: an alphanumeric or
    /// underscore run, or a punctuation run when `offset` sits on neither
    /// word nor whitespace. Whitespace and line ends yield an empty span
    /// at `offset`. Never crosses a line boundary.
    fn word_span(&self, offset: usize) -> Span {
        word_span(self.text(), offset)
    }

    /// Spans of all section headers (`[` through the matching `]`, or the
    /// end of line when unterminated), in document order.
    fn section_header_spans(&self) -> Vec<Span> {
        scan_section_headers(self.text())
    }

    /// The syntactic role of `offset`.
    fn context_at(&self, offset: usize) -> SyntaxContext {
        let offset = clamp_boundary(self.text(), offset);
        for span in self.section_header_spans() {
            if span.start > offset {
                break;
            }
            let terminated = self.slice(span).ends_with(']');
            let inside = if terminated {
                offset < span.end
            } else {
                offset <= span.end
            };
            if span.start <= offset && inside {
                return SyntaxContext::SectionHeader;
            }
        }
        let line = self.line_span(offset);
        let before_cursor = Span::new(line.start, offset.clamp(line.start, line.end));
        if self.slice(before_cursor).contains('=') {
            SyntaxContext::Value
        } else {
            SyntaxContext::Key
        }
    }
}

/// In-memory document backed by a flat string.
///
/// Text is kept byte-exact, so CRLF terminators survive a round trip
/// through [`Document::replace`] untouched.
#[derive(Debug, Clone, Default)]
pub struct TextDocument {
    text: String,
    metadata: DocumentMetadata,
}

impl TextDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: DocumentMetadata::default(),
        }
    }

    /// A document carrying a syntax identifier, for applicability checks.
    pub fn with_syntax(text: impl Into<String>, syntax: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: DocumentMetadata {
                syntax: syntax.into(),
            },
        }
    }

    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    /// Consume the document, returning its text.
    pub fn into_text(self) -> String {
        self.text
    }
}

impl Document for TextDocument {
    fn text(&self) -> &str {
        &self.text
    }

    fn replace(&mut self, span: Span, replacement: &str) {
        let start = clamp_boundary(&self.text, span.start);
        let end = clamp_boundary(&self.text, span.end.max(span.start)).max(start);
        self.text.replace_range(start..end, replacement);
    }
}

/// Clamp `offset` to the document length and back down to a character
/// boundary, so queries never panic on host-supplied positions.
fn clamp_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while offset > 0 && !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

fn line_span(text: &str, offset: usize) -> Span {
    let offset = clamp_boundary(text, offset);
    let start = match text[..offset].rfind('\n') {
        Some(i) => i + 1,
        None => 0,
    };
    let mut end = match text[offset..].find('\n') {
        Some(i) => offset + i,
        None => text.len(),
    };
    if end > start && text.as_bytes()[end - 1] == b'\r' {
        end -= 1;
    }
    Span::new(start, end)
}

fn word_span(text: &str, offset: usize) -> Span {
    let offset = clamp_boundary(text, offset);
    let line = line_span(text, offset);
    if offset < line.start || offset >= line.end {
        return Span::cursor(offset);
    }

    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let Some(at) = text[offset..line.end].chars().next() else {
        return Span::cursor(offset);
    };
    if at.is_whitespace() {
        return Span::cursor(offset);
    }
    let same_class = |c: char| !c.is_whitespace() && is_word(c) == is_word(at);

    let mut start = offset;
    for (i, c) in text[line.start..offset].char_indices().rev() {
        if same_class(c) {
            start = line.start + i;
        } else {
            break;
        }
    }
    let mut end = offset;
    for (i, c) in text[offset..line.end].char_indices() {
        if same_class(c) {
            end = offset + i + c.len_utf8();
        } else {
            break;
        }
    }
    Span::new(start, end)
}

fn scan_section_headers(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut line_start = 0;
    let bytes = text.as_bytes();
    for line_end in text
        .bytes()
        .enumerate()
        .filter_map(|(i, b)| (b == b'\n').then_some(i))
        .chain(std::iter::once(text.len()))
    {
        let mut i = line_start;
        while i < line_end && (bytes[i] == b' ' || bytes[i] == b'\t') {
            i += 1;
        }
        if i < line_end && bytes[i] == b'[' {
            let content_end = if line_end > line_start && bytes[line_end - 1] == b'\r' {
                line_end - 1
            } else {
                line_end
            };
            let end = text[i..content_end]
                .find(']')
                .map(|j| i + j + 1)
                .unwrap_or(content_end);
            spans.push(Span::new(i, end));
        }
        line_start = line_end + 1;
    }
    spans
}
