//! Template block extraction and markup parsing.

use crate::element::Element;
use crate::error::{ParseError, ParseResult};
use crate::span::Span;
use indexmap::IndexMap;
use smol_str::SmolStr;

/// The inner content of a `<template>` block and where it starts in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateBlock<'a> {
    /// Content between the open and close tags, with surrounding whitespace
    /// trimmed.
    pub content: &'a str,
    /// Byte offset of `content` in the original source.
    pub offset: u32,
}

/// A parsed template together with the problems the parser recovered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTemplate {
    pub root: Element,
    pub warnings: Vec<ParseError>,
}

/// Locate the outermost `<template>` block of a single-file component.
///
/// Nested `<template>` elements (slots, conditional groups) are balanced so
/// the returned content ends at the matching close tag.
pub fn extract_template(source: &str) -> ParseResult<TemplateBlock<'_>> {
    let lower = source.to_ascii_lowercase();
    let open = find_open_template(&lower, 0).ok_or_else(ParseError::missing_template)?;
    let content_start = match lower[open..].find('>') {
        Some(gt) => open + gt + 1,
        None => {
            return Err(ParseError::new(
                "<template> open tag is never finished",
                Span::new(open as u32, source.len() as u32),
                crate::error::ErrorCode::MissingTemplate,
            ))
        }
    };

    let mut depth = 1usize;
    let mut cursor = content_start;
    loop {
        let next_open = find_open_template(&lower, cursor);
        let next_close = lower[cursor..].find("</template").map(|i| cursor + i);
        match (next_open, next_close) {
            (Some(o), Some(c)) if o < c => {
                depth += 1;
                cursor = o + "<template".len();
            }
            (_, Some(c)) => {
                depth -= 1;
                if depth == 0 {
                    let raw = &source[content_start..c];
                    let leading = raw.len() - raw.trim_start().len();
                    return Ok(TemplateBlock {
                        content: raw.trim(),
                        offset: (content_start + leading) as u32,
                    });
                }
                cursor = c + "</template".len();
            }
            (_, None) => {
                return Err(ParseError::new(
                    "<template> block is never closed",
                    Span::new(open as u32, source.len() as u32),
                    crate::error::ErrorCode::MissingTemplate,
                ))
            }
        }
    }
}

fn find_open_template(lower: &str, from: usize) -> Option<usize> {
    let mut from = from;
    while let Some(i) = lower[from..].find("<template") {
        let at = from + i;
        let after = lower[at + "<template".len()..].chars().next();
        if matches!(after, Some(c) if c.is_whitespace() || c == '>' || c == '/') {
            return Some(at);
        }
        from = at + 1;
    }
    None
}

/// Parse template content into its root element.
pub fn parse_template(content: &str) -> ParseResult<Element> {
    let parsed = parse_template_with_warnings(content, 0)?;
    for warning in &parsed.warnings {
        tracing::debug!(code = %warning.code, span = ?warning.span, "{}", warning.message);
    }
    Ok(parsed.root)
}

/// Parse template content, keeping recovered problems.
///
/// `offset` is added to every span so positions refer to the enclosing file.
pub fn parse_template_with_warnings(content: &str, offset: u32) -> ParseResult<ParsedTemplate> {
    let mut parser = TemplateParser::new(content, offset);
    let (nodes, _) = parser.parse_children(None);
    let root = nodes
        .into_iter()
        .find(|n| !n.is_text())
        .ok_or_else(|| ParseError::no_root_element(Span::new(offset, offset + content.len() as u32)))?;
    Ok(ParsedTemplate {
        root,
        warnings: parser.warnings,
    })
}

/// Extract the `<template>` block of a component file and parse it.
pub fn parse_document(source: &str) -> ParseResult<ParsedTemplate> {
    let block = extract_template(source)?;
    parse_template_with_warnings(block.content, block.offset)
}

struct TemplateParser<'a> {
    source: &'a str,
    pos: usize,
    offset: u32,
    open: Vec<SmolStr>,
    warnings: Vec<ParseError>,
}

impl<'a> TemplateParser<'a> {
    fn new(source: &'a str, offset: u32) -> Self {
        Self {
            source,
            pos: 0,
            offset,
            open: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn remaining(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn starts_with(&self, s: &str) -> bool {
        self.remaining().starts_with(s)
    }

    fn consume(&mut self, s: &str) -> bool {
        if self.starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        self.read_while(char::is_whitespace);
    }

    fn read_while<F: Fn(char) -> bool>(&mut self, pred: F) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.advance();
        }
        &self.source[start..self.pos]
    }

    /// Read up to and including `end`, or to EOF.
    fn read_through(&mut self, end: &str) -> &'a str {
        let start = self.pos;
        match self.remaining().find(end) {
            Some(i) => self.pos += i + end.len(),
            None => self.pos = self.source.len(),
        }
        &self.source[start..self.pos]
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(start as u32, self.pos as u32).shift(self.offset)
    }

    /// Parse nodes until the close tag of `parent` or EOF.
    ///
    /// Returns the children and whether the parent's close tag was found.
    fn parse_children(&mut self, parent: Option<&str>) -> (Vec<Element>, bool) {
        let mut children = Vec::new();
        let mut text = TextRun::default();

        while !self.is_eof() {
            if self.starts_with("</") {
                let close_start = self.pos;
                let name = self.closing_tag_name();
                if parent == Some(name.as_str()) {
                    text.flush(self, &mut children);
                    self.read_through(">");
                    return (children, true);
                }
                if self.open.iter().any(|open| *open == name) {
                    // Closes an ancestor; the current element ends implicitly.
                    break;
                }
                self.read_through(">");
                self.warnings
                    .push(ParseError::unexpected_close(&name, self.span_from(close_start)));
                continue;
            }

            if self.starts_with("<!--") {
                text.flush(self, &mut children);
                self.read_through("-->");
                continue;
            }

            if self.starts_with("<!") || self.starts_with("<?") {
                text.flush(self, &mut children);
                self.read_through(">");
                continue;
            }

            if self.starts_with("<")
                && self.remaining()[1..]
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_alphabetic())
            {
                text.flush(self, &mut children);
                let element = self.parse_element();
                children.push(element);
                continue;
            }

            if self.starts_with("{{") {
                let start = self.pos;
                let interpolation = self.read_through("}}");
                text.push(start, interpolation);
                continue;
            }

            let start = self.pos;
            let run = self.read_while(|c| c != '<' && c != '{');
            if run.is_empty() {
                // A lone '<' or '{' that starts nothing.
                if let Some(c) = self.advance() {
                    text.push_char(start, c);
                }
            } else {
                text.push(start, run);
            }
        }

        text.flush(self, &mut children);
        (children, false)
    }

    /// Lower-cased name of the closing tag at the cursor, without consuming it.
    fn closing_tag_name(&self) -> SmolStr {
        let name: String = self.remaining()[2..]
            .chars()
            .skip_while(|c| c.is_whitespace())
            .take_while(|c| is_tag_char(*c))
            .collect();
        SmolStr::new(name.to_ascii_lowercase())
    }

    fn parse_element(&mut self) -> Element {
        let start = self.pos;
        self.consume("<");
        let tag = SmolStr::new(self.read_while(is_tag_char).to_ascii_lowercase());
        let attributes = self.parse_attributes();

        self.skip_whitespace();
        let self_closing = self.consume("/>");
        if !self_closing {
            self.consume(">");
        }

        let mut element = Element {
            tag: tag.clone(),
            attributes,
            ..Element::default()
        };

        if self_closing || is_void_element(&tag) {
            element.span = self.span_from(start);
            return element;
        }

        self.open.push(tag.clone());
        let (children, closed) = self.parse_children(Some(&tag));
        self.open.pop();

        element.children = children;
        element.span = self.span_from(start);
        if !closed {
            self.warnings
                .push(ParseError::unclosed_tag(&tag, element.span));
        }
        element
    }

    fn parse_attributes(&mut self) -> IndexMap<SmolStr, String> {
        let mut attrs = IndexMap::new();
        loop {
            self.skip_whitespace();
            if self.is_eof() || self.starts_with(">") || self.starts_with("/>") {
                break;
            }

            let name = self.read_while(|c| {
                !c.is_whitespace() && !matches!(c, '=' | '>' | '/' | '"' | '\'')
            });
            if name.is_empty() {
                // Stray '/', '=' or quote.
                self.advance();
                continue;
            }

            self.skip_whitespace();
            let value = if self.consume("=") {
                self.skip_whitespace();
                self.read_attribute_value()
            } else {
                String::new()
            };

            attrs.entry(SmolStr::new(name)).or_insert(value);
        }
        attrs
    }

    fn read_attribute_value(&mut self) -> String {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.advance();
                let value = self.read_while(|c| c != quote);
                self.advance();
                value.to_string()
            }
            _ => self
                .read_while(|c| !c.is_whitespace() && c != '>' && c != '/')
                .to_string(),
        }
    }
}

/// Accumulates a text run across interpolations until the next tag.
#[derive(Default)]
struct TextRun {
    buf: String,
    start: Option<usize>,
}

impl TextRun {
    fn push(&mut self, at: usize, s: &str) {
        self.start.get_or_insert(at);
        self.buf.push_str(s);
    }

    fn push_char(&mut self, at: usize, c: char) {
        self.start.get_or_insert(at);
        self.buf.push(c);
    }

    fn flush(&mut self, parser: &TemplateParser<'_>, out: &mut Vec<Element>) {
        let Some(start) = self.start.take() else {
            return;
        };
        let text = collapse_whitespace(&decode_entities(&self.buf));
        self.buf.clear();
        if text.is_empty() {
            return;
        }
        let mut node = Element::text(text);
        node.span = parser.span_from(start);
        out.push(node);
    }
}

fn is_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':' || c == '.'
}

/// Check if an element is a void element (no closing tag).
pub fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&copy;", "©")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_template() {
        let source = "<template>\n  <q-btn />\n</template>\n<script>x</script>";
        let block = extract_template(source).unwrap();
        assert_eq!(block.content, "<q-btn />");
        assert_eq!(&source[block.offset as usize..][..9], "<q-btn />");
    }

    #[test]
    fn test_extract_nested_template() {
        let source = r#"<template lang="html">
  <q-card><template v-slot:header><b>Hi</b></template></q-card>
</template>"#;
        let block = extract_template(source).unwrap();
        assert_eq!(
            block.content,
            "<q-card><template v-slot:header><b>Hi</b></template></q-card>"
        );
    }

    #[test]
    fn test_extract_missing_template() {
        let err = extract_template("<script>export default {}</script>").unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingTemplate);
        assert!(err.is_fatal());

        let err = extract_template("<template><div></div>").unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingTemplate);
    }

    #[test]
    fn test_parse_simple_element() {
        let root = parse_template(r#"<q-btn color="primary" label='Save' flat />"#).unwrap();
        assert_eq!(root.tag, "q-btn");
        assert_eq!(root.attr("color"), Some("primary"));
        assert_eq!(root.attr("label"), Some("Save"));
        assert_eq!(root.attr("flat"), Some(""));
        assert!(root.children.is_empty());
    }

    #[test]
    fn test_tags_are_lowercased_and_comments_dropped() {
        let root = parse_template("<DIV><!-- note --><Q-Btn>Go</Q-Btn></DIV>").unwrap();
        assert_eq!(root.tag, "div");
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].tag, "q-btn");
        assert_eq!(root.children[0].text_content(), "Go");
    }

    #[test]
    fn test_text_is_trimmed_and_blank_runs_dropped() {
        let root = parse_template("<div>\n   <span>  Hello\n   world  </span>\n   \n</div>").unwrap();
        assert_eq!(root.children.len(), 1);
        let span = &root.children[0];
        assert_eq!(span.children.len(), 1);
        assert_eq!(span.children[0].text.as_deref(), Some("Hello world"));
        assert!(span.children[0].children.is_empty());
    }

    #[test]
    fn test_directives_are_kept_literal() {
        let root = parse_template(
            r#"<q-item v-for="item in items" :key="item.id" @click="go(item)" :active="true">{{ item.label }}</q-item>"#,
        )
        .unwrap();
        assert_eq!(root.attr("v-for"), Some("item in items"));
        assert_eq!(root.attr(":key"), Some("item.id"));
        assert_eq!(root.attr("@click"), Some("go(item)"));
        assert_eq!(root.attr(":active"), Some("true"));
        assert_eq!(root.text_content(), "{{ item.label }}");
    }

    #[test]
    fn test_void_and_unquoted() {
        let root = parse_template("<div><img src=logo.png><br><span>a</span></div>").unwrap();
        let tags: Vec<_> = root.children.iter().map(|c| c.tag.as_str()).collect();
        assert_eq!(tags, vec!["img", "br", "span"]);
        assert_eq!(root.children[0].attr("src"), Some("logo.png"));
    }

    #[test]
    fn test_unclosed_tag_is_recovered() {
        let parsed = parse_template_with_warnings("<div><span>text</div>", 0).unwrap();
        assert_eq!(parsed.root.children[0].tag, "span");
        assert_eq!(parsed.root.children[0].text_content(), "text");
        assert_eq!(parsed.warnings.len(), 1);
        assert_eq!(parsed.warnings[0].code, ErrorCode::UnclosedTag);
    }

    #[test]
    fn test_stray_close_is_skipped() {
        let parsed = parse_template_with_warnings("<div></span><p>ok</p></div>", 0).unwrap();
        assert_eq!(parsed.root.children.len(), 1);
        assert_eq!(parsed.warnings[0].code, ErrorCode::UnexpectedClose);
    }

    #[test]
    fn test_no_root_element() {
        let err = parse_template("just some text").unwrap_err();
        assert_eq!(err.code, ErrorCode::NoRootElement);
        let err = parse_template("   ").unwrap_err();
        assert_eq!(err.code, ErrorCode::NoRootElement);
    }

    #[test]
    fn test_first_element_is_root() {
        let root = parse_template("hello <q-card></q-card><q-btn/>").unwrap();
        assert_eq!(root.tag, "q-card");
    }

    #[test]
    fn test_entities_in_text() {
        let root = parse_template("<p>Tom &amp; Jerry &lt;3</p>").unwrap();
        assert_eq!(root.text_content(), "Tom & Jerry <3");
    }

    #[test]
    fn test_parse_document_spans_point_into_file() {
        let source = "<template>\n  <q-btn label=\"A\"/>\n</template>";
        let parsed = parse_document(source).unwrap();
        let span = parsed.root.span;
        assert_eq!(&source[span.to_range()], "<q-btn label=\"A\"/>");
    }
}
