//! Error types for template parsing.

use crate::span::Span;
use std::fmt;

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// An error raised while reading a template.
///
/// Only [`ErrorCode::MissingTemplate`] and [`ErrorCode::NoRootElement`] are
/// fatal. The remaining codes describe markup problems the parser recovers
/// from; they are reported through [`crate::ParsedTemplate::warnings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
    pub code: ErrorCode,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            span,
            code,
        }
    }

    pub fn missing_template() -> Self {
        Self::new(
            "No <template> block found",
            Span::default(),
            ErrorCode::MissingTemplate,
        )
    }

    pub fn no_root_element(span: Span) -> Self {
        Self::new(
            "Template has no root element",
            span,
            ErrorCode::NoRootElement,
        )
    }

    pub fn unclosed_tag(tag: &str, span: Span) -> Self {
        Self::new(
            format!("Unclosed tag: <{}>", tag),
            span,
            ErrorCode::UnclosedTag,
        )
    }

    pub fn unexpected_close(tag: &str, span: Span) -> Self {
        Self::new(
            format!("Closing tag </{}> has no matching open tag", tag),
            span,
            ErrorCode::UnexpectedClose,
        )
    }

    /// Whether conversion can continue after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::MissingTemplate | ErrorCode::NoRootElement
        )
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseError {}

/// Error codes for categorizing parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The source has no `<template>` block.
    MissingTemplate,
    /// The template block contains no element.
    NoRootElement,
    /// An element was still open at the end of its parent.
    UnclosedTag,
    /// A closing tag matched nothing on the open stack.
    UnexpectedClose,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::MissingTemplate => "missing-template",
            ErrorCode::NoRootElement => "no-root-element",
            ErrorCode::UnclosedTag => "unclosed-tag",
            ErrorCode::UnexpectedClose => "unexpected-close",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
