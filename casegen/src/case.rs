//! Splitting definition lines into test cases
//!
//! A definition line is one of:
//!
//! ```text
//! // a comment, ignored
//!
//! NotoSans-Regular.ttf;3,6,8-11;any;extra;fields
//! ```
//!
//! Data lines are split on `;` with no escaping; a field containing `;` cannot
//! be expressed.

use crate::{source::DefinitionFile, Error};

pub const COMMENT_MARKER: &str = "//";
pub const FIELD_DELIMITER: char = ';';

/// How a line contributes to generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Comment,
    Blank,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestCaseLine<'a> {
    pub index: usize,
    pub text: &'a str,
    pub kind: LineKind,
}

impl<'a> TestCaseLine<'a> {
    pub fn classify(index: usize, text: &'a str) -> TestCaseLine<'a> {
        let trimmed = text.trim_start();
        let kind = if trimmed.is_empty() {
            LineKind::Blank
        } else if trimmed.starts_with(COMMENT_MARKER) {
            LineKind::Comment
        } else {
            LineKind::Data
        };
        TestCaseLine { index, text, kind }
    }

    /// 1-based, for humans
    pub fn line_number(&self) -> usize {
        self.index + 1
    }
}

/// One data line, split into fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCase {
    pub font: String,
    pub selector: String,
    pub extra: Vec<String>,
    /// 0-based index of the originating line
    pub line: usize,
}

impl ParsedCase {
    /// Fields exactly as written, font and selector first.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        [self.font.as_str(), self.selector.as_str()]
            .into_iter()
            .chain(self.extra.iter().map(String::as_str))
    }
}

/// Split a data line, requiring the font and selector plus `min_extra` more fields.
///
/// Returns `None` for comments and blank lines.
pub fn parse_line(
    file: &DefinitionFile,
    line: &TestCaseLine,
    min_extra: usize,
) -> Result<Option<ParsedCase>, Error> {
    if line.kind != LineKind::Data {
        return Ok(None);
    }
    let mut fields = line.text.split(FIELD_DELIMITER).map(str::to_string);
    let (Some(font), Some(selector)) = (fields.next(), fields.next()) else {
        return Err(malformed(file, line, min_extra));
    };
    let extra: Vec<_> = fields.collect();
    if extra.len() < min_extra {
        return Err(malformed(file, line, min_extra));
    }
    Ok(Some(ParsedCase {
        font,
        selector,
        extra,
        line: line.index,
    }))
}

fn malformed(file: &DefinitionFile, line: &TestCaseLine, min_extra: usize) -> Error {
    Error::Malformed {
        path: file.path().to_path_buf(),
        line: line.line_number(),
        expected: 2 + min_extra,
        text: line.text.to_string(),
    }
}

/// Every case in `file`, in line order.
///
/// The first malformed line fails the whole file; nothing is skipped silently.
pub fn parse_cases(file: &DefinitionFile, min_extra: usize) -> Result<Vec<ParsedCase>, Error> {
    let mut cases = Vec::new();
    for (index, text) in file.lines().iter().enumerate() {
        let line = TestCaseLine::classify(index, text);
        if let Some(case) = parse_line(file, &line, min_extra)? {
            cases.push(case);
        }
    }
    Ok(cases)
}
