//! JSON document parsing and validated field extraction.
//!
//! Every resource file is a JSON document. [`parse_document`] reads and
//! parses one, reporting I/O and syntax problems, and [`expect_array`] /
//! [`expect_object`] check its root shape. [`FieldReader`] then pulls typed
//! members out of the elements. Nothing here ever fails hard: a bad field
//! produces one diagnostic and the caller gets its default value back.

use std::{fmt::Display, fs, path::Path};

use serde_json::{Map, Value};

use crate::{
    diagnostics::{ErrorKind, IoError, JsonError, Reporter},
    validation::Comparator,
};

/// A 1-based line/column pair inside a text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextPosition {
    pub line: usize,
    pub column: usize,
}

impl TextPosition {
    /// Computes the line and column of the byte at `offset` by counting the
    /// newlines before it. Offsets past the end are clamped.
    pub fn at_offset(text: &str, offset: usize) -> Self {
        let offset = offset.min(text.len());
        let before = &text.as_bytes()[..offset];
        let line = 1 + before.iter().filter(|b| **b == b'\n').count();
        let column = match before.iter().rposition(|b| *b == b'\n') {
            Some(newline) => offset - newline,
            None => offset + 1,
        };
        Self { line, column }
    }
}

/// Byte offset of a parser supplied 1-based line/column.
///
/// Column 0 is used by the parser for errors found on a line break or at the
/// end of input; it maps to the byte right before the line start.
fn offset_of(text: &str, line: usize, column: usize) -> usize {
    let line_start = if line <= 1 {
        0
    } else {
        text.match_indices('\n')
            .nth(line - 2)
            .map_or(text.len(), |(i, _)| i + 1)
    };
    let offset = if column == 0 {
        line_start.saturating_sub(1)
    } else {
        line_start + column - 1
    };
    offset.min(text.len())
}

/// Strips serde's " at line X column Y" suffix, the position is reported on
/// its own.
fn parse_reason(error: &serde_json::Error) -> String {
    let message = error.to_string();
    match message.rsplit_once(" at line ") {
        Some((reason, _)) => reason.to_string(),
        None => message,
    }
}

/// Reads and parses the JSON file at `path`.
///
/// Reports [`IoError::CantOpenFile`] with the OS error when the file can't be
/// read and [`JsonError::CantParse`] with the line and column of the syntax
/// error when it can't be parsed.
pub fn parse_document(path: &Path, reporter: &mut Reporter) -> Option<Value> {
    let display = path.display().to_string();
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            reporter.report(IoError::CantOpenFile, Some(&display), &e.to_string(), &[]);
            return None;
        }
    };
    match serde_json::from_str::<Value>(&text) {
        Ok(doc) => Some(doc),
        Err(e) => {
            let offset = offset_of(&text, e.line(), e.column());
            let position = TextPosition::at_offset(&text, offset);
            reporter.report_at(
                JsonError::CantParse,
                &display,
                position,
                &parse_reason(&e),
                &[],
            );
            None
        }
    }
}

/// Returns the root array or reports [`JsonError::WrongRoot`].
pub fn expect_array<'a>(doc: &'a Value, path: &str, reporter: &mut Reporter) -> Option<&'a [Value]> {
    match doc.as_array() {
        Some(items) => Some(items.as_slice()),
        None => {
            reporter.report(JsonError::WrongRoot, Some(path), "", &["Array"]);
            None
        }
    }
}

/// Returns the root object or reports [`JsonError::WrongRoot`].
pub fn expect_object<'a>(
    doc: &'a Value,
    path: &str,
    reporter: &mut Reporter,
) -> Option<&'a Map<String, Value>> {
    match doc.as_object() {
        Some(object) => Some(object),
        None => {
            reporter.report(JsonError::WrongRoot, Some(path), "", &["Object"]);
            None
        }
    }
}

/// Parses `path` and returns its root array, or `None` after reporting why
/// it couldn't.
pub fn read_array(path: &Path, reporter: &mut Reporter) -> Option<Vec<Value>> {
    let doc = parse_document(path, reporter)?;
    let display = path.display().to_string();
    expect_array(&doc, &display, reporter)?;
    match doc {
        Value::Array(items) => Some(items),
        _ => None,
    }
}

/// Typed member extraction for the elements of one JSON array.
///
/// Diagnostics name the element as `<array>[<index>]`, e.g. `texture[3]`.
pub struct FieldReader<'a> {
    reporter: &'a mut Reporter,
    path: String,
    array: &'a str,
}

impl<'a> FieldReader<'a> {
    pub fn new(reporter: &'a mut Reporter, path: &Path, array: &'a str) -> Self {
        Self {
            reporter,
            path: path.display().to_string(),
            array,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn reporter(&mut self) -> &mut Reporter {
        &mut *self.reporter
    }

    /// `<array>[<index>]`
    pub fn label(&self, index: usize) -> String {
        format!("{}[{}]", self.array, index)
    }

    /// Reports an error about the file being read.
    pub fn report(&mut self, kind: impl Into<ErrorKind>, detail: &str, args: &[&str]) {
        self.reporter.report(kind, Some(&self.path), detail, args);
    }

    /// Returns the element as an object, or reports a wrong type and `None`.
    pub fn object<'v>(&mut self, index: usize, value: &'v Value) -> Option<&'v Map<String, Value>> {
        if let Some(object) = value.as_object() {
            return Some(object);
        }
        let label = self.label(index);
        self.reporter.report(
            JsonError::WrongType,
            Some(&self.path),
            "The element will be skipped",
            &[self.array, &label, "Object"],
        );
        None
    }

    /// Reads an integer member. JSON floats are a wrong type; integers too
    /// large for an `i64` fail the comparator.
    pub fn int(
        &mut self,
        object: &Map<String, Value>,
        index: usize,
        member: &str,
        comparator: &Comparator<i64>,
        default: i64,
    ) -> i64 {
        if object
            .get(member)
            .is_some_and(|raw| raw.is_u64() && !raw.is_i64())
        {
            let constraint = comparator.describe();
            self.reject(JsonError::WrongValue, index, member, &constraint, &default);
            return default;
        }
        self.extract(object, index, member, "Int", comparator, default, Value::as_i64)
    }

    /// Like [`int`](Self::int), but an absent member yields `None` without a
    /// diagnostic.
    pub fn optional_int(
        &mut self,
        object: &Map<String, Value>,
        index: usize,
        member: &str,
        comparator: &Comparator<i64>,
        default: i64,
    ) -> Option<i64> {
        if !object.contains_key(member) {
            return None;
        }
        Some(self.int(object, index, member, comparator, default))
    }

    /// Reads a float member. JSON integers are accepted.
    pub fn float(
        &mut self,
        object: &Map<String, Value>,
        index: usize,
        member: &str,
        comparator: &Comparator<f64>,
        default: f64,
    ) -> f64 {
        self.extract(object, index, member, "Float", comparator, default, Value::as_f64)
    }

    /// Like [`float`](Self::float), but an absent member yields `None`
    /// without a diagnostic.
    pub fn optional_float(
        &mut self,
        object: &Map<String, Value>,
        index: usize,
        member: &str,
        comparator: &Comparator<f64>,
        default: f64,
    ) -> Option<f64> {
        if !object.contains_key(member) {
            return None;
        }
        Some(self.float(object, index, member, comparator, default))
    }

    pub fn string(
        &mut self,
        object: &Map<String, Value>,
        index: usize,
        member: &str,
        comparator: &Comparator<String>,
        default: &str,
    ) -> String {
        self.extract(
            object,
            index,
            member,
            "String",
            comparator,
            default.to_string(),
            |v| v.as_str().map(str::to_string),
        )
    }

    /// Like [`string`](Self::string), but an absent member yields `None`
    /// without a diagnostic.
    pub fn optional_string(
        &mut self,
        object: &Map<String, Value>,
        index: usize,
        member: &str,
        comparator: &Comparator<String>,
        default: &str,
    ) -> Option<String> {
        if !object.contains_key(member) {
            return None;
        }
        Some(self.string(object, index, member, comparator, default))
    }

    #[allow(clippy::too_many_arguments)]
    fn extract<T: PartialOrd + Display>(
        &mut self,
        object: &Map<String, Value>,
        index: usize,
        member: &str,
        type_name: &str,
        comparator: &Comparator<T>,
        default: T,
        convert: impl Fn(&Value) -> Option<T>,
    ) -> T {
        let Some(raw) = object.get(member) else {
            self.reject(JsonError::MissingMember, index, member, "", &default);
            return default;
        };
        let Some(value) = convert(raw) else {
            self.reject(JsonError::WrongType, index, member, type_name, &default);
            return default;
        };
        if !comparator.compare(&value) {
            let constraint = comparator.describe();
            self.reject(JsonError::WrongValue, index, member, &constraint, &default);
            return default;
        }
        value
    }

    /// Reports a member that couldn't be used. `extra` is the last message
    /// argument (type name or constraint); missing members have none.
    fn reject(
        &mut self,
        kind: JsonError,
        index: usize,
        member: &str,
        extra: &str,
        default: &dyn Display,
    ) {
        let label = self.label(index);
        let detail = format!("{} will be used as a default value", default);
        let mut args = vec![label.as_str(), member];
        if !extra.is_empty() {
            args.push(extra);
        }
        self.reporter.report(kind, Some(&self.path), &detail, &args);
    }
}
