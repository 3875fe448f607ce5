//! Diagnostics for malformed resource data.
//!
//! Problems in user data never abort loading. Instead they are reported
//! through a [`Reporter`], which formats them with the message templates of
//! the [`ErrorCatalog`], writes them to stderr and keeps a record so callers
//! (and tests) can inspect what went wrong.
//!
//! There are three taxonomies, one per [`ErrorCategory`]: [`IoError`],
//! [`JsonError`] and [`ShaderError`]. Their discriminants are the ids used in
//! `errors.json`.

mod catalog;

use std::fmt;

pub use catalog::{CatalogEntry, ErrorCatalog};

use crate::{json::TextPosition, validation::fill_template};

/// The three independent error taxonomies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Io,
    Json,
    Shader,
}

impl ErrorCategory {
    pub const ALL: [ErrorCategory; 3] = [Self::Io, Self::Json, Self::Shader];

    /// Key of the category in `errors.json`.
    pub fn key(self) -> &'static str {
        match self {
            Self::Io => "IO",
            Self::Json => "JSON",
            Self::Shader => "Shader",
        }
    }

    /// Label printed between brackets at the start of a diagnostic.
    pub fn label(self) -> &'static str {
        match self {
            Self::Io => "IO ERROR",
            Self::Json => "JSON ERROR",
            Self::Shader => "SHADER ERROR",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.key().eq_ignore_ascii_case(key))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum IoError {
    CantOpenFile = 0,
    CantDecodeImage = 1,
}

impl IoError {
    pub const ALL: [IoError; 2] = [Self::CantOpenFile, Self::CantDecodeImage];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum JsonError {
    CantParse = 0,
    MissingMember = 1,
    WrongType = 2,
    WrongValue = 3,
    WrongRoot = 4,
    UnresolvedReference = 5,
    DuplicateId = 6,
}

impl JsonError {
    pub const ALL: [JsonError; 7] = [
        Self::CantParse,
        Self::MissingMember,
        Self::WrongType,
        Self::WrongValue,
        Self::WrongRoot,
        Self::UnresolvedReference,
        Self::DuplicateId,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ShaderError {
    CantCompileVertex = 0,
    CantCompileFragment = 1,
    CantCompileGeometry = 2,
    CantCompileCompute = 3,
    CantLink = 4,
}

impl ShaderError {
    pub const ALL: [ShaderError; 5] = [
        Self::CantCompileVertex,
        Self::CantCompileFragment,
        Self::CantCompileGeometry,
        Self::CantCompileCompute,
        Self::CantLink,
    ];
}

/// Any error of any category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Io(IoError),
    Json(JsonError),
    Shader(ShaderError),
}

impl ErrorKind {
    pub fn category(self) -> ErrorCategory {
        match self {
            Self::Io(_) => ErrorCategory::Io,
            Self::Json(_) => ErrorCategory::Json,
            Self::Shader(_) => ErrorCategory::Shader,
        }
    }

    /// Id of the error inside its category.
    pub fn id(self) -> u32 {
        match self {
            Self::Io(e) => e as u32,
            Self::Json(e) => e as u32,
            Self::Shader(e) => e as u32,
        }
    }

    /// Looks up the kind with the given id inside `category`.
    pub fn from_id(category: ErrorCategory, id: u32) -> Option<Self> {
        match category {
            ErrorCategory::Io => IoError::ALL
                .into_iter()
                .find(|e| *e as u32 == id)
                .map(Self::Io),
            ErrorCategory::Json => JsonError::ALL
                .into_iter()
                .find(|e| *e as u32 == id)
                .map(Self::Json),
            ErrorCategory::Shader => ShaderError::ALL
                .into_iter()
                .find(|e| *e as u32 == id)
                .map(Self::Shader),
        }
    }

    pub fn all() -> impl Iterator<Item = ErrorKind> {
        IoError::ALL
            .into_iter()
            .map(Self::Io)
            .chain(JsonError::ALL.into_iter().map(Self::Json))
            .chain(ShaderError::ALL.into_iter().map(Self::Shader))
    }
}

impl From<IoError> for ErrorKind {
    fn from(value: IoError) -> Self {
        Self::Io(value)
    }
}

impl From<JsonError> for ErrorKind {
    fn from(value: JsonError) -> Self {
        Self::Json(value)
    }
}

impl From<ShaderError> for ErrorKind {
    fn from(value: ShaderError) -> Self {
        Self::Shader(value)
    }
}

/// One formatted problem report.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    /// Catalog name of the error, e.g. `MISSING MEMBER`.
    pub name: String,
    /// File the problem was found in, if any.
    pub path: Option<String>,
    /// Only set for parse errors.
    pub position: Option<TextPosition>,
    /// Catalog message with its arguments filled in.
    pub message: String,
    /// Free-form detail such as a compiler log or the default value used.
    pub detail: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.category().label(), self.name)?;
        if let Some(path) = &self.path {
            write!(f, ", at \"{}\"", path)?;
        }
        if let Some(position) = &self.position {
            write!(f, ": L {}; C {}", position.line, position.column)?;
        }
        write!(f, ": {}\n{}\n===========\n", self.message, self.detail)
    }
}

/// Collects diagnostics and echoes them to stderr.
#[derive(Debug)]
pub struct Reporter {
    catalog: ErrorCatalog,
    records: Vec<Diagnostic>,
    echo: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Reporter {
    /// Creates a reporter using the built-in catalog. With `echo` off the
    /// diagnostics are only recorded.
    pub fn new(echo: bool) -> Self {
        Self {
            catalog: ErrorCatalog::builtin(),
            records: Vec::new(),
            echo,
        }
    }

    pub fn catalog(&self) -> &ErrorCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut ErrorCatalog {
        &mut self.catalog
    }

    /// Reports an error. `args` fill the `{}` placeholders of the catalog
    /// message; `detail` is printed on its own line below it.
    pub fn report(
        &mut self,
        kind: impl Into<ErrorKind>,
        path: Option<&str>,
        detail: &str,
        args: &[&str],
    ) {
        self.push(kind.into(), path, None, detail, args);
    }

    /// Same as [`report`](Self::report), with a line/column position.
    pub fn report_at(
        &mut self,
        kind: impl Into<ErrorKind>,
        path: &str,
        position: TextPosition,
        detail: &str,
        args: &[&str],
    ) {
        self.push(kind.into(), Some(path), Some(position), detail, args);
    }

    fn push(
        &mut self,
        kind: ErrorKind,
        path: Option<&str>,
        position: Option<TextPosition>,
        detail: &str,
        args: &[&str],
    ) {
        let entry = self.catalog.get(kind);
        let diagnostic = Diagnostic {
            kind,
            name: entry.name.clone(),
            path: path.map(str::to_string),
            position,
            message: fill_template(&entry.message, args),
            detail: detail.to_string(),
        };
        log::debug!("{:?} reported for {:?}", kind, diagnostic.path);
        if self.echo {
            eprint!("{}", diagnostic);
        }
        self.records.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.records
    }

    /// Number of recorded diagnostics of the given kind.
    pub fn count(&self, kind: impl Into<ErrorKind>) -> usize {
        let kind = kind.into();
        self.records.iter().filter(|d| d.kind == kind).count()
    }

    pub fn is_clean(&self) -> bool {
        self.records.is_empty()
    }

    /// Removes and returns everything recorded so far.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.records)
    }
}
