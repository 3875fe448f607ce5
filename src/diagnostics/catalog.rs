use std::collections::HashMap;

use super::{ErrorKind, IoError, JsonError, ShaderError};

/// Name and message template of one error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub message: String,
}

/// Message templates for every [`ErrorKind`].
///
/// The catalog starts out with built-in entries for every kind so a lookup
/// never fails, even before `errors.json` was read or when it is broken.
/// Entries read from the file replace the built-in ones.
#[derive(Clone, Debug)]
pub struct ErrorCatalog {
    entries: HashMap<ErrorKind, CatalogEntry>,
}

impl Default for ErrorCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ErrorCatalog {
    pub fn builtin() -> Self {
        let entries = ErrorKind::all()
            .map(|kind| {
                let (name, message) = builtin_entry(kind);
                (
                    kind,
                    CatalogEntry {
                        name: name.to_string(),
                        message: message.to_string(),
                    },
                )
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, kind: ErrorKind) -> &CatalogEntry {
        // every kind is seeded by `builtin` and entries are only ever replaced
        &self.entries[&kind]
    }

    pub fn insert(&mut self, kind: ErrorKind, name: &str, message: &str) {
        self.entries.insert(
            kind,
            CatalogEntry {
                name: name.to_string(),
                message: message.to_string(),
            },
        );
    }

    /// Drops every entry read from disk and goes back to the built-ins.
    pub fn reset(&mut self) {
        *self = Self::builtin();
    }
}

fn builtin_entry(kind: ErrorKind) -> (&'static str, &'static str) {
    match kind {
        ErrorKind::Io(IoError::CantOpenFile) => ("CAN'T OPEN FILE", "Couldn't open the file"),
        ErrorKind::Io(IoError::CantDecodeImage) => {
            ("CAN'T DECODE IMAGE", "Couldn't decode the image {}")
        }
        ErrorKind::Json(JsonError::CantParse) => ("CAN'T PARSE", "Couldn't parse the file"),
        ErrorKind::Json(JsonError::MissingMember) => {
            ("MISSING MEMBER", "The object {} is missing the member \"{}\"")
        }
        ErrorKind::Json(JsonError::WrongType) => (
            "WRONG TYPE",
            "In {}, the member \"{}\" has a wrong type. The expected type is {}",
        ),
        ErrorKind::Json(JsonError::WrongValue) => (
            "WRONG VALUE",
            "In {}, the member \"{}\" has a wrong value. It must {}",
        ),
        ErrorKind::Json(JsonError::WrongRoot) => {
            ("WRONG ROOT", "The root of the file must be an {}")
        }
        ErrorKind::Json(JsonError::UnresolvedReference) => (
            "UNRESOLVED REFERENCE",
            "In {}, the member \"{}\" references the {} {}, which was not loaded",
        ),
        ErrorKind::Json(JsonError::DuplicateId) => (
            "DUPLICATE ID",
            "In {}, the id {} is already used by another {}",
        ),
        ErrorKind::Shader(ShaderError::CantCompileVertex) => {
            ("CAN'T COMPILE VERTEX", "Couldn't compile the vertex shader")
        }
        ErrorKind::Shader(ShaderError::CantCompileFragment) => {
            ("CAN'T COMPILE FRAGMENT", "Couldn't compile the fragment shader")
        }
        ErrorKind::Shader(ShaderError::CantCompileGeometry) => {
            ("CAN'T COMPILE GEOMETRY", "Couldn't compile the geometry shader")
        }
        ErrorKind::Shader(ShaderError::CantCompileCompute) => {
            ("CAN'T COMPILE COMPUTE", "Couldn't compile the compute shader")
        }
        ErrorKind::Shader(ShaderError::CantLink) => (
            "CAN'T LINK",
            "Couldn't link the shaders \"{}\", \"{}\" and \"{}\"",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_restores_builtin_entries() {
        let kind = ErrorKind::Json(JsonError::WrongRoot);
        let mut catalog = ErrorCatalog::builtin();
        catalog.insert(kind, "ROOT", "custom {}");
        assert_eq!(catalog.get(kind).name, "ROOT");

        catalog.reset();
        assert_eq!(catalog.get(kind).name, "WRONG ROOT");
    }
}
