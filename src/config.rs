//! Where resources are loaded from.

use std::{
    env,
    path::{Path, PathBuf},
};

/// Environment variable overriding the resource root.
pub const RESOURCE_ROOT_VAR: &str = "QUAD_NGIN_RES";

/// Default resource root, relative to the working directory.
pub const DEFAULT_ROOT: &str = "res";

/// Settings of one loading pass.
///
/// A resource root has this layout:
///
/// ```text
/// <root>/data/      JSON definitions (errors.json, textures.json, ...)
/// <root>/shaders/   GLSL sources referenced by the sub-shader files
/// <root>/textures/  images referenced by textures.json
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoaderConfig {
    pub root: PathBuf,
    /// Print diagnostics to stderr as they are reported.
    pub echo_diagnostics: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT)
    }
}

impl LoaderConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            echo_diagnostics: true,
        }
    }

    /// Root from `QUAD_NGIN_RES`, falling back to `res`.
    pub fn from_env() -> Self {
        match env::var_os(RESOURCE_ROOT_VAR) {
            Some(root) if !root.is_empty() => Self::new(root),
            _ => Self::default(),
        }
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo_diagnostics = echo;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_file(&self, name: &str) -> PathBuf {
        self.root.join("data").join(name)
    }

    pub fn shader_file(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join("shaders").join(path)
    }

    pub fn texture_file(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join("textures").join(path)
    }
}
