//! quad-ngin
//!
//! A small 2D engine scaffold. It reads a resource directory of JSON files
//! describing textures, shaders, materials, game objects and renderers, and
//! turns them into OpenGL objects owned by a [`store::ResourceStore`]. Bad
//! data never stops a load: every problem is reported as a diagnostic and
//! the offending entry is skipped.
//!
//! High-level modules
//! - `validation`: comparators used to check JSON values
//! - `diagnostics`: error taxonomies, message catalog and reporter
//! - `json`: document parsing and validated member extraction
//! - `backend`: the graphics calls the loader makes (OpenGL or headless)
//! - `store`: arenas and generation-checked handles for all entities
//! - `data_structures`: textures, shaders, materials, game objects, ...
//! - `resources`: one reader per JSON file, plus the shader pipeline
//! - `config` / `context`: where resources come from and the state readers share
//! - `loader`: load plans, loading and teardown
//!

pub mod backend;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod diagnostics;
pub mod json;
pub mod loader;
pub mod resources;
pub mod store;
pub mod validation;

// Re-exports commonly used types for convenience in downstream code.
pub use backend::{GlowBackend, GraphicsBackend, HeadlessBackend};
pub use config::LoaderConfig;
pub use loader::{LoadPlan, LoadStage, Loader};
pub use store::ResourceStore;
pub use cgmath;
pub use glow;
