//! Engine data structures: the entities a resource directory describes.
//!
//! - `texture` holds GPU textures decoded from image files
//! - `model` holds vertex arrays, currently only the built-in quad
//! - `shader` holds sub-shader stages and linked programs
//! - `material` selects the shader a renderer draws with
//! - `game_object` holds transforms and component lists
//! - `renderer` is the component drawing a game object

pub mod game_object;
pub mod material;
pub mod model;
pub mod renderer;
pub mod shader;
pub mod texture;
