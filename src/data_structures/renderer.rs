use crate::{
    data_structures::{game_object::GameObject, material::Material, texture::Texture},
    store::{Entity, Handle},
};

/// Draws its game object with a texture and a material.
///
/// Either may be missing: a renderer without a material has nothing to draw
/// with, one without a texture draws untextured.
#[derive(Clone, Debug, PartialEq)]
pub struct Renderer {
    pub id: u32,
    pub name: String,
    pub game_object: Handle<GameObject>,
    pub texture: Option<Handle<Texture>>,
    pub material: Option<Handle<Material>>,
    pub enabled: bool,
}

impl Entity for Renderer {
    const KIND: &'static str = "renderer";

    fn id(&self) -> u32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
