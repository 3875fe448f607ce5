use crate::{
    data_structures::shader::Shader,
    store::{Entity, Handle},
};

/// Surface description shared by renderers. For now it only selects the
/// shader program.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub id: u32,
    pub name: String,
    pub shader: Handle<Shader>,
}

impl Entity for Material {
    const KIND: &'static str = "material";

    fn id(&self) -> u32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
