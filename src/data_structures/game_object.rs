//! Game objects and their placement in the 2D world.

use cgmath::Zero;

use crate::{
    data_structures::renderer::Renderer,
    store::{Entity, Handle},
};

/// Placement of a game object: position, draw order, rotation and scale.
///
/// `z_index` orders overlapping objects and doubles as the Z translation of
/// the model matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct Transform {
    pub position: cgmath::Vector2<f32>,
    pub z_index: f32,
    /// Counter-clockwise rotation about Z, in degrees.
    pub rotation: f32,
    pub scale: f32,
}

impl Default for Transform {
    /// Identity transform (no move, rotate, or scale).
    fn default() -> Self {
        Self {
            position: cgmath::Vector2::zero(),
            z_index: 0.0,
            rotation: 0.0,
            scale: 1.0,
        }
    }
}

impl Transform {
    pub fn new(x: f32, y: f32, z_index: f32, rotation: f32, scale: f32) -> Self {
        Self {
            position: cgmath::Vector2::new(x, y),
            z_index,
            rotation,
            scale,
        }
    }

    pub fn to_matrix(&self) -> cgmath::Matrix4<f32> {
        cgmath::Matrix4::from_translation(self.position.extend(self.z_index))
            * cgmath::Matrix4::from_angle_z(cgmath::Deg(self.rotation))
            * cgmath::Matrix4::from_scale(self.scale)
    }
}

/// Something attached to a game object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Component {
    Renderer(Handle<Renderer>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameObject {
    pub id: u32,
    pub name: String,
    pub transform: Transform,
    components: Vec<Component>,
}

impl Entity for GameObject {
    const KIND: &'static str = "game object";

    fn id(&self) -> u32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl GameObject {
    pub fn new(id: u32, name: &str, transform: Transform) -> Self {
        Self {
            id,
            name: name.to_string(),
            transform,
            components: Vec::new(),
        }
    }

    pub fn add_component(&mut self, component: Component) {
        self.components.push(component);
    }

    /// Attached components in attachment order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn renderer_handles(&self) -> impl Iterator<Item = Handle<Renderer>> + '_ {
        self.components.iter().map(|component| match component {
            Component::Renderer(handle) => *handle,
        })
    }
}
