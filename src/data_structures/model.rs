//! Raw vertex data uploaded to vertex arrays.

use crate::{
    backend::{BufferId, VertexArrayId},
    store::Entity,
};

/// A vertex array ready for an indexed draw.
#[derive(Clone, Debug, PartialEq)]
pub struct RawModel {
    pub id: u32,
    pub name: String,
    pub vao: VertexArrayId,
    pub index_buffer: BufferId,
    pub vertex_count: u32,
}

impl Entity for RawModel {
    const KIND: &'static str = "raw model";

    fn id(&self) -> u32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl RawModel {
    pub const QUAD_ID: u32 = 0;
    pub const QUAD_NAME: &'static str = "quad";

    /// Unit quad corners, counter-clockwise from the origin.
    pub const QUAD_POSITIONS: [f32; 8] = [
        0.0, 0.0, //
        0.0, 1.0, //
        1.0, 1.0, //
        1.0, 0.0,
    ];

    pub const QUAD_INDICES: [u32; 6] = [0, 2, 1, 0, 3, 2];

    pub const QUAD_TEX_COORDS: [f32; 8] = [
        0.0, 0.0, //
        0.0, 1.0, //
        1.0, 1.0, //
        1.0, 0.0,
    ];
}
