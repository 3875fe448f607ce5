//! Textures uploaded from image files.

use std::path::PathBuf;

use anyhow::*;
use image::GenericImageView;

use crate::{
    backend::{GraphicsBackend, TextureId},
    store::Entity,
};

/// A 2D RGBA texture living on the GPU.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub id: u32,
    pub name: String,
    pub texture: TextureId,
    pub width: u32,
    pub height: u32,
    /// Image path relative to the texture directory.
    pub path: PathBuf,
}

impl Entity for Texture {
    const KIND: &'static str = "texture";

    fn id(&self) -> u32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Texture {
    /// Uploads a decoded image as RGBA8.
    pub fn from_image(
        gl: &mut dyn GraphicsBackend,
        id: u32,
        name: &str,
        path: PathBuf,
        img: &image::DynamicImage,
    ) -> Result<Self> {
        let (width, height) = img.dimensions();
        let rgba = img.to_rgba8();
        let texture = gl
            .create_texture(width, height, &rgba)
            .with_context(|| format!("uploading texture \"{}\"", name))?;
        Ok(Self {
            id,
            name: name.to_string(),
            texture,
            width,
            height,
            path,
        })
    }
}
