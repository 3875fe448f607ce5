use std::{fs, path::PathBuf};

use crate::{
    context::Context,
    data_structures::texture::Texture,
    diagnostics::IoError,
    json::{FieldReader, read_array},
    store::ResourceStore,
    validation::Comparator,
};

use super::{SKIPPED, is_duplicate, read_id, read_name};

/// Reads `data/textures.json` and uploads every image it lists.
///
/// Images live under `textures/` and may be in any format the `image` crate
/// was built with. They are converted to RGBA8 before upload.
pub fn read_textures(ctx: &mut Context, store: &mut ResourceStore) -> anyhow::Result<()> {
    let path = ctx.config.data_file("textures.json");
    let Some(items) = read_array(&path, ctx.reporter) else {
        return Ok(());
    };

    for (index, item) in items.iter().enumerate() {
        let mut reader = FieldReader::new(ctx.reporter, &path, "texture");
        let Some(object) = reader.object(index, item) else {
            continue;
        };
        let id = read_id(&mut reader, object, index);
        let name = read_name(&mut reader, object, index);
        let file = reader.string(object, index, "path", &Comparator::Always, "");
        if file.is_empty() || is_duplicate(&mut reader, &store.textures, index, id) {
            continue;
        }

        let image_path = ctx.config.texture_file(&file);
        let image_display = image_path.display().to_string();
        let bytes = match fs::read(&image_path) {
            Ok(bytes) => bytes,
            Err(e) => {
                reader.reporter().report(
                    IoError::CantOpenFile,
                    Some(&image_display),
                    &format!("{}. {}", e, SKIPPED),
                    &[],
                );
                continue;
            }
        };
        let img = match image::load_from_memory(&bytes) {
            Ok(img) => img,
            Err(e) => {
                reader.reporter().report(
                    IoError::CantDecodeImage,
                    Some(&image_display),
                    &e.to_string(),
                    &[&name],
                );
                continue;
            }
        };

        let texture = Texture::from_image(ctx.gl, id, &name, PathBuf::from(file), &img)?;
        log::debug!(
            "Texture \"{}\" is {}x{}",
            texture.name,
            texture.width,
            texture.height
        );
        ctx.gpu.textures.push(texture.texture);
        store.textures.insert(texture)?;
    }

    log::info!("Loaded {} textures", store.textures.len());
    Ok(())
}
