use crate::{
    context::Context,
    data_structures::material::Material,
    json::{FieldReader, read_array},
    store::ResourceStore,
    validation::Comparator,
};

use super::{is_duplicate, read_id, read_name, resolve};

/// Reads `data/materials.json`. Shaders must be loaded first.
pub fn read_materials(ctx: &mut Context, store: &mut ResourceStore) -> anyhow::Result<()> {
    let path = ctx.config.data_file("materials.json");
    let Some(items) = read_array(&path, ctx.reporter) else {
        return Ok(());
    };

    for (index, item) in items.iter().enumerate() {
        let mut reader = FieldReader::new(ctx.reporter, &path, "material");
        let Some(object) = reader.object(index, item) else {
            continue;
        };
        let id = read_id(&mut reader, object, index);
        let name = read_name(&mut reader, object, index);
        let shader = reader.int(object, index, "shader", &Comparator::GreaterEqual(0), -1);
        if shader < 0 || is_duplicate(&mut reader, &store.materials, index, id) {
            continue;
        }
        let Some(shader) = resolve(&mut reader, &store.shaders, index, "shader", shader) else {
            log::warn!("Material \"{}\" skipped, it has no shader", name);
            continue;
        };
        store.materials.insert(Material { id, name, shader })?;
    }

    log::info!("Loaded {} materials", store.materials.len());
    Ok(())
}
