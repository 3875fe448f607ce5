use anyhow::Context as _;

use crate::{
    context::Context,
    data_structures::{game_object::Component, renderer::Renderer},
    json::{FieldReader, read_array},
    store::{Arena, Entity, Handle, ResourceStore},
    validation::Comparator,
};

use super::{is_duplicate, read_id, read_name, resolve};

/// An optional reference: absent or -1 means none, anything else must
/// resolve. The outer `None` means the element has to be skipped.
fn optional_reference<T: Entity>(
    reader: &mut FieldReader,
    arena: &Arena<T>,
    object: &serde_json::Map<String, serde_json::Value>,
    index: usize,
    member: &str,
) -> Option<Option<Handle<T>>> {
    match reader.optional_int(object, index, member, &Comparator::GreaterEqual(-1), -1) {
        None | Some(-1) => Some(None),
        Some(id) => resolve(reader, arena, index, member, id).map(Some),
    }
}

/// Reads `data/renderers.json` and attaches each renderer to its game
/// object. Game objects, textures and materials must be loaded first.
pub fn read_renderers(ctx: &mut Context, store: &mut ResourceStore) -> anyhow::Result<()> {
    let path = ctx.config.data_file("renderers.json");
    let Some(items) = read_array(&path, ctx.reporter) else {
        return Ok(());
    };

    for (index, item) in items.iter().enumerate() {
        let mut reader = FieldReader::new(ctx.reporter, &path, "renderer");
        let Some(object) = reader.object(index, item) else {
            continue;
        };
        let id = read_id(&mut reader, object, index);
        let name = read_name(&mut reader, object, index);
        let owner = reader.int(object, index, "gameObject", &Comparator::GreaterEqual(0), -1);
        let texture = optional_reference(&mut reader, &store.textures, object, index, "texture");
        let material = optional_reference(&mut reader, &store.materials, object, index, "material");
        if owner < 0 || is_duplicate(&mut reader, &store.renderers, index, id) {
            continue;
        }
        let Some(game_object) = resolve(&mut reader, &store.game_objects, index, "gameObject", owner)
        else {
            continue;
        };
        let (Some(texture), Some(material)) = (texture, material) else {
            continue;
        };

        let handle = store.renderers.insert(Renderer {
            id,
            name,
            game_object,
            texture,
            material,
            enabled: true,
        })?;
        store
            .game_objects
            .get_mut(game_object)
            .with_context(|| format!("attaching renderer {}", id))?
            .add_component(Component::Renderer(handle));
    }

    log::info!("Loaded {} renderers", store.renderers.len());
    Ok(())
}
