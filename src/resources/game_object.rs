use crate::{
    context::Context,
    data_structures::game_object::{GameObject, Transform},
    json::{FieldReader, read_array},
    store::ResourceStore,
    validation::Comparator,
};

use super::{is_duplicate, read_id, read_name};

/// Reads `data/gameobjects.json`.
///
/// `x`, `y` and `zIndex` are required. `rotation` (degrees) and `scale` may
/// be left out and default to 0 and 1.
///
/// Game objects start without components; renderers attach themselves when
/// `renderers.json` is read.
pub fn read_game_objects(ctx: &mut Context, store: &mut ResourceStore) -> anyhow::Result<()> {
    let path = ctx.config.data_file("gameobjects.json");
    let Some(items) = read_array(&path, ctx.reporter) else {
        return Ok(());
    };

    for (index, item) in items.iter().enumerate() {
        let mut reader = FieldReader::new(ctx.reporter, &path, "gameObject");
        let Some(object) = reader.object(index, item) else {
            continue;
        };
        let id = read_id(&mut reader, object, index);
        let name = read_name(&mut reader, object, index);
        let any = Comparator::Always;
        let x = reader.float(object, index, "x", &any, 0.0);
        let y = reader.float(object, index, "y", &any, 0.0);
        let z_index = reader.float(object, index, "zIndex", &any, 0.0);
        let rotation = reader
            .optional_float(object, index, "rotation", &any, 0.0)
            .unwrap_or(0.0);
        let scale = reader
            .optional_float(object, index, "scale", &Comparator::GreaterThan(0.0), 1.0)
            .unwrap_or(1.0);
        if is_duplicate(&mut reader, &store.game_objects, index, id) {
            continue;
        }

        let transform = Transform::new(
            x as f32,
            y as f32,
            z_index as f32,
            rotation as f32,
            scale as f32,
        );
        store
            .game_objects
            .insert(GameObject::new(id, &name, transform))?;
    }

    log::info!("Loaded {} game objects", store.game_objects.len());
    Ok(())
}
