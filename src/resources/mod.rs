//! Readers turning the JSON files of a resource directory into entities.
//!
//! Every reader follows the same recipe: parse its file, require an array
//! root, validate the members of each element with a [`FieldReader`], and
//! insert what survived into its arena. Problems are reported and the
//! offending element is skipped, so one broken entry never stops a load.
//! Only backend failures are returned as errors.

use serde_json::{Map, Value};

use crate::{
    diagnostics::JsonError,
    json::FieldReader,
    store::{Arena, Entity, Handle},
    validation::Comparator,
};

pub mod errors;
pub mod game_object;
pub mod material;
pub mod renderer;
pub mod shader;
pub mod texture;

pub use errors::read_errors;
pub use game_object::read_game_objects;
pub use material::read_materials;
pub use renderer::read_renderers;
pub use shader::{drop_sub_shaders, link_shaders, load_shader, read_shaders, read_sub_shaders};
pub use texture::read_textures;

const SKIPPED: &str = "The element will be skipped";

/// Reads the `id` member, falling back to the element index.
fn read_id(reader: &mut FieldReader, object: &Map<String, Value>, index: usize) -> u32 {
    let id = reader.int(
        object,
        index,
        "id",
        &Comparator::InRangeInclusive(0, u32::MAX as i64),
        index as i64,
    );
    u32::try_from(id).unwrap_or(u32::MAX)
}

fn read_name(reader: &mut FieldReader, object: &Map<String, Value>, index: usize) -> String {
    reader.string(object, index, "name", &Comparator::Always, "")
}

/// Reports [`JsonError::DuplicateId`] if `arena` already holds `id`.
fn is_duplicate<T: Entity>(
    reader: &mut FieldReader,
    arena: &Arena<T>,
    index: usize,
    id: u32,
) -> bool {
    if !arena.contains_id(id) {
        return false;
    }
    let label = reader.label(index);
    reader.report(
        JsonError::DuplicateId,
        SKIPPED,
        &[&label, &id.to_string(), arena.kind()],
    );
    true
}

/// Resolves the id stored in `member`, or reports
/// [`JsonError::UnresolvedReference`].
fn resolve<T: Entity>(
    reader: &mut FieldReader,
    arena: &Arena<T>,
    index: usize,
    member: &str,
    id: i64,
) -> Option<Handle<T>> {
    let handle = u32::try_from(id)
        .ok()
        .and_then(|id| arena.lookup(id).ok());
    if handle.is_none() {
        let label = reader.label(index);
        reader.report(
            JsonError::UnresolvedReference,
            SKIPPED,
            &[&label, member, arena.kind(), &id.to_string()],
        );
    }
    handle
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use serde_json::json;

    use super::*;
    use crate::{
        data_structures::game_object::{GameObject, Transform},
        diagnostics::Reporter,
    };

    #[test]
    fn unusable_id_falls_back_to_index() {
        let mut reporter = Reporter::new(false);
        let mut reader = FieldReader::new(&mut reporter, Path::new("things.json"), "thing");
        let element = json!({"id": -4});
        let object = element.as_object().unwrap();
        assert_eq!(read_id(&mut reader, object, 7), 7);
        assert_eq!(reporter.count(JsonError::WrongValue), 1);
    }

    #[test]
    fn unknown_reference_is_reported_once() {
        let mut arena = Arena::new();
        arena
            .insert(GameObject::new(3, "player", Transform::default()))
            .unwrap();

        let mut reporter = Reporter::new(false);
        let mut reader = FieldReader::new(&mut reporter, Path::new("renderers.json"), "renderer");
        assert!(resolve(&mut reader, &arena, 0, "gameObject", 3).is_some());
        assert!(resolve(&mut reader, &arena, 1, "gameObject", 4).is_none());
        assert!(is_duplicate(&mut reader, &arena, 2, 3));

        assert_eq!(reporter.count(JsonError::UnresolvedReference), 1);
        assert_eq!(reporter.count(JsonError::DuplicateId), 1);
        let message = &reporter.diagnostics()[0].message;
        assert!(message.contains("game object 4"), "{}", message);
    }
}
