//! Ownership of every loaded entity.
//!
//! Each entity type lives in its own [`Arena`]. Entities are addressed by a
//! generation-checked [`Handle`], and looked up by their data-file id through
//! a per-arena id map, so ids need not be dense, zero-based or ordered. A
//! handle to a removed entity no longer resolves: it fails with
//! [`StoreError::DanglingReference`] instead of reaching whatever took the
//! slot afterwards.

use std::{collections::HashMap, fmt, hash::Hash, marker::PhantomData};

use crate::data_structures::{
    game_object::GameObject,
    material::Material,
    model::RawModel,
    renderer::Renderer,
    shader::{Shader, ShaderStage, SubShader},
    texture::Texture,
};

/// Something that can be stored in an [`Arena`].
pub trait Entity {
    /// Lower-case name of the entity type, used in messages.
    const KIND: &'static str;

    /// Id from the data file, unique per arena.
    fn id(&self) -> u32;

    fn name(&self) -> &str;
}

/// Typed reference to an entity of an [`Arena`].
pub struct Handle<T> {
    index: u32,
    generation: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    fn new(index: u32, generation: u32) -> Self {
        Self {
            index,
            generation,
            _marker: PhantomData,
        }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.generation == other.generation
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.generation.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({}v{})", self.index, self.generation)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// No entity with this id was loaded.
    UnknownId { kind: &'static str, id: u32 },
    /// The handle's entity was removed.
    DanglingReference {
        kind: &'static str,
        index: u32,
        generation: u32,
    },
    /// An entity with this id already exists.
    DuplicateId { kind: &'static str, id: u32 },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownId { kind, id } => write!(f, "no {} with id {} was loaded", kind, id),
            Self::DanglingReference {
                kind,
                index,
                generation,
            } => write!(
                f,
                "{} handle {}v{} refers to a removed entity",
                kind, index, generation
            ),
            Self::DuplicateId { kind, id } => write!(f, "a {} with id {} already exists", kind, id),
        }
    }
}

impl std::error::Error for StoreError {}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Owning container of one entity type.
///
/// Freed slots are reused with a bumped generation. Iteration follows slot
/// order, which is insertion order as long as nothing was removed.
#[derive(Debug)]
pub struct Arena<T: Entity> {
    kind: &'static str,
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    ids: HashMap<u32, Handle<T>>,
}

impl<T: Entity> Default for Arena<T> {
    fn default() -> Self {
        Self::with_kind(T::KIND)
    }
}

impl<T: Entity> Arena<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// An arena whose messages use `kind` instead of [`Entity::KIND`].
    pub fn with_kind(kind: &'static str) -> Self {
        Self {
            kind,
            slots: Vec::new(),
            free: Vec::new(),
            ids: HashMap::new(),
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains_id(&self, id: u32) -> bool {
        self.ids.contains_key(&id)
    }

    pub fn insert(&mut self, value: T) -> Result<Handle<T>, StoreError> {
        let id = value.id();
        if self.ids.contains_key(&id) {
            return Err(StoreError::DuplicateId {
                kind: self.kind,
                id,
            });
        }
        let handle = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.value = Some(value);
                Handle::new(index, slot.generation)
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    value: Some(value),
                });
                Handle::new(index, 0)
            }
        };
        self.ids.insert(id, handle);
        Ok(handle)
    }

    fn dangling(&self, handle: Handle<T>) -> StoreError {
        StoreError::DanglingReference {
            kind: self.kind,
            index: handle.index,
            generation: handle.generation,
        }
    }

    pub fn get(&self, handle: Handle<T>) -> Result<&T, StoreError> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.value.as_ref())
            .ok_or_else(|| self.dangling(handle))
    }

    pub fn get_mut(&mut self, handle: Handle<T>) -> Result<&mut T, StoreError> {
        let error = self.dangling(handle);
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.value.as_mut())
            .ok_or(error)
    }

    /// Handle of the entity with the given data-file id.
    pub fn lookup(&self, id: u32) -> Result<Handle<T>, StoreError> {
        self.ids.get(&id).copied().ok_or(StoreError::UnknownId {
            kind: self.kind,
            id,
        })
    }

    pub fn by_id(&self, id: u32) -> Result<&T, StoreError> {
        self.get(self.lookup(id)?)
    }

    pub fn remove(&mut self, handle: Handle<T>) -> Result<T, StoreError> {
        let error = self.dangling(handle);
        let slot = self
            .slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .ok_or_else(|| error.clone())?;
        let value = slot.value.take().ok_or(error)?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.ids.remove(&value.id());
        Ok(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Handle<T>, &T)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.value
                .as_ref()
                .map(|value| (Handle::new(index as u32, slot.generation), value))
        })
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter_map(|slot| slot.value.as_ref())
    }

    /// Removes every entity, last slot first. All outstanding handles become
    /// dangling.
    pub fn drain(&mut self) -> Vec<T> {
        let mut drained = Vec::with_capacity(self.len());
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            if let Some(value) = slot.value.take() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
                drained.push(value);
            }
        }
        self.ids.clear();
        drained
    }
}

/// Entity counts, for log lines and the `ngin-check` summary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoreSummary {
    pub textures: usize,
    pub raw_models: usize,
    pub materials: usize,
    pub shaders: usize,
    pub game_objects: usize,
    pub renderers: usize,
}

impl fmt::Display for StoreSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} textures, {} raw models, {} materials, {} shaders, {} game objects, {} renderers",
            self.textures,
            self.raw_models,
            self.materials,
            self.shaders,
            self.game_objects,
            self.renderers
        )
    }
}

/// All loaded entities, one arena per type.
#[derive(Debug)]
pub struct ResourceStore {
    pub textures: Arena<Texture>,
    pub raw_models: Arena<RawModel>,
    pub materials: Arena<Material>,
    pub shaders: Arena<Shader>,
    pub vertex_shaders: Arena<SubShader>,
    pub geometry_shaders: Arena<SubShader>,
    pub fragment_shaders: Arena<SubShader>,
    pub game_objects: Arena<GameObject>,
    pub renderers: Arena<Renderer>,
}

impl Default for ResourceStore {
    fn default() -> Self {
        Self {
            textures: Arena::new(),
            raw_models: Arena::new(),
            materials: Arena::new(),
            shaders: Arena::new(),
            vertex_shaders: Arena::with_kind(ShaderStage::Vertex.kind()),
            geometry_shaders: Arena::with_kind(ShaderStage::Geometry.kind()),
            fragment_shaders: Arena::with_kind(ShaderStage::Fragment.kind()),
            game_objects: Arena::new(),
            renderers: Arena::new(),
        }
    }
}

impl ResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sub_shaders(&self, stage: ShaderStage) -> &Arena<SubShader> {
        match stage {
            ShaderStage::Vertex => &self.vertex_shaders,
            ShaderStage::Geometry => &self.geometry_shaders,
            ShaderStage::Fragment => &self.fragment_shaders,
        }
    }

    pub fn sub_shaders_mut(&mut self, stage: ShaderStage) -> &mut Arena<SubShader> {
        match stage {
            ShaderStage::Vertex => &mut self.vertex_shaders,
            ShaderStage::Geometry => &mut self.geometry_shaders,
            ShaderStage::Fragment => &mut self.fragment_shaders,
        }
    }

    /// The built-in unit quad, once generated.
    pub fn quad(&self) -> Option<&RawModel> {
        self.raw_models
            .by_id(RawModel::QUAD_ID)
            .ok()
            .filter(|model| model.name == RawModel::QUAD_NAME)
    }

    /// Shader used by `material`.
    pub fn material_shader(&self, material: &Material) -> Result<&Shader, StoreError> {
        self.shaders.get(material.shader)
    }

    /// Renderers attached to `game_object`, in attachment order.
    pub fn renderers_of<'a>(
        &'a self,
        game_object: &'a GameObject,
    ) -> impl Iterator<Item = Result<&'a Renderer, StoreError>> + 'a {
        game_object
            .renderer_handles()
            .map(move |handle| self.renderers.get(handle))
    }

    pub fn summary(&self) -> StoreSummary {
        StoreSummary {
            textures: self.textures.len(),
            raw_models: self.raw_models.len(),
            materials: self.materials.len(),
            shaders: self.shaders.len(),
            game_objects: self.game_objects.len(),
            renderers: self.renderers.len(),
        }
    }
}
