mod common;

use std::path::Path;

use common::test_utils::{ResourceDir, load, reported};
use quad_ngin::{
    HeadlessBackend, LoadPlan, LoadStage, Loader, LoaderConfig,
    backend::BufferTarget,
    data_structures::model::RawModel,
    diagnostics::{ErrorKind, IoError, JsonError},
};

fn sprite_scene(res: &ResourceDir) {
    res.sprite_stages()
        .texture("grass.png", 4, 2)
        .data("errors.json", "{}")
        .data("textures.json", r#"[{"id": 0, "name": "grass", "path": "grass.png"}]"#)
        .data(
            "shaders.json",
            r#"[{"id": 0, "name": "sprite", "vertex": 0, "geometry": -1, "fragment": 0}]"#,
        )
        .data("materials.json", r#"[{"id": 5, "name": "sprite", "shader": 0}]"#)
        .data(
            "gameobjects.json",
            r#"[{"id": 10, "name": "ground", "x": 1, "y": 2, "zIndex": 3, "rotation": 90, "scale": 2},
                {"id": 11, "name": "player", "x": 0, "y": 0, "zIndex": 1}]"#,
        )
        .data(
            "renderers.json",
            r#"[{"id": 0, "name": "ground", "gameObject": 10, "texture": 0, "material": 5},
                {"id": 1, "name": "player", "gameObject": 11, "material": 5}]"#,
        );
}

#[test]
fn single_texture_is_loaded() {
    let res = ResourceDir::new();
    res.texture("grass.png", 4, 2)
        .data("textures.json", r#"[{"id":0,"name":"grass","path":"grass.png"}]"#);
    let mut loader = res.loader();
    let mut gl = HeadlessBackend::new();
    let store = load(&mut loader, &mut gl, &[LoadStage::Textures]);

    assert!(loader.reporter().is_clean());
    assert_eq!(store.textures.len(), 1);
    let grass = store.textures.by_id(0).unwrap();
    assert_eq!(grass.name, "grass");
    assert_eq!((grass.width, grass.height), (4, 2));
    assert_eq!(gl.texture_size(grass.texture), Some((4, 2)));
    assert_eq!(loader.gpu_objects().textures, vec![grass.texture]);
}

#[test]
fn unreadable_textures_are_skipped() {
    let res = ResourceDir::new();
    res.texture("ok.png", 1, 1)
        .raw_texture("junk.png", b"definitely not a png")
        .data(
            "textures.json",
            r#"[{"id": 0, "name": "missing", "path": "missing.png"},
                {"id": 1, "name": "junk", "path": "junk.png"},
                {"id": 2, "name": "ok", "path": "ok.png"},
                {"id": 2, "name": "again", "path": "ok.png"}]"#,
        );
    let mut loader = res.loader();
    let mut gl = HeadlessBackend::new();
    let store = load(&mut loader, &mut gl, &[LoadStage::Textures]);

    assert_eq!(
        reported(&loader),
        vec![
            ErrorKind::Io(IoError::CantOpenFile),
            ErrorKind::Io(IoError::CantDecodeImage),
            ErrorKind::Json(JsonError::DuplicateId),
        ]
    );
    assert_eq!(store.textures.len(), 1);
    assert_eq!(store.textures.by_id(2).unwrap().name, "ok");
    assert_eq!(gl.texture_count(), 1);
    assert!(loader.reporter().diagnostics()[1].message.contains("junk"));
}

#[test]
fn texture_without_path_is_reported_once() {
    let res = ResourceDir::new();
    res.data("textures.json", r#"[{"id": 0, "name": "grass"}]"#);
    let mut loader = res.loader();
    let mut gl = HeadlessBackend::new();
    let store = load(&mut loader, &mut gl, &[LoadStage::Textures]);

    assert_eq!(reported(&loader), vec![ErrorKind::Json(JsonError::MissingMember)]);
    assert!(store.textures.is_empty());
    assert_eq!(gl.texture_count(), 0);
}

#[test]
fn base_quad_is_uploaded_to_one_vertex_array() {
    let res = ResourceDir::new();
    let mut loader = res.loader();
    let mut gl = HeadlessBackend::new();
    let store = load(&mut loader, &mut gl, &[LoadStage::BaseQuad]);

    let quad = store.quad().expect("quad generated");
    assert_eq!(quad.id, RawModel::QUAD_ID);
    assert_eq!(quad.vertex_count, 6);
    assert_eq!(gl.vertex_array_count(), 1);
    assert_eq!(gl.buffer_count(), 3);
    assert_eq!(gl.buffer_info(quad.index_buffer), Some((BufferTarget::ElementArray, 24)));
    assert_eq!(gl.attribute_components(quad.vao, 0), Some(2));
    assert_eq!(gl.attribute_components(quad.vao, 1), Some(2));
    assert_eq!(loader.gpu_objects().vbos.len(), 3);
}

#[test]
fn full_scene_loads_and_tears_down() {
    let res = ResourceDir::new();
    sprite_scene(&res);
    let mut loader = res.loader();
    let mut gl = HeadlessBackend::new();
    let mut store = loader.init(&mut gl).unwrap();

    assert!(loader.reporter().is_clean(), "{:?}", loader.reporter().diagnostics());
    let summary = store.summary();
    assert_eq!(
        (summary.textures, summary.raw_models, summary.shaders, summary.materials),
        (1, 1, 1, 1)
    );
    assert_eq!((summary.game_objects, summary.renderers), (2, 2));

    let material = store.materials.by_id(5).unwrap();
    assert_eq!(store.material_shader(material).unwrap().name, "sprite");

    let ground = store.game_objects.by_id(10).unwrap();
    assert_eq!(ground.transform.scale, 2.0);
    let renderers: Vec<_> = store.renderers_of(ground).map(Result::unwrap).collect();
    assert_eq!(renderers.len(), 1);
    assert_eq!(renderers[0].name, "ground");
    assert!(renderers[0].texture.is_some());

    let player = store.renderers.by_id(1).unwrap();
    assert!(player.texture.is_none());
    assert!(player.enabled);

    let ground_handle = store.game_objects.lookup(10).unwrap();
    loader.destroy(&mut store, &mut gl);

    assert_eq!(gl.live_objects(), 0);
    assert!(loader.gpu_objects().is_empty());
    assert_eq!(store.summary(), Default::default());
    assert!(store.game_objects.get(ground_handle).is_err());
}

#[test]
fn materials_need_a_loaded_shader() {
    let res = ResourceDir::new();
    res.sprite_stages()
        .data(
            "shaders.json",
            r#"[{"id": 0, "name": "sprite", "vertex": 0, "fragment": 0}]"#,
        )
        .data(
            "materials.json",
            r#"[{"id": 0, "name": "good", "shader": 0}, {"id": 1, "name": "bad", "shader": 7}]"#,
        );
    let mut loader = res.loader();
    let mut gl = HeadlessBackend::new();
    let store = load(&mut loader, &mut gl, &[LoadStage::Materials]);

    assert_eq!(store.materials.len(), 1);
    assert!(store.materials.contains_id(0));
    assert_eq!(reported(&loader), vec![ErrorKind::Json(JsonError::UnresolvedReference)]);
    let message = &loader.reporter().diagnostics()[0].message;
    assert!(message.contains("material[1]") && message.contains("shader 7"), "{}", message);
}

#[test]
fn renderers_with_dangling_references_are_skipped() {
    let res = ResourceDir::new();
    sprite_scene(&res);
    res.data(
        "renderers.json",
        r#"[{"id": 0, "name": "lost", "gameObject": 99, "material": 5},
            {"id": 1, "name": "untextured", "gameObject": 10, "texture": 3},
            {"id": 2, "name": "plain", "gameObject": 10, "texture": -1}]"#,
    );
    let mut loader = res.loader();
    let mut gl = HeadlessBackend::new();
    let store = loader.init(&mut gl).unwrap();

    assert_eq!(loader.reporter().count(JsonError::UnresolvedReference), 2);
    assert_eq!(store.renderers.len(), 1);
    let ground = store.game_objects.by_id(10).unwrap();
    assert_eq!(ground.components().len(), 1);
    assert!(store.renderers.by_id(2).unwrap().material.is_none());
}

#[test]
fn wrong_root_only_aborts_one_reader() {
    let res = ResourceDir::new();
    res.texture("grass.png", 1, 1)
        .data("textures.json", r#"[{"id": 0, "name": "grass", "path": "grass.png"}]"#)
        .data("gameobjects.json", r#"{"id": 0}"#);
    let mut loader = res.loader();
    let mut gl = HeadlessBackend::new();
    let plan = LoadPlan::for_stages(&[LoadStage::Textures, LoadStage::GameObjects]).unwrap();
    let store = loader.run(&plan, &mut gl).unwrap();

    assert_eq!(reported(&loader), vec![ErrorKind::Json(JsonError::WrongRoot)]);
    assert_eq!(store.textures.len(), 1);
    assert!(store.game_objects.is_empty());
}

#[test]
fn bundled_resources_load_cleanly() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("res");
    let mut loader = Loader::new(LoaderConfig::new(root).with_echo(false));
    let mut gl = HeadlessBackend::new();
    let mut store = loader.init(&mut gl).unwrap();

    assert!(loader.reporter().is_clean(), "{:?}", loader.reporter().diagnostics());
    assert_eq!(store.textures.len(), 1);
    assert_eq!(store.shaders.len(), 1);
    assert_eq!(store.renderers.len(), 2);

    loader.destroy(&mut store, &mut gl);
    assert_eq!(gl.live_objects(), 0);
}
