#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use quad_ngin::{
    HeadlessBackend, LoadPlan, LoadStage, Loader, LoaderConfig, ResourceStore,
    diagnostics::ErrorKind,
};
use tempfile::TempDir;

pub const VERT: &str = "#version 330 core
layout(location = 0) in vec2 position;
layout(location = 1) in vec2 texCoords;
out vec2 passTexCoords;
void main() {
    gl_Position = vec4(position, 0.0, 1.0);
    passTexCoords = texCoords;
}
";

pub const GEOM: &str = "#version 330 core
layout(triangles) in;
layout(triangle_strip, max_vertices = 3) out;
void main() {
    EndPrimitive();
}
";

pub const FRAG: &str = "#version 330 core
in vec2 passTexCoords;
out vec4 color;
void main() {
    color = vec4(passTexCoords, 0.0, 1.0);
}
";

/// A throwaway resource directory with the `data/`, `shaders/` and
/// `textures/` layout the loader expects.
pub struct ResourceDir {
    dir: TempDir,
}

impl ResourceDir {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        for sub in ["data", "shaders", "textures"] {
            fs::create_dir_all(dir.path().join(sub)).expect("create resource dir");
        }
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Config for this directory with echoing off, so tests stay quiet.
    pub fn config(&self) -> LoaderConfig {
        LoaderConfig::new(self.root()).with_echo(false)
    }

    pub fn loader(&self) -> Loader {
        Loader::new(self.config())
    }

    pub fn data(&self, name: &str, json: &str) -> &Self {
        fs::write(self.root().join("data").join(name), json).expect("write data file");
        self
    }

    pub fn shader(&self, name: &str, source: &str) -> &Self {
        fs::write(self.root().join("shaders").join(name), source).expect("write shader");
        self
    }

    /// Writes a solid-colour PNG of the given size.
    pub fn texture(&self, name: &str, width: u32, height: u32) -> &Self {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([30, 160, 50, 255]));
        img.save(self.texture_path(name)).expect("write texture");
        self
    }

    pub fn raw_texture(&self, name: &str, bytes: &[u8]) -> &Self {
        fs::write(self.texture_path(name), bytes).expect("write texture");
        self
    }

    pub fn texture_path(&self, name: &str) -> PathBuf {
        self.root().join("textures").join(name)
    }

    /// One vertex, geometry and fragment sub-shader, all with id 0 and named
    /// `sprite`.
    pub fn sprite_stages(&self) -> &Self {
        self.shader("sprite.vert", VERT)
            .shader("sprite.geom", GEOM)
            .shader("sprite.frag", FRAG)
            .data(
                "vertexshaders.json",
                r#"[{"id": 0, "name": "sprite", "path": "sprite.vert"}]"#,
            )
            .data(
                "geometryshaders.json",
                r#"[{"id": 0, "name": "sprite", "path": "sprite.geom"}]"#,
            )
            .data(
                "fragmentshaders.json",
                r#"[{"id": 0, "name": "sprite", "path": "sprite.frag"}]"#,
            )
    }
}

/// Runs only `stages` (and what they depend on).
pub fn load(
    loader: &mut Loader,
    gl: &mut HeadlessBackend,
    stages: &[LoadStage],
) -> ResourceStore {
    let plan = LoadPlan::for_stages(stages).expect("valid plan");
    loader.run(&plan, gl).expect("load")
}

/// Kinds of every diagnostic reported so far.
pub fn reported(loader: &Loader) -> Vec<ErrorKind> {
    loader
        .reporter()
        .diagnostics()
        .iter()
        .map(|d| d.kind)
        .collect()
}
