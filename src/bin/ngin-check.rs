//! Loads a resource directory without a window and reports what it holds.
//!
//! Usage: `ngin-check [RESOURCE_ROOT]`. Without an argument the root comes
//! from `QUAD_NGIN_RES`, or `res`. Diagnostics are printed to stderr; the
//! exit code is 1 if there were any.

use std::{env, process::ExitCode};

use quad_ngin::{HeadlessBackend, LoaderConfig, Loader};

fn main() -> anyhow::Result<ExitCode> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let config = match env::args_os().nth(1) {
        Some(root) => LoaderConfig::new(root),
        None => LoaderConfig::from_env(),
    };
    println!("Loading resources from {}", config.root().display());

    let mut gl = HeadlessBackend::new();
    let mut loader = Loader::new(config);
    let mut store = loader.init(&mut gl)?;
    println!("{}", store.summary());
    for shader in store.shaders.values() {
        println!(
            "shader {} \"{}\": {} active attributes{}",
            shader.id,
            shader.name,
            shader.attribute_count,
            if shader.geometry.is_some() { ", geometry stage" } else { "" }
        );
    }

    let diagnostics = loader.reporter().diagnostics().len();
    loader.destroy(&mut store, &mut gl);
    if gl.live_objects() != 0 {
        log::warn!("{} graphics objects outlived the teardown", gl.live_objects());
    }

    if diagnostics == 0 {
        println!("No problems found");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("{} problem(s) found", diagnostics);
        Ok(ExitCode::FAILURE)
    }
}
