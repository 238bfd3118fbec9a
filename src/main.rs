use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use tinyraster::camera::Camera;
use tinyraster::config::{self, SceneConfig, ShadingMode};
use tinyraster::texture::{SampleMode, Texture};
use tinyraster::{Engine, Mesh, ResourceError};

const DEFAULT_MESH: &str = "obj/african_head/african_head.obj";
const DEFAULT_TEXTURE: &str = "obj/african_head/african_head_diffuse.tga";
const DEFAULT_OUTPUT: &str = "output.tga";

#[derive(Parser)]
#[command(name = "tinyraster", about = "Render a textured OBJ mesh to an image file")]
struct Cli {
    /// Wavefront OBJ mesh to render
    #[arg(default_value = DEFAULT_MESH)]
    mesh: PathBuf,

    /// Diffuse texture image
    #[arg(long, default_value = DEFAULT_TEXTURE)]
    texture: PathBuf,

    /// Output image; the format follows the extension
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    #[arg(long, default_value_t = config::DEFAULT_WIDTH)]
    width: u32,

    #[arg(long, default_value_t = config::DEFAULT_HEIGHT)]
    height: u32,

    /// Upper end of the screen-space depth range
    #[arg(long, default_value_t = config::DEFAULT_DEPTH)]
    depth: f32,

    /// Perspective strength: w = 1 - z / distance
    #[arg(long, default_value_t = config::DEFAULT_CAMERA_DISTANCE)]
    camera_distance: f32,

    #[arg(long, value_enum, default_value_t = Shading::Smooth)]
    shading: Shading,

    /// What to do with texture coordinates outside [0, 1]
    #[arg(long, value_enum, default_value_t = Sampling::Clamp)]
    sampling: Sampling,

    /// Project positions directly, without the look-at view transform
    #[arg(long)]
    no_camera: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Shading {
    Flat,
    Smooth,
}

impl From<Shading> for ShadingMode {
    fn from(s: Shading) -> Self {
        match s {
            Shading::Flat => ShadingMode::Flat,
            Shading::Smooth => ShadingMode::Smooth,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Sampling {
    Clamp,
    Repeat,
    Strict,
}

impl From<Sampling> for SampleMode {
    fn from(s: Sampling) -> Self {
        match s {
            Sampling::Clamp => SampleMode::Clamp,
            Sampling::Repeat => SampleMode::Repeat,
            Sampling::Strict => SampleMode::Strict,
        }
    }
}

impl Cli {
    fn scene(&self) -> SceneConfig {
        SceneConfig {
            width: self.width,
            height: self.height,
            depth: self.depth,
            camera: (!self.no_camera).then(Camera::default),
            camera_distance: self.camera_distance,
            shading: self.shading.into(),
            sample_mode: self.sampling.into(),
            ..SceneConfig::default()
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let scene = cli.scene();

    let mesh = Mesh::from_obj(&cli.mesh).map_err(|source| ResourceError::Mesh {
        path: cli.mesh.clone(),
        source,
    })?;
    let texture = Texture::from_file(&cli.texture, scene.sample_mode)?;

    let frame = Engine::new(mesh, texture, scene)
        .render()
        .context("rendering failed")?;
    let stats = frame.stats;
    frame.save(&cli.output)?;

    info!(
        "wrote {} ({} of {} faces drawn)",
        cli.output.display(),
        stats.drawn,
        stats.faces
    );
    Ok(())
}
