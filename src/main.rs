use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use scanrast::math::Vec3;
use scanrast::{config, Engine, Mesh, RenderConfig, RenderMode, Texture, TextureSource};

/// Render a Wavefront OBJ mesh to an image file.
#[derive(Parser, Debug)]
#[command(name = "scanrast", version, about = "Orthographic software rasterizer")]
struct Args {
    /// Path to the mesh (.obj)
    mesh: PathBuf,

    /// Output image; the format follows the extension
    #[arg(short, long, default_value = "render.tga")]
    output: PathBuf,

    /// Diffuse texture (TGA or PNG) to map onto the mesh
    #[arg(short, long)]
    texture: Option<PathBuf>,

    /// Also write the depth buffer as a grayscale image
    #[arg(long)]
    zbuffer: Option<PathBuf>,

    /// Render mode [default: textured with --texture, flat otherwise]
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    #[arg(long, default_value_t = config::DEFAULT_WIDTH)]
    width: u32,

    #[arg(long, default_value_t = config::DEFAULT_HEIGHT)]
    height: u32,

    /// Integer depth range model z is mapped into
    #[arg(long, default_value_t = config::DEFAULT_DEPTH)]
    depth: u32,

    /// Light direction as X,Y,Z
    #[arg(long, value_parser = parse_vec3, default_value = "0,0,-1", allow_hyphen_values = true)]
    light: Vec3,

    /// Rescale the mesh to fit [-1, 1] before rendering
    #[arg(long)]
    normalize: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Wireframe,
    Flat,
    Textured,
    FilledWireframe,
}

impl From<ModeArg> for RenderMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Wireframe => RenderMode::Wireframe,
            ModeArg::Flat => RenderMode::Flat,
            ModeArg::Textured => RenderMode::Textured,
            ModeArg::FilledWireframe => RenderMode::FilledWireframe,
        }
    }
}

fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts: Vec<f32> = s
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid component in '{}': {}", s, e))?;
    match parts[..] {
        [x, y, z] => Ok(Vec3::new(x, y, z)),
        _ => Err(format!("expected X,Y,Z, got '{}'", s)),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();

    let mut mesh = Mesh::from_obj(&args.mesh)
        .with_context(|| format!("Failed to load mesh {}", args.mesh.display()))?;
    if args.normalize && mesh.normalize() {
        info!("Mesh rescaled to fit [-1, 1]");
    }

    let texture = match &args.texture {
        Some(path) => Some(
            Texture::from_file(path)
                .with_context(|| format!("Failed to load texture {}", path.display()))?,
        ),
        None => None,
    };

    let mode = match args.mode {
        Some(mode) => mode.into(),
        None if texture.is_some() => RenderMode::Textured,
        None => RenderMode::Flat,
    };
    let config = RenderConfig {
        width: args.width,
        height: args.height,
        depth: args.depth,
        light_direction: args.light,
        mode,
        ..RenderConfig::default()
    };
    config.validate().context("Invalid render settings")?;

    info!(
        "Rendering {}x{} ({} mode)",
        config.width, config.height, config.mode
    );
    let engine = Engine::new(config);
    let mut frame = engine.render(&mesh, texture.as_ref().map(|t| t as &dyn TextureSource));
    info!(
        "{} of {} faces drawn, {} culled",
        frame.stats.drawn, frame.stats.faces, frame.stats.culled
    );

    // origin moves from bottom-left to the image's top-left
    frame.canvas.flip_vertically();
    frame
        .canvas
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!("Wrote {}", args.output.display());

    if let Some(path) = &args.zbuffer {
        let mut zbuffer = frame.depth.to_image();
        image::imageops::flip_vertical_in_place(&mut zbuffer);
        zbuffer
            .save(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote depth buffer to {}", path.display());
    }

    Ok(())
}
