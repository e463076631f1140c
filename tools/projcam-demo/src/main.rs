//! Projection bake preview tool
//!
//! Builds small synthetic scenes with the library's procedural primitives,
//! runs the camera-projection bake, and writes the resulting textures as PNG
//! files. Stands in for a host 3D editor marshalling real scene data.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use glam::Vec3;

use projcam::{
    at_position, bake_all, checker, generate_cube_uv, generate_plane_uv, BakeJob, BakeSettings,
    BlendMode, CameraRig, TextureBuffer, ViewerPose,
};

#[derive(Parser)]
#[command(name = "projcam-demo", about = "Bake a projected test image onto demo scenes")]
struct Cli {
    /// Output directory for PNG previews
    #[arg(short, long, default_value = "bake-output")]
    out_dir: PathBuf,

    /// Target texture resolution (square)
    #[arg(short, long, default_value_t = 512)]
    resolution: u32,

    /// Sub-samples per texel axis
    #[arg(short, long, default_value_t = 1)]
    supersample: u32,

    /// Blend mode for composited texels
    #[arg(short, long, value_enum, default_value_t = BlendArg::Overwrite)]
    blend: BlendArg,

    /// Frustum fitting margin factor
    #[arg(short, long, default_value_t = 0.05)]
    margin: f32,

    #[command(subcommand)]
    scene: Scene,
}

#[derive(Clone, Copy, ValueEnum)]
enum BlendArg {
    Overwrite,
    Falloff,
}

impl From<BlendArg> for BlendMode {
    fn from(arg: BlendArg) -> Self {
        match arg {
            BlendArg::Overwrite => BlendMode::Overwrite,
            BlendArg::Falloff => BlendMode::AlphaFalloff,
        }
    }
}

#[derive(Subcommand)]
enum Scene {
    /// Single quad facing the camera; the bake reproduces the source image
    Quad,
    /// Two stacked planes; the near one shadows the far one
    Occlusion,
    /// Cube resting on a ground plane, viewed from an angle
    Cube,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("creating output dir {}", cli.out_dir.display()))?;

    let settings = BakeSettings {
        blend: cli.blend.into(),
        supersample: cli.supersample.max(1),
        ..Default::default()
    };
    let source = checker(256, 256, 32, [245, 245, 245, 255], [40, 60, 120, 255]);
    write_png(&source, &cli.out_dir.join("source.png"))?;

    let res = cli.resolution.clamp(64, 8192);
    match cli.scene {
        Scene::Quad => {
            let quad = generate_plane_uv(2.0, 2.0, 1, 1);
            let viewer =
                ViewerPose::looking_at(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO, Vec3::NEG_Z);
            let rig = CameraRig::fit(&viewer, &quad.world_aabb(), cli.margin)?;
            let mut tex = TextureBuffer::filled(res, res, [32, 32, 32, 255]);
            run(&rig, &source, vec![("quad", &quad, &mut tex)], &settings, &cli.out_dir)
        }
        Scene::Occlusion => {
            let far = generate_plane_uv(2.0, 2.0, 1, 1);
            let near = at_position(generate_plane_uv(1.0, 1.0, 1, 1), Vec3::new(0.0, 1.0, 0.0));
            let viewer =
                ViewerPose::looking_at(Vec3::new(0.0, 6.0, 0.0), Vec3::ZERO, Vec3::NEG_Z);
            let mut bounds = far.world_aabb();
            bounds.union(&near.world_aabb());
            let rig = CameraRig::fit(&viewer, &bounds, cli.margin)?;
            let mut far_tex = TextureBuffer::filled(res, res, [32, 32, 32, 255]);
            let mut near_tex = TextureBuffer::filled(res, res, [32, 32, 32, 255]);
            run(
                &rig,
                &source,
                vec![("far", &far, &mut far_tex), ("near", &near, &mut near_tex)],
                &settings,
                &cli.out_dir,
            )
        }
        Scene::Cube => {
            let ground = generate_plane_uv(4.0, 4.0, 2, 2);
            let cube = at_position(generate_cube_uv(1.0, 1.0, 1.0), Vec3::new(0.0, 0.5, 0.0));
            let viewer =
                ViewerPose::looking_at(Vec3::new(3.0, 5.0, 4.0), Vec3::ZERO, Vec3::Y);
            let mut bounds = ground.world_aabb();
            bounds.union(&cube.world_aabb());
            let rig = CameraRig::fit(&viewer, &bounds, cli.margin)?;
            let mut ground_tex = TextureBuffer::filled(res, res, [32, 32, 32, 255]);
            let mut cube_tex = TextureBuffer::filled(res, res, [32, 32, 32, 255]);
            run(
                &rig,
                &source,
                vec![("ground", &ground, &mut ground_tex), ("cube", &cube, &mut cube_tex)],
                &settings,
                &cli.out_dir,
            )
        }
    }
}

fn run(
    rig: &CameraRig,
    source: &TextureBuffer,
    objects: Vec<(&str, &projcam::BakeMesh, &mut TextureBuffer)>,
    settings: &BakeSettings,
    out_dir: &Path,
) -> Result<()> {
    let mut jobs: Vec<BakeJob> = objects
        .into_iter()
        .map(|(name, mesh, target)| BakeJob {
            name: name.to_string(),
            mesh,
            target,
        })
        .collect();

    let report = bake_all(rig, source, &mut jobs, settings);
    print!("{}", report.summary());

    for job in &jobs {
        let path = out_dir.join(format!("{}.png", job.name));
        write_png(&*job.target, &path)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("wrote {}", path.display());
    }

    if !report.all_ok() {
        bail!("{} object(s) failed to bake", report.failed());
    }
    Ok(())
}

/// Write a TextureBuffer to a PNG file
fn write_png(texture: &TextureBuffer, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let w = BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, texture.width, texture.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Default);

    let mut writer = encoder.write_header().context("writing PNG header")?;
    writer
        .write_image_data(&texture.pixels)
        .context("writing PNG pixel data")?;
    Ok(())
}
