//! Camera-projected texture baking
//!
//! Projects a 2D image, as seen from a virtual camera, onto UV-mapped 3D
//! meshes and writes the sampled colors back into their textures. Two stages
//! compose the pipeline:
//!
//! - [`CameraRig`] fitting: build a square orthographic (or matched-FOV)
//!   camera from the current viewer orientation, framing the target bounds
//!   with a configurable margin.
//! - [`bake_mesh`] / [`bake_all`]: for every texel of the target texture,
//!   resolve the 3D surface point behind it, test visibility against the rig
//!   (front-facing, inside the frame, unoccluded), and composite the
//!   projected source sample into the texel.
//!
//! The crate holds no scene-graph, file, or network surface: meshes, images,
//! and camera poses are plain owned values marshalled in by the caller.
//!
//! # Example
//! ```no_run
//! use glam::Vec3;
//! use projcam::{
//!     bake_mesh, BakeSettings, CameraRig, TextureBuffer, ViewerPose,
//!     generate_plane_uv,
//! };
//!
//! let mesh = generate_plane_uv(2.0, 2.0, 1, 1);
//! let viewer = ViewerPose::looking_at(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO, Vec3::NEG_Z);
//! let rig = CameraRig::fit(&viewer, &mesh.world_aabb(), 0.05)?;
//!
//! let source = TextureBuffer::filled(512, 512, [255, 128, 0, 255]);
//! let mut texture = TextureBuffer::new(1024, 1024);
//! let stats = bake_mesh(&rig, &source, &mesh, &mut texture, &BakeSettings::default())?;
//! println!("{} texels written", stats.texels_written);
//! # Ok::<(), projcam::BakeError>(())
//! ```

pub mod bake;
pub mod bvh;
pub mod camera;
pub mod error;
pub mod mesh;
pub mod primitives;
pub mod report;
pub mod texture;

pub use bake::{bake_all, bake_mesh, BakeJob, BakeSettings, BakeStats};
pub use bvh::Bvh;
pub use camera::{CameraRig, Projection, ViewerPose};
pub use error::BakeError;
pub use mesh::{Aabb, BakeMesh};
pub use primitives::{at_position, generate_cube_uv, generate_plane_uv};
pub use report::{BakeOutcome, BakeReport};
pub use texture::{checker, BlendMode, TextureBuffer};
