//! Camera-projection texture baking
//!
//! For every texel of a mesh's target texture, the baker finds the 3D surface
//! point the texel maps to, tests whether the rig camera can see it
//! (front-facing, inside the frame, unoccluded), and if so samples the source
//! image at the projected coordinate and composites it into the texel.
//!
//! The loop is a rasterization of the mesh's UV-space triangles over the
//! texel grid, partitioned by texel row so rows can be processed in parallel
//! without write conflicts. All writes go to a working copy that is committed
//! only when the whole mesh succeeds.

use glam::{Vec2, Vec3};
use log::{debug, warn};
use rayon::prelude::*;

use crate::bvh::Bvh;
use crate::camera::CameraRig;
use crate::error::BakeError;
use crate::mesh::BakeMesh;
use crate::report::{BakeOutcome, BakeReport};
use crate::texture::{lerp_rgba, BlendMode, TextureBuffer};

/// Barycentric inside-test tolerance, in UV units
const INSIDE_EPSILON: f32 = 1e-6;

/// Tunables for a bake invocation
#[derive(Debug, Clone, Copy)]
pub struct BakeSettings {
    /// How projected samples composite against existing texels
    pub blend: BlendMode,
    /// Sub-samples per texel axis; N produces NxN averaged samples
    pub supersample: u32,
    /// Occlusion ray tolerance, skipping hits closer than this to either ray
    /// end to avoid self-occlusion on coplanar geometry
    pub occlusion_epsilon: f32,
    /// Width of the silhouette fade band in NDC units (alpha-falloff blend)
    pub falloff_band: f32,
    /// Exponent shaping the falloff curve (alpha-falloff blend)
    pub falloff_exponent: f32,
}

impl Default for BakeSettings {
    fn default() -> Self {
        Self {
            blend: BlendMode::Overwrite,
            supersample: 1,
            occlusion_epsilon: 1e-3,
            falloff_band: 0.1,
            falloff_exponent: 1.0,
        }
    }
}

/// Counters from a completed bake, per mesh
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BakeStats {
    /// Texels written to the target
    pub texels_written: u64,
    /// Texels whose center fell inside a UV face (written or rejected)
    pub texels_covered: u64,
    /// Texels rejected because the surface faces away from the camera
    pub rejected_backface: u64,
    /// Texels rejected because other geometry blocks the camera ray
    pub rejected_occluded: u64,
    /// Texels rejected because the point projects outside the camera frame
    pub rejected_out_of_frame: u64,
}

impl BakeStats {
    /// Total rejected texels
    pub fn rejected(&self) -> u64 {
        self.rejected_backface + self.rejected_occluded + self.rejected_out_of_frame
    }

    fn merge(mut self, other: Self) -> Self {
        self.texels_written += other.texels_written;
        self.texels_covered += other.texels_covered;
        self.rejected_backface += other.rejected_backface;
        self.rejected_occluded += other.rejected_occluded;
        self.rejected_out_of_frame += other.rejected_out_of_frame;
        self
    }
}

/// One mesh/texture pair in a multi-object invocation
pub struct BakeJob<'a> {
    /// Name used in the invocation report
    pub name: String,
    pub mesh: &'a BakeMesh,
    pub target: &'a mut TextureBuffer,
}

/// Bake a single mesh; the mesh's own geometry is the only occluder
///
/// All-or-nothing: on any error the target texture is untouched.
pub fn bake_mesh(
    rig: &CameraRig,
    source: &TextureBuffer,
    mesh: &BakeMesh,
    target: &mut TextureBuffer,
    settings: &BakeSettings,
) -> Result<BakeStats, BakeError> {
    mesh.require_uv_layer()?;
    source.require_readable()?;
    target.require_readable()?;
    let bvh = Bvh::build(&[mesh]);
    bake_with_bvh(rig, source, mesh, target, &bvh, settings)
}

/// Bake several meshes against a shared source image and rig
///
/// Every mesh in the invocation occludes every other. Failures are isolated:
/// one mesh failing (missing UV layer, nothing visible) leaves its own
/// texture untouched and does not stop the rest.
pub fn bake_all(
    rig: &CameraRig,
    source: &TextureBuffer,
    jobs: &mut [BakeJob<'_>],
    settings: &BakeSettings,
) -> BakeReport {
    let meshes: Vec<&BakeMesh> = jobs.iter().map(|job| job.mesh).collect();
    let bvh = Bvh::build(&meshes);

    let mut report = BakeReport::new();
    for job in jobs.iter_mut() {
        let result = bake_job(rig, source, &bvh, job, settings);
        report.push(BakeOutcome::new(job.name.clone(), result));
    }
    report
}

fn bake_job(
    rig: &CameraRig,
    source: &TextureBuffer,
    bvh: &Bvh,
    job: &mut BakeJob<'_>,
    settings: &BakeSettings,
) -> Result<BakeStats, BakeError> {
    job.mesh.require_uv_layer()?;
    source.require_readable()?;
    job.target.require_readable()?;
    bake_with_bvh(rig, source, job.mesh, job.target, bvh, settings)
}

/// A face prepared for UV-space rasterization
struct RasterFace {
    /// Vertex indices
    verts: [usize; 3],
    /// UV coordinates of the three corners
    uv: [Vec2; 3],
    /// Reciprocal of the UV triangle's signed doubled area
    inv_den: f32,
    /// Inclusive texel X range covered by the face's UV bounds
    x_range: (u32, u32),
}

/// Why a sample was rejected; ordered by reporting priority
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Reject {
    OutOfFrame,
    Backface,
    Occluded,
}

fn bake_with_bvh(
    rig: &CameraRig,
    source: &TextureBuffer,
    mesh: &BakeMesh,
    target: &mut TextureBuffer,
    bvh: &Bvh,
    settings: &BakeSettings,
) -> Result<BakeStats, BakeError> {
    let width = target.width;
    let height = target.height;
    let positions = mesh.world_positions();
    let normals = mesh.world_normals();

    let supersample = if settings.supersample == 0 {
        warn!("bake: supersample factor 0 clamped to 1");
        1
    } else {
        settings.supersample
    };

    // Bin faces to the texel rows their UV bounds touch. One texel of slack
    // on each side keeps sub-samples near the boundary inside the bin.
    let mut faces = Vec::with_capacity(mesh.triangle_count());
    let mut rows: Vec<Vec<u32>> = vec![Vec::new(); height as usize];
    let mut degenerate_uv_faces = 0usize;
    for tri in mesh.indices.chunks_exact(3) {
        let verts = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let uv = [
            Vec2::from(mesh.uvs[verts[0]]),
            Vec2::from(mesh.uvs[verts[1]]),
            Vec2::from(mesh.uvs[verts[2]]),
        ];
        let den = (uv[1] - uv[0]).perp_dot(uv[2] - uv[0]);
        if den.abs() < 1e-12 {
            degenerate_uv_faces += 1;
            continue;
        }

        let (u_min, u_max, v_min, v_max) = uv.iter().fold(
            (f32::INFINITY, f32::NEG_INFINITY, f32::INFINITY, f32::NEG_INFINITY),
            |(ul, uh, vl, vh), p| (ul.min(p.x), uh.max(p.x), vl.min(p.y), vh.max(p.y)),
        );
        let x0 = ((u_min * width as f32 - 1.0).floor().max(0.0)) as u32;
        let x1 = ((u_max * width as f32 + 1.0).ceil().min(width as f32 - 1.0)) as u32;
        let y0 = (((1.0 - v_max) * height as f32 - 1.0).floor().max(0.0)) as u32;
        let y1 = (((1.0 - v_min) * height as f32 + 1.0)
            .ceil()
            .min(height as f32 - 1.0)) as u32;
        if x0 > x1 || y0 > y1 {
            continue;
        }

        let face_idx = faces.len() as u32;
        faces.push(RasterFace {
            verts,
            uv,
            inv_den: 1.0 / den,
            x_range: (x0, x1),
        });
        for y in y0..=y1 {
            rows[y as usize].push(face_idx);
        }
    }
    if degenerate_uv_faces > 0 {
        warn!("bake: skipped {degenerate_uv_faces} faces with degenerate UVs");
    }
    debug!(
        "bake: {}x{} target, {} faces, supersample {}x{}",
        width,
        height,
        faces.len(),
        supersample,
        supersample
    );

    // Work on a copy; committed only when the mesh produces visible texels.
    let mut scratch = target.pixels.clone();
    let row_bytes = width as usize * 4;

    let stats = scratch
        .par_chunks_mut(row_bytes)
        .enumerate()
        .map(|(y, row)| {
            let mut stats = BakeStats::default();
            let candidates = &rows[y];
            if candidates.is_empty() {
                return stats;
            }
            for x in 0..width {
                bake_texel(
                    x,
                    y as u32,
                    row,
                    candidates,
                    &faces,
                    &positions,
                    &normals,
                    rig,
                    source,
                    bvh,
                    settings,
                    supersample,
                    width,
                    height,
                    &mut stats,
                );
            }
            stats
        })
        .reduce(BakeStats::default, BakeStats::merge);

    if stats.texels_written == 0 {
        return Err(BakeError::NoVisibleGeometry {
            rejected: stats.rejected(),
        });
    }

    target.pixels = scratch;
    Ok(stats)
}

/// Evaluate one target texel: sub-sample, classify visibility, composite
#[allow(clippy::too_many_arguments)]
fn bake_texel(
    x: u32,
    y: u32,
    row: &mut [u8],
    candidates: &[u32],
    faces: &[RasterFace],
    positions: &[Vec3],
    normals: &[Vec3],
    rig: &CameraRig,
    source: &TextureBuffer,
    bvh: &Bvh,
    settings: &BakeSettings,
    supersample: u32,
    width: u32,
    height: u32,
    stats: &mut BakeStats,
) {
    let n = supersample;
    let total = (n * n) as f32;
    let mut color_sum = [0.0f32; 4];
    let mut weight_sum = 0.0f32;
    let mut passed = 0u32;
    let mut covered = 0u32;
    let mut worst_reject: Option<Reject> = None;

    for sy in 0..n {
        for sx in 0..n {
            let u = (x as f32 + (sx as f32 + 0.5) / n as f32) / width as f32;
            let v = 1.0 - (y as f32 + (sy as f32 + 0.5) / n as f32) / height as f32;

            let Some((face, weights)) = find_face(Vec2::new(u, v), x, candidates, faces) else {
                continue;
            };
            covered += 1;

            match shade_sample(face, weights, positions, normals, rig, source, bvh, settings) {
                Ok((color, weight)) => {
                    for c in 0..4 {
                        color_sum[c] += color[c];
                    }
                    weight_sum += weight;
                    passed += 1;
                }
                Err(reject) => {
                    worst_reject = Some(worst_reject.map_or(reject, |w| w.max(reject)));
                }
            }
        }
    }

    if covered == 0 {
        return;
    }
    stats.texels_covered += 1;

    if passed == 0 {
        match worst_reject {
            Some(Reject::Occluded) => stats.rejected_occluded += 1,
            Some(Reject::Backface) => stats.rejected_backface += 1,
            _ => stats.rejected_out_of_frame += 1,
        }
        return;
    }

    let inv_passed = 1.0 / passed as f32;
    let color = color_sum.map(|c| c * inv_passed);
    let coverage = passed as f32 / total;
    let blend_t = coverage * (weight_sum * inv_passed);

    let idx = (x * 4) as usize;
    let existing = [row[idx], row[idx + 1], row[idx + 2], row[idx + 3]];
    let out = lerp_rgba(existing, color, blend_t);
    row[idx..idx + 4].copy_from_slice(&out);
    stats.texels_written += 1;
}

/// Find the first candidate face containing the UV point, with its
/// barycentric weights
fn find_face<'a>(
    p: Vec2,
    x: u32,
    candidates: &[u32],
    faces: &'a [RasterFace],
) -> Option<(&'a RasterFace, Vec3)> {
    for &idx in candidates {
        let face = &faces[idx as usize];
        if x < face.x_range.0 || x > face.x_range.1 {
            continue;
        }
        let wb = (p - face.uv[0]).perp_dot(face.uv[2] - face.uv[0]) * face.inv_den;
        let wc = (face.uv[1] - face.uv[0]).perp_dot(p - face.uv[0]) * face.inv_den;
        let wa = 1.0 - wb - wc;
        if wa >= -INSIDE_EPSILON && wb >= -INSIDE_EPSILON && wc >= -INSIDE_EPSILON {
            return Some((face, Vec3::new(wa, wb, wc)));
        }
    }
    None
}

/// Visibility-test and sample one surface point
///
/// Returns the source color and its compositing weight, or the rejection
/// reason.
#[allow(clippy::too_many_arguments)]
fn shade_sample(
    face: &RasterFace,
    weights: Vec3,
    positions: &[Vec3],
    normals: &[Vec3],
    rig: &CameraRig,
    source: &TextureBuffer,
    bvh: &Bvh,
    settings: &BakeSettings,
) -> Result<([f32; 4], f32), Reject> {
    let [i0, i1, i2] = face.verts;
    let point =
        positions[i0] * weights.x + positions[i1] * weights.y + positions[i2] * weights.z;
    let normal = (normals[i0] * weights.x + normals[i1] * weights.y + normals[i2] * weights.z)
        .normalize_or_zero();

    let to_camera = rig.to_camera_dir(point);
    let incidence = normal.dot(to_camera);
    if incidence <= 0.0 {
        return Err(Reject::Backface);
    }

    let Some(ndc) = rig.project(point) else {
        return Err(Reject::OutOfFrame);
    };

    let eps = settings.occlusion_epsilon;
    let reach = rig.occlusion_distance(point) - eps;
    if bvh.occluded(point, to_camera, eps, reach) {
        return Err(Reject::Occluded);
    }

    let su = (ndc.x + 1.0) * 0.5;
    let sv = (1.0 - ndc.y) * 0.5;
    let color = source.sample_bilinear(su, sv);

    let weight = match settings.blend {
        BlendMode::Overwrite => 1.0,
        BlendMode::AlphaFalloff => {
            let edge = (1.0 - ndc.x.abs()).min(1.0 - ndc.y.abs());
            let band = settings.falloff_band.max(1e-6);
            let fade = (edge / band).clamp(0.0, 1.0) * incidence.clamp(0.0, 1.0);
            fade.powf(settings.falloff_exponent)
        }
    };

    Ok((color, weight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::ViewerPose;
    use crate::primitives::{at_position, generate_plane_uv};
    use crate::texture::checker;
    use glam::Mat4;

    /// Rig looking straight down at the XZ plane, fitted to the given meshes
    fn overhead_rig(meshes: &[&BakeMesh], margin: f32) -> CameraRig {
        let viewer = ViewerPose::looking_at(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO, Vec3::NEG_Z);
        let mut bounds = crate::mesh::Aabb::new();
        for mesh in meshes {
            bounds.union(&mesh.world_aabb());
        }
        CameraRig::fit(&viewer, &bounds, margin).unwrap()
    }

    #[test]
    fn test_facing_quad_reproduces_source() {
        let plane = generate_plane_uv(2.0, 2.0, 1, 1);
        let rig = overhead_rig(&[&plane], 0.0);
        let source = checker(16, 16, 4, [255, 255, 255, 255], [20, 40, 60, 255]);
        let mut target = TextureBuffer::new(16, 16);

        let stats =
            bake_mesh(&rig, &source, &plane, &mut target, &BakeSettings::default()).unwrap();
        assert_eq!(stats.texels_written, 16 * 16);
        assert_eq!(stats.rejected(), 0);

        // Every texel reproduces the source exactly; the overhead view maps
        // the image onto the plane with a vertical flip relative to UV space.
        for y in 0..16 {
            for x in 0..16 {
                assert_eq!(
                    target.get_pixel(x, y),
                    source.get_pixel(x, 15 - y),
                    "texel ({x}, {y})"
                );
            }
        }
    }

    #[test]
    fn test_bake_is_idempotent() {
        let plane = generate_plane_uv(2.0, 2.0, 3, 3);
        let rig = overhead_rig(&[&plane], 0.1);
        let source = checker(32, 32, 5, [200, 10, 10, 255], [10, 10, 200, 255]);
        let mut target = TextureBuffer::filled(32, 32, [128, 128, 128, 255]);

        let settings = BakeSettings::default();
        bake_mesh(&rig, &source, &plane, &mut target, &settings).unwrap();
        let first = target.clone();
        bake_mesh(&rig, &source, &plane, &mut target, &settings).unwrap();
        assert_eq!(target, first);
    }

    #[test]
    fn test_backfacing_half_untouched() {
        // Two quads side by side in UV space; the right one faces away
        let mut mesh = generate_plane_uv(2.0, 2.0, 1, 1);
        let base = mesh.positions.len() as u32;
        // Right island: same geometry shifted +X, flipped winding and normals
        for i in 0..4 {
            let pos = mesh.positions[i];
            let uv = mesh.uvs[i];
            mesh.positions.push(pos + Vec3::new(3.0, 0.0, 0.0));
            mesh.normals.push(Vec3::NEG_Y);
            mesh.uvs.push([uv[0] * 0.5 + 0.5, uv[1]]);
        }
        for i in 0..4 {
            mesh.uvs[i][0] *= 0.5;
        }
        mesh.indices.extend_from_slice(&[base, base + 1, base + 2]);
        mesh.indices.extend_from_slice(&[base + 1, base + 3, base + 2]);

        let rig = overhead_rig(&[&mesh], 0.1);
        let source = TextureBuffer::filled(8, 8, [255, 0, 0, 255]);
        let prior = [7, 7, 7, 255];
        let mut target = TextureBuffer::filled(16, 16, prior);

        let stats =
            bake_mesh(&rig, &source, &mesh, &mut target, &BakeSettings::default()).unwrap();
        assert!(stats.texels_written > 0);
        assert!(stats.rejected_backface > 0);

        // Left UV half written, right UV half untouched
        for y in 0..16 {
            assert_eq!(target.get_pixel(2, y), [255, 0, 0, 255]);
            assert_eq!(target.get_pixel(13, y), prior);
        }
    }

    #[test]
    fn test_occluder_blocks_far_plane() {
        // Far plane at y=0, near plane fully covering its center from above
        let far_plane = generate_plane_uv(2.0, 2.0, 1, 1);
        let near_plane = at_position(generate_plane_uv(1.0, 1.0, 1, 1), Vec3::new(0.0, 1.0, 0.0));

        let rig = overhead_rig(&[&far_plane, &near_plane], 0.0);
        let source = TextureBuffer::filled(8, 8, [0, 255, 0, 255]);
        let prior = [1, 2, 3, 255];
        let mut far_tex = TextureBuffer::filled(32, 32, prior);
        let mut near_tex = TextureBuffer::filled(32, 32, prior);

        let mut jobs = [
            BakeJob {
                name: "far".into(),
                mesh: &far_plane,
                target: &mut far_tex,
            },
            BakeJob {
                name: "near".into(),
                mesh: &near_plane,
                target: &mut near_tex,
            },
        ];
        let report = bake_all(&rig, &source, &mut jobs, &BakeSettings::default());
        assert!(report.all_ok(), "{}", report.summary());

        let far_stats = report.outcomes[0].result.as_ref().unwrap();
        assert!(far_stats.rejected_occluded > 0);

        // Center of the far plane shadowed by the near plane; corners clear.
        // The near plane spans the middle half of the far plane's footprint.
        assert_eq!(far_tex.get_pixel(16, 16), prior);
        assert_eq!(far_tex.get_pixel(2, 2), [0, 255, 0, 255]);
        assert_eq!(far_tex.get_pixel(29, 29), [0, 255, 0, 255]);

        // The near plane itself is fully visible
        let near_stats = report.outcomes[1].result.as_ref().unwrap();
        assert_eq!(near_stats.rejected(), 0);
        assert_eq!(near_tex.get_pixel(16, 16), [0, 255, 0, 255]);
    }

    #[test]
    fn test_missing_uv_layer_unchanged() {
        let mut mesh = generate_plane_uv(1.0, 1.0, 1, 1);
        mesh.uvs.clear();

        let rig = overhead_rig(&[&mesh], 0.0);
        let source = TextureBuffer::filled(4, 4, [9, 9, 9, 255]);
        let mut target = checker(8, 8, 2, [1, 1, 1, 255], [250, 250, 250, 255]);
        let before = target.clone();

        let err = bake_mesh(&rig, &source, &mesh, &mut target, &BakeSettings::default())
            .unwrap_err();
        assert!(matches!(err, BakeError::MissingUvLayer { .. }));
        assert_eq!(target, before);
    }

    #[test]
    fn test_invalid_source_image() {
        let plane = generate_plane_uv(1.0, 1.0, 1, 1);
        let rig = overhead_rig(&[&plane], 0.0);
        let source = TextureBuffer::new(0, 0);
        let mut target = TextureBuffer::new(8, 8);

        let err = bake_mesh(&rig, &source, &plane, &mut target, &BakeSettings::default())
            .unwrap_err();
        assert!(matches!(err, BakeError::InvalidSourceImage { .. }));
    }

    #[test]
    fn test_no_visible_geometry() {
        // Rig framing empty space far away from the mesh
        let plane = generate_plane_uv(2.0, 2.0, 1, 1);
        let viewer = ViewerPose::looking_at(
            Vec3::new(100.0, 5.0, 100.0),
            Vec3::new(100.0, 0.0, 100.0),
            Vec3::NEG_Z,
        );
        let rig = CameraRig::from_view(&viewer, 2.0, 0.1, 10.0);

        let source = TextureBuffer::filled(4, 4, [50, 50, 50, 255]);
        let mut target = TextureBuffer::filled(8, 8, [0, 0, 0, 0]);
        let before = target.clone();

        let err = bake_mesh(&rig, &source, &plane, &mut target, &BakeSettings::default())
            .unwrap_err();
        assert!(matches!(err, BakeError::NoVisibleGeometry { .. }));
        assert_eq!(target, before, "failed bake must not touch the target");
    }

    #[test]
    fn test_multi_object_failure_isolated() {
        let good = generate_plane_uv(2.0, 2.0, 1, 1);
        let mut bad = generate_plane_uv(2.0, 2.0, 1, 1);
        bad.uvs.clear();

        let rig = overhead_rig(&[&good, &bad], 0.1);
        let source = TextureBuffer::filled(8, 8, [80, 90, 100, 255]);
        let mut good_tex = TextureBuffer::new(16, 16);
        let mut bad_tex = TextureBuffer::new(16, 16);

        let mut jobs = [
            BakeJob {
                name: "good".into(),
                mesh: &good,
                target: &mut good_tex,
            },
            BakeJob {
                name: "bad".into(),
                mesh: &bad,
                target: &mut bad_tex,
            },
        ];
        let report = bake_all(&rig, &source, &mut jobs, &BakeSettings::default());

        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
        assert!(report.outcomes[0].result.is_ok());
        assert!(matches!(
            report.outcomes[1].result,
            Err(BakeError::MissingUvLayer { .. })
        ));
        assert_eq!(good_tex.get_pixel(8, 8), [80, 90, 100, 255]);
        assert_eq!(bad_tex.get_pixel(8, 8), [0, 0, 0, 0]);
    }

    #[test]
    fn test_alpha_falloff_fades_at_silhouette() {
        let plane = generate_plane_uv(2.0, 2.0, 1, 1);
        let rig = overhead_rig(&[&plane], 0.0);
        let source = TextureBuffer::filled(16, 16, [255, 255, 255, 255]);
        let mut target = TextureBuffer::filled(32, 32, [0, 0, 0, 255]);

        let settings = BakeSettings {
            blend: BlendMode::AlphaFalloff,
            falloff_band: 0.5,
            ..Default::default()
        };
        bake_mesh(&rig, &source, &plane, &mut target, &settings).unwrap();

        // With margin 0 the plane's rim sits on the NDC edge: texels near the
        // border keep most of the prior black, the center goes white.
        let center = target.get_pixel(16, 16)[0];
        let rim = target.get_pixel(0, 16)[0];
        assert!(center > 240, "center {center} should be nearly white");
        assert!(rim < center / 2, "rim {rim} should fade toward the prior color");
    }

    #[test]
    fn test_transformed_mesh_bakes() {
        // Same plane, moved and rotated; the rig fits the world-space bounds
        let mut plane = generate_plane_uv(2.0, 2.0, 2, 2);
        plane.transform = Mat4::from_rotation_translation(
            glam::Quat::from_rotation_y(0.7),
            Vec3::new(5.0, -2.0, 3.0),
        );
        let viewer = ViewerPose::looking_at(
            Vec3::new(5.0, 4.0, 3.0),
            Vec3::new(5.0, -2.0, 3.0),
            Vec3::NEG_Z,
        );
        let rig = CameraRig::fit(&viewer, &plane.world_aabb(), 0.1).unwrap();

        let source = TextureBuffer::filled(8, 8, [11, 22, 33, 255]);
        let mut target = TextureBuffer::new(16, 16);
        let stats =
            bake_mesh(&rig, &source, &plane, &mut target, &BakeSettings::default()).unwrap();
        assert_eq!(stats.texels_written, 16 * 16);
        assert_eq!(target.get_pixel(8, 8), [11, 22, 33, 255]);
    }
}
