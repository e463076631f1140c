//! UV-mapped primitive generators for test scenes and previews
//!
//! The bake core operates on meshes marshalled in from a host scene; these
//! generators stand in for that marshalling in tests and the demo tool.

use glam::{Mat4, Vec3};
use log::warn;

use crate::mesh::BakeMesh;

/// Generate a UV-mapped plane in the XZ plane facing +Y, centered at the
/// origin
///
/// U runs 0-1 along +X, V runs 0-1 along +Z, covering the full UV square.
pub fn generate_plane_uv(size_x: f32, size_z: f32, subdivisions_x: u32, subdivisions_z: u32) -> BakeMesh {
    let size_x = if size_x <= 0.0 {
        warn!("generate_plane_uv: size_x must be > 0.0, clamping to 0.001");
        0.001
    } else {
        size_x
    };
    let size_z = if size_z <= 0.0 {
        warn!("generate_plane_uv: size_z must be > 0.0, clamping to 0.001");
        0.001
    } else {
        size_z
    };
    let subdivisions_x = subdivisions_x.clamp(1, 256);
    let subdivisions_z = subdivisions_z.clamp(1, 256);

    let mut mesh = BakeMesh::new();
    let normal = Vec3::Y;

    for z in 0..=subdivisions_z {
        for x in 0..=subdivisions_x {
            let u = x as f32 / subdivisions_x as f32;
            let v = z as f32 / subdivisions_z as f32;
            mesh.positions.push(Vec3::new(
                -size_x * 0.5 + u * size_x,
                0.0,
                -size_z * 0.5 + v * size_z,
            ));
            mesh.normals.push(normal);
            mesh.uvs.push([u, v]);
        }
    }

    for z in 0..subdivisions_z {
        for x in 0..subdivisions_x {
            let i0 = z * (subdivisions_x + 1) + x;
            let i1 = i0 + 1;
            let i2 = (z + 1) * (subdivisions_x + 1) + x;
            let i3 = i2 + 1;

            // CCW winding for the +Y normal
            mesh.indices.extend_from_slice(&[i0, i2, i1]);
            mesh.indices.extend_from_slice(&[i1, i2, i3]);
        }
    }

    mesh
}

/// Generate a UV-mapped axis-aligned box centered at the origin
///
/// Each face gets its own non-overlapping island in a 3x2 UV atlas, so baked
/// faces never write over each other. Face order in the atlas: +X, -X, +Y,
/// -Y, +Z, -Z.
pub fn generate_cube_uv(size_x: f32, size_y: f32, size_z: f32) -> BakeMesh {
    let h = Vec3::new(size_x.max(0.001), size_y.max(0.001), size_z.max(0.001)) * 0.5;
    let mut mesh = BakeMesh::new();

    // (normal, tangent u axis, tangent v axis)
    let faces: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];

    // Inset each island slightly so bilinear lookups stay inside their cell
    let inset = 0.002;
    for (face, (normal, u_axis, v_axis)) in faces.iter().enumerate() {
        let cell_u = (face % 3) as f32 / 3.0;
        let cell_v = (face / 3) as f32 / 2.0;
        let base = mesh.positions.len() as u32;

        for corner in 0..4u32 {
            let su = if corner % 2 == 0 { -1.0 } else { 1.0 };
            let sv = if corner < 2 { -1.0 } else { 1.0 };
            let pos = *normal * (*normal * h).length()
                + *u_axis * su * (*u_axis * h).length()
                + *v_axis * sv * (*v_axis * h).length();
            mesh.positions.push(pos);
            mesh.normals.push(*normal);
            mesh.uvs.push([
                cell_u + (su * 0.5 + 0.5).clamp(inset, 1.0 - inset) / 3.0,
                cell_v + (sv * 0.5 + 0.5).clamp(inset, 1.0 - inset) / 2.0,
            ]);
        }
        mesh.indices.extend_from_slice(&[base, base + 1, base + 2]);
        mesh.indices.extend_from_slice(&[base + 1, base + 3, base + 2]);
    }

    mesh
}

/// Convenience: translate a mesh by setting its world transform
pub fn at_position(mut mesh: BakeMesh, position: Vec3) -> BakeMesh {
    mesh.transform = Mat4::from_translation(position);
    mesh
}
