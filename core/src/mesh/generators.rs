//! Mesh generators for the debug-draw stamps.
//!
//! Every generator is a pure function producing a unit-sized [`CpuMesh`]
//! centered at the origin: boxes span `[-0.5, 0.5]` on every axis, spheres and
//! tubes have radius 0.5, the disc has radius 1. Callers scale the stamps
//! with a TRS transform at draw time.
//!
//! Circles are built from [`CIRCLE_SEGMENTS`] straight segments.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use super::data::{CpuMesh, PrimitiveTopology};

/// Segment count used for full circles in wire and disc stamps.
pub const CIRCLE_SEGMENTS: u32 = 64;

const S: f32 = 0.5;

/// Point on the XZ circle of the given radius at angle `theta`.
///
/// Angles grow from +X towards -Z, so `theta = 90°` lands on `(0, 0, -r)`.
fn ring_point(theta: f32, radius: f32, y: f32) -> [f32; 3] {
    [theta.cos() * radius, y, -theta.sin() * radius]
}

fn segment_angle(i: u32, segments: u32) -> f32 {
    i as f32 * TAU / segments as f32
}

/// Generate a solid unit cube with per-face normals.
///
/// 24 vertices (4 per face) and 36 indices.
pub fn generate_cube() -> CpuMesh {
    // (normal, tangent u, tangent v) per face
    const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ];

    let mut positions = Vec::with_capacity(24);
    let mut normals = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (n, u, v) in FACES {
        let base = positions.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            positions.push([
                (n[0] + u[0] * su + v[0] * sv) * S,
                (n[1] + u[1] * su + v[1] * sv) * S,
                (n[2] + u[2] * su + v[2] * sv) * S,
            ]);
            normals.push(n);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    CpuMesh::new(PrimitiveTopology::TriangleList)
        .with_positions(positions)
        .with_normals(normals)
        .with_indices(indices)
        .with_label("dbgdraw_cube")
}

/// Generate the 12 edges of a unit cube as a line list.
pub fn generate_wire_cube() -> CpuMesh {
    let c = [
        [-S, -S, -S], // bottom near left
        [-S, -S, S],  // bottom far left
        [S, -S, S],   // bottom far right
        [S, -S, -S],  // bottom near right
        [-S, S, -S],  // top near left
        [-S, S, S],   // top far left
        [S, S, S],    // top far right
        [S, S, -S],   // top near right
    ];
    let edges = [
        // Bottom face
        (0, 1),
        (1, 2),
        (2, 3),
        (3, 0),
        // Top face
        (4, 5),
        (5, 6),
        (6, 7),
        (7, 4),
        // Vertical edges
        (6, 2),
        (7, 3),
        (5, 1),
        (4, 0),
    ];

    let positions = edges.iter().flat_map(|&(a, b)| [c[a], c[b]]).collect();

    CpuMesh::new(PrimitiveTopology::LineList)
        .with_positions(positions)
        .with_sequential_indices()
        .with_label("dbgdraw_wire_cube")
}

/// Generate a UV sphere mesh of radius 0.5.
///
/// # Arguments
///
/// * `segments` - Number of longitudinal segments (around the equator)
/// * `rings` - Number of latitudinal rings (from pole to pole)
pub fn generate_sphere(segments: u32, rings: u32) -> CpuMesh {
    let segments = segments.max(3);
    let rings = rings.max(2);
    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();

    for ring in 0..=rings {
        let theta = ring as f32 * PI / rings as f32;
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for segment in 0..=segments {
            let phi = segment as f32 * TAU / segments as f32;
            let x = sin_theta * phi.cos();
            let y = cos_theta;
            let z = sin_theta * phi.sin();

            positions.push([x * S, y * S, z * S]);
            normals.push([x, y, z]);
        }
    }

    for ring in 0..rings {
        for segment in 0..segments {
            let current = ring * (segments + 1) + segment;
            let next = current + segments + 1;

            indices.extend_from_slice(&[current, next, current + 1]);
            indices.extend_from_slice(&[current + 1, next, next + 1]);
        }
    }

    CpuMesh::new(PrimitiveTopology::TriangleList)
        .with_positions(positions)
        .with_normals(normals)
        .with_indices(indices)
        .with_label("dbgdraw_sphere")
}

/// Generate three great circles (around X, Y and Z) of radius 0.5.
pub fn generate_wire_sphere() -> CpuMesh {
    let mut positions = Vec::with_capacity((CIRCLE_SEGMENTS * 6) as usize);

    for i in 0..CIRCLE_SEGMENTS {
        let (sin0, cos0) = segment_angle(i, CIRCLE_SEGMENTS).sin_cos();
        let (sin1, cos1) = segment_angle(i + 1, CIRCLE_SEGMENTS).sin_cos();

        // ring around x
        positions.push([0.0, cos0 * S, -sin0 * S]);
        positions.push([0.0, cos1 * S, -sin1 * S]);
        // ring around y
        positions.push([cos0 * S, 0.0, -sin0 * S]);
        positions.push([cos1 * S, 0.0, -sin1 * S]);
        // ring around z
        positions.push([cos0 * S, -sin0 * S, 0.0]);
        positions.push([cos1 * S, -sin1 * S, 0.0]);
    }

    CpuMesh::new(PrimitiveTopology::LineList)
        .with_positions(positions)
        .with_sequential_indices()
        .with_label("dbgdraw_wire_sphere")
}

/// Generate a solid square-based pyramid with its apex at `+Y`.
pub fn generate_pyramid() -> CpuMesh {
    let top = [0.0, S, 0.0];
    let near_left = [-S, -S, -S];
    let far_left = [-S, -S, S];
    let far_right = [S, -S, S];
    let near_right = [S, -S, -S];

    #[rustfmt::skip]
    let positions = vec![
        // base
        far_right, far_left, near_left,
        near_left, near_right, far_right,
        // sides
        near_left, top, near_right,
        far_right, top, far_left,
        far_left, top, near_left,
        near_right, top, far_right,
    ];

    CpuMesh::new(PrimitiveTopology::TriangleList)
        .with_positions(positions)
        .with_sequential_indices()
        .with_recalculated_normals()
        .with_label("dbgdraw_pyramid")
}

/// Generate the 8 edges of a square-based pyramid as a line list.
pub fn generate_wire_pyramid() -> CpuMesh {
    let top = [0.0, S, 0.0];
    let near_left = [-S, -S, -S];
    let far_left = [-S, -S, S];
    let far_right = [S, -S, S];
    let near_right = [S, -S, -S];

    #[rustfmt::skip]
    let positions = vec![
        near_left, far_left,
        far_left, far_right,
        far_right, near_right,
        near_right, near_left,
        top, near_left,
        top, far_left,
        top, near_right,
        top, far_right,
    ];

    CpuMesh::new(PrimitiveTopology::LineList)
        .with_positions(positions)
        .with_sequential_indices()
        .with_label("dbgdraw_wire_pyramid")
}

/// Generate a filled disc of radius 1 in the XZ plane as a triangle fan
/// expanded to a triangle list.
pub fn generate_disc() -> CpuMesh {
    let mut positions = Vec::with_capacity((CIRCLE_SEGMENTS * 3) as usize);

    for i in 0..CIRCLE_SEGMENTS {
        positions.push([0.0, 0.0, 0.0]);
        positions.push(ring_point(segment_angle(i, CIRCLE_SEGMENTS), 1.0, 0.0));
        positions.push(ring_point(segment_angle(i + 1, CIRCLE_SEGMENTS), 1.0, 0.0));
    }

    CpuMesh::new(PrimitiveTopology::TriangleList)
        .with_positions(positions)
        .with_sequential_indices()
        .with_recalculated_normals()
        .with_label("dbgdraw_disc")
}

/// Generate an open tube (no caps) of radius 0.5 spanning `y = -0.5..0.5`.
pub fn generate_tube() -> CpuMesh {
    let mut positions = Vec::with_capacity((CIRCLE_SEGMENTS * 6) as usize);

    for i in 0..CIRCLE_SEGMENTS {
        let t0 = segment_angle(i, CIRCLE_SEGMENTS);
        let t1 = segment_angle(i + 1, CIRCLE_SEGMENTS);

        positions.push(ring_point(t1, S, S));
        positions.push(ring_point(t0, S, S));
        positions.push(ring_point(t0, S, -S));

        positions.push(ring_point(t1, S, -S));
        positions.push(ring_point(t1, S, S));
        positions.push(ring_point(t0, S, -S));
    }

    CpuMesh::new(PrimitiveTopology::TriangleList)
        .with_positions(positions)
        .with_sequential_indices()
        .with_recalculated_normals()
        .with_label("dbgdraw_tube")
}

/// Generate a wire tube: a ring at the top and bottom plus 8 side lines.
pub fn generate_wire_tube() -> CpuMesh {
    const SIDES: u32 = 8;
    let mut positions = Vec::with_capacity((CIRCLE_SEGMENTS * 4 + SIDES * 2) as usize);

    for i in 0..CIRCLE_SEGMENTS {
        let t0 = segment_angle(i, CIRCLE_SEGMENTS);
        let t1 = segment_angle(i + 1, CIRCLE_SEGMENTS);

        positions.push(ring_point(t0, S, -S));
        positions.push(ring_point(t1, S, -S));

        positions.push(ring_point(t0, S, S));
        positions.push(ring_point(t1, S, S));
    }

    for i in 0..SIDES {
        let t = segment_angle(i, SIDES);
        positions.push(ring_point(t, S, -S));
        positions.push(ring_point(t, S, S));
    }

    CpuMesh::new(PrimitiveTopology::LineList)
        .with_positions(positions)
        .with_sequential_indices()
        .with_label("dbgdraw_wire_tube")
}

/// Generate a wire hemisphere of radius 0.5 whose dome points to `+Y`.
///
/// Consists of the equator ring and four quarter meridians running from the
/// equator to the pole.
pub fn generate_wire_hemisphere() -> CpuMesh {
    const MERIDIANS: u32 = 4;
    let quarter = CIRCLE_SEGMENTS / 4;
    let mut positions = Vec::with_capacity(((CIRCLE_SEGMENTS + MERIDIANS * quarter) * 2) as usize);

    // ring around y, full circle
    for i in 0..CIRCLE_SEGMENTS {
        positions.push(ring_point(segment_angle(i, CIRCLE_SEGMENTS), S, 0.0));
        positions.push(ring_point(segment_angle(i + 1, CIRCLE_SEGMENTS), S, 0.0));
    }

    // sides
    for m in 0..MERIDIANS {
        let (dir_sin, dir_cos) = segment_angle(m, MERIDIANS).sin_cos();
        let point = |phi: f32| {
            let (sin, cos) = phi.sin_cos();
            [dir_cos * cos * S, sin * S, -dir_sin * cos * S]
        };
        for i in 0..quarter {
            let phi0 = i as f32 * FRAC_PI_2 / quarter as f32;
            let phi1 = (i + 1) as f32 * FRAC_PI_2 / quarter as f32;
            positions.push(point(phi0));
            positions.push(point(phi1));
        }
    }

    CpuMesh::new(PrimitiveTopology::LineList)
        .with_positions(positions)
        .with_sequential_indices()
        .with_label("dbgdraw_wire_hemisphere")
}

/// Generate a unit quad in the XZ plane with a thin marker pointing along its
/// `+Y` normal.
pub fn generate_plane() -> CpuMesh {
    const MARKER_HALF_WIDTH: f32 = 0.01;
    const MARKER_HEIGHT: f32 = 0.25;
    let m = MARKER_HALF_WIDTH;
    let tip = [0.0, MARKER_HEIGHT, 0.0];

    #[rustfmt::skip]
    let positions = vec![
        // quad
        [-S, 0.0, -S], [-S, 0.0, S], [S, 0.0, S],
        [S, 0.0, S], [S, 0.0, -S], [-S, 0.0, -S],
        // normal marker
        [0.0, 0.0, -m], tip, [0.0, 0.0, m],
        [-m, 0.0, 0.0], tip, [m, 0.0, 0.0],
    ];

    CpuMesh::new(PrimitiveTopology::TriangleList)
        .with_positions(positions)
        .with_sequential_indices()
        .with_recalculated_normals()
        .with_label("dbgdraw_plane")
}
