//! Bevelled extrusion of a closed 2D outline
//!
//! The outline is swept along Z: flat caps at the extremes, straight side
//! walls over the body depth, and quarter-circle bevel rings joining them.
//! Caps are triangulated by ear clipping, which handles the non-convex
//! outlines the card uses.

use std::f32::consts::FRAC_PI_2;

use super::MeshData;
use crate::pipeline::MeshVertex;

/// Bevel subdivision steps between a cap and the body
const BEVEL_STEPS: usize = 3;

/// Extrude a closed outline along Z, centered at the origin
pub fn extrude(outline: &[[f32; 2]], depth: f32, bevel_thickness: f32, bevel_size: f32) -> MeshData {
    let mut pts: Vec<[f32; 2]> = outline.to_vec();
    if pts.len() < 3 {
        return MeshData::default();
    }
    // Side and cap windings below assume a counter-clockwise outline
    if polygon_area(&pts) < 0.0 {
        pts.reverse();
    }
    let normals = vertex_normals(&pts);
    let n = pts.len();
    let half = depth / 2.0;
    let full = half + bevel_thickness;

    // Extrusion profile as (z, lateral offset) pairs, back cap to front cap
    let mut profile: Vec<(f32, f32)> = Vec::new();
    profile.push((-full, 0.0));
    for s in 1..=BEVEL_STEPS {
        let t = s as f32 / BEVEL_STEPS as f32;
        let (sin, cos) = (t * FRAC_PI_2).sin_cos();
        profile.push((-half - bevel_thickness * cos, bevel_size * sin));
    }
    profile.push((half, bevel_size));
    for s in 1..=BEVEL_STEPS {
        let t = s as f32 / BEVEL_STEPS as f32;
        let (sin, cos) = (t * FRAC_PI_2).sin_cos();
        profile.push((half + bevel_thickness * sin, bevel_size * cos));
    }

    let mut data = MeshData::default();

    // Side walls: one vertex ring per profile row, normals tilted by the
    // profile slope
    let ring_count = profile.len();
    for (k, &(z, offset)) in profile.iter().enumerate() {
        let (lat, nz) = ring_normal(&profile, k);
        for i in 0..n {
            let [px, py] = pts[i];
            let [nx, ny] = normals[i];
            data.vertices.push(MeshVertex {
                position: [px + nx * offset, py + ny * offset, z],
                normal: normalize3([nx * lat, ny * lat, nz]),
            });
        }
    }
    for k in 0..ring_count - 1 {
        let r0 = (k * n) as u32;
        let r1 = r0 + n as u32;
        for i in 0..n as u32 {
            let j = (i + 1) % n as u32;
            let (a, a1) = (r0 + i, r0 + j);
            let (b, b1) = (r1 + i, r1 + j);
            data.indices.extend_from_slice(&[a, a1, b1, a, b1, b]);
        }
    }

    // Caps
    let tris = triangulate(&pts);
    for &(z, nz) in &[(full, 1.0f32), (-full, -1.0f32)] {
        let base = data.vertices.len() as u32;
        for &[px, py] in &pts {
            data.vertices.push(MeshVertex {
                position: [px, py, z],
                normal: [0.0, 0.0, nz],
            });
        }
        for [a, b, c] in &tris {
            if nz > 0.0 {
                data.indices
                    .extend_from_slice(&[base + *a as u32, base + *b as u32, base + *c as u32]);
            } else {
                data.indices
                    .extend_from_slice(&[base + *a as u32, base + *c as u32, base + *b as u32]);
            }
        }
    }

    data
}

/// Smoothed profile normal (lateral, z) at a profile row
fn ring_normal(profile: &[(f32, f32)], k: usize) -> (f32, f32) {
    let segment = |a: (f32, f32), b: (f32, f32)| {
        let dz = b.0 - a.0;
        let doff = b.1 - a.1;
        let len = (dz * dz + doff * doff).sqrt();
        if len > 0.0 {
            (dz / len, -doff / len)
        } else {
            (1.0, 0.0)
        }
    };
    let mut lat = 0.0;
    let mut nz = 0.0;
    if k > 0 {
        let (l, z) = segment(profile[k - 1], profile[k]);
        lat += l;
        nz += z;
    }
    if k + 1 < profile.len() {
        let (l, z) = segment(profile[k], profile[k + 1]);
        lat += l;
        nz += z;
    }
    let len = (lat * lat + nz * nz).sqrt();
    if len > 0.0 {
        (lat / len, nz / len)
    } else {
        (1.0, 0.0)
    }
}

/// Outward unit normal at each outline vertex (average of edge normals)
fn vertex_normals(pts: &[[f32; 2]]) -> Vec<[f32; 2]> {
    let n = pts.len();
    let edge_normal = |a: [f32; 2], b: [f32; 2]| -> [f32; 2] {
        // Outward for a counter-clockwise outline
        normalize2([b[1] - a[1], a[0] - b[0]])
    };
    (0..n)
        .map(|i| {
            let prev = edge_normal(pts[(i + n - 1) % n], pts[i]);
            let next = edge_normal(pts[i], pts[(i + 1) % n]);
            normalize2([prev[0] + next[0], prev[1] + next[1]])
        })
        .collect()
}

/// Ear-clipping triangulation of a counter-clockwise simple polygon
///
/// Returns index triples into `pts`. Falls back to a fan if clipping stalls
/// on numerically degenerate input.
pub fn triangulate(pts: &[[f32; 2]]) -> Vec<[usize; 3]> {
    let n = pts.len();
    if n < 3 {
        return Vec::new();
    }
    let mut idx: Vec<usize> = (0..n).collect();
    let mut tris = Vec::with_capacity(n - 2);

    'clip: while idx.len() > 3 {
        let m = idx.len();
        for i in 0..m {
            let a = idx[(i + m - 1) % m];
            let b = idx[i];
            let c = idx[(i + 1) % m];
            if is_ear(pts, &idx, a, b, c) {
                tris.push([a, b, c]);
                idx.remove(i);
                continue 'clip;
            }
        }
        // No ear found; fan out the remainder rather than loop forever
        for i in 1..m - 1 {
            tris.push([idx[0], idx[i], idx[i + 1]]);
        }
        return tris;
    }
    tris.push([idx[0], idx[1], idx[2]]);
    tris
}

fn is_ear(pts: &[[f32; 2]], idx: &[usize], a: usize, b: usize, c: usize) -> bool {
    if cross2(pts[a], pts[b], pts[c]) <= 0.0 {
        return false;
    }
    idx.iter()
        .filter(|&&p| p != a && p != b && p != c)
        .all(|&p| !point_in_triangle(pts[p], pts[a], pts[b], pts[c]))
}

fn cross2(a: [f32; 2], b: [f32; 2], c: [f32; 2]) -> f32 {
    (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
}

fn point_in_triangle(p: [f32; 2], a: [f32; 2], b: [f32; 2], c: [f32; 2]) -> bool {
    let d1 = cross2(a, b, p);
    let d2 = cross2(b, c, p);
    let d3 = cross2(c, a, p);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

fn polygon_area(pts: &[[f32; 2]]) -> f32 {
    let n = pts.len();
    let mut area = 0.0;
    for i in 0..n {
        let [x0, y0] = pts[i];
        let [x1, y1] = pts[(i + 1) % n];
        area += x0 * y1 - x1 * y0;
    }
    area * 0.5
}

fn normalize2(v: [f32; 2]) -> [f32; 2] {
    let len = (v[0] * v[0] + v[1] * v[1]).sqrt();
    if len > 0.0 {
        [v[0] / len, v[1] / len]
    } else {
        [1.0, 0.0]
    }
}

fn normalize3(v: [f32; 3]) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len > 0.0 {
        [v[0] / len, v[1] / len, v[2] / len]
    } else {
        [0.0, 0.0, 1.0]
    }
}
