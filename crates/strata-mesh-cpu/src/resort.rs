use std::cmp::Ordering;

use strata_geom::Vec3;

use crate::sink::{MeshSink, SinkError};
use crate::slots::GpuMesh;
use crate::vertex::{INDEX_SIZE, Index, Vertex};

/// Reorders 6-index quad groups so the farthest from `camera` come first. Vertex positions
/// are chunk-local and shifted by `origin` before measuring. A trailing partial group is left
/// in place.
pub fn sort_quads_back_to_front(vertices: &[Vertex], indices: &mut [Index], origin: Vec3, camera: Vec3) {
    let whole = indices.len() / 6 * 6;
    let (groups, _) = indices.split_at_mut(whole);
    let mut keyed: Vec<(f32, [Index; 6])> = groups
        .chunks_exact(6)
        .map(|g| {
            let mut sum = Vec3::ZERO;
            for &i in g {
                if let Some(v) = vertices.get(i as usize) {
                    sum += Vec3::from(v.pos);
                }
            }
            let centroid = sum / 6.0 + origin;
            let mut quad = [0; 6];
            quad.copy_from_slice(g);
            (centroid.distance_sq(camera), quad)
        })
        .collect();
    keyed.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
    for (dst, (_, quad)) in groups.chunks_exact_mut(6).zip(keyed) {
        dst.copy_from_slice(&quad);
    }
}

/// Reads the transparent region of `mesh` back from the sink, sorts it for `camera` and
/// writes only the index region back. Returns `false` when there was nothing to sort.
pub fn resort_transparent<S: MeshSink + ?Sized>(
    sink: &mut S,
    mesh: &GpuMesh,
    origin: Vec3,
    camera: Vec3,
) -> Result<bool, SinkError> {
    let layout = mesh.layout;
    let Some(handle) = mesh.buffer else {
        return Ok(false);
    };
    if layout.transparent_indices.is_empty() {
        return Ok(false);
    }
    let vr = layout.transparent_vertices;
    let ir = layout.transparent_indices;
    let vbytes = sink.read_buffer(handle, vr.offset, vr.size)?;
    let ibytes = sink.read_buffer(handle, ir.offset, ir.size)?;
    let vertices: Vec<Vertex> = vbytes
        .chunks_exact(Vertex::SIZE)
        .map(bytemuck::pod_read_unaligned)
        .collect();
    let mut indices: Vec<Index> = ibytes
        .chunks_exact(INDEX_SIZE)
        .map(bytemuck::pod_read_unaligned)
        .collect();
    sort_quads_back_to_front(&vertices, &mut indices, origin, camera);
    sink.write_buffer(handle, ir.offset, bytemuck::cast_slice(&indices))?;
    Ok(true)
}
