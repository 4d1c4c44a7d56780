use std::cmp::Ordering;

use hashbrown::HashMap;
use strata_blocks::{AIR, BlockId};
use strata_chunk::{BlockHit, VoxelWorld};
use strata_geom::Vec3;
use strata_mesh_cpu::{BufferHandle, MeshError, MeshSink, Region, build_chunk_mesh, pack, resort_transparent};
use strata_world::{CHUNK_SIZE, ChunkCoord, LocalPos, WorldPos};

use crate::config::RenderConfig;
use crate::events::UpdateEvent;
use crate::queue::RebuildQueue;
use crate::record::ChunkMeshRecord;

/// What one `update` call did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateReport {
    pub rebuilt: Option<ChunkCoord>,
    pub resorted: Vec<ChunkCoord>,
    /// Records created for chunks that entered the streaming window.
    pub streamed: usize,
}

/// Chunks touched by one edit. Empty when the edit was ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditOutcome {
    pub dirty: Vec<ChunkCoord>,
    /// Neighbors rebuilt before the edit returned.
    pub remeshed: Vec<ChunkCoord>,
}

impl EditOutcome {
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.dirty.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawRange {
    pub vertices: Region,
    pub indices: Region,
}

/// One chunk as a renderer sees it this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChunkDraw {
    pub coord: ChunkCoord,
    /// World offset of the chunk-local vertex positions.
    pub origin: Vec3,
    pub buffer: BufferHandle,
    pub opaque: DrawRange,
    pub transparent: Option<DrawRange>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ManagerStats {
    pub generated_chunks: usize,
    pub records: usize,
    pub loaded: usize,
    pub queued: usize,
    pub total_rebuilds: u64,
}

/// Owns the voxel world, the per-chunk mesh records and the mesh sink, and decides each frame
/// what to stream, rebuild and resort.
#[derive(Debug)]
pub struct ChunkManager<S: MeshSink> {
    world: VoxelWorld,
    sink: S,
    cfg: RenderConfig,
    records: HashMap<ChunkCoord, ChunkMeshRecord>,
    queue: RebuildQueue,
    camera_chunk: Option<ChunkCoord>,
    total_rebuilds: u64,
}

impl<S: MeshSink> ChunkManager<S> {
    pub fn new(world: VoxelWorld, sink: S, cfg: RenderConfig) -> Self {
        Self {
            world,
            sink,
            cfg,
            records: HashMap::new(),
            queue: RebuildQueue::new(),
            camera_chunk: None,
            total_rebuilds: 0,
        }
    }

    #[inline]
    pub fn world(&self) -> &VoxelWorld {
        &self.world
    }

    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[inline]
    pub fn config(&self) -> &RenderConfig {
        &self.cfg
    }

    #[inline]
    pub fn record(&self, coord: ChunkCoord) -> Option<&ChunkMeshRecord> {
        self.records.get(&coord)
    }

    /// One frame of streaming: new records, one rebuild, then capped resorts.
    pub fn update(&mut self, ev: &UpdateEvent) -> Result<UpdateReport, MeshError> {
        let cam = ev.camera.position;
        let center = ChunkCoord::containing_point(cam.x, cam.z);
        let mut report = UpdateReport {
            streamed: self.stream_window(center, cam),
            ..UpdateReport::default()
        };

        for rec in self.records.values() {
            if rec.dirty && !self.queue.contains(rec.coord) {
                self.queue.push(rec.coord);
            }
        }

        if let Some(coord) = self.queue.pop_nearest(cam.x, cam.z) {
            self.rebuild(coord)?;
            report.rebuilt = Some(coord);
        }

        if self.camera_chunk != Some(center) {
            log::trace!(target: "chunks", "camera entered chunk ({}, {})", center.cx, center.cz);
            self.camera_chunk = Some(center);
            for c in center.neighborhood() {
                if let Some(rec) = self.records.get_mut(&c) {
                    if rec.loaded {
                        rec.resort_dirty = true;
                    }
                }
            }
        }

        report.resorted = self.resort_pending(cam)?;
        Ok(report)
    }

    /// Creates dirty records for window chunks that have none; returns how many.
    fn stream_window(&mut self, center: ChunkCoord, cam: Vec3) -> usize {
        let r = self.cfg.stream_radius();
        let reach = (r * CHUNK_SIZE) as f32;
        let ring = self.cfg.frames_in_flight;
        let mut created = 0;
        for dz in -r..=r {
            for dx in -r..=r {
                let coord = center.offset(dx, dz);
                if self.records.contains_key(&coord) {
                    continue;
                }
                let (ox, oz) = coord.origin();
                let (ddx, ddz) = (ox as f32 - cam.x, oz as f32 - cam.z);
                if ddx * ddx + ddz * ddz > reach * reach {
                    continue;
                }
                self.records.insert(coord, ChunkMeshRecord::new(coord, ring));
                self.queue.push(coord);
                created += 1;
            }
        }
        if created > 0 {
            log::debug!(target: "chunks", "streamed {} new chunks around ({}, {})", created, center.cx, center.cz);
        }
        created
    }

    /// Generates the 3x3 around `coord`, meshes it and uploads into the next slot.
    fn rebuild(&mut self, coord: ChunkCoord) -> Result<(), MeshError> {
        self.world.ensure_neighborhood(coord);
        let cpu = build_chunk_mesh(&mut self.world, coord)?;
        let packed = pack(&cpu);
        let ring = self.cfg.frames_in_flight;
        let rec = self
            .records
            .entry(coord)
            .or_insert_with(|| ChunkMeshRecord::new(coord, ring));
        rec.slots.rebuild(&mut self.sink, &packed)?;
        rec.dirty = false;
        rec.loaded = true;
        // Fresh transparent geometry is in build order until sorted.
        if !cpu.transparent.is_empty() {
            rec.resort_dirty = true;
        }
        self.total_rebuilds += 1;
        log::debug!(
            target: "chunks",
            "rebuilt chunk ({}, {}) rev {}: {} bytes",
            coord.cx,
            coord.cz,
            rec.slots.rebuilds(),
            packed.bytes.len()
        );
        Ok(())
    }

    fn resort_pending(&mut self, cam: Vec3) -> Result<Vec<ChunkCoord>, MeshError> {
        let mut pending: Vec<ChunkCoord> = self
            .records
            .values()
            .filter(|r| r.loaded && r.resort_dirty)
            .map(|r| r.coord)
            .collect();
        pending.sort_by(|a, b| {
            a.center_distance_sq(cam.x, cam.z)
                .partial_cmp(&b.center_distance_sq(cam.x, cam.z))
                .unwrap_or(Ordering::Equal)
                .then(a.cmp(b))
        });
        pending.truncate(self.cfg.max_resorts_per_update);
        for &coord in &pending {
            let Some(rec) = self.records.get_mut(&coord) else {
                continue;
            };
            if let Some(mesh) = rec.current().copied() {
                let (ox, oz) = coord.origin();
                resort_transparent(&mut self.sink, &mesh, Vec3::new(ox as f32, 0.0, oz as f32), cam)?;
            }
            // Only cleared once the sink accepted the new order.
            rec.resort_dirty = false;
        }
        Ok(pending)
    }

    fn mark_dirty(&mut self, coord: ChunkCoord) {
        let ring = self.cfg.frames_in_flight;
        let rec = self
            .records
            .entry(coord)
            .or_insert_with(|| ChunkMeshRecord::new(coord, ring));
        rec.dirty = true;
        rec.resort_dirty = true;
    }

    /// Marks the edited chunk and any neighbor sharing the edited block's wall.
    /// Returns the dirty chunks and the neighbors that already had a record.
    fn apply_edit(&mut self, pos: WorldPos, id: BlockId) -> (Vec<ChunkCoord>, Vec<ChunkCoord>) {
        let Some((coord, local)) = self.world.set_block(pos, id) else {
            log::debug!(target: "chunks", "ignored edit outside height range at {:?}", pos);
            return (Vec::new(), Vec::new());
        };
        self.mark_dirty(coord);
        let mut dirty = vec![coord];
        let mut known = Vec::new();
        for n in border_neighbors(coord, local) {
            if self.records.contains_key(&n) {
                known.push(n);
            }
            self.mark_dirty(n);
            dirty.push(n);
        }
        (dirty, known)
    }

    /// Get-or-generate read; out-of-range `y` reads as air.
    #[inline]
    pub fn block_at(&mut self, pos: WorldPos) -> BlockId {
        self.world.block_at(pos)
    }

    /// Clears `pos`. Border neighbors that already have a mesh are rebuilt before returning.
    pub fn break_block(&mut self, pos: WorldPos) -> Result<EditOutcome, MeshError> {
        let (dirty, known) = self.apply_edit(pos, AIR);
        for &n in &known {
            self.rebuild(n)?;
            self.queue.remove(n);
        }
        Ok(EditOutcome { dirty, remeshed: known })
    }

    /// Writes `id` at `pos`; neighbors are only marked, not rebuilt.
    pub fn place_block(&mut self, pos: WorldPos, id: BlockId) -> EditOutcome {
        let (dirty, _) = self.apply_edit(pos, id);
        EditOutcome {
            dirty,
            remeshed: Vec::new(),
        }
    }

    #[inline]
    pub fn max_block_height(&self, coord: ChunkCoord) -> u32 {
        self.world.max_block_height(coord)
    }

    #[inline]
    pub fn num_blocks(&self, coord: ChunkCoord) -> u32 {
        self.world.num_blocks(coord)
    }

    #[inline]
    pub fn raytrace(&self, origin: Vec3, dir: Vec3, max_distance: f32) -> Option<BlockHit> {
        self.world.raytrace(origin, dir, max_distance)
    }

    /// Loaded chunks within render distance of `camera`, farthest first.
    pub fn draw_list(&self, camera: Vec3) -> Vec<ChunkDraw> {
        let reach = (self.cfg.render_distance.max(0) * CHUNK_SIZE) as f32;
        let mut draws: Vec<(f32, ChunkDraw)> = self
            .records
            .values()
            .filter(|r| r.loaded)
            .filter_map(|r| {
                let mesh = r.current()?;
                let buffer = mesh.buffer?;
                let (ox, oz) = r.coord.origin();
                let (dx, dz) = (ox as f32 - camera.x, oz as f32 - camera.z);
                if dx * dx + dz * dz > reach * reach {
                    return None;
                }
                let l = mesh.layout;
                let transparent = (!l.transparent_indices.is_empty()).then_some(DrawRange {
                    vertices: l.transparent_vertices,
                    indices: l.transparent_indices,
                });
                let draw = ChunkDraw {
                    coord: r.coord,
                    origin: Vec3::new(ox as f32, 0.0, oz as f32),
                    buffer,
                    opaque: DrawRange {
                        vertices: l.opaque_vertices,
                        indices: l.opaque_indices,
                    },
                    transparent,
                };
                Some((r.coord.center_distance_sq(camera.x, camera.z), draw))
            })
            .collect();
        draws.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then(a.1.coord.cmp(&b.1.coord))
        });
        draws.into_iter().map(|(_, d)| d).collect()
    }

    pub fn stats(&self) -> ManagerStats {
        ManagerStats {
            generated_chunks: self.world.grid().generated_count(),
            records: self.records.len(),
            loaded: self.records.values().filter(|r| r.loaded).count(),
            queued: self.queue.len(),
            total_rebuilds: self.total_rebuilds,
        }
    }

    /// Frees every mesh buffer held by the records.
    pub fn release_meshes(&mut self) {
        for rec in self.records.values_mut() {
            rec.slots.release_all(&mut self.sink);
            rec.loaded = false;
            rec.dirty = true;
        }
    }
}

/// Horizontal neighbors sharing a wall with `local`.
fn border_neighbors(coord: ChunkCoord, local: LocalPos) -> Vec<ChunkCoord> {
    let last = CHUNK_SIZE as usize - 1;
    let mut out = Vec::with_capacity(2);
    if local.x == 0 {
        out.push(coord.offset(-1, 0));
    }
    if local.x == last {
        out.push(coord.offset(1, 0));
    }
    if local.z == 0 {
        out.push(coord.offset(0, -1));
    }
    if local.z == last {
        out.push(coord.offset(0, 1));
    }
    out
}
