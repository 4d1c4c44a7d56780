use std::error::Error;
use std::sync::Arc;

use strata_blocks::{AIR, BlockId, BlockRegistry};
use strata_chunk::VoxelWorld;
use strata_geom::Vec3;
use strata_mesh_cpu::HostMeshSink;
use strata_runtime::{ChunkManager, ManagerStats, TickEvent, UpdateEvent};
use strata_world::WorldPos;

use crate::camera::FlyCamera;
use crate::config::StrataConfig;

const FRAME_DT: f32 = 1.0 / 60.0;
const TICK_DT: f64 = 1.0 / 20.0;
/// Ticks between scripted edits.
const EDIT_EVERY: u64 = 20;
const REACH: f32 = 48.0;
const SPAWN_CLEARANCE: f32 = 12.0;

/// Headless host: a fly camera streams the world while ticks poke holes in it and fill them
/// back in. Meshes land in a [`HostMeshSink`].
pub struct App {
    manager: ChunkManager<HostMeshSink>,
    camera: FlyCamera,
    elapsed: f64,
    tick_accum: f64,
    tick_index: u64,
    frame_index: u64,
    broken: Option<(WorldPos, BlockId)>,
    edits: u64,
    drawn_indices: u64,
}

impl App {
    pub fn new(cfg: &StrataConfig, reg: Arc<BlockRegistry>) -> Result<Self, Box<dyn Error>> {
        let world = VoxelWorld::new(reg, cfg.worldgen.clone())?;
        let mut manager = ChunkManager::new(world, HostMeshSink::new(), cfg.render.clone());
        let spawn = spawn_height(&mut manager, 8, 8);
        log::info!("spawning at (8, {:.1}, 8)", spawn);
        Ok(Self {
            manager,
            camera: FlyCamera::new(Vec3::new(8.0, spawn, 8.0)),
            elapsed: 0.0,
            tick_accum: 0.0,
            tick_index: 0,
            frame_index: 0,
            broken: None,
            edits: 0,
            drawn_indices: 0,
        })
    }

    pub fn frame(&mut self) -> Result<(), Box<dyn Error>> {
        self.camera.update(FRAME_DT);
        self.elapsed += f64::from(FRAME_DT);
        self.tick_accum += f64::from(FRAME_DT);
        while self.tick_accum >= TICK_DT {
            self.tick_accum -= TICK_DT;
            let ev = TickEvent {
                elapsed: self.elapsed,
                tick_index: self.tick_index,
                camera: self.camera.state(),
            };
            self.tick(&ev)?;
            self.tick_index += 1;
        }

        let ev = UpdateEvent {
            elapsed: self.elapsed,
            delta: FRAME_DT,
            frame_index: self.frame_index,
            camera: self.camera.state(),
        };
        let report = self.manager.update(&ev)?;
        if let Some(c) = report.rebuilt {
            log::trace!(target: "chunks", "frame {} rebuilt ({}, {})", self.frame_index, c.cx, c.cz);
        }
        self.render();
        self.frame_index += 1;
        Ok(())
    }

    /// Alternately breaks the block under the crosshair and puts it back.
    fn tick(&mut self, ev: &TickEvent) -> Result<(), Box<dyn Error>> {
        if ev.tick_index % EDIT_EVERY != 0 {
            return Ok(());
        }
        if let Some((pos, id)) = self.broken.take() {
            let out = self.manager.place_block(pos, id);
            log::debug!("tick {} restored {:?}, dirtied {} chunks", ev.tick_index, pos, out.dirty.len());
            self.edits += 1;
            return Ok(());
        }
        let cam = ev.camera;
        let Some(hit) = self.manager.raytrace(cam.position, cam.forward, REACH) else {
            return Ok(());
        };
        let out = self.manager.break_block(hit.block_pos)?;
        log::debug!(
            "tick {} broke {:?} at distance {:.2}, remeshed {} neighbors",
            ev.tick_index,
            hit.block_pos,
            hit.distance,
            out.remeshed.len()
        );
        self.broken = Some((hit.block_pos, hit.block));
        self.edits += 1;
        Ok(())
    }

    /// Walks the draw list the way a renderer would: opaque pass, then blended pass.
    fn render(&mut self) {
        let draws = self.manager.draw_list(self.camera.position);
        let sink = self.manager.sink();
        for d in &draws {
            if sink.buffer(d.buffer).is_none() {
                log::warn!(target: "mesh", "draw list references freed buffer {:?}", d.buffer);
                continue;
            }
            self.drawn_indices += u64::from(d.opaque.indices.count);
        }
        for d in &draws {
            if let Some(t) = d.transparent {
                self.drawn_indices += u64::from(t.indices.count);
            }
        }
    }

    pub fn run(&mut self, frames: u64) -> Result<ManagerStats, Box<dyn Error>> {
        for _ in 0..frames {
            self.frame()?;
            if self.frame_index % 300 == 0 {
                let s = self.manager.stats();
                log::info!(
                    "frame {}: {} loaded / {} records, {} queued, {} generated",
                    self.frame_index,
                    s.loaded,
                    s.records,
                    s.queued,
                    s.generated_chunks
                );
            }
        }
        let stats = self.manager.stats();
        log::info!(
            "done after {} frames: {} rebuilds, {} edits, {} indices drawn, {} bytes of meshes",
            self.frame_index,
            stats.total_rebuilds,
            self.edits,
            self.drawn_indices,
            self.manager.sink().bytes_in_use()
        );
        self.manager.release_meshes();
        Ok(stats)
    }
}

/// Eye height a little above the highest block of column `(x, z)`.
fn spawn_height(manager: &mut ChunkManager<HostMeshSink>, x: i32, z: i32) -> f32 {
    let top = (0..256)
        .rev()
        .find(|&y| manager.block_at(WorldPos::new(x, y, z)) != AIR)
        .unwrap_or(0);
    top as f32 + SPAWN_CLEARANCE
}
