use crate::pack::{MeshLayout, PackedMesh};
use crate::sink::{BufferHandle, MeshSink, SinkError};

/// A packed mesh resident in a sink. `buffer` is `None` for a chunk with no geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GpuMesh {
    pub buffer: Option<BufferHandle>,
    pub layout: MeshLayout,
}

impl GpuMesh {
    pub fn upload<S: MeshSink + ?Sized>(sink: &mut S, packed: &PackedMesh) -> Result<Self, SinkError> {
        if packed.bytes.is_empty() {
            return Ok(Self {
                buffer: None,
                layout: packed.layout,
            });
        }
        let handle = sink.create_buffer(packed.bytes.len() as u64)?;
        if let Err(e) = sink.write_buffer(handle, 0, &packed.bytes) {
            sink.destroy_buffer(handle);
            return Err(e);
        }
        Ok(Self {
            buffer: Some(handle),
            layout: packed.layout,
        })
    }

    pub fn release<S: MeshSink + ?Sized>(self, sink: &mut S) {
        if let Some(h) = self.buffer {
            sink.destroy_buffer(h);
        }
    }
}

/// Ring of mesh slots, one per frame in flight. Rebuild `n` writes slot `n % ring`, and
/// readers always see the slot of the latest completed rebuild, so a frame still drawing
/// an older slot is never overwritten under it.
#[derive(Debug)]
pub struct MeshSlots {
    slots: Vec<Option<GpuMesh>>,
    rebuilds: u64,
}

impl MeshSlots {
    pub fn new(ring: usize) -> Self {
        Self {
            slots: vec![None; ring.max(1)],
            rebuilds: 0,
        }
    }

    #[inline]
    pub fn ring_size(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    #[inline]
    pub fn write_index(&self) -> usize {
        (self.rebuilds % self.slots.len() as u64) as usize
    }

    /// `None` until the first rebuild lands.
    #[inline]
    pub fn read_index(&self) -> Option<usize> {
        let last = self.rebuilds.checked_sub(1)?;
        Some((last % self.slots.len() as u64) as usize)
    }

    pub fn current(&self) -> Option<&GpuMesh> {
        self.slots.get(self.read_index()?)?.as_ref()
    }

    /// Stores `mesh` in the write slot and returns the mesh it displaced.
    pub fn commit(&mut self, mesh: GpuMesh) -> Option<GpuMesh> {
        let idx = self.write_index();
        let old = self.slots[idx].replace(mesh);
        self.rebuilds += 1;
        old
    }

    /// Uploads `packed` into the next slot, freeing whatever that slot held before.
    pub fn rebuild<S: MeshSink + ?Sized>(&mut self, sink: &mut S, packed: &PackedMesh) -> Result<(), SinkError> {
        let mesh = GpuMesh::upload(sink, packed)?;
        if let Some(old) = self.commit(mesh) {
            old.release(sink);
        }
        Ok(())
    }

    /// Frees every slot.
    pub fn release_all<S: MeshSink + ?Sized>(&mut self, sink: &mut S) {
        for slot in &mut self.slots {
            if let Some(mesh) = slot.take() {
                mesh.release(sink);
            }
        }
    }
}
