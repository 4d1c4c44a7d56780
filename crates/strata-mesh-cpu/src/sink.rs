use hashbrown::HashMap;
use thiserror::Error;

/// Opaque id of a buffer owned by a [`MeshSink`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferHandle(pub u64);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SinkError {
    #[error("out of buffer memory: requested {requested} bytes, {available} available")]
    OutOfMemory { requested: u64, available: u64 },
    #[error("unknown buffer handle {0:?}")]
    InvalidHandle(BufferHandle),
    #[error("{len} bytes at offset {offset} do not fit buffer {handle:?} of {size} bytes")]
    OutOfBounds {
        handle: BufferHandle,
        offset: u64,
        len: u64,
        size: u64,
    },
    #[error("device error: {0}")]
    Device(String),
}

/// Where packed chunk meshes live once built. A GPU backend maps these calls onto device
/// buffers; [`HostMeshSink`] keeps them in memory.
pub trait MeshSink {
    fn create_buffer(&mut self, size: u64) -> Result<BufferHandle, SinkError>;
    fn write_buffer(&mut self, handle: BufferHandle, offset: u64, data: &[u8]) -> Result<(), SinkError>;
    fn read_buffer(&mut self, handle: BufferHandle, offset: u64, len: u64) -> Result<Vec<u8>, SinkError>;
    /// Releases `handle`. Unknown handles are ignored.
    fn destroy_buffer(&mut self, handle: BufferHandle);
}

/// In-memory sink with an optional byte budget.
#[derive(Debug, Default)]
pub struct HostMeshSink {
    buffers: HashMap<BufferHandle, Vec<u8>>,
    next_id: u64,
    budget: Option<u64>,
    in_use: u64,
}

impl HostMeshSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_budget(bytes: u64) -> Self {
        Self {
            budget: Some(bytes),
            ..Self::default()
        }
    }

    #[inline]
    pub fn buffer(&self, handle: BufferHandle) -> Option<&[u8]> {
        self.buffers.get(&handle).map(Vec::as_slice)
    }

    #[inline]
    pub fn live_buffers(&self) -> usize {
        self.buffers.len()
    }

    #[inline]
    pub fn bytes_in_use(&self) -> u64 {
        self.in_use
    }

    fn check_range(&self, handle: BufferHandle, offset: u64, len: u64) -> Result<(), SinkError> {
        let size = self
            .buffers
            .get(&handle)
            .ok_or(SinkError::InvalidHandle(handle))?
            .len() as u64;
        match offset.checked_add(len) {
            Some(end) if end <= size => Ok(()),
            _ => Err(SinkError::OutOfBounds {
                handle,
                offset,
                len,
                size,
            }),
        }
    }
}

impl MeshSink for HostMeshSink {
    fn create_buffer(&mut self, size: u64) -> Result<BufferHandle, SinkError> {
        if let Some(budget) = self.budget {
            let available = budget.saturating_sub(self.in_use);
            if size > available {
                return Err(SinkError::OutOfMemory {
                    requested: size,
                    available,
                });
            }
        }
        let handle = BufferHandle(self.next_id);
        self.next_id += 1;
        self.buffers.insert(handle, vec![0; size as usize]);
        self.in_use += size;
        Ok(handle)
    }

    fn write_buffer(&mut self, handle: BufferHandle, offset: u64, data: &[u8]) -> Result<(), SinkError> {
        self.check_range(handle, offset, data.len() as u64)?;
        if let Some(buf) = self.buffers.get_mut(&handle) {
            let start = offset as usize;
            buf[start..start + data.len()].copy_from_slice(data);
        }
        Ok(())
    }

    fn read_buffer(&mut self, handle: BufferHandle, offset: u64, len: u64) -> Result<Vec<u8>, SinkError> {
        self.check_range(handle, offset, len)?;
        let start = offset as usize;
        Ok(self
            .buffers
            .get(&handle)
            .map(|buf| buf[start..start + len as usize].to_vec())
            .unwrap_or_default())
    }

    fn destroy_buffer(&mut self, handle: BufferHandle) {
        if let Some(buf) = self.buffers.remove(&handle) {
            self.in_use -= buf.len() as u64;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_rejects_oversized_buffers() {
        let mut sink = HostMeshSink::with_budget(100);
        let a = sink.create_buffer(60).unwrap();
        assert_eq!(
            sink.create_buffer(50),
            Err(SinkError::OutOfMemory {
                requested: 50,
                available: 40
            })
        );
        sink.destroy_buffer(a);
        assert!(sink.create_buffer(50).is_ok());
        assert_eq!(sink.bytes_in_use(), 50);
    }

    #[test]
    fn writes_are_bounds_checked() {
        let mut sink = HostMeshSink::new();
        let h = sink.create_buffer(8).unwrap();
        sink.write_buffer(h, 4, &[1, 2, 3, 4]).unwrap();
        assert_eq!(sink.read_buffer(h, 2, 4).unwrap(), vec![0, 0, 1, 2]);
        assert!(matches!(
            sink.write_buffer(h, 6, &[0; 4]),
            Err(SinkError::OutOfBounds { .. })
        ));
        sink.destroy_buffer(h);
        assert_eq!(sink.read_buffer(h, 0, 1), Err(SinkError::InvalidHandle(h)));
    }
}
