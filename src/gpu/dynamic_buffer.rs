//! Growable GPU buffers.
//!
//! Instance attributes change length whenever the layer's data does. GPU
//! buffers cannot be resized in place, so a write that exceeds capacity
//! allocates a replacement with 2x headroom. Buffers never shrink.

use std::marker::PhantomData;

/// Smallest allocation, in bytes.
const MIN_CAPACITY_BYTES: usize = 64;

/// A GPU buffer of `T` items that grows on demand.
pub struct TypedBuffer<T> {
    buffer: wgpu::Buffer,
    capacity: usize,
    count: usize,
    usage: wgpu::BufferUsages,
    label: String,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> TypedBuffer<T> {
    /// Buffer with room for `capacity` items.
    pub fn with_capacity(
        device: &wgpu::Device,
        label: &str,
        capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let bytes = (capacity * size_of::<T>()).max(MIN_CAPACITY_BYTES);
        Self {
            buffer: allocate(device, label, bytes, usage),
            capacity: bytes / size_of::<T>(),
            count: 0,
            usage,
            label: label.to_owned(),
            _marker: PhantomData,
        }
    }

    /// Replace the buffer contents with `data`, growing if necessary.
    pub fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, data: &[T]) {
        let current = self.capacity * size_of::<T>();
        if let Some(bytes) = grown_size(current, size_of_val(data)) {
            log::debug!("growing '{}' from {current} to {bytes} bytes", self.label);
            self.buffer = allocate(device, &self.label, bytes, self.usage);
            self.capacity = bytes / size_of::<T>();
        }

        if !data.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(data));
        }
        self.count = data.len();
    }

    /// Slice covering only the written items, or `None` when empty.
    pub fn written_slice(&self) -> Option<wgpu::BufferSlice<'_>> {
        if self.count == 0 {
            return None;
        }
        Some(self.buffer.slice(..self.len_bytes() as u64))
    }

    /// Number of items written by the last [`write`](Self::write).
    pub fn count(&self) -> usize {
        self.count
    }

    /// Bytes in use.
    pub fn len_bytes(&self) -> usize {
        self.count * size_of::<T>()
    }
}

/// New allocation size when `needed` bytes do not fit in `current`:
/// double the request, and at least 1 KiB more than before.
fn grown_size(current: usize, needed: usize) -> Option<usize> {
    (needed > current).then(|| (needed * 2).max(current + 1024))
}

fn allocate(
    device: &wgpu::Device,
    label: &str,
    bytes: usize,
    usage: wgpu::BufferUsages,
) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: bytes as u64,
        usage: usage | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fitting_writes_keep_the_allocation() {
        assert_eq!(grown_size(1024, 0), None);
        assert_eq!(grown_size(1024, 1024), None);
    }

    #[test]
    fn overflowing_writes_double_the_request() {
        assert_eq!(grown_size(1024, 4096), Some(8192));
    }

    #[test]
    fn small_overflows_still_grow_by_a_kibibyte() {
        assert_eq!(grown_size(64, 100), Some(64 + 1024));
    }
}
