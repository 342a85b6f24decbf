//! Single-producer/single-consumer split over a shared ring.
//!
//! [`channel`] hands out one [`Producer`] and one [`Consumer`] that own the
//! two cursors of a shared fixed-capacity byte ring. Cursors are monotonic
//! positions published with release/acquire ordering: the producer stores its
//! cursor only after the byte write, so a consumer that observes the new
//! cursor is guaranteed to see the byte. Same policy as the single-threaded
//! ring otherwise: pushing into a full ring is rejected, never overwritten,
//! and nothing blocks.

use std::{
    cell::UnsafeCell,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use crate::RingError;

struct Shared {
    storage: Box<[UnsafeCell<u8>]>,
    // Monotonic positions, reduced modulo capacity on access. Occupancy is
    // write_pos - read_pos, which stays correct across usize wrap.
    write_pos: AtomicUsize,
    read_pos: AtomicUsize,
}

// Safety: a slot is written only by the producer while it is outside the
// unread region, and the cursor handshake publishes the write before the
// consumer can index it.
unsafe impl Send for Shared {}
unsafe impl Sync for Shared {}

impl Shared {
    #[inline]
    fn capacity(&self) -> usize {
        self.storage.len()
    }
}

/// Writer half. `Send` but not `Clone`: exactly one producer exists per ring.
pub struct Producer {
    shared: Arc<Shared>,
}

/// Reader half. `Send` but not `Clone`: exactly one consumer exists per ring.
pub struct Consumer {
    shared: Arc<Shared>,
}

impl std::fmt::Debug for Producer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Producer")
            .field("capacity", &self.shared.capacity())
            .finish()
    }
}

impl std::fmt::Debug for Consumer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Consumer")
            .field("capacity", &self.shared.capacity())
            .finish()
    }
}

/// Creates a connected producer/consumer pair over a ring of `capacity`
/// bytes.
///
/// Fails with [`RingError::InvalidCapacity`] when `capacity` is zero. The
/// shared ring is freed when the second handle drops.
pub fn channel(capacity: usize) -> Result<(Producer, Consumer), RingError> {
    if capacity == 0 {
        return Err(RingError::InvalidCapacity);
    }

    let shared = Arc::new(Shared {
        storage: (0..capacity).map(|_| UnsafeCell::new(0)).collect(),
        write_pos: AtomicUsize::new(0),
        read_pos: AtomicUsize::new(0),
    });

    Ok((
        Producer {
            shared: Arc::clone(&shared),
        },
        Consumer { shared },
    ))
}

impl Producer {
    /// Appends one byte, failing with [`RingError::BufferFull`] when
    /// `capacity` bytes are still unconsumed.
    pub fn push(&mut self, byte: u8) -> Result<(), RingError> {
        let shared = &*self.shared;
        let write = shared.write_pos.load(Ordering::Relaxed);
        let read = shared.read_pos.load(Ordering::Acquire);

        if write.wrapping_sub(read) == shared.capacity() {
            return Err(RingError::BufferFull);
        }

        unsafe { *shared.storage[write % shared.capacity()].get() = byte };
        shared.write_pos.store(write.wrapping_add(1), Ordering::Release);
        Ok(())
    }

    /// Copies as many bytes from `src` as there is free space for and
    /// publishes them in one cursor store. Returns the number copied.
    pub fn write(&mut self, src: &[u8]) -> usize {
        let shared = &*self.shared;
        let write = shared.write_pos.load(Ordering::Relaxed);
        let read = shared.read_pos.load(Ordering::Acquire);

        let free = shared.capacity() - write.wrapping_sub(read);
        let writable = src.len().min(free);
        if writable == 0 {
            return 0;
        }

        for (offset, &byte) in src[..writable].iter().enumerate() {
            let index = write.wrapping_add(offset) % shared.capacity();
            unsafe { *shared.storage[index].get() = byte };
        }

        shared
            .write_pos
            .store(write.wrapping_add(writable), Ordering::Release);
        writable
    }

    /// Bytes that can be pushed before the next push reports full. May grow
    /// concurrently as the consumer drains.
    #[must_use]
    pub fn free_space(&self) -> usize {
        let shared = &*self.shared;
        let write = shared.write_pos.load(Ordering::Relaxed);
        let read = shared.read_pos.load(Ordering::Acquire);
        shared.capacity() - write.wrapping_sub(read)
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.free_space() == 0
    }

    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.shared.capacity()
    }
}

impl Consumer {
    /// Removes and returns the oldest published byte, failing with
    /// [`RingError::BufferEmpty`] when none is available.
    pub fn pop(&mut self) -> Result<u8, RingError> {
        let shared = &*self.shared;
        let read = shared.read_pos.load(Ordering::Relaxed);
        let write = shared.write_pos.load(Ordering::Acquire);

        if write == read {
            return Err(RingError::BufferEmpty);
        }

        let byte = unsafe { *shared.storage[read % shared.capacity()].get() };
        shared.read_pos.store(read.wrapping_add(1), Ordering::Release);
        Ok(byte)
    }

    /// Copies up to `dst.len()` published bytes into `dst` in FIFO order,
    /// freeing their slots in one cursor store. Returns the number copied.
    pub fn read(&mut self, dst: &mut [u8]) -> usize {
        let shared = &*self.shared;
        let read = shared.read_pos.load(Ordering::Relaxed);
        let write = shared.write_pos.load(Ordering::Acquire);

        let readable = dst.len().min(write.wrapping_sub(read));
        if readable == 0 {
            return 0;
        }

        for (offset, slot) in dst[..readable].iter_mut().enumerate() {
            let index = read.wrapping_add(offset) % shared.capacity();
            *slot = unsafe { *shared.storage[index].get() };
        }

        shared
            .read_pos
            .store(read.wrapping_add(readable), Ordering::Release);
        readable
    }

    /// Bytes currently published and unconsumed. May grow concurrently as
    /// the producer pushes.
    #[must_use]
    pub fn len(&self) -> usize {
        let shared = &*self.shared;
        let read = shared.read_pos.load(Ordering::Relaxed);
        let write = shared.write_pos.load(Ordering::Acquire);
        write.wrapping_sub(read)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.shared.capacity()
    }
}
