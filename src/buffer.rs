// SPDX-License-Identifier: Apache-2.0 OR MIT
// Size-capped fallback buffer used when no listener drains the logs

use std::sync::Mutex;

/// Default accumulation cap in bytes.
pub const DEFAULT_BUFFER_CAPACITY: usize = 512;

/// Marker written at the head of the buffer after old content was dropped.
pub const TRUNCATION_MARKER: &str = "[.]";

/// Accumulates log text up to a fixed cap, trimming from the oldest end.
///
/// Used as the fallback sink when no listener is registered. Writers append;
/// a reader takes the whole accumulated buffer with [`drain_and_reset`],
/// leaving an empty one behind. When an append pushes the size past the cap,
/// the oldest content is dropped and the buffer head is overwritten with
/// [`TRUNCATION_MARKER`] so a downstream reader can tell data was lost.
///
/// [`drain_and_reset`]: BoundedBuffer::drain_and_reset
pub struct BoundedBuffer {
    contents: Mutex<Option<String>>,
    capacity: usize,
}

impl BoundedBuffer {
    /// Create a buffer capped at `capacity` bytes.
    ///
    /// # Panics
    /// Panics if `capacity` is smaller than the truncation marker.
    pub fn new(capacity: usize) -> Self {
        assert!(
            capacity >= TRUNCATION_MARKER.len(),
            "capacity must fit the truncation marker"
        );
        Self {
            contents: Mutex::new(None),
            capacity,
        }
    }

    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_BUFFER_CAPACITY)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append `text`, trimming the oldest content when the cap is exceeded.
    /// The storage is recreated lazily on the first write after a drain.
    pub fn write(&self, text: &str) {
        let mut contents = self.contents.lock().unwrap();
        let buffer = contents.get_or_insert_with(String::new);
        buffer.push_str(text);
        if buffer.len() > self.capacity {
            truncate_front(buffer, self.capacity);
        }
    }

    /// Take everything accumulated since the last drain, leaving the buffer
    /// empty. Returns `None` when nothing was written. The caller owns the
    /// returned string.
    pub fn drain_and_reset(&self) -> Option<String> {
        self.contents.lock().unwrap().take()
    }
}

/// Trim `text` from the front to at most `capacity` bytes and overwrite the
/// head with the truncation marker. Cuts land on char boundaries, so the
/// result may come out a few bytes under the cap.
fn truncate_front(text: &mut String, capacity: usize) {
    let mut cut = text.len().saturating_sub(capacity);
    while cut < text.len() && !text.is_char_boundary(cut) {
        cut += 1;
    }
    text.drain(..cut);

    let mut head = TRUNCATION_MARKER.len().min(text.len());
    while head < text.len() && !text.is_char_boundary(head) {
        head += 1;
    }
    text.replace_range(..head, TRUNCATION_MARKER);
}
