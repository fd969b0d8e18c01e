#[cfg(feature = "rtrb")]
use rtrb::Consumer;

/// Non-blocking source of raw MIDI bytes.
///
/// The render thread pulls from this once per cycle. Both methods must
/// return immediately: a source with nothing ready reports zero bytes
/// and the caller tries again next cycle. Cross-thread feeding belongs
/// in the transport implementation (e.g. an SPSC ring buffer), never in
/// the unit itself.
pub trait ByteSource {
    /// Number of bytes that could be read right now.
    fn bytes_available(&self) -> usize;

    /// Read up to `dst.len()` bytes into `dst`, returning how many were
    /// actually copied. May return fewer than requested, including zero.
    fn read(&mut self, dst: &mut [u8]) -> usize;
}

/// Lock-free SPSC transport: another thread holds the `Producer` half
/// and pushes raw MIDI bytes as they arrive.
#[cfg(feature = "rtrb")]
impl ByteSource for Consumer<u8> {
    fn bytes_available(&self) -> usize {
        self.slots()
    }

    fn read(&mut self, dst: &mut [u8]) -> usize {
        let n = dst.len().min(self.slots());
        if n == 0 {
            return 0;
        }
        match self.read_chunk(n) {
            Ok(chunk) => {
                let (first, second) = chunk.as_slices();
                let (a, b) = (first.len(), second.len());
                dst[..a].copy_from_slice(first);
                dst[a..a + b].copy_from_slice(second);
                chunk.commit_all();
                a + b
            }
            Err(_) => 0,
        }
    }
}

/// In-process byte source for tests and offline rendering. Bytes pushed
/// here are handed out in FIFO order on the next `read`.
#[derive(Debug, Default)]
pub struct QueuedSource {
    queue: std::collections::VecDeque<u8>,
}

impl QueuedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bytes: &[u8]) {
        self.queue.extend(bytes);
    }
}

impl ByteSource for QueuedSource {
    fn bytes_available(&self) -> usize {
        self.queue.len()
    }

    fn read(&mut self, dst: &mut [u8]) -> usize {
        let n = dst.len().min(self.queue.len());
        for slot in dst[..n].iter_mut() {
            *slot = self.queue.pop_front().unwrap_or(0);
        }
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queued_source_reads_in_fifo_order() {
        let mut source = QueuedSource::new();
        source.push(&[1, 2, 3]);
        source.push(&[4]);

        let mut dst = [0u8; 8];
        assert_eq!(source.bytes_available(), 4);
        assert_eq!(source.read(&mut dst), 4);
        assert_eq!(&dst[..4], &[1, 2, 3, 4]);
        assert_eq!(source.bytes_available(), 0);
    }

    #[test]
    fn queued_source_partial_read() {
        let mut source = QueuedSource::new();
        source.push(&[10, 20, 30]);

        let mut dst = [0u8; 2];
        assert_eq!(source.read(&mut dst), 2);
        assert_eq!(dst, [10, 20]);
        assert_eq!(source.bytes_available(), 1);
    }

    #[cfg(feature = "rtrb")]
    #[test]
    fn ring_buffer_source_drains_across_wrap() {
        let (mut producer, mut consumer) = rtrb::RingBuffer::<u8>::new(4);

        for byte in [1u8, 2, 3] {
            producer.push(byte).unwrap();
        }
        let mut dst = [0u8; 3];
        assert_eq!(consumer.read(&mut dst), 3);

        // Second fill wraps around the ring's internal boundary.
        for byte in [4u8, 5, 6, 7] {
            producer.push(byte).unwrap();
        }
        let mut dst = [0u8; 4];
        assert_eq!(consumer.read(&mut dst), 4);
        assert_eq!(dst, [4, 5, 6, 7]);
    }

    #[cfg(feature = "rtrb")]
    #[test]
    fn ring_buffer_source_empty_read_is_zero() {
        let (_producer, mut consumer) = rtrb::RingBuffer::<u8>::new(4);
        let mut dst = [0u8; 4];
        assert_eq!(consumer.bytes_available(), 0);
        assert_eq!(consumer.read(&mut dst), 0);
    }
}
