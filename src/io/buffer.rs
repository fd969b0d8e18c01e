use crate::io::transport::ByteSource;

/// Fixed-capacity staging buffer between the byte transport and the
/// message parser.
///
/// Bytes accumulate here until a complete message is available; a
/// partial message simply stays buffered across render cycles. There is
/// deliberately no growth: when the transport has more ready than the
/// remaining capacity, the excess stays in the transport for a later
/// cycle.
///
/// Consumption is front-only. `consume` shifts the unconsumed tail to
/// the front, so the parser always scans from offset zero. This copies
/// more than a ring would, but message traffic is tiny and the flat
/// layout keeps the parser a plain slice scan.
pub struct InputBuffer {
    data: Box<[u8]>,
    len: usize,
}

impl InputBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity].into_boxed_slice(),
            len: 0,
        }
    }

    /// Pull as many bytes as the source has ready, bounded by remaining
    /// capacity. Non-blocking; returns the number of bytes appended.
    pub fn refill(&mut self, source: &mut impl ByteSource) -> usize {
        if source.bytes_available() == 0 || self.len == self.data.len() {
            return 0;
        }
        let appended = source.read(&mut self.data[self.len..]);
        self.len += appended;
        appended
    }

    /// Drop the first `n` bytes and compact the remainder to the front.
    ///
    /// A no-op when `n` exceeds the current length; callers only pass
    /// counts they have already scanned past.
    pub fn consume(&mut self, n: usize) {
        if n > self.len {
            return;
        }
        self.data.copy_within(n..self.len, 0);
        self.len -= n;
    }

    /// The currently buffered bytes, oldest first.
    pub fn bytes(&self) -> &[u8] {
        &self.data[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }
}
