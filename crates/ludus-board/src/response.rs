//! Growable buffer for the most recent engine message.

/// Initial capacity of a fresh buffer.
const INITIAL_CAPACITY: usize = 1024;

/// Owned buffer holding the most recent message returned by the engine.
///
/// The content is overwritten on every write; capacity only ever grows. A
/// write that fits within the current capacity does not reallocate, so the
/// buffer amortizes to zero allocations for typical message traffic. Only
/// the content is stable across writes, not the address.
#[derive(Debug)]
pub struct ResponseBuffer {
    content: String,
}

impl ResponseBuffer {
    /// Creates an empty buffer with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            content: String::with_capacity(INITIAL_CAPACITY),
        }
    }

    /// Replaces the content with `message`, growing capacity if needed.
    pub fn write(&mut self, message: &str) {
        self.content.clear();
        self.content.push_str(message);
    }

    /// The current message.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Length of the current message in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns true if no message has been written since the last overwrite.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Current capacity in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.content.capacity()
    }
}

impl Default for ResponseBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_empty_with_default_capacity() {
        let buf = ResponseBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.capacity(), INITIAL_CAPACITY);
    }

    #[test]
    fn write_overwrites_previous_content() {
        let mut buf = ResponseBuffer::new();
        buf.write("first message");
        buf.write("second");
        assert_eq!(buf.as_str(), "second");
        assert_eq!(buf.len(), "second".len());
    }

    #[test]
    fn fitting_write_does_not_reallocate() {
        let mut buf = ResponseBuffer::new();
        buf.write("short");
        let cap = buf.capacity();
        buf.write("another short message");
        assert_eq!(buf.capacity(), cap);
    }

    #[test]
    fn capacity_grows_and_never_shrinks() {
        let mut buf = ResponseBuffer::new();
        let big = "x".repeat(INITIAL_CAPACITY * 4);
        buf.write(&big);
        let grown = buf.capacity();
        assert!(grown >= INITIAL_CAPACITY * 4);

        buf.write("tiny");
        assert_eq!(buf.capacity(), grown);
        assert_eq!(buf.as_str(), "tiny");
    }
}
