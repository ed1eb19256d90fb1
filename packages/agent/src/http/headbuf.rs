//! Pre-serialized head buffer reconciliation
//!
//! HTTP pipelines that render the request head before the connector rewrites
//! the target are left holding stale bytes in their write queue. Two queue
//! shapes exist in practice: raw string chunks, and framed records carrying
//! byte payloads. Both keep the entire head inside the first element, so
//! patching replaces that element's bytes up to the blank line and leaves
//! every byte after it alone.

use bytes::Bytes;

/// One framed entry in a record-based write queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteRecord {
    /// Payload bytes queued for the socket.
    pub data: Bytes,
}

impl WriteRecord {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }
}

/// A pre-serialized request awaiting the socket, in either queue shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadBuffer {
    /// Raw string chunks; the head leads the first chunk, possibly followed
    /// by body bytes.
    Chunks(Vec<String>),
    /// Framed records; same layout, byte payloads.
    Records(Vec<WriteRecord>),
}

impl HeadBuffer {
    /// Replace the serialized head in the first element with `new_head`,
    /// preserving any body bytes after the blank line.
    ///
    /// An empty queue, or a first element with no complete head terminator,
    /// is left untouched; corrupting a partial head would be worse than
    /// writing the stale one. Returns `true` when a head was replaced.
    pub fn patch(&mut self, new_head: &str) -> bool {
        match self {
            HeadBuffer::Chunks(chunks) => {
                let Some(first) = chunks.first_mut() else {
                    return false;
                };
                let Some(body_start) = head_end(first.as_bytes()) else {
                    tracing::debug!(
                        target: "viaduct::http",
                        "First write chunk has no head terminator, leaving buffer untouched"
                    );
                    return false;
                };
                let mut replaced =
                    String::with_capacity(new_head.len() + first.len() - body_start);
                replaced.push_str(new_head);
                replaced.push_str(&first[body_start..]);
                *first = replaced;
                true
            }
            HeadBuffer::Records(records) => {
                let Some(first) = records.first_mut() else {
                    return false;
                };
                let Some(body_start) = head_end(&first.data) else {
                    tracing::debug!(
                        target: "viaduct::http",
                        "First write record has no head terminator, leaving buffer untouched"
                    );
                    return false;
                };
                let mut replaced =
                    Vec::with_capacity(new_head.len() + first.data.len() - body_start);
                replaced.extend_from_slice(new_head.as_bytes());
                replaced.extend_from_slice(&first.data[body_start..]);
                first.data = Bytes::from(replaced);
                true
            }
        }
    }

    /// Concatenate the queued bytes in order, as they would reach the wire.
    #[must_use]
    pub fn to_bytes(&self) -> Bytes {
        match self {
            HeadBuffer::Chunks(chunks) => {
                let mut out = Vec::with_capacity(chunks.iter().map(String::len).sum());
                for chunk in chunks {
                    out.extend_from_slice(chunk.as_bytes());
                }
                Bytes::from(out)
            }
            HeadBuffer::Records(records) => {
                let mut out =
                    Vec::with_capacity(records.iter().map(|record| record.data.len()).sum());
                for record in records {
                    out.extend_from_slice(&record.data);
                }
                Bytes::from(out)
            }
        }
    }
}

/// Index just past the `\r\n\r\n` head terminator, if the buffer has one.
fn head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4)
        .position(|window| window == b"\r\n\r\n")
        .map(|idx| idx + 4)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STALE: &str = "GET /index.html HTTP/1.1\r\nhost: example.com\r\n\r\n";
    const FRESH: &str = "GET http://example.com/index.html HTTP/1.1\r\nhost: example.com\r\n\r\n";

    #[test]
    fn test_patch_chunks_replaces_head_only() {
        let mut buffer = HeadBuffer::Chunks(vec![
            format!("{STALE}body bytes"),
            "second chunk".to_owned(),
        ]);
        assert!(buffer.patch(FRESH));
        let HeadBuffer::Chunks(chunks) = &buffer else {
            panic!("variant must not change");
        };
        assert_eq!(chunks[0], format!("{FRESH}body bytes"));
        assert_eq!(chunks[1], "second chunk");
    }

    #[test]
    fn test_patch_records_replaces_head_only() {
        let mut buffer = HeadBuffer::Records(vec![
            WriteRecord::new(format!("{STALE}body bytes")),
            WriteRecord::new(&b"second record"[..]),
        ]);
        assert!(buffer.patch(FRESH));
        let HeadBuffer::Records(records) = &buffer else {
            panic!("variant must not change");
        };
        assert_eq!(records[0].data, Bytes::from(format!("{FRESH}body bytes")));
        assert_eq!(records[1].data, Bytes::from_static(b"second record"));
    }

    #[test]
    fn test_patch_preserves_crlf_inside_body() {
        let body = "field=1\r\nfield=2\r\n\r\ntrailer";
        let mut buffer = HeadBuffer::Chunks(vec![format!("{STALE}{body}")]);
        assert!(buffer.patch(FRESH));
        let HeadBuffer::Chunks(chunks) = &buffer else {
            panic!("variant must not change");
        };
        assert_eq!(chunks[0], format!("{FRESH}{body}"));
    }

    #[test]
    fn test_patch_without_terminator_is_noop() {
        let partial = "GET /index.html HTTP/1.1\r\nhost: exam";
        let mut buffer = HeadBuffer::Chunks(vec![partial.to_owned()]);
        assert!(!buffer.patch(FRESH));
        assert_eq!(buffer, HeadBuffer::Chunks(vec![partial.to_owned()]));

        let mut records = HeadBuffer::Records(vec![WriteRecord::new(partial)]);
        assert!(!records.patch(FRESH));
        assert_eq!(
            records,
            HeadBuffer::Records(vec![WriteRecord::new(partial)])
        );
    }

    #[test]
    fn test_patch_empty_queue_is_noop() {
        let mut chunks = HeadBuffer::Chunks(Vec::new());
        assert!(!chunks.patch(FRESH));
        let mut records = HeadBuffer::Records(Vec::new());
        assert!(!records.patch(FRESH));
    }

    #[test]
    fn test_head_exactly_terminator_no_body() {
        let mut buffer = HeadBuffer::Chunks(vec![STALE.to_owned()]);
        assert!(buffer.patch(FRESH));
        assert_eq!(buffer.to_bytes(), Bytes::from_static(FRESH.as_bytes()));
    }

    #[test]
    fn test_to_bytes_concatenates_in_order() {
        let buffer = HeadBuffer::Records(vec![
            WriteRecord::new(&b"one "[..]),
            WriteRecord::new(&b"two"[..]),
        ]);
        assert_eq!(buffer.to_bytes(), Bytes::from_static(b"one two"));
    }
}
