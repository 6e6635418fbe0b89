use bytes::{Bytes, BytesMut};

const CRLF: &[u8] = b"\r\n";
const LAST_CHUNK: &[u8] = b"0\r\n\r\n";

/// Folds a response body stream into two buffers
///
/// `body` receives every chunk verbatim and is what gets decompressed later.
/// `raw` is what a passive observer of the connection would have seen: when
/// the response used chunked transfer coding, the framing the client stripped
/// is put back around each chunk and the stream is closed with the last-chunk
/// marker.
#[derive(Debug)]
pub struct RawCapture {
    chunked: bool,
    body: BytesMut,
    raw: BytesMut,
}

impl RawCapture {
    pub fn new(chunked: bool) -> Self {
        Self { chunked, body: BytesMut::new(), raw: BytesMut::new() }
    }

    /// Record one chunk as received from the transport
    ///
    /// Empty chunks still get a size line when chunked.
    pub fn push(&mut self, chunk: &[u8]) {
        self.body.extend_from_slice(chunk);
        if self.chunked {
            self.raw
                .extend_from_slice(format!("{:x}\r\n", chunk.len()).as_bytes());
            self.raw.extend_from_slice(chunk);
            self.raw.extend_from_slice(CRLF);
        } else {
            self.raw.extend_from_slice(chunk);
        }
    }

    /// Close the stream, returning `(body, raw)`
    pub fn finish(mut self) -> (Bytes, Bytes) {
        if self.chunked {
            self.raw.extend_from_slice(LAST_CHUNK);
        }
        (self.body.freeze(), self.raw.freeze())
    }
}

/// Whether a `Transfer-Encoding` value means the body was chunked
pub fn is_chunked(transfer_encoding: Option<&str>) -> bool {
    transfer_encoding.is_some_and(|te| te.trim().eq_ignore_ascii_case("chunked"))
}
