//! Content decompression for captured response bodies.
//!
//! Only the encodings servers actually emit are handled: gzip, deflate (both
//! zlib-wrapped and raw) and brotli. Anything else is passed through untouched
//! so the browser receives exactly what the server sent.

use std::io::Read;

use bytes::Bytes;
use flate2::read::{DeflateDecoder, MultiGzDecoder, ZlibDecoder};

use crate::error::DecodeError;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Bit 3 of a zlib CMF byte is always set (CM = 8, deflate). Raw deflate
/// streams mislabelled as `deflate` usually have it clear.
const ZLIB_CM_BIT: u8 = 0x08;

const BROTLI_BUFFER_SIZE: usize = 4096;

/// Content codings understood by [`decompress`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    Gzip,
    Deflate,
    Brotli,
    /// Absent or unrecognized: the body is passed through
    Identity,
}

impl ContentEncoding {
    pub fn from_header(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return ContentEncoding::Identity;
        };
        let value = value.trim();
        if value.eq_ignore_ascii_case("gzip") {
            ContentEncoding::Gzip
        } else if value.eq_ignore_ascii_case("deflate") {
            ContentEncoding::Deflate
        } else if value.eq_ignore_ascii_case("br") {
            ContentEncoding::Brotli
        } else {
            ContentEncoding::Identity
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentEncoding::Gzip => "gzip",
            ContentEncoding::Deflate => "deflate",
            ContentEncoding::Brotli => "br",
            ContentEncoding::Identity => "identity",
        }
    }
}

/// Decompress `body` according to the declared `Content-Encoding`.
///
/// The whole body is decoded at once; on failure nothing is returned.
pub fn decompress(body: Bytes, encoding: Option<&str>) -> Result<Bytes, DecodeError> {
    let encoding = ContentEncoding::from_header(encoding);
    if body.is_empty() {
        return Ok(body);
    }

    let decoded = match encoding {
        ContentEncoding::Identity => return Ok(body),
        ContentEncoding::Gzip => unzip(&body),
        ContentEncoding::Deflate => {
            if body[0] & ZLIB_CM_BIT == 0 {
                read_all(DeflateDecoder::new(&body[..]))
            } else {
                unzip(&body)
            }
        }
        ContentEncoding::Brotli => {
            read_all(brotli::Decompressor::new(&body[..], BROTLI_BUFFER_SIZE))
        }
    };

    decoded
        .map(Bytes::from)
        .map_err(|source| DecodeError { encoding: encoding.as_str(), source })
}

/// gzip or zlib, picked from the gzip magic bytes
fn unzip(body: &[u8]) -> std::io::Result<Vec<u8>> {
    if body.starts_with(&GZIP_MAGIC) {
        read_all(MultiGzDecoder::new(body))
    } else {
        read_all(ZlibDecoder::new(body))
    }
}

fn read_all<R: Read>(mut reader: R) -> std::io::Result<Vec<u8>> {
    let mut out = Vec::new();
    reader.read_to_end(&mut out)?;
    Ok(out)
}
