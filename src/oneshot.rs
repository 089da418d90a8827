//! One-shot, whole-buffer compression and decompression.
//!
//! This is the stateless API of the library: each call creates a
//! session-scoped codec context, runs the complete operation, and releases
//! the context on every exit path (RAII). Destinations are either
//! caller-fixed (growth disabled; overflowing is an error for encodes and a
//! prefix-truncating stop for decodes) or auto-growing through the
//! [`GrowthPolicy`](crate::buffer::GrowthPolicy).

use zstd::zstd_safe::{self, CCtx, DCtx, InBuffer, OutBuffer};

use crate::buffer::GrowthPolicy;
use crate::config::{prime_encoder, resolve_encode_params, DecodeOptions, EncodeOptions};
use crate::error::{check, Result, RiptideError};

//==================================================================================
// 1. Public API
//==================================================================================

/// Compresses `src` into a fresh auto-growing buffer.
pub fn encode(src: &[u8], options: Option<&EncodeOptions>) -> Result<Vec<u8>> {
    encode_into(src, Vec::new(), None, options)
}

/// Compresses `src` into a fixed-size destination of at most `max_size`
/// bytes. Raises [`RiptideError::OutOfSpace`] when the compressed frame does
/// not fit.
pub fn encode_bounded(
    src: &[u8],
    max_size: usize,
    options: Option<&EncodeOptions>,
) -> Result<Vec<u8>> {
    encode_into(src, Vec::new(), Some(max_size), options)
}

/// Compresses `src` reusing the allocation of `dest`. The destination is
/// fully overwritten and trimmed to the exact compressed length.
pub fn encode_into(
    src: &[u8],
    dest: Vec<u8>,
    max_size: Option<usize>,
    options: Option<&EncodeOptions>,
) -> Result<Vec<u8>> {
    encode_with_policy(src, dest, max_size, options, GrowthPolicy::default())
}

/// Decompresses one frame from `src` into a fresh auto-growing buffer.
pub fn decode(src: &[u8], options: Option<&DecodeOptions>) -> Result<Vec<u8>> {
    decode_into(src, Vec::new(), None, options)
}

/// Decompresses at most `max_size` bytes from `src`. A frame larger than
/// `max_size` yields its first `max_size` decompressed bytes.
pub fn decode_bounded(
    src: &[u8],
    max_size: usize,
    options: Option<&DecodeOptions>,
) -> Result<Vec<u8>> {
    decode_into(src, Vec::new(), Some(max_size), options)
}

/// Decompresses `src` reusing the allocation of `dest`. The destination is
/// fully overwritten and trimmed to the exact decompressed length.
pub fn decode_into(
    src: &[u8],
    dest: Vec<u8>,
    max_size: Option<usize>,
    options: Option<&DecodeOptions>,
) -> Result<Vec<u8>> {
    decode_with_policy(src, dest, max_size, options, GrowthPolicy::default())
}

//==================================================================================
// 2. Core Logic (The "Engine")
//==================================================================================

pub(crate) fn encode_with_policy(
    src: &[u8],
    mut dest: Vec<u8>,
    max_size: Option<usize>,
    options: Option<&EncodeOptions>,
    policy: GrowthPolicy,
) -> Result<Vec<u8>> {
    let params = resolve_encode_params(options, Some(src.len() as u64))?;
    let dict = options.and_then(|o| o.dict.as_deref());

    let mut ctx = CCtx::create();
    prime_encoder(&mut ctx, &params, dict)?;

    // Fixed capacity when bounded, otherwise the codec's worst-case bound for
    // this source length.
    let mut cap = max_size
        .unwrap_or_else(|| zstd_safe::compress_bound(src.len()))
        .min(policy.max_alloc);
    dest.clear();
    dest.resize(cap, 0);

    let mut input = InBuffer::around(src);
    let mut written = 0usize;

    // Feed the whole source. When the destination is capped, running out of
    // room here is already fatal; otherwise grow and continue.
    while input.pos < src.len() {
        let status = {
            let mut output = OutBuffer::around(&mut dest[written..cap]);
            let status = ctx.compress_stream(&mut output, &mut input);
            written += output.pos();
            status
        };
        if input.pos >= src.len() {
            break;
        }
        check("ZSTD_compressStream", status)?;
        if let Some(limit) = max_size {
            return Err(RiptideError::out_of_space("ZSTD_compressStream", limit));
        }
        cap = policy.next_capacity(cap, "ZSTD_compressStream")?;
        log::trace!("one-shot encode: destination grown to {} bytes", cap);
        dest.resize(cap, 0);
    }

    // Drain the frame epilogue until the codec reports completion.
    loop {
        let status = {
            let mut output = OutBuffer::around(&mut dest[written..cap]);
            let status = ctx.end_stream(&mut output);
            written += output.pos();
            status
        };
        let remaining = check("ZSTD_endStream", status)?;
        if remaining == 0 {
            break;
        }
        if let Some(limit) = max_size {
            return Err(RiptideError::out_of_space("ZSTD_endStream", limit));
        }
        cap = policy.next_capacity(cap, "ZSTD_endStream")?;
        log::trace!("one-shot encode: destination grown to {} bytes", cap);
        dest.resize(cap, 0);
    }

    dest.truncate(written);
    Ok(dest)
}

pub(crate) fn decode_with_policy(
    src: &[u8],
    mut dest: Vec<u8>,
    max_size: Option<usize>,
    options: Option<&DecodeOptions>,
    policy: GrowthPolicy,
) -> Result<Vec<u8>> {
    let mut ctx = DCtx::create();
    if let Some(dict) = options.and_then(|o| o.dict.as_deref()) {
        check("ZSTD_DCtx_loadDictionary", ctx.load_dictionary(dict))?;
    }

    let mut cap = max_size.unwrap_or(policy.chunk_size).min(policy.max_alloc);
    dest.clear();
    dest.resize(cap, 0);

    let mut input = InBuffer::around(src);
    let mut written = 0usize;

    loop {
        let status = {
            let mut output = OutBuffer::around(&mut dest[written..cap]);
            let status = ctx.decompress_stream(&mut output, &mut input);
            written += output.pos();
            status
        };
        let hint = check("ZSTD_decompressStream", status)?;
        if hint == 0 {
            // Logical end of frame; trailing input (if any) is ignored.
            break;
        }
        if max_size.is_some() {
            // Fixed-size destination: a single pass, truncating the frame to
            // whatever fit.
            break;
        }
        if written >= policy.max_alloc {
            break;
        }
        cap = policy.next_capacity(cap, "ZSTD_decompressStream")?;
        log::trace!("one-shot decode: destination grown to {} bytes", cap);
        dest.resize(cap, 0);
    }

    dest.truncate(written);
    Ok(dest)
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
