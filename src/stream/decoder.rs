// In: src/stream/decoder.rs

//! Pull-based streaming decompression session.

use std::io::Read;

use zstd::zstd_safe::{DCtx, InBuffer, OutBuffer};

use crate::buffer::{GrowthPolicy, MAX_ALLOC};
use crate::config::DecodeOptions;
use crate::error::{check, Result, RiptideError};

/// Where the compressed bytes come from.
enum InputCursor<R> {
    /// The whole stream is in memory and is consumed in place.
    Buffer { data: Vec<u8>, pos: usize },
    /// A pull-style port, staged through one codec-recommended chunk.
    /// `eof` latches once the port reports end-of-data.
    Port {
        port: R,
        chunk: Vec<u8>,
        filled: usize,
        pos: usize,
        eof: bool,
    },
}

impl<R: Read> InputCursor<R> {
    fn is_spent(&self) -> bool {
        match self {
            InputCursor::Buffer { data, pos } => *pos >= data.len(),
            InputCursor::Port { filled, pos, .. } => *pos >= *filled,
        }
    }

    /// Refills the cursor from the port. Returns `false` once no more input
    /// will ever arrive (in-memory buffers exhaust immediately).
    fn refill(&mut self) -> Result<bool> {
        match self {
            InputCursor::Buffer { .. } => Ok(false),
            InputCursor::Port {
                port,
                chunk,
                filled,
                pos,
                eof,
            } => {
                if *eof {
                    return Ok(false);
                }
                let n = port.read(&mut chunk[..])?;
                if n == 0 {
                    *eof = true;
                    return Ok(false);
                }
                *filled = n;
                *pos = 0;
                Ok(true)
            }
        }
    }

    fn remaining(&self) -> &[u8] {
        match self {
            InputCursor::Buffer { data, pos } => &data[*pos..],
            InputCursor::Port {
                chunk, filled, pos, ..
            } => &chunk[*pos..*filled],
        }
    }

    fn advance(&mut self, consumed: usize) {
        match self {
            InputCursor::Buffer { pos, .. } => *pos += consumed,
            InputCursor::Port { pos, .. } => *pos += consumed,
        }
    }
}

/// An incremental decompression session.
///
/// Constructed either over a whole in-memory stream
/// ([`Decoder::from_bytes`]) or over a pull-style source ([`Decoder::new`]).
/// Reads are bounded (`Some(n)`: at most `n` bytes, no growth) or unbounded
/// (`None`: grow through the [`GrowthPolicy`] until the frame ends).
pub struct Decoder<R> {
    ctx: DCtx<'static>,
    input: InputCursor<R>,
    policy: GrowthPolicy,
}

impl Decoder<std::io::Empty> {
    /// Creates a session over an in-memory compressed stream.
    pub fn from_bytes(data: impl Into<Vec<u8>>, options: Option<&DecodeOptions>) -> Result<Self> {
        let data = data.into();
        Self::build(InputCursor::Buffer { data, pos: 0 }, options)
    }
}

impl<R: Read> Decoder<R> {
    /// Creates a session pulling compressed bytes from `port`.
    pub fn new(port: R, options: Option<&DecodeOptions>) -> Result<Self> {
        let chunk = DCtx::in_size().min(MAX_ALLOC);
        Self::build(
            InputCursor::Port {
                port,
                chunk: vec![0u8; chunk],
                filled: 0,
                pos: 0,
                eof: false,
            },
            options,
        )
    }

    fn build(input: InputCursor<R>, options: Option<&DecodeOptions>) -> Result<Self> {
        let mut ctx = DCtx::create();
        // The context copies the dictionary internally, so the session keeps
        // no second copy of its own.
        if let Some(dict) = options.and_then(|o| o.dict.as_deref()) {
            check("ZSTD_DCtx_loadDictionary", ctx.load_dictionary(dict))?;
        }
        Ok(Decoder {
            ctx,
            input,
            policy: GrowthPolicy::default(),
        })
    }

    /// Decompresses up to `size` bytes (`None` = until the frame ends).
    ///
    /// Returns `Ok(None)` - distinct from an empty chunk - once no bytes
    /// could be produced because the source is exhausted. `read(Some(0))`
    /// returns an empty chunk immediately.
    pub fn read(&mut self, size: Option<usize>) -> Result<Option<Vec<u8>>> {
        let mut dest = Vec::new();
        if self.read_into(size, &mut dest)? {
            Ok(Some(dest))
        } else {
            Ok(None)
        }
    }

    /// Like [`read`](Self::read), reusing the allocation of `dest`. The
    /// destination is fully overwritten and trimmed; the return value is
    /// `false` when no bytes were produced (end of stream).
    pub fn read_into(&mut self, size: Option<usize>, dest: &mut Vec<u8>) -> Result<bool> {
        if size == Some(0) {
            dest.clear();
            return Ok(true);
        }

        let bound = size.map(|n| n.min(self.policy.max_alloc));
        let mut cap = match bound {
            Some(n) => n,
            None => (DCtx::out_size() * 2).min(self.policy.max_alloc),
        };
        dest.clear();
        dest.resize(cap, 0);

        let mut written = 0usize;
        loop {
            if let Some(bound) = bound {
                if written >= bound {
                    break;
                }
            }

            // Refill the input cursor when it is spent; stop once the source
            // has nothing left.
            if self.input.is_spent() && !self.input.refill()? {
                break;
            }

            // Only reachable with an unbounded destination.
            if written == cap {
                cap = self.policy.next_capacity(cap, "ZSTD_decompressStream")?;
                log::trace!("decoder read: destination grown to {} bytes", cap);
                dest.resize(cap, 0);
            }

            let status = {
                let mut inb = InBuffer::around(self.input.remaining());
                let mut output = OutBuffer::around(&mut dest[written..cap]);
                let status = self.ctx.decompress_stream(&mut output, &mut inb);
                written += output.pos();
                let consumed = inb.pos;
                self.input.advance(consumed);
                status
            };
            let hint = check("ZSTD_decompressStream", status)?;
            if hint == 0 {
                break;
            }
        }

        dest.truncate(written);
        Ok(written > 0)
    }

    /// No persistent native resource needs explicit shutdown; the context is
    /// released when the session is dropped.
    pub fn close(&mut self) -> Result<()> {
        Ok(())
    }

    /// End-of-stream cannot be queried without consuming input.
    pub fn eof(&self) -> Result<bool> {
        Err(RiptideError::NotImplemented(
            "end-of-stream query for streaming decode",
        ))
    }

    /// The source this session reads from, when one was supplied
    /// (`None` for in-memory sessions).
    pub fn port(&self) -> Option<&R> {
        match &self.input {
            InputCursor::Buffer { .. } => None,
            InputCursor::Port { port, .. } => Some(port),
        }
    }
}
