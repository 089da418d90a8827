// In: src/stream/encoder.rs

//! Push-based streaming compression session.

use std::io::Write;

use zstd::zstd_safe::{CCtx, InBuffer, OutBuffer};

use crate::buffer::MAX_ALLOC;
use crate::config::{prime_encoder, resolve_encode_params, EncodeOptions};
use crate::error::{check, Result, RiptideError};

/// An incremental compression session bound to a caller-supplied sink.
///
/// The session owns one compression context and a reusable scratch buffer
/// sized to the codec's recommended streaming output size. Compressed chunks
/// are pushed to the sink as the scratch buffer fills; only their contents
/// are copied out, so the sink never aliases session-owned memory.
///
/// State machine: writes may be interleaved with flushes; `close` finalizes
/// the frame and is terminal. Dropping an unclosed encoder releases the
/// context without finalizing the frame.
pub struct Encoder<W: Write> {
    ctx: CCtx<'static>,
    port: W,
    /// Session-owned scratch; its capacity is fixed at construction.
    outbuf: Vec<u8>,
    closed: bool,
}

impl<W: Write> Encoder<W> {
    /// Creates a session writing compressed chunks to `port`.
    pub fn new(port: W, options: Option<&EncodeOptions>) -> Result<Self> {
        let params = resolve_encode_params(options, None)?;
        let mut ctx = CCtx::create();
        prime_encoder(&mut ctx, &params, options.and_then(|o| o.dict.as_deref()))?;

        let chunk = CCtx::out_size().min(MAX_ALLOC);
        log::debug!(
            "encoder session: level {}, pledged {}, estimated {}, chunk {} bytes",
            params.level,
            params.pledged_size,
            params.estimated_size,
            chunk
        );
        Ok(Encoder {
            ctx,
            port,
            outbuf: vec![0u8; chunk],
            closed: false,
        })
    }

    /// Compresses `data`, pushing produced chunks to the sink until the whole
    /// input is consumed.
    pub fn write(&mut self, data: &[u8]) -> Result<&mut Self> {
        self.ensure_open("write")?;
        let mut input = InBuffer::around(data);
        while input.pos < data.len() {
            let (status, produced) = {
                let mut output = OutBuffer::around(&mut self.outbuf[..]);
                let status = self.ctx.compress_stream(&mut output, &mut input);
                (status, output.pos())
            };
            check("ZSTD_compressStream", status)?;
            if produced > 0 {
                self.port.write_all(&self.outbuf[..produced])?;
            }
        }
        Ok(self)
    }

    /// Drains the codec's internal buffer into the sink without ending the
    /// frame, then returns to accepting writes.
    pub fn flush(&mut self) -> Result<&mut Self> {
        self.ensure_open("flush")?;
        loop {
            let (status, produced) = {
                let mut output = OutBuffer::around(&mut self.outbuf[..]);
                let status = self.ctx.flush_stream(&mut output);
                (status, output.pos())
            };
            check("ZSTD_flushStream", status)?;
            if produced > 0 {
                self.port.write_all(&self.outbuf[..produced])?;
            }
            // A scratch buffer that comes back completely full means the
            // codec may be holding more.
            if produced < self.outbuf.len() {
                break;
            }
        }
        Ok(self)
    }

    /// Finalizes the frame and pushes the epilogue to the sink. Subsequent
    /// writes and flushes are invalid; closing again is a no-op.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        loop {
            let (status, produced) = {
                let mut output = OutBuffer::around(&mut self.outbuf[..]);
                let status = self.ctx.end_stream(&mut output);
                (status, output.pos())
            };
            check("ZSTD_endStream", status)?;
            if produced > 0 {
                self.port.write_all(&self.outbuf[..produced])?;
            }
            if produced < self.outbuf.len() {
                break;
            }
        }
        self.closed = true;
        log::debug!("encoder session closed");
        Ok(())
    }

    /// The sink this session writes to.
    pub fn port(&self) -> &W {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut W {
        &mut self.port
    }

    /// Consumes the session and hands the sink back.
    pub fn into_port(self) -> W {
        let Encoder { port, .. } = self;
        port
    }

    fn ensure_open(&self, op: &str) -> Result<()> {
        if self.closed {
            return Err(RiptideError::Argument(format!("{op} on a closed encoder")));
        }
        Ok(())
    }
}
