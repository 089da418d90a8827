// In: src/stream/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Session Layer
// ====================================================================================
//
// The `stream` module holds the stateful half of the riptide API: long-lived
// encode/decode sessions bound to caller-supplied ports. Each session owns
// exactly one native codec context for its whole lifetime; the context is
// released exactly once, when the session is dropped, on every exit path.
//
// Data Flow (Compression):
//
//   1. [Encoder::new(sink, options)]  -> resolves options (config::resolve_encode_params)
//         |                              and primes a fresh compression context
//         |
//   2. [Encoder::write(bytes)]        -> chunks the input through the session-owned
//         |                              scratch buffer, pushing each filled portion
//         |                              to the sink (`std::io::Write::write_all`)
//         |
//   3. [Encoder::flush / close]       -> drain the codec's internal buffer / frame
//                                        epilogue into the sink
//
// Data Flow (Decompression):
//
//   1. [Decoder::new(source, options)]   -> binds the dictionary and an input cursor
//      [Decoder::from_bytes(..)]            (in-memory buffer consumed in place, or a
//         |                                  chunk refilled from `std::io::Read`)
//         |
//   2. [Decoder::read(size)]            -> refill cursor / grow output / decompress,
//                                          until bounded capacity or end of frame;
//                                          `None` signals source exhaustion
//
// The sink/source ports are borrowed-by-ownership: the sessions only invoke
// write/read operations on them and hand them back through `port()` /
// `into_port()`.

mod decoder;
mod encoder;

pub use decoder::Decoder;
pub use encoder::Encoder;
