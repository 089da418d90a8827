//! This file is the root of the `riptide_codec` Rust crate.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of our library (`config`,
//!     `oneshot`, `stream`, etc.) so the Rust compiler knows they exist.
//! 2.  Re-exporting the public API surface and the published codec
//!     constants.
//!
//! Host-binding glue (argument marshalling, class registration) lives in a
//! separate embedding layer and is intentionally absent here.

//==================================================================================
// 0. Constants
//==================================================================================

use zstd::zstd_safe;

/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Smallest useful compression level.
pub const LEVEL_MIN: i32 = 1;

/// The codec's default compression level.
pub const LEVEL_DEFAULT: i32 = zstd::DEFAULT_COMPRESSION_LEVEL;

/// Whether the codec was built with legacy (v0.1 .. v0.7) frame support.
pub const LEGACY_SUPPORTED: bool = cfg!(feature = "legacy");

/// Largest supported compression level, queried from the codec.
pub fn level_max() -> i32 {
    zstd_safe::max_c_level()
}

/// The linked codec library's version string.
pub fn library_version() -> &'static str {
    zstd_safe::version_string()
}

//==================================================================================
// 1. Module Declarations
//==================================================================================

pub mod buffer;
pub mod config;
pub mod oneshot;
pub mod stream;

mod error;
mod utils;

//==================================================================================
// 2. Public API Surface
//==================================================================================

pub use buffer::GrowthPolicy;
pub use config::{DecodeOptions, EncodeOptions, Strategy};
pub use error::{Result, RiptideError};
pub use oneshot::{decode, decode_bounded, decode_into, encode, encode_bounded, encode_into};
pub use stream::{Decoder, Encoder};
pub use utils::enable_verbose_logging;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_published_constants() {
        assert_eq!(LEVEL_MIN, 1);
        assert_eq!(LEVEL_DEFAULT, 3);
        assert!(level_max() >= 19);
        assert!(!library_version().is_empty());
    }
}
