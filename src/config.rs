// In: src/config.rs

//! The single source of truth for all riptide codec configuration.
//!
//! This module defines the strongly-typed option records handed to every
//! encode/decode entry point, and the resolver that turns a sparse record
//! (plus an optionally known source length) into the concrete parameter set
//! applied to a fresh codec context. Fields left unset fall back to the
//! codec's own defaults; every explicitly supplied tuning field overrides the
//! corresponding default individually.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use zstd::zstd_safe::{self, CCtx, CParameter};

use crate::error::{check, Result, RiptideError};

//==================================================================================
// I. Option Records
//==================================================================================

/// The codec's match-finding algorithm selection, trading compression ratio
/// for speed.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Fast,
    DFast,
    Greedy,
    Lazy,
    Lazy2,
    BtLazy2,
    BtOpt,
    BtUltra,
}

impl Strategy {
    /// Maps to the codec's native strategy constant.
    pub(crate) fn to_native(self) -> zstd_safe::Strategy {
        match self {
            Strategy::Fast => zstd_safe::Strategy::ZSTD_fast,
            Strategy::DFast => zstd_safe::Strategy::ZSTD_dfast,
            Strategy::Greedy => zstd_safe::Strategy::ZSTD_greedy,
            Strategy::Lazy => zstd_safe::Strategy::ZSTD_lazy,
            Strategy::Lazy2 => zstd_safe::Strategy::ZSTD_lazy2,
            Strategy::BtLazy2 => zstd_safe::Strategy::ZSTD_btlazy2,
            Strategy::BtOpt => zstd_safe::Strategy::ZSTD_btopt,
            Strategy::BtUltra => zstd_safe::Strategy::ZSTD_btultra,
        }
    }
}

impl FromStr for Strategy {
    type Err = RiptideError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "fast" => Ok(Strategy::Fast),
            "dfast" => Ok(Strategy::DFast),
            "greedy" => Ok(Strategy::Greedy),
            "lazy" => Ok(Strategy::Lazy),
            "lazy2" => Ok(Strategy::Lazy2),
            "btlazy2" => Ok(Strategy::BtLazy2),
            "btopt" => Ok(Strategy::BtOpt),
            "btultra" => Ok(Strategy::BtUltra),
            other => Err(RiptideError::Config(format!(
                "wrong strategy (given {other}, expect fast, dfast, greedy, lazy, lazy2, btlazy2, btopt or btultra)"
            ))),
        }
    }
}

/// Options accepted by every compression entry point.
///
/// All fields are optional; the codec chooses its own defaults for anything
/// left unset. `level` 0 (or `None`) selects the codec's default level, and
/// out-of-range levels are clamped by the codec itself.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "snake_case")]
pub struct EncodeOptions {
    /// Compression level. `None`/0 means the codec default.
    #[serde(default)]
    pub level: Option<i32>,

    /// Compression dictionary. One-shot operations borrow it for the call;
    /// session contexts copy it internally at load time.
    #[serde(default)]
    pub dict: Option<Vec<u8>>,

    // --- Advanced tuning fields. Each one overrides the codec default for
    // --- that field only; everything else stays level-derived.
    #[serde(default)]
    pub window_log: Option<u32>,
    #[serde(default)]
    pub chain_log: Option<u32>,
    #[serde(default)]
    pub hash_log: Option<u32>,
    #[serde(default)]
    pub search_log: Option<u32>,
    /// Minimum match length. The codec calls this `minMatch` these days.
    #[serde(default)]
    pub search_length: Option<u32>,
    #[serde(default)]
    pub target_length: Option<u32>,
    #[serde(default)]
    pub strategy: Option<Strategy>,

    // --- Frame flags ---
    /// Write the uncompressed size into the frame header (requires a pledged
    /// or known source size to be effective).
    #[serde(default)]
    pub content_size: Option<bool>,
    /// Append a content checksum to each frame.
    #[serde(default)]
    pub checksum: Option<bool>,
    /// Write the dictionary ID into the frame header.
    #[serde(default)]
    pub dict_id: Option<bool>,

    // --- Size hints. Only meaningful when the source length is NOT already
    // --- known (streaming sessions); one-shot encodes reject them.
    /// Size commitment made to the codec. The codec verifies it when the
    /// stream ends and embeds it in the frame header when `content_size` is
    /// set.
    #[serde(default)]
    pub pledged_size: Option<u64>,
    /// Non-binding size estimate.
    #[serde(default)]
    pub estimated_size: Option<u64>,
}

/// Options accepted by every decompression entry point.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "snake_case")]
pub struct DecodeOptions {
    /// Decompression dictionary; must match the one used for encoding.
    #[serde(default)]
    pub dict: Option<Vec<u8>>,
}

//==================================================================================
// II. Parameter Resolution
//==================================================================================

/// The fully resolved parameter set for one compression context.
#[derive(Debug, Clone, Default)]
pub(crate) struct ResolvedParams {
    pub level: i32,
    /// Explicitly supplied tuning fields, in application order.
    pub tuning: Vec<CParameter>,
    /// 0 means "unknown" and is never pledged to the codec.
    pub pledged_size: u64,
    /// Retained for diagnostics; the stable context API has no estimated-size
    /// knob, so this never reaches the codec (see DESIGN.md).
    pub estimated_size: u64,
}

/// Resolves a sparse option record against an optionally known source length.
///
/// When the source length is known it always wins: both pledged and estimated
/// size are forced to it, and explicit size hints in the options are a
/// configuration error.
pub(crate) fn resolve_encode_params(
    options: Option<&EncodeOptions>,
    src_len: Option<u64>,
) -> Result<ResolvedParams> {
    let opts = match options {
        None => {
            // No configuration given: codec defaults for level 0, pledging
            // the source length when we have one.
            let pledged = src_len.unwrap_or(0);
            return Ok(ResolvedParams {
                level: 0,
                tuning: Vec::new(),
                pledged_size: pledged,
                estimated_size: pledged,
            });
        }
        Some(opts) => opts,
    };

    let (pledged_size, estimated_size) = match src_len {
        Some(len) => {
            if opts.pledged_size.is_some() || opts.estimated_size.is_some() {
                return Err(RiptideError::Config(
                    "pledged_size/estimated_size are not accepted when the source length is known"
                        .into(),
                ));
            }
            (len, len)
        }
        None => {
            let pledged = opts.pledged_size.unwrap_or(0);
            let mut estimated = opts.estimated_size.unwrap_or(0);
            if pledged != 0 && estimated > pledged {
                estimated = pledged;
            }
            (pledged, estimated)
        }
    };

    let mut tuning = Vec::new();
    if let Some(v) = opts.window_log {
        tuning.push(CParameter::WindowLog(v));
    }
    if let Some(v) = opts.chain_log {
        tuning.push(CParameter::ChainLog(v));
    }
    if let Some(v) = opts.hash_log {
        tuning.push(CParameter::HashLog(v));
    }
    if let Some(v) = opts.search_log {
        tuning.push(CParameter::SearchLog(v));
    }
    if let Some(v) = opts.search_length {
        tuning.push(CParameter::MinMatch(v));
    }
    if let Some(v) = opts.target_length {
        tuning.push(CParameter::TargetLength(v));
    }
    if let Some(s) = opts.strategy {
        tuning.push(CParameter::Strategy(s.to_native()));
    }
    if let Some(v) = opts.content_size {
        tuning.push(CParameter::ContentSizeFlag(v));
    }
    if let Some(v) = opts.checksum {
        tuning.push(CParameter::ChecksumFlag(v));
    }
    if let Some(v) = opts.dict_id {
        tuning.push(CParameter::DictIdFlag(v));
    }

    Ok(ResolvedParams {
        level: opts.level.unwrap_or(0),
        tuning,
        pledged_size,
        estimated_size,
    })
}

/// Applies a resolved parameter set (and an optional dictionary) to a fresh
/// compression context.
pub(crate) fn prime_encoder(
    ctx: &mut CCtx<'static>,
    params: &ResolvedParams,
    dict: Option<&[u8]>,
) -> Result<()> {
    check(
        "ZSTD_CCtx_setParameter",
        ctx.set_parameter(CParameter::CompressionLevel(params.level)),
    )?;
    for param in params.tuning.iter().cloned() {
        check("ZSTD_CCtx_setParameter", ctx.set_parameter(param))?;
    }
    if params.pledged_size > 0 {
        check(
            "ZSTD_CCtx_setPledgedSrcSize",
            ctx.set_pledged_src_size(Some(params.pledged_size)),
        )?;
    }
    if let Some(dict) = dict {
        check("ZSTD_CCtx_loadDictionary", ctx.load_dictionary(dict))?;
    }
    Ok(())
}

//==================================================================================
// III. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_without_options_or_source() {
        let p = resolve_encode_params(None, None).unwrap();
        assert_eq!(p.level, 0);
        assert_eq!(p.pledged_size, 0);
        assert_eq!(p.estimated_size, 0);
        assert!(p.tuning.is_empty());
    }

    #[test]
    fn test_resolve_known_source_wins() {
        let p = resolve_encode_params(None, Some(999)).unwrap();
        assert_eq!(p.pledged_size, 999);
        assert_eq!(p.estimated_size, 999);
    }

    #[test]
    fn test_resolve_size_hints_without_source() {
        let opts = EncodeOptions {
            pledged_size: Some(100),
            estimated_size: Some(500),
            ..Default::default()
        };
        let p = resolve_encode_params(Some(&opts), None).unwrap();
        assert_eq!(p.pledged_size, 100);
        // The estimate is clamped down to the pledge.
        assert_eq!(p.estimated_size, 100);
    }

    #[test]
    fn test_resolve_rejects_size_hints_with_known_source() {
        let opts = EncodeOptions {
            estimated_size: Some(500),
            ..Default::default()
        };
        let err = resolve_encode_params(Some(&opts), Some(10)).unwrap_err();
        assert!(matches!(err, RiptideError::Config(_)));
    }

    #[test]
    fn test_resolve_collects_individual_overrides() {
        let opts = EncodeOptions {
            level: Some(7),
            window_log: Some(20),
            strategy: Some(Strategy::BtOpt),
            checksum: Some(true),
            ..Default::default()
        };
        let p = resolve_encode_params(Some(&opts), Some(10)).unwrap();
        assert_eq!(p.level, 7);
        assert_eq!(p.tuning.len(), 3);
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("fast".parse::<Strategy>().unwrap(), Strategy::Fast);
        assert_eq!("btlazy2".parse::<Strategy>().unwrap(), Strategy::BtLazy2);
        let err = "btfast".parse::<Strategy>().unwrap_err();
        assert!(matches!(err, RiptideError::Config(_)));
        assert!(err.to_string().contains("btfast"));
    }
}
