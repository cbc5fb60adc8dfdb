//! Sample-format domain types
//!
//! Defines the sample encoding enumeration and the sample specification
//! record (encoding + rate + channel count) that components negotiate
//! through their argument strings.

use serde::{Deserialize, Serialize};

/// Sample encoding of a PCM stream.
///
/// Serialized names match the canonical argument-string names
/// (`s16le`, `float32`, ...), so specs round-trip through JSON APIs
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleFormat {
    /// Signed 16-bit PCM, little-endian
    S16Le,

    /// Signed 16-bit PCM, big-endian
    S16Be,

    /// Unsigned 8-bit PCM
    U8,

    /// 32-bit IEEE float PCM
    Float32,

    /// 8-bit mu-law companded
    ULaw,

    /// 8-bit a-law companded
    ALaw,
}

impl SampleFormat {
    /// Signed 16-bit PCM in the byte order of the build target.
    #[cfg(target_endian = "little")]
    pub const S16NE: SampleFormat = SampleFormat::S16Le;

    /// Signed 16-bit PCM in the byte order of the build target.
    #[cfg(target_endian = "big")]
    pub const S16NE: SampleFormat = SampleFormat::S16Be;

    /// Parse a format name from an argument string.
    ///
    /// Accepted names (case-sensitive):
    /// - `s16le`, `s16be`
    /// - `s16ne`, `s16`, `16` (native byte order)
    /// - `u8`, `8`
    /// - `float32`
    /// - `ulaw`, `alaw`
    pub fn from_arg(s: &str) -> Option<Self> {
        match s {
            "s16le" => Some(SampleFormat::S16Le),
            "s16be" => Some(SampleFormat::S16Be),
            "s16ne" | "s16" | "16" => Some(SampleFormat::S16NE),
            "u8" | "8" => Some(SampleFormat::U8),
            "float32" => Some(SampleFormat::Float32),
            "ulaw" => Some(SampleFormat::ULaw),
            "alaw" => Some(SampleFormat::ALaw),
            _ => None,
        }
    }

    /// Canonical format name (lowercase, unambiguous byte order)
    pub fn name(&self) -> &'static str {
        match self {
            SampleFormat::S16Le => "s16le",
            SampleFormat::S16Be => "s16be",
            SampleFormat::U8 => "u8",
            SampleFormat::Float32 => "float32",
            SampleFormat::ULaw => "ulaw",
            SampleFormat::ALaw => "alaw",
        }
    }

    /// Storage size of one sample of this format, in bytes
    pub fn bytes_per_sample(&self) -> usize {
        match self {
            SampleFormat::S16Le | SampleFormat::S16Be => 2,
            SampleFormat::U8 | SampleFormat::ULaw | SampleFormat::ALaw => 1,
            SampleFormat::Float32 => 4,
        }
    }

    /// Get all sample format variants
    pub fn all_variants() -> &'static [SampleFormat] {
        &[
            SampleFormat::S16Le,
            SampleFormat::S16Be,
            SampleFormat::U8,
            SampleFormat::Float32,
            SampleFormat::ULaw,
            SampleFormat::ALaw,
        ]
    }
}

impl std::fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Sample specification describing a PCM stream's layout.
///
/// Assembled from the `format`, `rate` and `channels` argument keys by
/// [`ModArgs::sample_spec`](crate::ModArgs::sample_spec), starting from
/// a caller-supplied default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleSpec {
    /// Sample encoding
    pub format: SampleFormat,

    /// Sample rate in Hz
    pub rate: u32,

    /// Number of interleaved channels
    pub channels: u8,
}

impl SampleSpec {
    /// Highest sample rate accepted as valid
    pub const RATE_MAX: u32 = 48_000 * 8;

    /// Highest channel count accepted as valid
    pub const CHANNELS_MAX: u8 = 32;

    /// Check the spec against the allowed ranges.
    ///
    /// Rate and channel count must both be nonzero and within
    /// [`RATE_MAX`](Self::RATE_MAX) / [`CHANNELS_MAX`](Self::CHANNELS_MAX).
    pub fn valid(&self) -> bool {
        self.rate > 0
            && self.rate <= Self::RATE_MAX
            && self.channels > 0
            && self.channels <= Self::CHANNELS_MAX
    }

    /// Size of one frame (one sample per channel), in bytes
    pub fn frame_size(&self) -> usize {
        self.format.bytes_per_sample() * self.channels as usize
    }

    /// Stream data rate, in bytes per second
    pub fn bytes_per_second(&self) -> usize {
        self.frame_size() * self.rate as usize
    }
}

impl Default for SampleSpec {
    /// 44100 Hz stereo, signed 16-bit in native byte order
    fn default() -> Self {
        SampleSpec {
            format: SampleFormat::S16NE,
            rate: 44100,
            channels: 2,
        }
    }
}

impl std::fmt::Display for SampleSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}ch {}Hz", self.format, self.channels, self.rate)
    }
}
