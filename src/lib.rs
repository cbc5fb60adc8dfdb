//! # Module-Argument Parsing
//!
//! Shared parsing of per-component configuration strings:
//! - Tokenizer/builder turning `key=value` strings into a validated map
//! - Lookup and typed accessors (unsigned integers)
//! - Sample-specification assembly from `rate`/`channels`/`format` keys
//! - Sample-format domain types
//!
//! A component receives its argument string at load time, builds a
//! [`ModArgs`] set from it once, then issues read-only accessor calls:
//!
//! ```
//! use modargs::{ModArgs, SampleSpec};
//!
//! let args = ModArgs::new(Some("rate=48000 channels=2"), Some(&["rate", "channels", "format"]))?;
//! let spec = args.sample_spec(SampleSpec::default())?;
//! assert_eq!(spec.rate, 48000);
//! # Ok::<(), modargs::Error>(())
//! ```

pub mod args;
pub mod error;
pub mod sample;

pub use args::ModArgs;
pub use error::{Error, Result};
pub use sample::{SampleFormat, SampleSpec};
