//! Module-argument string parsing
//!
//! Turns a flat `key=value key=value ...` configuration string into an
//! owned key-to-value mapping, with typed accessors on top. Values may
//! be unquoted (terminated by whitespace), double-quoted or
//! single-quoted (terminated by the matching quote, whitespace
//! allowed inside, no escapes).

use crate::error::{Error, Result};
use crate::sample::{SampleFormat, SampleSpec};
use std::collections::HashMap;
use std::mem;
use tracing::{debug, trace};

/// Tokenizer state for the single left-to-right scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between pairs, skipping separators
    Whitespace,

    /// Accumulating a key name; only `=` terminates a key
    Key,

    /// First character after `=` decides how the value is delimited
    ValueStart,

    /// Unquoted value, terminated by whitespace
    ValueSimple,

    /// Value inside `"..."`, terminated by the closing quote
    ValueDoubleQuoted,

    /// Value inside `'...'`, terminated by the closing quote
    ValueSingleQuoted,
}

/// Parsed module-argument set.
///
/// Built once from a configuration string, then read-only. Keys are
/// unique and case-sensitive; a later `key=value` occurrence in the
/// input overwrites an earlier one. Dropping the set releases all
/// owned keys and values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModArgs {
    map: HashMap<String, String>,
}

impl ModArgs {
    /// Parse an argument string into a `ModArgs` set.
    ///
    /// `args` of `None` (no argument string supplied at all), `""` or
    /// all-whitespace yields an empty set. When `valid_keys` is given,
    /// every parsed key must match one of its entries exactly or the
    /// whole build fails; the list is only borrowed for this call.
    ///
    /// Fails with [`Error::Parse`] on a `=` with no key before it, an
    /// unterminated quoted value, a trailing key with no `=`, or an
    /// unknown key. No partial set is ever returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use modargs::ModArgs;
    ///
    /// let args = ModArgs::new(Some("device=hw:0 description='Front speakers'"), None).unwrap();
    /// assert_eq!(args.get("device"), Some("hw:0"));
    /// assert_eq!(args.get("description"), Some("Front speakers"));
    /// ```
    pub fn new(args: Option<&str>, valid_keys: Option<&[&str]>) -> Result<ModArgs> {
        let mut map = HashMap::new();

        let Some(args) = args else {
            return Ok(ModArgs { map });
        };

        let mut state = State::Whitespace;
        let mut key = String::new();
        let mut value = String::new();

        for c in args.chars() {
            match state {
                State::Whitespace => {
                    if c == '=' {
                        return Err(Error::Parse("'=' with no key before it".to_string()));
                    } else if !c.is_ascii_whitespace() {
                        key.clear();
                        key.push(c);
                        state = State::Key;
                    }
                }
                State::Key => {
                    if c == '=' {
                        value.clear();
                        state = State::ValueStart;
                    } else {
                        key.push(c);
                    }
                }
                State::ValueStart => {
                    if c == '\'' {
                        state = State::ValueSingleQuoted;
                    } else if c == '"' {
                        state = State::ValueDoubleQuoted;
                    } else if c.is_ascii_whitespace() {
                        insert_checked(&mut map, mem::take(&mut key), String::new(), valid_keys)?;
                        state = State::Whitespace;
                    } else {
                        value.push(c);
                        state = State::ValueSimple;
                    }
                }
                State::ValueSimple => {
                    if c.is_ascii_whitespace() {
                        insert_checked(
                            &mut map,
                            mem::take(&mut key),
                            mem::take(&mut value),
                            valid_keys,
                        )?;
                        state = State::Whitespace;
                    } else {
                        value.push(c);
                    }
                }
                State::ValueDoubleQuoted => {
                    if c == '"' {
                        insert_checked(
                            &mut map,
                            mem::take(&mut key),
                            mem::take(&mut value),
                            valid_keys,
                        )?;
                        state = State::Whitespace;
                    } else {
                        value.push(c);
                    }
                }
                State::ValueSingleQuoted => {
                    if c == '\'' {
                        insert_checked(
                            &mut map,
                            mem::take(&mut key),
                            mem::take(&mut value),
                            valid_keys,
                        )?;
                        state = State::Whitespace;
                    } else {
                        value.push(c);
                    }
                }
            }
        }

        // A pending unquoted or empty value at end of input commits;
        // an unfinished key or quote is an error.
        match state {
            State::Whitespace => {}
            State::ValueStart => insert_checked(&mut map, key, String::new(), valid_keys)?,
            State::ValueSimple => insert_checked(&mut map, key, value, valid_keys)?,
            State::Key => {
                return Err(Error::Parse(format!("key '{}' has no '='", key)));
            }
            State::ValueDoubleQuoted | State::ValueSingleQuoted => {
                return Err(Error::Parse(format!(
                    "unterminated quoted value for key '{}'",
                    key
                )));
            }
        }

        trace!("parsed {} argument(s)", map.len());
        Ok(ModArgs { map })
    }

    /// Look up a value by key.
    ///
    /// Returns `None` for an absent key, distinct from a present key
    /// with an empty value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    /// Look up a value by key, falling back to `default` when absent.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Check whether a key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Number of key/value pairs in the set
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check whether the set holds no pairs
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over all key/value pairs (no particular order)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Read a value as an unsigned 32-bit integer.
    ///
    /// Returns `Ok(None)` when the key is absent. A present but empty
    /// value, a value with trailing non-numeric characters, or one
    /// with no digits at all fails with [`Error::InvalidValue`].
    ///
    /// Number syntax follows the C `strtoul(_, _, 0)` rules: optional
    /// leading whitespace and sign, `0x`/`0X` prefix for hex, leading
    /// `0` for octal, decimal otherwise. Values outside the 32-bit
    /// range wrap instead of erroring; a `-` sign wraps through
    /// two's complement. Both are long-standing behavior that existing
    /// module arguments rely on.
    pub fn get_u32(&self, key: &str) -> Result<Option<u32>> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };

        if value.is_empty() {
            return Err(Error::InvalidValue(format!(
                "argument '{}' is empty, expected an unsigned integer",
                key
            )));
        }

        match parse_unsigned(value) {
            Some(parsed) => Ok(Some(parsed)),
            None => Err(Error::InvalidValue(format!(
                "argument '{}' is not an unsigned integer: '{}'",
                key, value
            ))),
        }
    }

    /// Assemble a sample specification from the `rate`, `channels` and
    /// `format` keys, starting from `default`.
    ///
    /// Absent keys leave the corresponding default field unchanged;
    /// malformed values and unrecognized format names fail with
    /// [`Error::InvalidValue`], as does an assembled spec that is not
    /// [`valid`](SampleSpec::valid).
    ///
    /// # Examples
    ///
    /// ```
    /// use modargs::{ModArgs, SampleFormat, SampleSpec};
    ///
    /// let args = ModArgs::new(Some("rate=48000 format=float32"), None).unwrap();
    /// let spec = args.sample_spec(SampleSpec::default()).unwrap();
    /// assert_eq!(spec.rate, 48000);
    /// assert_eq!(spec.format, SampleFormat::Float32);
    /// assert_eq!(spec.channels, 2);
    /// ```
    pub fn sample_spec(&self, default: SampleSpec) -> Result<SampleSpec> {
        let mut spec = default;

        if let Some(rate) = self.get_u32("rate")? {
            spec.rate = rate;
        }

        if let Some(channels) = self.get_u32("channels")? {
            // The channel count is stored in 8 bits; larger values
            // truncate (legacy behavior kept for compatibility).
            spec.channels = channels as u8;
        }

        if let Some(format) = self.get("format") {
            spec.format = SampleFormat::from_arg(format).ok_or_else(|| {
                debug!("unrecognized sample format '{}'", format);
                Error::InvalidValue(format!("unrecognized sample format '{}'", format))
            })?;
        }

        if !spec.valid() {
            return Err(Error::InvalidValue(format!(
                "invalid sample specification: {}",
                spec
            )));
        }

        Ok(spec)
    }
}

/// Commit one key/value pair, enforcing the allow-list when present.
fn insert_checked(
    map: &mut HashMap<String, String>,
    key: String,
    value: String,
    valid_keys: Option<&[&str]>,
) -> Result<()> {
    if let Some(valid) = valid_keys {
        if !valid.iter().any(|v| *v == key) {
            debug!("rejecting unknown argument key '{}'", key);
            return Err(Error::Parse(format!("unknown argument key '{}'", key)));
        }
    }

    map.insert(key, value);
    Ok(())
}

/// strtoul-compatible unsigned scan.
///
/// Skips leading ASCII whitespace, accepts an optional `+`/`-` sign,
/// picks the base from the prefix (`0x`/`0X` hex, leading `0` octal,
/// decimal otherwise), then requires at least one digit and nothing
/// after the digits. Overflow wraps; a negative sign negates through
/// two's complement. The result is narrowed to 32 bits by truncation.
fn parse_unsigned(text: &str) -> Option<u32> {
    let mut rest = text.trim_start_matches(|c: char| c.is_ascii_whitespace());

    let mut negative = false;
    if let Some(stripped) = rest.strip_prefix('-') {
        negative = true;
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    }

    let radix: u32 = if (rest.starts_with("0x") || rest.starts_with("0X"))
        && rest[2..].starts_with(|c: char| c.is_ascii_hexdigit())
    {
        rest = &rest[2..];
        16
    } else if rest.starts_with('0') {
        8
    } else {
        10
    };

    let mut acc: u64 = 0;
    let mut digits = 0;
    for c in rest.chars() {
        let Some(d) = c.to_digit(radix) else {
            break;
        };
        acc = acc.wrapping_mul(radix as u64).wrapping_add(d as u64);
        digits += 1;
    }

    if digits == 0 || digits != rest.chars().count() {
        return None;
    }

    if negative {
        acc = acc.wrapping_neg();
    }

    Some(acc as u32)
}
