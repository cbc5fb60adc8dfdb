//! Module-Argument End-to-End Tests
//!
//! Exercises the full build-then-read flow a component goes through at
//! load time: parse an argument string (optionally against an
//! allow-list), then read raw values, unsigned integers, and an
//! assembled sample specification.

use modargs::{Error, ModArgs, SampleFormat, SampleSpec};

/// Build a set from a literal argument string, panicking on failure
fn build(args: &str) -> ModArgs {
    ModArgs::new(Some(args), None)
        .unwrap_or_else(|e| panic!("'{}' should parse, got {}", args, e))
}

#[test]
fn test_typical_module_argument_string() {
    let args = build("device=hw:0 rate=48000 channels=2 description='Front speakers'");

    assert_eq!(args.len(), 4);
    assert_eq!(args.get("device"), Some("hw:0"));
    assert_eq!(args.get("description"), Some("Front speakers"));
    assert_eq!(args.get_or("sink_name", "auto"), "auto");
    assert_eq!(args.get_u32("rate").unwrap(), Some(48000));
}

#[test]
fn test_allow_list_accepts_known_keys_only() {
    let valid = ["device", "rate", "channels", "format"];

    let args = ModArgs::new(Some("device=hw:0 rate=44100"), Some(&valid))
        .expect("known keys should pass the allow-list");
    assert_eq!(args.get("device"), Some("hw:0"));

    let err = ModArgs::new(Some("device=hw:0 sink=music"), Some(&valid)).unwrap_err();
    assert!(matches!(err, Error::Parse(_)), "got {:?}", err);
}

#[test]
fn test_sample_spec_defaults_pass_through() {
    let args = build("device=hw:0");
    let default = SampleSpec::default();

    let spec = args.sample_spec(default).expect("defaults should be valid");
    assert_eq!(spec, default);
}

#[test]
fn test_sample_spec_full_override() {
    let args = build("rate=8000 channels=1 format=ulaw");

    let spec = args.sample_spec(SampleSpec::default()).unwrap();
    assert_eq!(spec.rate, 8000);
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.format, SampleFormat::ULaw);
}

#[test]
fn test_sample_spec_partial_override() {
    let args = build("format=s16be");

    let spec = args.sample_spec(SampleSpec::default()).unwrap();
    assert_eq!(spec.format, SampleFormat::S16Be);
    assert_eq!(spec.rate, 44100, "absent rate should keep the default");
    assert_eq!(spec.channels, 2, "absent channels should keep the default");
}

#[test]
fn test_sample_spec_native_format_aliases() {
    for alias in ["s16ne", "s16", "16"] {
        let args = build(&format!("format={}", alias));
        let spec = args.sample_spec(SampleSpec::default()).unwrap();
        assert_eq!(
            spec.format,
            SampleFormat::S16NE,
            "alias '{}' should select the native 16-bit format",
            alias
        );
    }
}

#[test]
fn test_sample_spec_rejects_unknown_format() {
    let args = build("format=bogus");
    let err = args.sample_spec(SampleSpec::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidValue(_)), "got {:?}", err);
}

#[test]
fn test_sample_spec_rejects_malformed_rate() {
    let args = build("rate=fast");
    let err = args.sample_spec(SampleSpec::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidValue(_)), "got {:?}", err);
}

#[test]
fn test_sample_spec_rejects_out_of_range_values() {
    // Zero is never a usable rate or channel count.
    let err = build("rate=0").sample_spec(SampleSpec::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidValue(_)), "got {:?}", err);

    let err = build("channels=0").sample_spec(SampleSpec::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidValue(_)), "got {:?}", err);

    let err = build("rate=400000").sample_spec(SampleSpec::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidValue(_)), "got {:?}", err);

    let err = build("channels=33").sample_spec(SampleSpec::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidValue(_)), "got {:?}", err);
}

#[test]
fn test_sample_spec_channel_count_truncates_to_8_bits() {
    // The channel count narrows to 8 bits before validation, so 257
    // wraps to 1 and passes. Kept for compatibility with existing
    // module arguments.
    let spec = build("channels=257").sample_spec(SampleSpec::default()).unwrap();
    assert_eq!(spec.channels, 1);

    // 256 wraps to 0, which then fails validation.
    let err = build("channels=256").sample_spec(SampleSpec::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidValue(_)), "got {:?}", err);
}

#[test]
fn test_hex_rate_is_accepted() {
    // strtoul-style base detection applies to every u32 argument.
    let args = build("rate=0xac44");
    let spec = args.sample_spec(SampleSpec::default()).unwrap();
    assert_eq!(spec.rate, 44100);
}

#[test]
fn test_empty_input_yields_defaults() {
    for args in [ModArgs::new(None, None).unwrap(), ModArgs::new(Some(""), None).unwrap()] {
        assert!(args.is_empty());
        let spec = args.sample_spec(SampleSpec::default()).unwrap();
        assert_eq!(spec, SampleSpec::default());
    }
}

#[test]
fn test_quoted_values_round_trip_through_lookup() {
    let args = build("a='hello world' b=\"hello world\"");
    assert_eq!(args.get("a"), Some("hello world"));
    assert_eq!(args.get("b"), Some("hello world"));
}

#[test]
fn test_duplicate_keys_last_write_wins() {
    let args = build("rate=22050 rate=44100");
    assert_eq!(args.get_u32("rate").unwrap(), Some(44100));
}

#[test]
fn test_failed_build_returns_no_partial_set() {
    // The first pair is fine; the second is malformed. The whole
    // build must fail rather than expose the first pair.
    let result = ModArgs::new(Some("rate=44100 =oops"), None);
    assert!(result.is_err());

    let result = ModArgs::new(Some("rate=44100 desc='open"), None);
    assert!(result.is_err());
}

#[test]
fn test_format_serializes_with_canonical_names() {
    let spec = SampleSpec {
        format: SampleFormat::S16Le,
        rate: 44100,
        channels: 2,
    };

    let json = serde_json::to_value(&spec).expect("spec should serialize");
    assert_eq!(json["format"], "s16le");
    assert_eq!(json["rate"], 44100);
    assert_eq!(json["channels"], 2);

    let back: SampleSpec = serde_json::from_value(json).expect("spec should deserialize");
    assert_eq!(back, spec);
}
