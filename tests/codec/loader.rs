//! Content Loader and Sync Packet Tests
//!
//! The path content takes in practice: JSON files loaded by id, then
//! shipped to a peer as one binary packet and rebuilt there.

use crate::*;

#[derive(Debug, Clone, PartialEq)]
struct Biome {
    id: String,
    temperature: f32,
    downfall: f32,
    precipitation: bool,
}

fn biome_codec() -> impl RecordCodec<Biome> {
    create(
        (
            context_field(ID),
            FloatLoadable::ANY.required_field("temperature", |b: &Biome| &b.temperature),
            FloatLoadable::PERCENT.default_field("downfall", 0.5, |b: &Biome| &b.downfall),
            BooleanLoadable.default_field("precipitation", true, |b: &Biome| &b.precipitation),
        ),
        |id: String, temperature: f32, downfall: f32, precipitation: bool| Biome {
            id,
            temperature,
            downfall,
            precipitation,
        },
    )
}

fn content() -> Vec<(&'static str, &'static str)> {
    vec![
        ("plains", r#"{"temperature": 0.8, "downfall": 0.4}"#),
        ("desert", r#"{"temperature": 2.0, "downfall": 0.0, "precipitation": false}"#),
        ("swamp", r#"{"temperature": 0.8, "downfall": 0.9}"#),
        ("void", r#"{"downfall": 0.5}"#),
        ("ocean", r#"{"temperature": 0.5, "downfall": 1.5}"#),
        ("broken", r#"{"temperature": "#),
    ]
}

// =============================================================================
// CONTENT LOADER
// =============================================================================

#[test]
fn test_load_all_reports_each_failure() {
    init_tracing();
    let codec = biome_codec();
    let report = ContentLoader::new(&codec).load_all(content());

    assert_eq!(
        report.loaded.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["desert", "plains", "swamp"]
    );
    assert_eq!(report.get("plains").map(|b| b.id.as_str()), Some("plains"));

    let failed: Vec<_> = report.failures.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(failed, vec!["void", "ocean", "broken"]);

    assert!(report.failures[0].1.is_missing_field());
    assert!(matches!(
        report.failures[1].1.as_load_error(),
        Some(LoadError::InvalidFieldValue { key, .. }) if key == "downfall"
    ));
    assert!(matches!(report.failures[2].1, Error::Json(_)));
    assert_eq!(report.summary(), "Content load complete: 3 loaded, 3 failed");
}

#[test]
fn test_load_all_fail_fast_from_toml() {
    let options = LoaderOptions::from_toml_str("fail_fast = true").unwrap();
    let codec = biome_codec();
    let report = ContentLoader::with_options(&codec, options).load_all(content());

    assert_eq!(report.loaded.len(), 3);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, "void");
}

#[test]
fn test_save_omits_defaults_and_id() {
    let codec = biome_codec();
    let loader = ContentLoader::new(&codec);
    let plains = loader.load("plains", r#"{"temperature": 0.8}"#).unwrap();
    let text = loader.save(&plains).unwrap();
    let json: Json = serde_json::from_str(&text).unwrap();
    assert_eq!(json, json!({"temperature": 0.8}));
}

// =============================================================================
// SYNC PACKETS
// =============================================================================

#[test]
fn test_loaded_content_survives_sync() {
    init_tracing();
    let codec = biome_codec();
    let report = ContentLoader::new(&codec).load_all(content());

    let packet = SyncPacket::new(&codec);
    let bytes = packet.encode_packet(&report.loaded);
    let received = packet.decode_packet(&bytes).unwrap();

    assert_eq!(received, report.loaded);
    assert_eq!(received["desert"].id, "desert");
}

#[test]
fn test_sync_string_limit() {
    let codec = biome_codec();
    let report = ContentLoader::new(&codec).load_all(content());
    let bytes = SyncPacket::new(&codec).encode_packet(&report.loaded);

    let strict = SyncPacket::with_limits(&codec, CodecLimits::new().max_string_bytes(5));
    let err = strict.decode_packet(&bytes).unwrap_err();
    assert!(err.is_binary());
}

#[test]
fn test_sync_limits_from_toml() {
    let options = LoaderOptions::from_toml_str(
        r#"
        [limits]
        max_string_bytes = 5
        "#,
    )
    .unwrap();
    let codec = biome_codec();
    let loader = ContentLoader::with_options(&codec, options);
    let report = loader.load_all(content());
    let bytes = SyncPacket::new(&codec).encode_packet(&report.loaded);

    // "desert" and "plains" are six bytes
    let err = loader.sync_packet().decode_packet(&bytes).unwrap_err();
    assert!(matches!(
        err.as_load_error(),
        Some(LoadError::Buffer(BufferError::LengthOutOfBounds { length: 6, max: 5 }))
    ));

    let roomy = LoaderOptions::new().limits(CodecLimits::new().max_string_bytes(6));
    let received = SyncPacket::with_options(&codec, &roomy)
        .decode_packet(&bytes)
        .unwrap();
    assert_eq!(received, report.loaded);
}

#[test]
fn test_codec_shared_across_threads() {
    use std::sync::Arc;

    let codec = Arc::new(biome_codec());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let codec = Arc::clone(&codec);
            std::thread::spawn(move || {
                let biome = Biome {
                    id: format!("biome_{}", i),
                    temperature: i as f32,
                    downfall: 0.5,
                    precipitation: i % 2 == 0,
                };
                let bytes = codec.encode_to_vec(&biome);
                let ctx = TypedMap::new().with(ID, biome.id.clone());
                let decoded = codec.decode(&mut ByteReader::new(&bytes), &ctx).unwrap();
                assert_eq!(decoded, biome);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
