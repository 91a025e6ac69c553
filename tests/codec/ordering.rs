//! Field Order Tests
//!
//! Declaration order is the binary layout. JSON matches fields by key, so
//! two codecs with the same fields in a different order agree on JSON and
//! disagree on binary.

use crate::*;

/// Same fields as `rect_codec`, declared height first
fn swapped_rect_codec() -> impl RecordCodec<Rect> {
    create(
        (
            IntLoadable::ANY.default_field("height", 0, |r: &Rect| &r.height),
            IntLoadable::ANY.required_field("width", |r: &Rect| &r.width),
        ),
        |height: i32, width: i32| Rect { width, height },
    )
}

#[test]
fn test_json_ignores_declaration_order() {
    let json = rect_codec().serialize(&Rect::new(4, 7)).unwrap();
    assert_eq!(
        swapped_rect_codec().deserialize(&json, &TypedMap::new()),
        Ok(Rect::new(4, 7))
    );
}

#[test]
fn test_binary_follows_declaration_order() {
    let bytes = rect_codec().encode_to_vec(&Rect::new(4, 7));
    assert_eq!(swapped_rect_codec().encode_to_vec(&Rect::new(4, 7)), vec![0x07, 0x04]);

    // Same-typed fields swap silently
    let decoded = swapped_rect_codec()
        .decode(&mut ByteReader::new(&bytes), &TypedMap::new())
        .unwrap();
    assert_eq!(decoded, Rect::new(7, 4));
}

#[derive(Debug, Clone, PartialEq)]
struct Label {
    text: String,
    size: i32,
}

#[test]
fn test_binary_type_mismatch_after_reorder_fails() {
    let text_first = create(
        (
            StringLoadable::DEFAULT.required_field("text", |l: &Label| &l.text),
            IntLoadable::ANY.required_field("size", |l: &Label| &l.size),
        ),
        |text: String, size: i32| Label { text, size },
    );
    let size_first = create(
        (
            IntLoadable::ANY.required_field("size", |l: &Label| &l.size),
            StringLoadable::DEFAULT.required_field("text", |l: &Label| &l.text),
        ),
        |size: i32, text: String| Label { text, size },
    );

    let label = Label {
        text: "hello".to_string(),
        size: 12,
    };
    let bytes = text_first.encode_to_vec(&label);
    let mut reader = ByteReader::new(&bytes);

    // size reads the string length (5), text then claims 104 ('h') bytes
    let err = size_first.decode(&mut reader, &TypedMap::new()).unwrap_err();
    match err {
        LoadError::BinaryDecodeFailure { index, key, .. } => {
            assert_eq!(index, 1);
            assert_eq!(key, "text");
        }
        other => panic!("Expected BinaryDecodeFailure, got {:?}", other),
    }
}

#[test]
fn test_decode_reads_exactly_one_record() {
    let codec = rect_codec();
    let mut buf = ByteBuf::new();
    codec.encode(&Rect::new(1, 2), &mut buf);
    codec.encode(&Rect::new(300, -1), &mut buf);

    let ctx = TypedMap::new();
    let mut reader = buf.reader();
    assert_eq!(codec.decode(&mut reader, &ctx), Ok(Rect::new(1, 2)));
    assert_eq!(codec.decode(&mut reader, &ctx), Ok(Rect::new(300, -1)));
    assert!(reader.is_exhausted());
}

proptest! {
    #[test]
    fn swapped_order_misassigns_distinct_values(width in any::<i32>(), height in any::<i32>()) {
        prop_assume!(width != height);
        let original = Rect::new(width, height);
        let bytes = rect_codec().encode_to_vec(&original);
        prop_assert_ne!(swapped_rect_codec().encode_to_vec(&original), bytes.clone());

        let decoded = swapped_rect_codec()
            .decode(&mut ByteReader::new(&bytes), &TypedMap::new())
            .unwrap();
        prop_assert_ne!(&decoded, &original);
        prop_assert_eq!(decoded, Rect::new(height, width));
    }
}
