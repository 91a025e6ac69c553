//! Composite Value Tests
//!
//! Records built from enums, lists, maps, mapped values and nested
//! records, including the keys reported for failures deep inside them.

use crate::*;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Building,
    Redstone,
    Misc,
}

impl NamedEnum for Category {
    const VARIANTS: &'static [Self] = &[Category::Building, Category::Redstone, Category::Misc];

    fn name(&self) -> &'static str {
        match self {
            Category::Building => "building",
            Category::Redstone => "redstone",
            Category::Misc => "misc",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Stack {
    item: String,
    count: i32,
}

fn stack_codec() -> impl RecordCodec<Stack> + Loadable<Output = Stack> {
    create(
        (
            StringLoadable::NON_EMPTY.required_field("item", |s: &Stack| &s.item),
            IntLoadable::range(1, 64).default_field("count", 1, |s: &Stack| &s.count),
        ),
        |item: String, count: i32| Stack { item, count },
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Seconds(f64);

#[derive(Debug, Clone, PartialEq)]
struct Recipe {
    category: Category,
    ingredients: Vec<Stack>,
    result: Stack,
    cook_time: Seconds,
    tags: BTreeMap<String, i64>,
}

fn recipe_codec() -> impl RecordCodec<Recipe> {
    create(
        (
            EnumLoadable::<Category>::new().default_field(
                "category",
                Category::Misc,
                |r: &Recipe| &r.category,
            ),
            stack_codec().list(1).required_field("ingredients", |r: &Recipe| &r.ingredients),
            stack_codec().required_field("result", |r: &Recipe| &r.result),
            DoubleLoadable
                .try_map(
                    |ticks: f64| {
                        if ticks >= 0.0 {
                            Ok(Seconds(ticks / 20.0))
                        } else {
                            Err("non-negative tick count".to_string())
                        }
                    },
                    |s: &Seconds| s.0 * 20.0,
                )
                .default_field("cook_time", Seconds(10.0), |r: &Recipe| &r.cook_time),
            LongLoadable
                .string_map()
                .default_field("tags", BTreeMap::new(), |r: &Recipe| &r.tags),
        ),
        |category: Category,
         ingredients: Vec<Stack>,
         result: Stack,
         cook_time: Seconds,
         tags: BTreeMap<String, i64>| Recipe {
            category,
            ingredients,
            result,
            cook_time,
            tags,
        },
    )
}

fn furnace_json() -> Json {
    json!({
        "category": "building",
        "ingredients": [{"item": "cobblestone", "count": 8}],
        "result": {"item": "furnace"},
        "cook_time": 100.0,
        "tags": {"weight": 3}
    })
}

fn furnace() -> Recipe {
    Recipe {
        category: Category::Building,
        ingredients: vec![Stack {
            item: "cobblestone".to_string(),
            count: 8,
        }],
        result: Stack {
            item: "furnace".to_string(),
            count: 1,
        },
        cook_time: Seconds(5.0),
        tags: [("weight".to_string(), 3)].into_iter().collect(),
    }
}

// =============================================================================
// ROUND TRIPS
// =============================================================================

#[test]
fn test_recipe_from_json() {
    let recipe = recipe_codec()
        .deserialize(&object(furnace_json()), &TypedMap::new())
        .unwrap();
    assert_eq!(recipe, furnace());
}

#[test]
fn test_recipe_json_round_trip() {
    let codec = recipe_codec();
    let json = codec.serialize(&furnace()).unwrap();
    assert_eq!(Json::Object(json.clone()), furnace_json());
    assert_eq!(codec.deserialize(&json, &TypedMap::new()), Ok(furnace()));
}

#[test]
fn test_recipe_binary_round_trip() {
    let codec = recipe_codec();
    let bytes = codec.encode_to_vec(&furnace());
    let mut reader = ByteReader::new(&bytes);
    assert_eq!(codec.decode(&mut reader, &TypedMap::new()), Ok(furnace()));
    assert!(reader.is_exhausted());
}

#[test]
fn test_recipe_defaults() {
    let recipe = recipe_codec()
        .deserialize(
            &object(json!({
                "ingredients": [{"item": "sand"}],
                "result": {"item": "glass"}
            })),
            &TypedMap::new(),
        )
        .unwrap();
    assert_eq!(recipe.category, Category::Misc);
    assert_eq!(recipe.cook_time, Seconds(10.0));
    assert!(recipe.tags.is_empty());
    assert_eq!(recipe.ingredients[0].count, 1);
}

// =============================================================================
// NESTED DIAGNOSTICS
// =============================================================================

#[test]
fn test_nested_list_element_key() {
    let mut json = object(furnace_json());
    json.insert(
        "ingredients".to_string(),
        json!([{"item": "cobblestone"}, {"item": "coal", "count": 65}]),
    );
    let err = recipe_codec()
        .deserialize(&json, &TypedMap::new())
        .unwrap_err();
    assert_eq!(err.key(), Some("ingredients[1].count"));
}

#[test]
fn test_nested_record_missing_key() {
    let mut json = object(furnace_json());
    json.insert("result".to_string(), json!({"count": 2}));
    let err = recipe_codec()
        .deserialize(&json, &TypedMap::new())
        .unwrap_err();
    assert_eq!(err, LoadError::missing("result.item"));
}

#[test]
fn test_empty_list_rejected() {
    let mut json = object(furnace_json());
    json.insert("ingredients".to_string(), json!([]));
    let err = recipe_codec()
        .deserialize(&json, &TypedMap::new())
        .unwrap_err();
    assert!(matches!(err, LoadError::InvalidFieldValue { ref key, .. } if key == "ingredients"));
}

#[test]
fn test_unknown_enum_name() {
    let mut json = object(furnace_json());
    json.insert("category".to_string(), json!("food"));
    let err = recipe_codec()
        .deserialize(&json, &TypedMap::new())
        .unwrap_err();
    assert_eq!(
        err,
        LoadError::InvalidFieldValue {
            key: "category".to_string(),
            expected: "one of [building, redstone, misc]".to_string(),
            actual: "\"food\"".to_string(),
        }
    );
}

#[test]
fn test_try_map_rejection() {
    let mut json = object(furnace_json());
    json.insert("cook_time".to_string(), json!(-5));
    let err = recipe_codec()
        .deserialize(&json, &TypedMap::new())
        .unwrap_err();
    assert_eq!(
        err,
        LoadError::InvalidFieldValue {
            key: "cook_time".to_string(),
            expected: "non-negative tick count".to_string(),
            actual: "-5".to_string(),
        }
    );
}

#[test]
fn test_invalid_enum_ordinal_in_binary() {
    let codec = recipe_codec();
    let mut bytes = codec.encode_to_vec(&furnace());
    bytes[0] = 9;
    let err = codec
        .decode(&mut ByteReader::new(&bytes), &TypedMap::new())
        .unwrap_err();
    match err {
        LoadError::BinaryDecodeFailure { index, key, source } => {
            assert_eq!(index, 0);
            assert_eq!(key, "category");
            assert!(matches!(
                source,
                BufferError::InvalidDiscriminant { value: 9, .. }
            ));
        }
        other => panic!("Expected BinaryDecodeFailure, got {:?}", other),
    }
}
