//! Loading records from JSON content.
//!
//! A [`ContentLoader`] drives a record codec over JSON documents keyed by
//! id. Each document is loaded with a fresh context holding its id under
//! [`ID`], so records can pick their own id up with a context field.
//!
//! Batch loads collect failures instead of aborting, unless the loader is
//! configured with `fail_fast`.

use crate::config::LoaderOptions;
use crate::error::{Error, Result};
use crate::sync::SyncPacket;
use loadable_codec::RecordCodec;
use loadable_core::{Json, TypedMap, ID};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info, warn};

/// Loads and saves JSON content for one record type.
///
/// # Example
///
/// ```ignore
/// let loader = ContentLoader::new(&RECIPE_CODEC);
/// let recipe = loader.load("oak_planks", r#"{"count": 4}"#)?;
/// ```
pub struct ContentLoader<'a, R> {
    codec: &'a dyn RecordCodec<R>,
    options: LoaderOptions,
}

impl<'a, R> ContentLoader<'a, R> {
    /// Create a loader with default options.
    pub fn new(codec: &'a dyn RecordCodec<R>) -> Self {
        Self::with_options(codec, LoaderOptions::default())
    }

    /// Create a loader with explicit options.
    pub fn with_options(codec: &'a dyn RecordCodec<R>, options: LoaderOptions) -> Self {
        Self { codec, options }
    }

    /// The options this loader runs with.
    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    /// Sync packets for the same codec, read under this loader's limits.
    pub fn sync_packet(&self) -> SyncPacket<'a, R> {
        SyncPacket::with_options(self.codec, &self.options)
    }

    /// Parse `text` and load it as the record named `id`.
    pub fn load(&self, id: &str, text: &str) -> Result<R> {
        let json: Json = serde_json::from_str(text)?;
        self.load_value(id, &json)
    }

    /// Load an already parsed JSON document as the record named `id`.
    pub fn load_value(&self, id: &str, json: &Json) -> Result<R> {
        let object = json.as_object().ok_or(Error::NotAnObject {
            actual: json_kind(json),
        })?;
        let context = TypedMap::new().with(ID, id.to_string());
        Ok(self.codec.deserialize(object, &context)?)
    }

    /// Load every `(id, text)` entry.
    ///
    /// Failed records are logged and reported; the rest are loaded. When an
    /// id appears twice the later entry wins.
    pub fn load_all<I, K, T>(&self, entries: I) -> LoadReport<R>
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: AsRef<str>,
    {
        let mut report = LoadReport::default();

        for (id, text) in entries {
            let id = id.into();
            match self.load(&id, text.as_ref()) {
                Ok(record) => {
                    debug!("Loaded record {}", id);
                    if report.loaded.insert(id.clone(), record).is_some() {
                        warn!("Record {} defined more than once, keeping the last", id);
                    }
                }
                Err(e) => {
                    warn!("Failed to load record {}: {}", id, e);
                    report.failures.push((id, e));
                    if self.options.fail_fast {
                        break;
                    }
                }
            }
        }

        info!("{}", report.summary());
        report
    }

    /// Serialize `record` to pretty-printed JSON text.
    pub fn save(&self, record: &R) -> Result<String> {
        let object = self.codec.serialize(record)?;
        Ok(serde_json::to_string_pretty(&Json::Object(object))?)
    }
}

impl<R> fmt::Debug for ContentLoader<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentLoader")
            .field("keys", &self.codec.keys())
            .field("options", &self.options)
            .finish()
    }
}

/// Outcome of [`ContentLoader::load_all`].
#[derive(Debug)]
pub struct LoadReport<R> {
    /// Successfully loaded records by id
    pub loaded: BTreeMap<String, R>,
    /// Failed ids with their errors, in input order
    pub failures: Vec<(String, Error)>,
}

impl<R> Default for LoadReport<R> {
    fn default() -> Self {
        Self {
            loaded: BTreeMap::new(),
            failures: Vec::new(),
        }
    }
}

impl<R> LoadReport<R> {
    /// True when no record failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Look up a loaded record.
    pub fn get(&self, id: &str) -> Option<&R> {
        self.loaded.get(id)
    }

    /// One-line description of the load.
    pub fn summary(&self) -> String {
        format!(
            "Content load complete: {} loaded, {} failed",
            self.loaded.len(),
            self.failures.len()
        )
    }
}

fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}
