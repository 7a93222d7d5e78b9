//! Resource info grouped by namespace.
//!
//! An `Info` holds the raw namespace map (`basic`, `details`, ...) exactly as
//! it would be serialized, plus typed accessors for the common fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

pub const BASIC: &str = "basic";
pub const DETAILS: &str = "details";
/// Media metadata namespace.
pub const MEDIA: &str = "mediaproxy.media";

/// Resource kind as stored in `details.type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ResourceType {
    Unknown = 0,
    Directory = 1,
    File = 2,
    Character = 3,
    BlockSpecialFile = 4,
    Fifo = 5,
    Socket = 6,
    Symlink = 7,
}

impl From<ResourceType> for u8 {
    fn from(t: ResourceType) -> u8 {
        t as u8
    }
}

impl TryFrom<u8> for ResourceType {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Ok(match v {
            0 => ResourceType::Unknown,
            1 => ResourceType::Directory,
            2 => ResourceType::File,
            3 => ResourceType::Character,
            4 => ResourceType::BlockSpecialFile,
            5 => ResourceType::Fifo,
            6 => ResourceType::Socket,
            7 => ResourceType::Symlink,
            other => return Err(format!("unknown resource type {other}")),
        })
    }
}

/// Set of namespaces requested from `getinfo`. `basic` is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespaces(BTreeSet<String>);

impl Namespaces {
    pub fn basic() -> Self {
        let mut set = BTreeSet::new();
        set.insert(BASIC.to_string());
        Namespaces(set)
    }

    pub fn with(mut self, namespace: &str) -> Self {
        self.0.insert(namespace.to_string());
        self
    }

    pub fn contains(&self, namespace: &str) -> bool {
        self.0.contains(namespace)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for Namespaces {
    fn default() -> Self {
        Namespaces::basic()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Namespaces {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut ns = Namespaces::basic();
        for s in iter {
            ns.0.insert(s.as_ref().to_string());
        }
        ns
    }
}

/// Info about a single resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Info {
    raw: Map<String, Value>,
}

impl Info {
    pub fn new(name: &str, is_dir: bool) -> Self {
        let mut basic = Map::new();
        basic.insert("name".into(), Value::from(name));
        basic.insert("is_dir".into(), Value::from(is_dir));
        let mut raw = Map::new();
        raw.insert(BASIC.into(), Value::Object(basic));
        Info { raw }
    }

    pub fn from_raw(raw: Map<String, Value>) -> Self {
        Info { raw }
    }

    /// Adds (or replaces) a whole namespace.
    pub fn set_namespace(&mut self, namespace: &str, fields: Map<String, Value>) {
        self.raw.insert(namespace.to_string(), Value::Object(fields));
    }

    pub fn has_namespace(&self, namespace: &str) -> bool {
        self.raw.contains_key(namespace)
    }

    pub fn get(&self, namespace: &str, key: &str) -> Option<&Value> {
        self.raw.get(namespace)?.get(key)
    }

    pub fn name(&self) -> &str {
        self.get(BASIC, "name").and_then(Value::as_str).unwrap_or("")
    }

    pub fn is_dir(&self) -> bool {
        self.get(BASIC, "is_dir")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn is_file(&self) -> bool {
        !self.is_dir()
    }

    /// `details.size`; `None` when details were not requested or size is unknown.
    pub fn size(&self) -> Option<u64> {
        self.get(DETAILS, "size").and_then(Value::as_u64)
    }

    pub fn resource_type(&self) -> Option<ResourceType> {
        self.get(DETAILS, "type")
            .and_then(Value::as_u64)
            .and_then(|v| u8::try_from(v).ok())
            .and_then(|v| ResourceType::try_from(v).ok())
    }

    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }

    pub fn into_raw(self) -> Map<String, Value> {
        self.raw
    }
}
