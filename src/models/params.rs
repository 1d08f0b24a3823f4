//! Parameters describing one page view

use std::fmt;

use crate::environment::PageEnvironment;
use crate::identity::{random_u32, visitor_id, SessionStore};
use crate::models::{SiteId, TrackerOptions};

/// Scalar parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Int(i64),
    Text(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Insertion-ordered parameter map
///
/// Serialization follows insertion order, so the order of `insert` calls
/// is the order keys appear on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackingParameters {
    entries: Vec<(String, ParamValue)>,
}

impl TrackingParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, keeping its original position if already present
    pub fn insert(&mut self, key: &str, value: impl Into<ParamValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build the parameter set for one page view
///
/// Key order: `idsite, rec, url, [action_name], _id, rand, apiv, [urlref]`.
/// Optional keys are left out entirely rather than sent empty.
pub fn build_parameters(
    site_id: SiteId,
    options: &TrackerOptions,
    env: &dyn PageEnvironment,
    store: Option<&dyn SessionStore>,
) -> TrackingParameters {
    let mut params = TrackingParameters::new();

    params.insert("idsite", site_id.get());
    params.insert("rec", 1i64);
    params.insert("url", env.current_url().to_string());

    if let Some(title) = env.current_title() {
        params.insert("action_name", title);
    }
    params.insert("_id", visitor_id(store));
    // Cache-buster
    params.insert("rand", random_u32());
    params.insert("apiv", 1i64);

    if options.send_referrer {
        if let Some(referrer) = env.referrer().filter(|r| !r.is_empty()) {
            params.insert("urlref", referrer);
        }
    }

    params
}
