use std::collections::{btree_map, BTreeMap};

use error_stack::{report, IntoReport, ResultExt};
use serde_json::Value;

use crate::{
    configs::settings::DuplicateParamPolicy,
    errors::{CustomResult, DomainError},
    logger,
};

/// Decoded gateway response: parameter name to loosely typed value.
///
/// Views take the parameters they own out of the bag, so after every view has run
/// the bag only holds what nobody claimed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResponseBag {
    params: BTreeMap<String, Value>,
}

impl ResponseBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw Payflow name/value response, keeping the last value of a repeated
    /// parameter.
    pub fn from_nvp(raw: &str) -> CustomResult<Self, DomainError> {
        Self::from_nvp_with(raw, DuplicateParamPolicy::KeepLast)
    }

    /// Parses `NAME=value&NAME2=value2`. A name may carry a length tag, `NAME[7]=a&b=c=d`,
    /// in which case the value is exactly that many bytes and may contain `&` or `=`.
    pub fn from_nvp_with(
        raw: &str,
        duplicates: DuplicateParamPolicy,
    ) -> CustomResult<Self, DomainError> {
        let mut bag = Self::new();
        let mut rest = raw.trim_end_matches(['\r', '\n']);

        while !rest.is_empty() {
            if let Some(stripped) = rest.strip_prefix('&') {
                rest = stripped;
                continue;
            }

            let (name, after) = rest
                .split_once('=')
                .ok_or_else(|| report!(DomainError::MalformedResponse))
                .attach_printable_lazy(|| format!("Parameter without a value: {rest:.32}"))?;
            if name.is_empty() || name.contains('&') {
                return Err(report!(DomainError::MalformedResponse))
                    .attach_printable_lazy(|| format!("Invalid parameter name: {name:.32}"));
            }

            let (key, value, remaining) = match split_length_tag(name)? {
                Some((key, len)) => {
                    if len > after.len() || !after.is_char_boundary(len) {
                        return Err(report!(DomainError::InvalidLengthTag {
                            key: key.to_string()
                        }))
                        .attach_printable_lazy(|| {
                            format!("Tagged {len} bytes, {} available", after.len())
                        });
                    }
                    let (value, remaining) = after.split_at(len);
                    (key, value, remaining)
                }
                None => {
                    let end = after.find('&').unwrap_or(after.len());
                    let (value, remaining) = after.split_at(end);
                    (name, value, remaining)
                }
            };

            if !remaining.is_empty() && !remaining.starts_with('&') {
                return Err(report!(DomainError::InvalidLengthTag {
                    key: key.to_string()
                }))
                .attach_printable("Value continues past its length tag");
            }

            bag.insert_checked(key, value, duplicates)?;
            rest = remaining;
        }

        logger::debug!(params = bag.len(), "Parsed gateway response");
        Ok(bag)
    }

    /// Parses an `application/x-www-form-urlencoded` body, keeping the last value of a
    /// repeated parameter.
    pub fn from_urlencoded(raw: &str) -> CustomResult<Self, DomainError> {
        Self::from_urlencoded_with(raw, DuplicateParamPolicy::KeepLast)
    }

    pub fn from_urlencoded_with(
        raw: &str,
        duplicates: DuplicateParamPolicy,
    ) -> CustomResult<Self, DomainError> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(raw)
            .into_report()
            .change_context(DomainError::MalformedResponse)
            .attach_printable("Response body is not valid form data")?;

        let mut bag = Self::new();
        for (key, value) in pairs {
            bag.insert_checked(&key, value, duplicates)?;
        }
        logger::debug!(params = bag.len(), "Parsed form-encoded gateway response");
        Ok(bag)
    }

    fn insert_checked(
        &mut self,
        key: &str,
        value: impl Into<Value>,
        duplicates: DuplicateParamPolicy,
    ) -> CustomResult<(), DomainError> {
        if self.contains_key(key) {
            match duplicates {
                DuplicateParamPolicy::KeepLast => {
                    logger::warn!(param = key, "Duplicate response parameter, keeping the last value");
                }
                DuplicateParamPolicy::Reject => {
                    return Err(report!(DomainError::DuplicateParam {
                        key: key.to_string()
                    }));
                }
            }
        }
        self.insert(key, value);
        Ok(())
    }

    /// Builds a bag from a JSON object. Non-string members keep their JSON type, so
    /// views that expect text will refuse them. `null` members read as unset.
    pub fn from_json(value: Value) -> CustomResult<Self, DomainError> {
        match value {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(report!(DomainError::MalformedResponse))
                .attach_printable_lazy(|| format!("Expected a JSON object, found {}", kind(&other))),
        }
    }

    pub fn from_json_str(raw: &str) -> CustomResult<Self, DomainError> {
        let value: Value = serde_json::from_str(raw)
            .into_report()
            .change_context(DomainError::MalformedResponse)
            .attach_printable("Response body is not valid JSON")?;
        Self::from_json(value)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.params.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.params.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Remaining parameter names, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.params.iter()
    }

    pub fn into_inner(self) -> BTreeMap<String, Value> {
        self.params
    }
}

impl<K, V> FromIterator<(K, V)> for ResponseBag
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl IntoIterator for ResponseBag {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.into_iter()
    }
}

pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn split_length_tag(name: &str) -> CustomResult<Option<(&str, usize)>, DomainError> {
    let Some((key, tag)) = name.split_once('[') else {
        return Ok(None);
    };
    let len = tag
        .strip_suffix(']')
        .ok_or_else(|| report!(DomainError::InvalidLengthTag { key: key.to_string() }))?
        .parse::<usize>()
        .into_report()
        .change_context(DomainError::InvalidLengthTag { key: key.to_string() })?;
    Ok(Some((key, len)))
}
