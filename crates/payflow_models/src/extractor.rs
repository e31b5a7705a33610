//! Mapping-table driven extraction of typed views out of a [`ResponseBag`].

use error_stack::report;
use serde_json::Value;

use crate::{
    bag::{self, ResponseBag},
    consts::ParamKey,
    errors::{CustomResult, DataObjectError},
    logger,
};

/// How a single parameter lands in a view.
pub enum FieldSetter<V> {
    /// Stores the text as-is into the slot returned by the accessor.
    Text(fn(&mut V) -> &mut Option<String>),
    /// Converts the text before storing it.
    Parsed(fn(&mut V, String) -> CustomResult<(), DataObjectError>),
}

pub struct FieldMapping<V> {
    pub key: ParamKey,
    pub setter: FieldSetter<V>,
}

impl<V> FieldMapping<V> {
    pub const fn text(key: ParamKey, slot: fn(&mut V) -> &mut Option<String>) -> Self {
        Self {
            key,
            setter: FieldSetter::Text(slot),
        }
    }

    pub const fn parsed(
        key: ParamKey,
        set: fn(&mut V, String) -> CustomResult<(), DataObjectError>,
    ) -> Self {
        Self {
            key,
            setter: FieldSetter::Parsed(set),
        }
    }
}

pub(crate) mod private {
    use super::FieldMapping;

    pub trait Sealed: Sized + 'static {
        /// Every field unset. Only the extractor builds views.
        fn empty() -> Self;

        /// Ordered (parameter, setter) table of the view.
        fn mappings() -> &'static [FieldMapping<Self>];
    }
}

/// A read-only view populated from a response bag.
pub trait ResponseView: private::Sealed {
    const NAME: &'static str;

    /// Pulls this view's parameters out of `bag`. See [`extract`].
    fn from_bag(bag: &mut ResponseBag) -> CustomResult<Self, DataObjectError> {
        extract(bag)
    }

    /// Parameters this view takes out of the bag, in extraction order.
    fn param_keys() -> Vec<ParamKey> {
        Self::mappings().iter().map(|mapping| mapping.key).collect()
    }
}

/// Runs `V`'s mapping table over `bag`.
///
/// Each present parameter is read, converted and then removed from the bag. Missing
/// or null parameters leave their field unset. The bag is not restored on failure.
pub fn extract<V: ResponseView>(bag: &mut ResponseBag) -> CustomResult<V, DataObjectError> {
    let mut view = V::empty();
    let mut consumed = 0usize;

    for mapping in V::mappings() {
        let key = mapping.key.as_str();
        let Some(value) = bag.get(key) else {
            continue;
        };

        // A null value is consumed but leaves the field unset.
        if let Some(text) = as_text(mapping.key, value)? {
            match &mapping.setter {
                FieldSetter::Text(slot) => *slot(&mut view) = Some(text),
                FieldSetter::Parsed(set) => set(&mut view, text).map_err(|report| {
                    logger::debug!(
                        view = V::NAME,
                        param = key,
                        error = ?report.current_context(),
                        "Field conversion failed"
                    );
                    report
                })?,
            }
        }

        bag.remove(key);
        consumed += 1;
    }

    logger::debug!(
        view = V::NAME,
        consumed,
        remaining = bag.len(),
        "Extracted response view"
    );
    Ok(view)
}

fn as_text(key: ParamKey, value: &Value) -> CustomResult<Option<String>, DataObjectError> {
    match value {
        Value::String(text) => Ok(Some(text.clone())),
        Value::Null => Ok(None),
        other => Err(report!(DataObjectError::mapping(key))
            .attach_printable(format!("Expected text, found {}", bag::kind(other)))),
    }
}
