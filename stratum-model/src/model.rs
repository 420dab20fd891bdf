//! The state-model contract.
//!
//! [`StateModel`] is the trait every persistable state type implements. A
//! model declares a stable type key, an optional instance id, and a static
//! field-to-scope mapping; scoped serialization and merging are provided on
//! top of the type's own `serde` representation, so implementors never
//! write JSON handling by hand.

use crate::error::{ModelError, ModelResult};
use crate::key::attribute_key;
use crate::scope::Scope;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// A scope-tagged application state type.
///
/// The serde representation of the type must round-trip: every field that
/// [`model_id`](StateModel::model_id) or application code depends on has to
/// survive serialize-then-deserialize, since merging works on the JSON
/// form. The id, when the model has one, is an ordinary serialized field;
/// it never appears in persisted payloads because only declared state
/// fields are selected into them.
///
/// # Declaring a model
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use stratum_model::{Scope, StateModel};
///
/// #[derive(Debug, Default, Serialize, Deserialize)]
/// struct Counter {
///     id: Option<String>,
///     count: u64,
/// }
///
/// impl StateModel for Counter {
///     const TYPE_KEY: &'static str = "counter";
///
///     fn field_scopes() -> &'static [(&'static str, Scope)] {
///         &[("count", Scope::User)]
///     }
///
///     fn model_id(&self) -> Option<&str> {
///         self.id.as_deref()
///     }
///
///     fn with_id(id: Option<String>) -> Self {
///         Self { id, ..Self::default() }
///     }
/// }
///
/// let counter = Counter::with_id(Some("a".to_string()));
/// assert_eq!(counter.attribute_key(), "counter:a");
/// ```
pub trait StateModel: Serialize + DeserializeOwned + Send + Sync {
    /// Stable type identifier used in attribute keys.
    ///
    /// Renaming a Rust type does not move persisted state as long as the
    /// type key stays the same. Must not contain `:`.
    const TYPE_KEY: &'static str;

    /// Static declaration of which serialized field belongs to which scope.
    ///
    /// Names refer to the type's serde representation. Fields not listed
    /// here are never persisted or merged.
    fn field_scopes() -> &'static [(&'static str, Scope)];

    /// Instance id. `None` or an empty string addresses the singleton
    /// instance of the type.
    fn model_id(&self) -> Option<&str>;

    /// Fresh, unpersisted instance bound to the given id.
    fn with_id(id: Option<String>) -> Self;

    /// Attribute key addressing this instance in every backing store.
    fn attribute_key(&self) -> String {
        attribute_key(Self::TYPE_KEY, self.model_id())
    }

    /// Names of the fields carried in `scope`'s serialized view.
    ///
    /// A field belongs to the view of its own scope and of every narrower
    /// one, so the session view spans all declared fields while the
    /// application view carries only application-scoped ones.
    fn scope_fields(scope: Scope) -> Vec<&'static str> {
        Self::field_scopes()
            .iter()
            .filter(|(_, field_scope)| field_scope.visible_in(scope))
            .map(|(name, _)| *name)
            .collect()
    }

    /// True when at least one declared field is carried in `scope`'s view.
    fn has_fields_in(scope: Scope) -> bool {
        Self::field_scopes()
            .iter()
            .any(|(_, field_scope)| field_scope.visible_in(scope))
    }

    /// Serializes `scope`'s view of this model as a JSON field map.
    ///
    /// Top-level keys are declared field names only; the id travels in the
    /// attribute key, never in payloads.
    fn to_scoped_map(&self, scope: Scope) -> ModelResult<Map<String, Value>> {
        let Value::Object(mut fields) = serde_json::to_value(self)? else {
            return Err(ModelError::NotAnObject(Self::TYPE_KEY));
        };
        let mut view = Map::new();
        for name in Self::scope_fields(scope) {
            if let Some(value) = fields.remove(name) {
                view.insert(name.to_string(), value);
            }
        }
        Ok(view)
    }

    /// Serializes `scope`'s view of this model as JSON text.
    fn to_scoped_json(&self, scope: Scope) -> ModelResult<String> {
        Ok(serde_json::to_string(&self.to_scoped_map(scope)?)?)
    }

    /// Overlays matching fields of `scope`'s view from a decoded field map.
    ///
    /// Keys outside the view, and view fields absent from the map, are left
    /// untouched. Returns true iff at least one field was applied.
    fn merge_scoped_fields(
        &mut self,
        fields: &Map<String, Value>,
        scope: Scope,
    ) -> ModelResult<bool> {
        let Value::Object(mut current) = serde_json::to_value(&*self)? else {
            return Err(ModelError::NotAnObject(Self::TYPE_KEY));
        };
        let mut applied = false;
        for name in Self::scope_fields(scope) {
            if let Some(value) = fields.get(name) {
                current.insert(name.to_string(), value.clone());
                applied = true;
            }
        }
        if applied {
            *self = serde_json::from_value(Value::Object(current))?;
        }
        Ok(applied)
    }

    /// Parses a JSON payload and overlays matching fields of `scope`'s view.
    ///
    /// Malformed JSON and non-object payloads are errors; an object with no
    /// matching keys merges nothing and returns false.
    fn merge_scoped_json(&mut self, json: &str, scope: Scope) -> ModelResult<bool> {
        let Value::Object(fields) = serde_json::from_str(json)? else {
            return Err(ModelError::PayloadNotAnObject(Self::TYPE_KEY));
        };
        self.merge_scoped_fields(&fields, scope)
    }
}
