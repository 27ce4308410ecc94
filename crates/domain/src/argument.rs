//! Typed call arguments and the per-endpoint argument list.
//!
//! Every endpoint carries an ordered list of [`Argument`]s. The list keeps a
//! trailing blank slot (an argument of type [`ArgumentType::None`]) which the
//! editor fills in to add a new argument. Filling the last slot appends a
//! fresh blank one.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DomainError, DomainResult};
use crate::id::generate_id;
use crate::path::{remove_item_at_index, replace_item_at_index};

/// Type tag of a call argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentType {
    /// Unset slot; excluded from the call.
    #[default]
    None,
    /// Arbitrary JSON object.
    Object,
    /// String scalar.
    String,
    /// Number scalar.
    Number,
    /// Boolean scalar.
    Boolean,
    /// Array of JSON values.
    Array,
}

impl ArgumentType {
    /// All argument types, in picker order.
    pub const ALL: [Self; 6] = [
        Self::None,
        Self::Object,
        Self::String,
        Self::Number,
        Self::Boolean,
        Self::Array,
    ];

    /// Label shown in the type picker.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::None => "Select one type",
            Self::Object => "Object",
            Self::String => "String",
            Self::Number => "Number",
            Self::Boolean => "Boolean",
            Self::Array => "Array",
        }
    }

    /// Wire name of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Object => "object",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
        }
    }
}

impl std::fmt::Display for ArgumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `{ name, description }` pair stored under an argument's `type` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentKind {
    /// The type tag.
    pub name: ArgumentType,
    /// Human readable label.
    pub description: String,
}

impl From<ArgumentType> for ArgumentKind {
    fn from(name: ArgumentType) -> Self {
        Self {
            name,
            description: name.description().to_string(),
        }
    }
}

/// A single typed call argument.
///
/// Which payload field is meaningful depends on the type: `value` for
/// scalars, `array` for arrays, `json` for objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    /// Row identity, stable across edits.
    pub id: String,

    /// Type tag and label.
    #[serde(rename = "type")]
    pub kind: ArgumentKind,

    /// Scalar payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    /// Array payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array: Option<Vec<Value>>,

    /// Object payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<Value>,
}

impl Argument {
    fn with_kind(name: ArgumentType) -> Self {
        Self {
            id: generate_id(),
            kind: name.into(),
            value: None,
            array: None,
            json: None,
        }
    }

    /// Creates a blank "add new argument" slot.
    #[must_use]
    pub fn blank() -> Self {
        Self::with_kind(ArgumentType::None)
    }

    /// Creates a string argument.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            value: Some(Value::String(value.into())),
            ..Self::with_kind(ArgumentType::String)
        }
    }

    /// Creates a number argument. Non-finite values become `null`.
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self {
            value: Some(Value::from(value)),
            ..Self::with_kind(ArgumentType::Number)
        }
    }

    /// Creates a boolean argument.
    #[must_use]
    pub fn boolean(value: bool) -> Self {
        Self {
            value: Some(Value::Bool(value)),
            ..Self::with_kind(ArgumentType::Boolean)
        }
    }

    /// Creates an array argument.
    #[must_use]
    pub fn array(items: Vec<Value>) -> Self {
        Self {
            array: Some(items),
            ..Self::with_kind(ArgumentType::Array)
        }
    }

    /// Creates an object argument.
    #[must_use]
    pub fn object(json: Value) -> Self {
        Self {
            json: Some(json),
            ..Self::with_kind(ArgumentType::Object)
        }
    }

    /// Returns the type tag.
    #[must_use]
    pub const fn argument_type(&self) -> ArgumentType {
        self.kind.name
    }

    /// Returns true for the blank `none` slot.
    #[must_use]
    pub const fn is_blank(&self) -> bool {
        matches!(self.kind.name, ArgumentType::None)
    }

    /// Converts the argument into the literal value sent with the call.
    ///
    /// `None` arguments are excluded from the call entirely. Missing payloads
    /// become `null`; booleans take the truthiness of `value`.
    #[must_use]
    pub fn materialize(&self) -> Option<Value> {
        match self.kind.name {
            ArgumentType::None => None,
            ArgumentType::Object => Some(self.json.clone().unwrap_or(Value::Null)),
            ArgumentType::Array => Some(self.array.clone().map_or(Value::Null, Value::Array)),
            ArgumentType::String | ArgumentType::Number => {
                Some(self.value.clone().unwrap_or(Value::Null))
            }
            ArgumentType::Boolean => Some(Value::Bool(is_truthy(self.value.as_ref()))),
        }
    }
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// Ordered argument list of one endpoint.
///
/// New lists start with a single blank slot. [`ArgumentList::set`] on the
/// last index appends a new blank slot; [`ArgumentList::remove`] never
/// restores it, use [`ArgumentList::ensure_trailing_blank`] for that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArgumentList(Vec<Argument>);

impl ArgumentList {
    /// Creates a list holding only the blank slot.
    #[must_use]
    pub fn new() -> Self {
        Self(vec![Argument::blank()])
    }

    /// Replaces the argument at `index`. When `index` is the last position a
    /// fresh blank slot is appended after the replacement, unless the
    /// replacement is itself blank.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if `index` is past the end of the list.
    pub fn set(&mut self, index: usize, argument: Argument) -> DomainResult<()> {
        let append_blank = index + 1 == self.0.len() && !argument.is_blank();
        replace_item_at_index(&mut self.0, index, argument, "argument")?;
        if append_blank {
            self.0.push(Argument::blank());
        }
        Ok(())
    }

    /// Removes and returns the argument at `index`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if `index` is past the end of the list.
    pub fn remove(&mut self, index: usize) -> DomainResult<Argument> {
        remove_item_at_index(&mut self.0, index, "argument")
    }

    /// Appends a blank slot unless the list already ends with one.
    pub fn ensure_trailing_blank(&mut self) {
        if !self.has_trailing_blank() {
            self.0.push(Argument::blank());
        }
    }

    /// Returns true if the last argument is a blank slot.
    #[must_use]
    pub fn has_trailing_blank(&self) -> bool {
        self.0.last().is_some_and(Argument::is_blank)
    }

    /// Materializes every non-blank argument, in order.
    #[must_use]
    pub fn materialize(&self) -> Vec<Value> {
        self.0.iter().filter_map(Argument::materialize).collect()
    }

    /// Returns the argument at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Argument> {
        self.0.get(index)
    }

    /// Returns the arguments as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Argument] {
        &self.0
    }

    /// Returns an iterator over the arguments.
    pub fn iter(&self) -> std::slice::Iter<'_, Argument> {
        self.0.iter()
    }

    /// Number of arguments, blank slot included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the list holds no arguments at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an owned copy of the arguments.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Argument> {
        self.0.clone()
    }
}

impl Default for ArgumentList {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<Argument>> for ArgumentList {
    /// Wraps the arguments verbatim, without adding a blank slot.
    fn from(args: Vec<Argument>) -> Self {
        Self(args)
    }
}

impl<'a> IntoIterator for &'a ArgumentList {
    type Item = &'a Argument;
    type IntoIter = std::slice::Iter<'a, Argument>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
