//! Record selection.
//!
//! A [`Selector`] is a small predicate over records, built from lists of
//! field/value [`Condition`]s in four modes:
//!
//! - `select`: every field-group must be satisfied
//! - `include`: at least one field-group must be satisfied
//! - `exclude`: no field-group may be satisfied
//! - `quash`: the record is rejected if every field-group is satisfied
//!
//! Conditions of one mode are grouped by field; a group is satisfied when the
//! record's value for that field equals (or, for lists, shares an element
//! with) any of the group's condition values. A mode without conditions
//! imposes nothing, so the empty selector matches every record.
//!
//! # Example
//!
//! ```rust
//! use quarto_cite_render::Selector;
//! use serde_json::json;
//!
//! let books = Selector::from_serialized(
//!     r#"{"select": [{"field": "type", "value": "book"}]}"#,
//! ).unwrap();
//!
//! let records = vec![json!({"type": "book"}), json!({"type": "article"})];
//! let selected: Vec<_> = records.iter().filter(books.as_predicate::<&serde_json::Value>()).collect();
//! assert_eq!(selected.len(), 1);
//! ```

use crate::error::{Error, Result};
use hashlink::LinkedHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;
use std::str::FromStr;

// ============================================================================
// Records
// ============================================================================

/// A field value read from a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Scalar(Cow<'a, str>),
    List(Vec<Cow<'a, str>>),
}

impl FieldValue<'_> {
    fn values(&self) -> impl Iterator<Item = &str> {
        let slice: &[Cow<'_, str>] = match self {
            FieldValue::Scalar(s) => std::slice::from_ref(s),
            FieldValue::List(items) => items,
        };
        slice.iter().map(|s| s.as_ref())
    }
}

/// Anything whose fields can be read by name.
///
/// Absent fields are `None` and never match a condition.
pub trait Record {
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        (**self).field(name)
    }
}

impl Record for Value {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match self {
            Value::Object(map) => map.field(name),
            _ => None,
        }
    }
}

impl Record for serde_json::Map<String, Value> {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        self.get(name).and_then(json_field_value)
    }
}

impl<S: BuildHasher> Record for HashMap<String, String, S> {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        self.get(name).map(|v| FieldValue::Scalar(Cow::Borrowed(v.as_str())))
    }
}

impl Record for BTreeMap<String, String> {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        self.get(name).map(|v| FieldValue::Scalar(Cow::Borrowed(v.as_str())))
    }
}

/// Text of a scalar JSON value; numbers and booleans use their JSON spelling.
fn json_scalar_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn json_field_value(value: &Value) -> Option<FieldValue<'_>> {
    match value {
        Value::Array(items) => Some(FieldValue::List(
            items.iter().filter_map(json_scalar_text).collect(),
        )),
        other => json_scalar_text(other).map(FieldValue::Scalar),
    }
}

// ============================================================================
// Conditions
// ============================================================================

/// The value side of a condition: one value or a list of alternatives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum ConditionValue {
    One(String),
    Many(Vec<String>),
}

impl ConditionValue {
    fn values(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            ConditionValue::One(v) => std::slice::from_ref(v),
            ConditionValue::Many(vs) => vs,
        };
        slice.iter().map(String::as_str)
    }

    /// Whether any of these values equals any value of the field.
    pub fn matches(&self, field: &FieldValue<'_>) -> bool {
        self.values()
            .any(|wanted| field.values().any(|actual| actual == wanted))
    }
}

impl From<&str> for ConditionValue {
    fn from(value: &str) -> Self {
        ConditionValue::One(value.to_string())
    }
}

impl From<String> for ConditionValue {
    fn from(value: String) -> Self {
        ConditionValue::One(value)
    }
}

impl From<Vec<String>> for ConditionValue {
    fn from(values: Vec<String>) -> Self {
        ConditionValue::Many(values)
    }
}

impl TryFrom<Value> for ConditionValue {
    type Error = String;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        const EXPECTED: &str = "condition value must be a string, number, boolean or list";
        match &value {
            Value::Array(items) => items
                .iter()
                .map(|item| json_scalar_text(item).map(Cow::into_owned))
                .collect::<Option<Vec<_>>>()
                .map(ConditionValue::Many)
                .ok_or_else(|| EXPECTED.to_string()),
            other => json_scalar_text(other)
                .map(|s| ConditionValue::One(s.into_owned()))
                .ok_or_else(|| EXPECTED.to_string()),
        }
    }
}

impl From<ConditionValue> for Value {
    fn from(value: ConditionValue) -> Self {
        match value {
            ConditionValue::One(v) => Value::String(v),
            ConditionValue::Many(vs) => Value::Array(vs.into_iter().map(Value::String).collect()),
        }
    }
}

/// A single field/value condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub value: ConditionValue,
}

impl Condition {
    pub fn new(field: impl Into<String>, value: impl Into<ConditionValue>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Whether the record's field satisfies this condition.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        record
            .field(&self.field)
            .is_some_and(|field| self.value.matches(&field))
    }
}

/// How a list of conditions combines into a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectorMode {
    Select,
    Include,
    Exclude,
    Quash,
}

impl SelectorMode {
    pub const ALL: [SelectorMode; 4] = [
        SelectorMode::Select,
        SelectorMode::Include,
        SelectorMode::Exclude,
        SelectorMode::Quash,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SelectorMode::Select => "select",
            SelectorMode::Include => "include",
            SelectorMode::Exclude => "exclude",
            SelectorMode::Quash => "quash",
        }
    }
}

impl fmt::Display for SelectorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Selector
// ============================================================================

/// The structured form of a selector, as found in JSON input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectorSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub select: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quash: Vec<Condition>,
    /// Unrecognized top-level keys, kept only to be reported.
    #[serde(flatten, skip_serializing_if = "BTreeMap::is_empty")]
    unknown: BTreeMap<String, Value>,
}

impl SelectorSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style addition of a condition to a mode.
    pub fn with(mut self, mode: SelectorMode, condition: Condition) -> Self {
        self.conditions_mut(mode).push(condition);
        self
    }

    pub fn conditions(&self, mode: SelectorMode) -> &[Condition] {
        match mode {
            SelectorMode::Select => &self.select,
            SelectorMode::Include => &self.include,
            SelectorMode::Exclude => &self.exclude,
            SelectorMode::Quash => &self.quash,
        }
    }

    fn conditions_mut(&mut self, mode: SelectorMode) -> &mut Vec<Condition> {
        match mode {
            SelectorMode::Select => &mut self.select,
            SelectorMode::Include => &mut self.include,
            SelectorMode::Exclude => &mut self.exclude,
            SelectorMode::Quash => &mut self.quash,
        }
    }
}

/// Condition values grouped by field, in first-seen field order.
type FieldGroups = LinkedHashMap<String, Vec<ConditionValue>>;

/// An immutable record predicate.
#[derive(Debug, Clone, Default)]
pub struct Selector {
    spec: SelectorSpec,
    /// Only modes with at least one condition.
    groups: Vec<(SelectorMode, FieldGroups)>,
}

impl Selector {
    /// The empty selector, which matches every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selector from its structured form.
    pub fn from_structured(mut spec: SelectorSpec) -> Self {
        for key in std::mem::take(&mut spec.unknown).keys() {
            tracing::debug!(key = %key, "Ignoring unknown selector key");
        }

        let groups = SelectorMode::ALL
            .into_iter()
            .filter_map(|mode| {
                let conditions = spec.conditions(mode);
                if conditions.is_empty() {
                    return None;
                }
                let mut groups = FieldGroups::new();
                for condition in conditions {
                    match groups.get_mut(&condition.field) {
                        Some(values) => values.push(condition.value.clone()),
                        None => {
                            groups.insert(condition.field.clone(), vec![condition.value.clone()]);
                        }
                    }
                }
                Some((mode, groups))
            })
            .collect();

        Self { spec, groups }
    }

    /// Build a selector from a JSON value of the structured form.
    pub fn from_value(value: Value) -> Result<Self> {
        let input = value.to_string();
        serde_json::from_value(value)
            .map(Self::from_structured)
            .map_err(|e| Error::parse(&input, e.to_string()))
    }

    /// Build a selector from serialized JSON text.
    pub fn from_serialized(input: &str) -> Result<Self> {
        serde_json::from_str(input)
            .map(Self::from_structured)
            .map_err(|e| Error::parse(input, e.to_string()))
    }

    pub fn select(&self) -> &[Condition] {
        &self.spec.select
    }

    pub fn include(&self) -> &[Condition] {
        &self.spec.include
    }

    pub fn exclude(&self) -> &[Condition] {
        &self.spec.exclude
    }

    pub fn quash(&self) -> &[Condition] {
        &self.spec.quash
    }

    /// Every condition, in mode order (select, include, exclude, quash).
    pub fn conditions(&self) -> Vec<&Condition> {
        SelectorMode::ALL
            .into_iter()
            .flat_map(|mode| self.spec.conditions(mode))
            .collect()
    }

    /// Whether the selector has no conditions at all.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn spec(&self) -> &SelectorSpec {
        &self.spec
    }

    /// Serialize back to the JSON structured form.
    pub fn to_json(&self) -> Value {
        // SelectorSpec holds only strings and lists, which always serialize.
        serde_json::to_value(&self.spec).unwrap_or(Value::Null)
    }

    /// Evaluate the selector against a record.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        self.groups.iter().all(|(mode, groups)| {
            let mut satisfied = groups.iter().map(|(field, values)| {
                record
                    .field(field)
                    .is_some_and(|actual| values.iter().any(|v| v.matches(&actual)))
            });
            match mode {
                SelectorMode::Select => satisfied.all(|ok| ok),
                SelectorMode::Include => satisfied.any(|ok| ok),
                SelectorMode::Exclude => !satisfied.any(|ok| ok),
                SelectorMode::Quash => !satisfied.all(|ok| ok),
            }
        })
    }

    /// The selector as a closure, for use with `Iterator::filter`.
    pub fn as_predicate<R: Record>(&self) -> impl Fn(&R) -> bool + '_ {
        move |record: &R| self.matches(record)
    }

    /// The records this selector matches, in their original order.
    pub fn filter<'r, R: Record>(&self, records: &'r [R]) -> Vec<&'r R> {
        records.iter().filter(|r| self.matches(*r)).collect()
    }
}

impl PartialEq for Selector {
    fn eq(&self, other: &Self) -> bool {
        self.spec == other.spec
    }
}

impl From<SelectorSpec> for Selector {
    fn from(spec: SelectorSpec) -> Self {
        Self::from_structured(spec)
    }
}

impl FromStr for Selector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_serialized(s)
    }
}
