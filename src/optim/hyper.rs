//! Hyperparameter maps with a total order
//!
//! Override sets have to be deduplicated and sorted before they become
//! parameter groups. `serde_json::Value` has neither `Ord` nor `Hash`, so
//! `Hyperparams` defines a canonical order: keys lexicographically, then
//! values by kind (null < bool < number < string < array < object), numbers
//! by exact numeric value. `1` and `1.0` compare equal, as do `0.0` and
//! `-0.0`.
//!
//! Distinct override sets become groups in this value order, not in the order
//! they were first seen, so the grouping is independent of parameter order.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Error, Result};

/// Named hyperparameter values, e.g. `{lr: 0.1, weight_decay: 0.0}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hyperparams(BTreeMap<String, Value>);

impl Hyperparams {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a value, returning the previous one
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Look up a value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Look up a numeric value
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(Value::as_f64)
    }

    /// Whether the key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy of `self` with every entry of `other` written over it
    pub fn merged(&self, other: &Hyperparams) -> Hyperparams {
        let mut out = self.clone();
        for (k, v) in &other.0 {
            out.0.insert(k.clone(), v.clone());
        }
        out
    }

    /// Serialize a typed options struct into a map
    pub fn from_typed<T: Serialize>(component: &str, options: &T) -> Result<Self> {
        serde_json::to_value(options)
            .and_then(serde_json::from_value)
            .map_err(|e| Error::invalid_param(component, e))
    }

    /// Deserialize the map into a typed options struct
    pub fn to_typed<T: DeserializeOwned>(&self, component: &str) -> Result<T> {
        let object: Map<String, Value> = self.0.clone().into_iter().collect();
        serde_json::from_value(Value::Object(object)).map_err(|e| Error::invalid_param(component, e))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Hyperparams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl PartialEq for Hyperparams {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Hyperparams {}

impl PartialOrd for Hyperparams {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Hyperparams {
    fn cmp(&self, other: &Self) -> Ordering {
        let mut lhs = self.0.iter();
        let mut rhs = other.0.iter();
        loop {
            match (lhs.next(), rhs.next()) {
                (None, None) => return Ordering::Equal,
                (None, Some(_)) => return Ordering::Less,
                (Some(_), None) => return Ordering::Greater,
                (Some((ka, va)), Some((kb, vb))) => {
                    let ord = ka.cmp(kb).then_with(|| cmp_value(va, vb));
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
            }
        }
    }
}

impl fmt::Display for Hyperparams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{k}: {v}")?;
        }
        write!(f, "}}")
    }
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

enum Num {
    Int(i128),
    Float(f64),
}

fn num(n: &Number) -> Num {
    if let Some(i) = n.as_i64() {
        Num::Int(i128::from(i))
    } else if let Some(u) = n.as_u64() {
        Num::Int(i128::from(u))
    } else {
        Num::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

/// Exact order between an integer and a float
fn cmp_int_float(i: i128, f: f64) -> Ordering {
    // JSON numbers are never NaN
    if f.is_nan() {
        return Ordering::Less;
    }
    let limit = 2f64.powi(100);
    let t = f.trunc();
    if t >= limit {
        return Ordering::Less;
    }
    if t <= -limit {
        return Ordering::Greater;
    }
    match i.cmp(&(t as i128)) {
        Ordering::Equal => t.partial_cmp(&f).unwrap_or(Ordering::Equal),
        ord => ord,
    }
}

/// Numeric order by exact value; `-0.0 == 0.0` and `2 == 2.0`
fn cmp_number(x: &Number, y: &Number) -> Ordering {
    match (num(x), num(y)) {
        (Num::Int(a), Num::Int(b)) => a.cmp(&b),
        (Num::Float(a), Num::Float(b)) => a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b)),
        (Num::Int(a), Num::Float(b)) => cmp_int_float(a, b),
        (Num::Float(a), Num::Int(b)) => cmp_int_float(b, a).reverse(),
    }
}

/// Canonical total order over JSON values
pub fn cmp_value(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => cmp_number(x, y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => {
            for (va, vb) in x.iter().zip(y) {
                let ord = cmp_value(va, vb);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            x.len().cmp(&y.len())
        }
        (Value::Object(x), Value::Object(y)) => {
            let mut xs: Vec<_> = x.iter().collect();
            let mut ys: Vec<_> = y.iter().collect();
            xs.sort_by(|l, r| l.0.cmp(r.0));
            ys.sort_by(|l, r| l.0.cmp(r.0));
            for ((ka, va), (kb, vb)) in xs.iter().zip(&ys) {
                let ord = ka.cmp(kb).then_with(|| cmp_value(va, vb));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            xs.len().cmp(&ys.len())
        }
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}
