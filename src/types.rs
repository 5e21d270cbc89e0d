//! Core types for the inventory store.

use indexmap::IndexMap;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};

/// Item name to quantity, in insertion order.
pub type InventoryMap = IndexMap<String, Quantity>;

/// Amount of an item: a whole count or a real amount.
///
/// Integer arithmetic stays integral (promoting to real on overflow); any
/// operation involving a real yields a real. Comparison and equality are
/// numeric, so `Int(7) == Float(7.0)`.
#[derive(Clone, Copy)]
pub enum Quantity {
    Int(i64),
    Float(f64),
}

impl Quantity {
    pub const ZERO: Quantity = Quantity::Int(0);

    /// Numeric value as a float.
    pub fn as_f64(self) -> f64 {
        match self {
            Quantity::Int(n) => n as f64,
            Quantity::Float(x) => x,
        }
    }

    /// False for NaN and infinities, which JSON cannot carry.
    pub fn is_finite(self) -> bool {
        match self {
            Quantity::Int(_) => true,
            Quantity::Float(x) => x.is_finite(),
        }
    }

    pub fn is_positive(self) -> bool {
        self > Quantity::ZERO
    }

    /// Convert a JSON value, if it is a number.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        let serde_json::Value::Number(n) = value else {
            return None;
        };
        n.as_i64()
            .map(Quantity::Int)
            .or_else(|| n.as_f64().map(Quantity::Float))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::ZERO
    }
}

impl Add for Quantity {
    type Output = Quantity;

    fn add(self, rhs: Quantity) -> Quantity {
        match (self, rhs) {
            (Quantity::Int(a), Quantity::Int(b)) => a
                .checked_add(b)
                .map(Quantity::Int)
                .unwrap_or(Quantity::Float(a as f64 + b as f64)),
            (a, b) => Quantity::Float(a.as_f64() + b.as_f64()),
        }
    }
}

impl Sub for Quantity {
    type Output = Quantity;

    fn sub(self, rhs: Quantity) -> Quantity {
        match (self, rhs) {
            (Quantity::Int(a), Quantity::Int(b)) => a
                .checked_sub(b)
                .map(Quantity::Int)
                .unwrap_or(Quantity::Float(a as f64 - b as f64)),
            (a, b) => Quantity::Float(a.as_f64() - b.as_f64()),
        }
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Quantity::Int(a), Quantity::Int(b)) => a == b,
            (a, b) => a.as_f64() == b.as_f64(),
        }
    }
}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (*self, *other) {
            (Quantity::Int(a), Quantity::Int(b)) => Some(a.cmp(&b)),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }
}

impl From<i32> for Quantity {
    fn from(n: i32) -> Self {
        Quantity::Int(n.into())
    }
}

impl From<i64> for Quantity {
    fn from(n: i64) -> Self {
        Quantity::Int(n)
    }
}

impl From<u32> for Quantity {
    fn from(n: u32) -> Self {
        Quantity::Int(n.into())
    }
}

impl From<f64> for Quantity {
    fn from(x: f64) -> Self {
        Quantity::Float(x)
    }
}

impl fmt::Debug for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Int(n) => write!(f, "Int({})", n),
            Quantity::Float(x) => write!(f, "Float({:?})", x),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Int(n) => write!(f, "{}", n),
            // Debug keeps the fractional marker on whole reals ("7.0").
            Quantity::Float(x) => write!(f, "{:?}", x),
        }
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Quantity::Int(n) => serializer.serialize_i64(n),
            Quantity::Float(x) => serializer.serialize_f64(x),
        }
    }
}

struct QuantityVisitor;

impl<'de> Visitor<'de> for QuantityVisitor {
    type Value = Quantity;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a numeric quantity")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Quantity, E> {
        Ok(Quantity::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Quantity, E> {
        Ok(i64::try_from(v)
            .map(Quantity::Int)
            .unwrap_or(Quantity::Float(v as f64)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Quantity, E> {
        Ok(Quantity::Float(v))
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(QuantityVisitor)
    }
}

/// What a removal did to the inventory.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RemoveOutcome {
    /// The entry was kept with this remaining quantity.
    Decremented { remaining: Quantity },
    /// The quantity fell to zero or below and the entry was deleted.
    Removed,
    /// The item was not in the inventory; nothing changed.
    NotFound,
}
