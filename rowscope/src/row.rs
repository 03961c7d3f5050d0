//! GridRow trait and cell values.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Trait for records that can be displayed as rows in a [`Grid`](crate::Grid).
///
/// Rows are owned by the data source. The grid only reads them, and refers
/// to them by key everywhere it keeps state, so keys must be stable across
/// row array replacements.
///
/// # Example
///
/// ```
/// use rowscope::{CellValue, GridRow};
///
/// #[derive(Clone)]
/// struct Invoice {
///     id: String,
///     customer: String,
///     amount: i64,
/// }
///
/// impl GridRow for Invoice {
///     type Key = String;
///
///     fn key(&self) -> String {
///         self.id.clone()
///     }
///
///     fn field(&self, name: &str) -> CellValue {
///         match name {
///             "customer" => CellValue::Text(self.customer.clone()),
///             "amount" => CellValue::Integer(self.amount),
///             _ => CellValue::Empty,
///         }
///     }
/// }
/// ```
pub trait GridRow {
    /// The key type used to identify this row.
    type Key: Clone + Eq + Hash + fmt::Debug;

    /// Return the unique, stable key for this row.
    fn key(&self) -> Self::Key;

    /// Look up a field by name. Unknown fields are `CellValue::Empty`.
    fn field(&self, name: &str) -> CellValue;
}

/// The kind of a [`CellValue`], used for parsing edit drafts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Empty,
    Text,
    Integer,
    Float,
    Bool,
}

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// Create a text value.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn kind(&self) -> CellKind {
        match self {
            Self::Empty => CellKind::Empty,
            Self::Text(_) => CellKind::Text,
            Self::Integer(_) => CellKind::Integer,
            Self::Float(_) => CellKind::Float,
            Self::Bool(_) => CellKind::Bool,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Parse draft text into a value of the same kind as `self`.
    ///
    /// Empty and text cells accept any input. An empty draft clears a
    /// numeric or boolean cell.
    pub fn parse_like(&self, text: &str) -> Result<CellValue, String> {
        let trimmed = text.trim();
        match self.kind() {
            CellKind::Empty | CellKind::Text => Ok(CellValue::Text(text.to_string())),
            _ if trimmed.is_empty() => Ok(CellValue::Empty),
            CellKind::Integer => trimmed
                .parse::<i64>()
                .map(CellValue::Integer)
                .map_err(|_| format!("'{}' is not a whole number", trimmed)),
            CellKind::Float => trimmed
                .parse::<f64>()
                .map(CellValue::Float)
                .map_err(|_| format!("'{}' is not a number", trimmed)),
            CellKind::Bool => match trimmed.to_ascii_lowercase().as_str() {
                "true" | "yes" | "y" | "1" => Ok(CellValue::Bool(true)),
                "false" | "no" | "n" | "0" => Ok(CellValue::Bool(false)),
                _ => Err(format!("'{}' is not true or false", trimmed)),
            },
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for CellValue {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

// =============================================================================
// RowIndex
// =============================================================================

/// Row keys in array order with O(1) key -> index lookup.
///
/// Rebuilt whenever the row array is replaced.
#[derive(Debug, Clone)]
pub struct RowIndex<K> {
    keys: Vec<K>,
    positions: HashMap<K, usize>,
}

impl<K: Clone + Eq + Hash> Default for RowIndex<K> {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

impl<K: Clone + Eq + Hash> RowIndex<K> {
    /// Index the keys of a row array.
    ///
    /// If a key repeats, lookups resolve to its first occurrence.
    pub fn new(keys: Vec<K>) -> Self {
        let mut positions = HashMap::with_capacity(keys.len());
        for (i, key) in keys.iter().enumerate() {
            positions.entry(key.clone()).or_insert(i);
        }
        Self { keys, positions }
    }

    pub fn from_rows<R: GridRow<Key = K>>(rows: &[R]) -> Self {
        Self::new(rows.iter().map(|r| r.key()).collect())
    }

    /// Position of a key in the row array.
    pub fn position(&self, key: &K) -> Option<usize> {
        self.positions.get(key).copied()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.positions.contains_key(key)
    }

    /// Key at a row index.
    pub fn key_at(&self, index: usize) -> Option<&K> {
        self.keys.get(index)
    }

    /// All keys in row order.
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
