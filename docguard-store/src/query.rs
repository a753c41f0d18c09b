//! Query model.
//!
//! A query selects entities of one kind, optionally under an ancestor, where
//! every filter holds (logical AND). Entities lacking a filtered or ordered
//! property never match, mirroring how indexed stores only see entities
//! that carry the indexed property.

use docguard_model::Entity;
use docguard_types::{Key, Kind};
use serde_json::Value;
use std::cmp::Ordering;

/// Comparison applied by a [`Filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// `property <op> value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub property: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    pub fn new(property: impl Into<String>, op: FilterOp, value: impl Into<Value>) -> Self {
        Self {
            property: property.into(),
            op,
            value: value.into(),
        }
    }

    pub fn eq(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(property, FilterOp::Eq, value)
    }

    pub fn ne(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(property, FilterOp::Ne, value)
    }

    pub fn lt(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(property, FilterOp::Lt, value)
    }

    pub fn le(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(property, FilterOp::Le, value)
    }

    pub fn gt(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(property, FilterOp::Gt, value)
    }

    pub fn ge(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(property, FilterOp::Ge, value)
    }

    /// True if the entity carries the property and the comparison holds.
    #[must_use]
    pub fn matches(&self, entity: &Entity) -> bool {
        let Some(actual) = entity.get(&self.property) else {
            return false;
        };
        let Some(ord) = compare_values(actual, &self.value) else {
            // Incomparable types only ever satisfy "not equal".
            return self.op == FilterOp::Ne;
        };
        match self.op {
            FilterOp::Eq => ord == Ordering::Equal,
            FilterOp::Ne => ord != Ordering::Equal,
            FilterOp::Lt => ord == Ordering::Less,
            FilterOp::Le => ord != Ordering::Greater,
            FilterOp::Gt => ord == Ordering::Greater,
            FilterOp::Ge => ord != Ordering::Less,
        }
    }
}

/// Sort direction on one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Order {
    Asc(String),
    Desc(String),
}

impl Order {
    #[must_use]
    pub fn property(&self) -> &str {
        match self {
            Self::Asc(p) | Self::Desc(p) => p,
        }
    }

    /// Compares two entities on this order's property. Entities are
    /// expected to carry the property; missing values sort first.
    #[must_use]
    pub fn compare(&self, a: &Entity, b: &Entity) -> Ordering {
        let ord = match (a.get(self.property()), b.get(self.property())) {
            (Some(x), Some(y)) => compare_values(x, y).unwrap_or(Ordering::Equal),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        match self {
            Self::Asc(_) => ord,
            Self::Desc(_) => ord.reverse(),
        }
    }
}

/// Selection of entities of one kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub kind: Kind,
    pub ancestor: Option<Key>,
    pub filters: Vec<Filter>,
    pub order: Vec<Order>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new(kind: impl Into<Kind>) -> Self {
        Self {
            kind: kind.into(),
            ancestor: None,
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
        }
    }

    /// Restricts results to `ancestor` and the entities below it.
    #[must_use]
    pub fn ancestor(mut self, ancestor: Key) -> Self {
        self.ancestor = Some(ancestor);
        self
    }

    /// Adds a filter; all filters must hold.
    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Shorthand for an equality filter.
    #[must_use]
    pub fn eq(self, property: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(Filter::eq(property, value))
    }

    #[must_use]
    pub fn order_by(mut self, order: Order) -> Self {
        self.order.push(order);
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// True if `entity` is selected by kind, ancestor, filters and the
    /// presence of every ordered property. Ignores `limit`.
    #[must_use]
    pub fn matches(&self, entity: &Entity) -> bool {
        if entity.kind != self.kind {
            return false;
        }
        if let Some(ancestor) = &self.ancestor {
            let under = entity
                .key
                .as_ref()
                .is_some_and(|key| key == ancestor || ancestor.is_ancestor_of(key));
            if !under {
                return false;
            }
        }
        self.filters.iter().all(|f| f.matches(entity))
            && self.order.iter().all(|o| entity.get(o.property()).is_some())
    }

    /// Compares two entities by every order clause in turn.
    #[must_use]
    pub fn compare(&self, a: &Entity, b: &Entity) -> Ordering {
        self.order
            .iter()
            .map(|o| o.compare(a, b))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

/// Orders two JSON values of the same type.
///
/// Numbers compare numerically (`1 == 1.0`), strings and booleans
/// naturally, arrays lexicographically. `null` equals only `null`.
/// Values of different types are incomparable.
#[must_use]
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => Some(x.cmp(&y)),
            _ => x.as_f64()?.partial_cmp(&y.as_f64()?),
        },
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Array(x), Value::Array(y)) => {
            for (a, b) in x.iter().zip(y) {
                match compare_values(a, b)? {
                    Ordering::Equal => continue,
                    other => return Some(other),
                }
            }
            Some(x.len().cmp(&y.len()))
        }
        (Value::Object(_), Value::Object(_)) => (a == b).then_some(Ordering::Equal),
        _ => None,
    }
}
