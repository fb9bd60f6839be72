//! Row-level scope descriptors and the query they are composed into.
//!
//! A `ResourceScope` says which rows an actor may see. A `ScopedQuery` starts
//! from a scope and only ever narrows it: caller predicates are ANDed in and
//! there is no way to replace or OR around the scope once the query exists.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::resource::ResourceType;

/// A record the scope and predicates can be evaluated against.
///
/// Persistence adapters implement this for every row type they serve. SQL
/// backends translate the same descriptors into `WHERE` fragments instead.
pub trait Scopable {
    /// Primary key.
    fn id(&self) -> &str;

    /// The unit ("dinas") the row belongs to, if it carries one.
    fn organizational_unit(&self) -> Option<&str>;

    /// True if the row belongs to the given participant.
    ///
    /// A participant row is linked to its own id; a training session is linked
    /// to each enrolled participant; a user account to the participant it owns.
    fn is_linked_to(&self, participant_id: &str) -> bool;

    /// Named column lookup used by `Predicate::FieldEquals`.
    fn field(&self, _name: &str) -> Option<&str> {
        None
    }

    /// Columns covered by free-text search.
    fn searchable_text(&self) -> Vec<&str> {
        Vec::new()
    }
}

/// How far an actor's view of a resource extends.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ResourceScope {
    /// Every row.
    Unscoped,
    /// Only rows whose unit equals the given one.
    ByOrganizationalUnit(String),
    /// Only rows linked to the given participant id.
    SelfOnly(String),
}

impl ResourceScope {
    /// Return true if `record` falls inside this scope.
    pub fn permits<R: Scopable + ?Sized>(&self, record: &R) -> bool {
        match self {
            ResourceScope::Unscoped => true,
            ResourceScope::ByOrganizationalUnit(unit) => {
                record.organizational_unit() == Some(unit.as_str())
            }
            ResourceScope::SelfOnly(participant_id) => record.is_linked_to(participant_id),
        }
    }

    pub fn is_unscoped(&self) -> bool {
        matches!(self, ResourceScope::Unscoped)
    }
}

impl fmt::Display for ResourceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceScope::Unscoped => f.write_str("unscoped"),
            ResourceScope::ByOrganizationalUnit(unit) => write!(f, "unit = '{unit}'"),
            ResourceScope::SelfOnly(id) => write!(f, "linked to '{id}'"),
        }
    }
}

/// A caller-supplied filter, e.g. from a search box or query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// Case-insensitive substring match over the record's searchable columns.
    /// A blank needle matches everything.
    TextMatch(String),
    /// Exact match on a named column.
    FieldEquals { field: String, value: String },
    /// Every inner predicate must hold. Empty is true.
    All(Vec<Predicate>),
    /// At least one inner predicate must hold. Empty is false.
    Any(Vec<Predicate>),
}

impl Predicate {
    pub fn text(needle: impl Into<String>) -> Self {
        Predicate::TextMatch(needle.into())
    }

    pub fn field_equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Predicate::FieldEquals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn matches<R: Scopable + ?Sized>(&self, record: &R) -> bool {
        match self {
            Predicate::TextMatch(needle) => {
                let needle = needle.trim().to_lowercase();
                if needle.is_empty() {
                    return true;
                }
                record
                    .searchable_text()
                    .iter()
                    .any(|text| text.to_lowercase().contains(&needle))
            }
            Predicate::FieldEquals { field, value } => {
                record.field(field) == Some(value.as_str())
            }
            Predicate::All(inner) => inner.iter().all(|p| p.matches(record)),
            Predicate::Any(inner) => inner.iter().any(|p| p.matches(record)),
        }
    }
}

/// One or more scopes plus the caller filters ANDed onto them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopedQuery {
    resource: ResourceType,
    scopes: Vec<ResourceScope>,
    filters: Vec<Predicate>,
}

impl ScopedQuery {
    pub fn new(resource: ResourceType, scope: ResourceScope) -> Self {
        Self {
            resource,
            scopes: vec![scope],
            filters: Vec::new(),
        }
    }

    /// Intersect with a further scope. Rows must satisfy every scope.
    #[must_use]
    pub fn within(mut self, scope: ResourceScope) -> Self {
        if !scope.is_unscoped() && !self.scopes.contains(&scope) {
            self.scopes.push(scope);
        }
        self
    }

    /// Narrow the query with another predicate.
    #[must_use]
    pub fn and(mut self, predicate: Predicate) -> Self {
        self.filters.push(predicate);
        self
    }

    /// Narrow the query with an optional predicate.
    #[must_use]
    pub fn and_maybe(self, predicate: Option<Predicate>) -> Self {
        match predicate {
            Some(p) => self.and(p),
            None => self,
        }
    }

    pub fn resource(&self) -> ResourceType {
        self.resource
    }

    pub fn scopes(&self) -> &[ResourceScope] {
        &self.scopes
    }

    pub fn filters(&self) -> &[Predicate] {
        &self.filters
    }

    /// True if no scope restricts the rows.
    pub fn is_unscoped(&self) -> bool {
        self.scopes.iter().all(ResourceScope::is_unscoped)
    }

    /// Every scope first, then every filter.
    pub fn matches<R: Scopable + ?Sized>(&self, record: &R) -> bool {
        self.scopes.iter().all(|s| s.permits(record))
            && self.filters.iter().all(|p| p.matches(record))
    }
}
