//! Attribute vocabulary and typed lookup.
//!
//! The source schema language annotates entities with free-form string
//! attributes. Instead of stringly-typed lookups at every call site, the
//! recognized keys form a closed enum so a misspelled key is a compile
//! error in the generators. Values are always plain strings; an absent
//! attribute and an empty one both mean "not set".

use super::types::{AttrMap, Field, Module, Record, Resource, WebServiceForm};

/// Entity kinds an attribute may annotate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrTarget {
    Module,
    Record,
    Field,
    WebService,
    WebResource,
}

/// The closed set of attribute keys this backend interprets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrKey {
    /// Module: application prefix for the generated `alias <App>.{Repo}`.
    DbApp,
    /// Record: source entity module; required to trigger mapping generation.
    DbEntity,
    /// Record: space-separated dotted preload paths.
    DbPreload,
    /// Field: access-path override (function literal or `?`-chained path).
    DbTake,
    /// Service/resource: output file name override for handler stubs.
    HttpExample,
    /// Service/resource: access predicate guarding the handler body.
    HttpIf,
    /// Resource: CRUD shape marker (`list|read|create|update|delete`).
    HttpHint,
}

impl AttrKey {
    /// Dotted wire name, bit-exact with the schema language.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttrKey::DbApp => "db.app",
            AttrKey::DbEntity => "db.entity",
            AttrKey::DbPreload => "db.preload",
            AttrKey::DbTake => "db.take",
            AttrKey::HttpExample => "http.example",
            AttrKey::HttpIf => "http.if",
            AttrKey::HttpHint => "http.hint",
        }
    }

    /// Entity kinds this key may legally annotate.
    pub fn targets(&self) -> &'static [AttrTarget] {
        match self {
            AttrKey::DbApp => &[AttrTarget::Module],
            AttrKey::DbEntity | AttrKey::DbPreload => &[AttrTarget::Record],
            AttrKey::DbTake => &[AttrTarget::Field],
            AttrKey::HttpExample | AttrKey::HttpIf => {
                &[AttrTarget::WebService, AttrTarget::WebResource]
            }
            AttrKey::HttpHint => &[AttrTarget::WebResource],
        }
    }
}

impl std::fmt::Display for AttrKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn lookup(attrs: &AttrMap, key: AttrKey) -> Option<&str> {
    attrs
        .get(key.as_str())
        .map(String::as_str)
        .filter(|v| !v.is_empty())
}

/// Attribute resolution for annotated model entities.
pub trait Attributed {
    const KIND: AttrTarget;

    fn attrs(&self) -> &AttrMap;

    /// Resolve an attribute; absent and empty both return `None`.
    fn attr(&self, key: AttrKey) -> Option<&str> {
        debug_assert!(
            key.targets().contains(&Self::KIND),
            "{key} is not valid on {:?}",
            Self::KIND
        );
        lookup(self.attrs(), key)
    }

    /// Resolve an attribute with a default for the not-set case.
    fn attr_or<'a>(&'a self, key: AttrKey, default: &'a str) -> &'a str {
        self.attr(key).unwrap_or(default)
    }
}

impl Attributed for Module {
    const KIND: AttrTarget = AttrTarget::Module;
    fn attrs(&self) -> &AttrMap {
        &self.attrs
    }
}

impl Attributed for Record {
    const KIND: AttrTarget = AttrTarget::Record;
    fn attrs(&self) -> &AttrMap {
        &self.attrs
    }
}

impl Attributed for Field {
    const KIND: AttrTarget = AttrTarget::Field;
    fn attrs(&self) -> &AttrMap {
        &self.attrs
    }
}

impl Attributed for WebServiceForm {
    const KIND: AttrTarget = AttrTarget::WebService;
    fn attrs(&self) -> &AttrMap {
        &self.attrs
    }
}

impl Attributed for Resource {
    const KIND: AttrTarget = AttrTarget::WebResource;
    fn attrs(&self) -> &AttrMap {
        &self.attrs
    }
}
