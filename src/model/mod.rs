//! Resolved schema model consumed by the generators.
//!
//! Everything in here is a read-only input produced by an external
//! model-construction phase. Generation never mutates a model; field,
//! resource, and path-segment order are significant and preserved.

mod attrs;
mod load;
mod types;

pub use attrs::{AttrKey, AttrTarget, Attributed};
pub use load::{load_model, model_from_yaml};
pub use types::{
    AttrMap, ContentDescriptor, Field, HttpMethod, Model, Module, PathSegment, Record,
    RequestVariable, Resource, Response, SessionKind, WebServiceForm,
};
