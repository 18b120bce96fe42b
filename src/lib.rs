//! # exgen
//!
//! **exgen** is the code-emission backend of a schema/IDL-driven generator:
//! it takes an already-resolved model of modules, record types, fields, and
//! web-service/resource definitions, each optionally annotated with
//! free-form key/value attributes, and produces idiomatic Elixir source
//! files.
//!
//! ## Overview
//!
//! Two independent generators consume the same resolved model:
//!
//! - **Entity mappings** (`db.*` attributes) - per-module `_impl.ex` files
//!   with bidirectional entity↔struct mapping functions, `Repo.preload`
//!   batching, and per-field access-path customization.
//! - **Handler stubs** (`http.*` attributes) - per-resource `.ex.example`
//!   scaffolds with derived `@spec`s, guard clauses, access preconditions,
//!   CRUD delegation bodies, and a shared, sorted route table per service.
//!
//! The model itself is produced by an external front end (parsing, semantic
//! validation, attribute registration); this crate loads the resolved
//! document and performs a pure, deterministic traversal: identical input
//! always produces byte-identical output, so generated code stays diffable.
//!
//! ## Architecture
//!
//! - **[`model`]** - Resolved model types, attribute vocabulary, loading
//! - **[`render`]** - Append-only code renderer with scoped indentation
//! - **[`elixir`]** - Generated-file modeling and Elixir syntax helpers
//! - **[`generator`]** - The entity-mapping and handler-stub generators
//! - **[`notation`]** - Naming-notation conversion (snake/camel)
//! - **[`cli`]** - `generate` and `routes` commands
//!
//! ## Usage
//!
//! ```bash
//! exgen generate --model model.yaml --output lib/generated
//! ```
//!
//! Programmatic:
//!
//! ```rust,ignore
//! use exgen::generator::generate_all;
//! use exgen::model::load_model;
//!
//! # fn main() -> anyhow::Result<()> {
//! let model = load_model("model.yaml".as_ref())?;
//! generate_all(&model, "lib/generated".as_ref(), false, None)?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod elixir;
pub mod generator;
pub mod model;
pub mod notation;
pub mod render;

pub use generator::{generate_all, EntityMappingGenerator, HandlerStubGenerator};
pub use model::{load_model, AttrKey, Attributed, Model, Module};
