//! # Generator Module
//!
//! Turns a resolved schema model into Elixir source files. Two independent
//! generators consume the same model and attribute surface:
//!
//! - [`EntityMappingGenerator`] - for each record carrying a `db.entity`
//!   attribute, synthesizes bidirectional entity↔struct mapping functions
//!   with declarative preload (`db.preload`) and field-access (`db.take`)
//!   customization. One `<module>_impl.ex` file per module.
//! - [`HandlerStubGenerator`] - for each server-enabled web service, emits
//!   one handler-stub scaffold per resource (`.ex.example`) with a derived
//!   parameter list, guard clause, result-type spec, optional access
//!   precondition (`http.if`), and hint-driven CRUD body (`http.hint`),
//!   plus one shared route table embedded in the first resource's file.
//!
//! ```text
//! Model document → load → EntityMappingGenerator ┐
//!                       → HandlerStubGenerator   ├→ OutputSet → files
//! ```
//!
//! Generation is a pure, single-pass traversal of the immutable model.
//! Identical input always produces byte-identical output: attribute maps
//! iterate in key order and the route table is grouped and sorted with a
//! total ordinal comparison.

mod access;
mod db_access;
mod http_example;

pub use access::AccessPath;
pub use db_access::EntityMappingGenerator;
pub use http_example::{handled_routes, HandlerStubGenerator, Route};

use crate::elixir::OutputSet;
use crate::model::Model;
use std::path::{Path, PathBuf};

/// Run both generators over every module of the model.
pub fn collect_outputs(model: &Model, module_filter: Option<&str>) -> OutputSet {
    let mapping = match module_filter {
        Some(name) => EntityMappingGenerator::with_module_filter(name),
        None => EntityMappingGenerator::new(),
    };
    let stubs = HandlerStubGenerator::new();

    let mut out = OutputSet::new();
    for module in &model.modules {
        if let Some(file) = mapping.generate(module) {
            out.push(file);
        }
        for file in stubs.generate(module) {
            out.push(file);
        }
    }
    out
}

/// Generate all output files into `out_dir`.
///
/// Existing files are left alone unless `force` is set. Returns the paths
/// actually written.
pub fn generate_all(
    model: &Model,
    out_dir: &Path,
    force: bool,
    module_filter: Option<&str>,
) -> anyhow::Result<Vec<PathBuf>> {
    let out = collect_outputs(model, module_filter);
    tracing::info!(files = out.files().len(), dir = ?out_dir, "writing generated files");
    out.write_all(out_dir, force)
}
