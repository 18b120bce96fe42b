//! Entity-mapping generation.
//!
//! For every record of a module carrying a `db.entity` attribute, emits a
//! pair of mapping functions (list and single struct) from the database
//! entity into the protocol struct, honoring `db.preload` and per-field
//! `db.take` directives. One `<module>_impl.ex` file per module.

use crate::elixir::{self, ElixirFile};
use crate::model::{AttrKey, Attributed, Module, Record};
use crate::notation::to_snake_case;
use crate::render::Renderer;

use super::access::AccessPath;

const DIVIDER: &str =
    "# ----------------------------------------------------------------------------";

/// Generates entity↔record mapping modules.
#[derive(Debug, Default)]
pub struct EntityMappingGenerator {
    /// When set, only the module with this exact name is generated.
    pub module_filter: Option<String>,
}

impl EntityMappingGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module_filter(name: impl Into<String>) -> Self {
        Self {
            module_filter: Some(name.into()),
        }
    }

    /// Generate the mapping module for `module`, or `None` when the module
    /// is filtered out or holds no record with a `db.entity` attribute.
    pub fn generate(&self, module: &Module) -> Option<ElixirFile> {
        if let Some(filter) = &self.module_filter {
            if &module.name != filter {
                return None;
            }
        }
        let mapped: Vec<&Record> = module
            .records
            .iter()
            .filter(|rec| rec.attr(AttrKey::DbEntity).is_some())
            .collect();
        if mapped.is_empty() {
            tracing::debug!(module = %module.name, "no entity records, skipping");
            return None;
        }

        let file_name = format!("{}_impl.ex", to_snake_case(&module.name));
        let mut file = ElixirFile::new(file_name, format!("{}.Impl", module.name));
        if let Some(db_app) = module.attr(AttrKey::DbApp) {
            file.alias(format!("{db_app}.{{Repo}}"));
        }

        let mut r = Renderer::new();
        for record in &mapped {
            if !r.is_empty() {
                r.blank();
            }
            r.line(DIVIDER);
            r.blank();
            self.emit_record(&mut r, module, record);
        }
        r.blank();
        r.line(DIVIDER);
        r.line("# internal functions");
        r.line(DIVIDER);
        file.block(r.build());
        Some(file)
    }

    fn emit_record(&self, r: &mut Renderer, module: &Module, record: &Record) {
        // attr presence is checked by the caller
        let Some(entity) = record.attr(AttrKey::DbEntity) else {
            return;
        };
        let preload = compile_preload(record.attr(AttrKey::DbPreload));
        let target = to_snake_case(&record.name);
        let target_struct = format!("%{}.{}{{}}", module.name, record.name);

        if let Some(annotation) = &record.annotation {
            r.line(format!("# {annotation}"));
        }

        // list mapper: empty input short-circuits before any preload
        r.line(format!(
            "@spec to_{target}([%{entity}{{}}]) :: [{target_struct}]"
        ));
        r.line(format!("def to_{target}([]), do: []"));
        r.line(format!("def to_{target}([%{entity}{{}} | _] = list) do"));
        r.indented(|r| {
            r.line("list");
            r.indented(|r| {
                if let Some(preload) = &preload {
                    r.line(format!("|> Repo.preload([{preload}])"));
                }
                r.line(format!("|> Enum.map(&to_{target}/1)"));
            });
        });
        r.line("end");
        r.blank();

        // struct mapper
        r.line(format!(
            "@spec to_{target}(%{entity}{{}}) :: {target_struct}"
        ));
        r.line(format!("def to_{target}(%{entity}{{}} = rec) do"));
        r.indented(|r| {
            if let Some(preload) = &preload {
                r.line(format!("rec = rec |> Repo.preload([{preload}])"));
            }
            r.line(format!("%{}.{}{{", module.name, record.name));
            r.indented(|r| {
                let last = record.fields.len().saturating_sub(1);
                for (i, field) in record.fields.iter().enumerate() {
                    let path = AccessPath::parse(field.attr(AttrKey::DbTake));
                    let access = path.render_with_default(&field.name, field.default.as_deref());
                    if let Some(annotation) = &field.annotation {
                        r.line(format!("# {annotation}"));
                    }
                    let delim = if i == last { "" } else { "," };
                    r.line(format!("{}: {}{}", field.name, access, delim));
                }
            });
            r.line("}");
        });
        r.line("end");
    }
}

/// Compile the `db.preload` attribute into an Elixir preload list body.
///
/// Tokens are space-separated; `a` becomes `:a`, `a.b` becomes `{:a, :b}`.
fn compile_preload(attr: Option<&str>) -> Option<String> {
    let attr = attr?;
    let terms: Vec<String> = attr
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(elixir::preload_term)
        .collect();
    if terms.is_empty() {
        None
    } else {
        Some(terms.join(", "))
    }
}
