//! Elixir output modeling and syntax helpers.
//!
//! [`ElixirFile`] accumulates the blocks of one generated `defmodule` and
//! renders it to text; [`OutputSet`] collects the files of a generator run
//! and writes them out. The free functions cover the bits of Elixir syntax
//! the generators need: guard expressions, atoms, module names.

use crate::render::Renderer;
use anyhow::Context;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// One code block of a generated module, optionally `@doc`-annotated.
#[derive(Debug, Clone)]
struct Block {
    annotation: Option<String>,
    text: String,
}

/// One generated Elixir source file wrapping a single `defmodule`.
#[derive(Debug, Clone)]
pub struct ElixirFile {
    pub file_name: String,
    pub module_name: String,
    /// Rendered as `@moduledoc`.
    pub annotation: Option<String>,
    pub behaviour: Option<String>,
    requires: BTreeSet<String>,
    aliases: Vec<String>,
    blocks: Vec<Block>,
}

impl ElixirFile {
    pub fn new(file_name: impl Into<String>, module_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            module_name: module_name.into(),
            annotation: None,
            behaviour: None,
            requires: BTreeSet::new(),
            aliases: Vec::new(),
            blocks: Vec::new(),
        }
    }

    /// Register a `require` on the file; duplicates collapse and the set
    /// renders in lexicographic order.
    pub fn require(&mut self, module: impl Into<String>) {
        self.requires.insert(module.into());
    }

    /// Append an `alias` line (emitted verbatim after the requires).
    pub fn alias(&mut self, alias: impl Into<String>) {
        self.aliases.push(alias.into());
    }

    /// Append a raw code block.
    pub fn block(&mut self, text: impl Into<String>) {
        self.blocks.push(Block {
            annotation: None,
            text: text.into(),
        });
    }

    /// Append a function block with an optional `@doc` annotation.
    pub fn function(&mut self, text: impl Into<String>, annotation: Option<String>) {
        self.blocks.push(Block {
            annotation,
            text: text.into(),
        });
    }

    /// Fold another file's content into this one. Requires collapse,
    /// aliases and blocks append; module name, behaviour and annotation of
    /// the first file win.
    pub fn merge(&mut self, other: ElixirFile) {
        self.requires.extend(other.requires);
        self.aliases.extend(other.aliases);
        self.blocks.extend(other.blocks);
    }

    /// Render the complete `defmodule … do … end` source text.
    pub fn render(&self) -> String {
        let mut r = Renderer::new();
        r.line(format!("defmodule {} do", self.module_name));
        r.indented(|r| {
            if let Some(doc) = &self.annotation {
                r.line("@moduledoc \"\"\"");
                r.raw(doc);
                r.line("\"\"\"");
                r.blank();
            }
            if let Some(behaviour) = &self.behaviour {
                r.line(format!("@behaviour {}", behaviour));
                r.blank();
            }
            if !self.requires.is_empty() {
                for m in &self.requires {
                    r.line(format!("require {}", m));
                }
                r.blank();
            }
            if !self.aliases.is_empty() {
                for a in &self.aliases {
                    r.line(format!("alias {}", a));
                }
                r.blank();
            }
            let last = self.blocks.len().saturating_sub(1);
            for (i, block) in self.blocks.iter().enumerate() {
                if let Some(doc) = &block.annotation {
                    r.line("@doc \"\"\"");
                    r.raw(doc);
                    r.line("\"\"\"");
                }
                r.raw(&block.text);
                if i != last {
                    r.blank();
                }
            }
        });
        r.line("end");
        let mut text = r.build();
        text.push('\n');
        text
    }
}

/// The files produced by one generator invocation.
#[derive(Debug, Default)]
pub struct OutputSet {
    files: Vec<ElixirFile>,
}

impl OutputSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, file: ElixirFile) {
        match self.files.iter_mut().find(|f| f.file_name == file.file_name) {
            Some(existing) => existing.merge(file),
            None => self.files.push(file),
        }
    }

    pub fn files(&self) -> &[ElixirFile] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Write every file under `dir`, skipping files that already exist
    /// unless `force` is set. Returns the paths actually written.
    pub fn write_all(&self, dir: &Path, force: bool) -> anyhow::Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output dir {:?}", dir))?;
        let mut written = Vec::new();
        for file in &self.files {
            let path = dir.join(&file.file_name);
            if path.exists() && !force {
                println!("⚠️  Skipping existing file: {path:?}");
                continue;
            }
            std::fs::write(&path, file.render())
                .with_context(|| format!("failed to write {:?}", path))?;
            tracing::debug!(file = %file.file_name, module = %file.module_name, "generated");
            println!("✅ Generated {path:?}");
            written.push(path);
        }
        Ok(written)
    }
}

/// Join non-empty name parts into a dotted Elixir module name.
pub fn module_name(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(".")
}

/// Render one preload token: `a` → `:a`, `a.b` → `{:a, :b}`.
pub fn preload_term(token: &str) -> String {
    if token.contains('.') {
        let atoms = token
            .split('.')
            .map(|a| format!(":{a}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{{{atoms}}}")
    } else {
        format!(":{token}")
    }
}

/// Derive the guard expression for a parameter from its declared (or
/// guard-generating) type. Unknown shapes produce no guard.
///
/// A dotted custom guard (`Acme.Guards.is_uuid`) is called as-is; the
/// builtin scalar names map to BIF guards.
pub fn guard_expr(ty: &str, name: &str) -> Option<String> {
    let base = ty.trim().trim_end_matches("()");
    match base {
        "integer" | "non_neg_integer" | "pos_integer" | "neg_integer" => {
            Some(format!("is_integer({name})"))
        }
        "String.t" | "binary" | "string" => Some(format!("is_binary({name})")),
        "boolean" => Some(format!("is_boolean({name})")),
        "float" => Some(format!("is_float({name})")),
        "number" => Some(format!("is_number({name})")),
        "atom" => Some(format!("is_atom({name})")),
        "map" => Some(format!("is_map({name})")),
        "list" => Some(format!("is_list({name})")),
        _ => {
            if is_custom_guard(base) {
                Some(format!("{base}({name})"))
            } else {
                None
            }
        }
    }
}

/// The helper module a custom guard type needs `require`d, if any.
pub fn guard_requires(ty: &str) -> Option<String> {
    let base = ty.trim().trim_end_matches("()");
    if is_custom_guard(base) {
        base.rsplit_once('.').map(|(m, _)| m.to_string())
    } else {
        None
    }
}

fn is_custom_guard(base: &str) -> bool {
    matches!(base.rsplit_once('.'), Some((m, f)) if !m.is_empty() && f.starts_with("is_"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_expr_builtins() {
        assert_eq!(
            guard_expr("integer", "id").as_deref(),
            Some("is_integer(id)")
        );
        assert_eq!(
            guard_expr("String.t()", "name").as_deref(),
            Some("is_binary(name)")
        );
        assert_eq!(
            guard_expr("boolean()", "flag").as_deref(),
            Some("is_boolean(flag)")
        );
        assert_eq!(guard_expr("Proto.User.t()", "user"), None);
    }

    #[test]
    fn test_guard_expr_custom() {
        assert_eq!(
            guard_expr("Acme.Guards.is_uuid", "id").as_deref(),
            Some("Acme.Guards.is_uuid(id)")
        );
        assert_eq!(
            guard_requires("Acme.Guards.is_uuid").as_deref(),
            Some("Acme.Guards")
        );
        assert_eq!(guard_requires("integer"), None);
    }

    #[test]
    fn test_preload_term() {
        assert_eq!(preload_term("author"), ":author");
        assert_eq!(preload_term("comments.user"), "{:comments, :user}");
    }

    #[test]
    fn test_module_name_skips_empty_parts() {
        assert_eq!(module_name(&["Proto", "", "Handler"]), "Proto.Handler");
    }

    #[test]
    fn test_file_render_layout() {
        let mut file = ElixirFile::new("x.ex", "Proto.X");
        file.annotation = Some("Example module".to_string());
        file.behaviour = Some("Proto.Svc".to_string());
        file.require("Zeta.Guards");
        file.require("Acme.Guards");
        file.require("Acme.Guards"); // duplicates collapse
        file.block("def a, do: 1");
        file.function("def b, do: 2", Some("does b".to_string()));
        let text = file.render();

        let expected = "defmodule Proto.X do\n  \
            @moduledoc \"\"\"\n  Example module\n  \"\"\"\n\n  \
            @behaviour Proto.Svc\n\n  \
            require Acme.Guards\n  require Zeta.Guards\n\n  \
            def a, do: 1\n\n  \
            @doc \"\"\"\n  does b\n  \"\"\"\n  def b, do: 2\nend\n";
        assert_eq!(text, expected);
    }
}
