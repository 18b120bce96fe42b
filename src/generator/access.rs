//! The `db.take` micro-language.
//!
//! A field's take attribute describes how to compute its value from the
//! source entity record. The payload is parsed once into a small AST and
//! rendered from there, instead of re-deriving behavior from string
//! prefixes at emission time.

/// Parsed access path for one mapped field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessPath {
    /// No override: read `rec.<field>` directly.
    Direct,
    /// `?`-separated steps, rendered as a short-circuiting `&&` chain of
    /// progressively longer reads. A single step is a plain renamed read.
    OptionalChain(Vec<String>),
    /// A function literal (`&…` or `fn …`), invoked with the record as its
    /// sole argument. The payload is emitted verbatim, not validated.
    InlineCallable(String),
}

impl AccessPath {
    /// Parse a take attribute. Absent and empty both mean no override.
    pub fn parse(take: Option<&str>) -> Self {
        match take {
            None | Some("") => AccessPath::Direct,
            Some(t) if t.starts_with('&') || t.starts_with("fn") => {
                AccessPath::InlineCallable(t.to_string())
            }
            Some(t) => AccessPath::OptionalChain(t.split('?').map(String::from).collect()),
        }
    }

    /// Render the access expression for `field_name`, reading from `rec`.
    ///
    /// Chain steps concatenate, so `a?.b?.c` yields
    /// `rec.a && rec.a.b && rec.a.b.c`.
    pub fn render(&self, field_name: &str) -> String {
        match self {
            AccessPath::Direct => format!("rec.{field_name}"),
            AccessPath::OptionalChain(steps) => {
                let mut prefix = String::new();
                let mut reads = Vec::with_capacity(steps.len());
                for step in steps {
                    prefix.push_str(step);
                    reads.push(format!("rec.{prefix}"));
                }
                reads.join(" && ")
            }
            AccessPath::InlineCallable(text) => format!("({text}).(rec)"),
        }
    }

    /// Render the access expression, wrapping it in a `|| <default>`
    /// fallback when the field declares one. The default applies after
    /// path resolution, never inside the chain.
    pub fn render_with_default(&self, field_name: &str, default: Option<&str>) -> String {
        let path = self.render(field_name);
        match default {
            Some(d) => format!("({path}) || {d}"),
            None => path,
        }
    }
}
