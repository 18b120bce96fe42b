//! Append-only code-block renderer.
//!
//! Accumulates lines with explicit indentation and emits them as one text
//! blob. Indentation is scope-based: [`Renderer::indented`] guarantees the
//! matching outdent on every exit path, so an unbalanced indent cannot be
//! expressed.

const INDENT: &str = "  ";

/// Line-oriented code renderer with scoped indentation.
#[derive(Debug, Default)]
pub struct Renderer {
    depth: usize,
    lines: Vec<String>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line at the current indentation level.
    pub fn line(&mut self, s: impl AsRef<str>) {
        let s = s.as_ref();
        if s.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines.push(format!("{}{}", INDENT.repeat(self.depth), s));
        }
    }

    /// Append an empty line.
    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Append a multi-line block, re-indenting every line to the current
    /// level.
    pub fn raw(&mut self, block: &str) {
        for l in block.lines() {
            self.line(l);
        }
    }

    /// Run `f` one indentation level deeper.
    pub fn indented<F: FnOnce(&mut Self)>(&mut self, f: F) {
        self.depth += 1;
        f(self);
        self.depth -= 1;
    }

    /// Append a sequence of lines, suffixing every one except the last with
    /// `delimiter`.
    pub fn blocks<I, S>(&mut self, items: I, delimiter: &str)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let items: Vec<S> = items.into_iter().collect();
        let last = items.len().saturating_sub(1);
        for (i, item) in items.iter().enumerate() {
            if i == last {
                self.line(item.as_ref());
            } else {
                self.line(format!("{}{}", item.as_ref(), delimiter));
            }
        }
    }

    /// Append two-column rows: a code cell followed by an optional trailing
    /// comment. The delimiter lands after the code cell on every row except
    /// the last, and comments are padded into a common column.
    pub fn table(&mut self, rows: &[(String, Option<String>)], delimiter: &str) {
        let width = rows
            .iter()
            .map(|(cell, _)| cell.len() + delimiter.len())
            .max()
            .unwrap_or(0);
        let last = rows.len().saturating_sub(1);
        for (i, (cell, comment)) in rows.iter().enumerate() {
            let mut out = cell.clone();
            if i != last {
                out.push_str(delimiter);
            }
            if let Some(comment) = comment {
                while out.len() < width {
                    out.push(' ');
                }
                out.push(' ');
                out.push_str(comment);
            }
            self.line(out);
        }
    }

    /// Finalize into the accumulated text.
    pub fn build(self) -> String {
        self.lines.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoped_indent() {
        let mut r = Renderer::new();
        r.line("def f do");
        r.indented(|r| {
            r.line("body");
            r.indented(|r| r.line("nested"));
        });
        r.line("end");
        assert_eq!(r.build(), "def f do\n  body\n    nested\nend");
    }

    #[test]
    fn test_blank_lines_carry_no_indent() {
        let mut r = Renderer::new();
        r.indented(|r| {
            r.line("a");
            r.blank();
            r.line("b");
        });
        assert_eq!(r.build(), "  a\n\n  b");
    }

    #[test]
    fn test_blocks_delimit_all_but_last() {
        let mut r = Renderer::new();
        r.blocks(["a", "b", "c"], ",");
        assert_eq!(r.build(), "a,\nb,\nc");
    }

    #[test]
    fn test_raw_reindents_block() {
        let mut r = Renderer::new();
        r.indented(|r| r.raw("x\n  y"));
        assert_eq!(r.build(), "  x\n    y");
    }

    #[test]
    fn test_table_aligns_comments() {
        let mut r = Renderer::new();
        let rows = vec![
            ("api_key".to_string(), None),
            ("body".to_string(), Some("# request body".to_string())),
        ];
        r.table(&rows, ",");
        assert_eq!(r.build(), "api_key,\nbody     # request body");
    }
}
