const INDENT_WITH: &str = "  ";

/// Line buffer with indent tracking. Each line remembers the indent depth it
/// was opened at; rendering joins everything with LF and a final newline.
pub struct EmitterContext {
    lines: Vec<(usize, String)>,
    indent: usize,
}

impl EmitterContext {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            indent: 0,
        }
    }

    /// Emit one full line at the current indent.
    pub fn println(&mut self, text: impl Into<String>) {
        self.lines.push((self.indent, text.into()));
    }

    /// Emit an empty separator line. Blank lines carry no indentation.
    pub fn blank_line(&mut self) {
        self.lines.push((0, String::new()));
    }

    pub fn inc_indent(&mut self) {
        self.indent += 1;
    }

    pub fn dec_indent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    pub fn to_source(&self) -> String {
        let mut source = String::new();
        for (indent, text) in &self.lines {
            if !text.is_empty() {
                for _ in 0..*indent {
                    source.push_str(INDENT_WITH);
                }
                source.push_str(text);
            }
            source.push('\n');
        }
        source
    }
}

impl Default for EmitterContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation_is_two_spaces_per_level() {
        let mut ctx = EmitterContext::new();
        ctx.println("a {");
        ctx.inc_indent();
        ctx.println("b {");
        ctx.inc_indent();
        ctx.println("c");
        ctx.dec_indent();
        ctx.println("}");
        ctx.dec_indent();
        ctx.println("}");
        assert_eq!(ctx.to_source(), "a {\n  b {\n    c\n  }\n}\n");
    }

    #[test]
    fn test_blank_lines_have_no_trailing_whitespace() {
        let mut ctx = EmitterContext::new();
        ctx.inc_indent();
        ctx.println("x");
        ctx.blank_line();
        ctx.println("y");
        assert_eq!(ctx.to_source(), "  x\n\n  y\n");
    }

    #[test]
    fn test_output_ends_with_newline() {
        let mut ctx = EmitterContext::new();
        ctx.println("only");
        assert!(ctx.to_source().ends_with('\n'));
    }
}
