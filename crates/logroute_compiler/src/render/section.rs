//! Nested-block text output.

use std::fmt::{self, Write};

/// Spaces per nesting level.
const INDENT: usize = 2;

/// One `<name arg> ... </name>` block.
///
/// Parameters render before child sections, each in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    /// Block name, e.g. `match`, `buffer`.
    pub name: String,
    /// Header argument, e.g. `**` in `<match **>`.
    pub arg: Option<String>,
    /// `key value` lines.
    pub params: Vec<(String, String)>,
    /// Nested blocks.
    pub children: Vec<Section>,
}

impl Section {
    /// Creates an empty block.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the header argument.
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.arg = Some(arg.into());
        self
    }

    /// Appends a parameter line.
    pub fn push_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.push((key.into(), value.into()));
    }

    /// Appends a nested block.
    pub fn push_child(&mut self, child: Self) {
        self.children.push(child);
    }

    /// Header as written, without brackets: `match **`.
    #[must_use]
    pub fn header(&self) -> String {
        match &self.arg {
            Some(arg) => format!("{} {arg}", self.name),
            None => self.name.clone(),
        }
    }

    /// Returns the value of the first parameter named `key`.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Writes the block at `depth` levels of indentation.
    pub fn write_to(&self, out: &mut String, depth: usize) {
        let pad = " ".repeat(depth * INDENT);
        let inner = " ".repeat((depth + 1) * INDENT);
        let _ = writeln!(out, "{pad}<{}>", self.header());
        for (key, value) in &self.params {
            let _ = writeln!(out, "{inner}{key} {value}");
        }
        for child in &self.children {
            child.write_to(out, depth + 1);
        }
        let _ = writeln!(out, "{pad}</{}>", self.name);
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_to(&mut out, 0);
        f.write_str(&out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_params_before_children() {
        let mut inner = Section::new("buffer").with_arg("tag,time");
        inner.push_param("@type", "file");

        let mut outer = Section::new("match").with_arg("**");
        outer.push_child(inner);
        outer.push_param("@type", "s3");

        assert_eq!(
            outer.to_string(),
            "<match **>\n  @type s3\n  <buffer tag,time>\n    @type file\n  </buffer>\n</match>\n"
        );
    }

    #[test]
    fn empty_block_has_header_and_footer() {
        assert_eq!(Section::new("match").to_string(), "<match>\n</match>\n");
    }

    #[test]
    fn param_lookup_returns_first_match() {
        let mut section = Section::new("source");
        section.push_param("port", "24240");
        assert_eq!(section.param("port"), Some("24240"));
        assert_eq!(section.param("bind"), None);
    }
}
