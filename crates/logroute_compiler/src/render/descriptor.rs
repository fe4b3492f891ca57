//! Per-field render descriptors.
//!
//! Every configuration type implements [`Describe`] and feeds its fields to a
//! [`Descriptor`] in declaration order. Types that render as their own nested
//! block also implement [`Block`]. The descriptor method chosen for a
//! field is its render kind:
//!
//! | method          | renders                                   | omitted when        |
//! |-----------------|-------------------------------------------|---------------------|
//! | `required`      | `key value`                               | never (zero is a violation) |
//! | `optional`      | `key value`                               | `None` or zero      |
//! | `always`        | `key value`                               | never               |
//! | `joined`        | `key a,b,c`                               | empty list          |
//! | `sorted_pairs`  | `key k1:v1,k2:v2`, keys sorted            | empty map           |
//! | `map`           | `<key>` block, one line per entry, in order | empty map         |
//! | `section`       | nested block                              | `None`              |
//! | `sections`      | one nested block per element, in order    | empty list          |

use super::section::Section;
use crate::error::{Error, Result};

/// A scalar parameter value.
pub trait Scalar {
    /// Text written after the key.
    fn render(&self) -> String;

    /// Zero value: empty string, `false` or `0`.
    fn is_zero(&self) -> bool;
}

impl Scalar for str {
    fn render(&self) -> String {
        quote(self)
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl Scalar for String {
    fn render(&self) -> String {
        quote(self)
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl Scalar for bool {
    fn render(&self) -> String {
        self.to_string()
    }

    fn is_zero(&self) -> bool {
        !*self
    }
}

macro_rules! numeric_scalar {
    ($($ty:ty),*) => {
        $(
            impl Scalar for $ty {
                fn render(&self) -> String {
                    self.to_string()
                }

                fn is_zero(&self) -> bool {
                    *self == 0
                }
            }
        )*
    };
}

numeric_scalar!(u16, u32, u64, i64, usize);

/// A configuration object whose fields render into a block.
pub trait Describe {
    /// Feeds every field, in declaration order.
    fn describe(&self, d: &mut Descriptor);
}

/// A configuration object that renders as its own block.
pub trait Block: Describe {
    /// Empty block carrying this object's header.
    fn header(&self) -> Section;
}

/// Collects the fields of one block.
#[derive(Debug)]
pub struct Descriptor {
    section: Section,
    violations: Vec<String>,
}

impl Descriptor {
    /// Starts describing `section`.
    #[must_use]
    pub const fn new(section: Section) -> Self {
        Self {
            section,
            violations: Vec::new(),
        }
    }

    /// Describes `value` into a fresh descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Internal`] if a required field is zero.
    pub fn render<D: Block + ?Sized>(value: &D) -> Result<Section> {
        let mut d = Self::new(value.header());
        value.describe(&mut d);
        d.finish()
    }

    /// A field that must be set.
    pub fn required<T: Scalar + ?Sized>(&mut self, name: &str, value: &T) -> &mut Self {
        if value.is_zero() {
            self.violations
                .push(format!("required field '{name}' is empty"));
        } else {
            self.section.push_param(name, value.render());
        }
        self
    }

    /// A field omitted when absent or zero.
    pub fn optional<T: Scalar + ?Sized>(&mut self, name: &str, value: Option<&T>) -> &mut Self {
        if let Some(value) = value.filter(|v| !v.is_zero()) {
            self.section.push_param(name, value.render());
        }
        self
    }

    /// A field rendered even at its zero value.
    pub fn always<T: Scalar + ?Sized>(&mut self, name: &str, value: &T) -> &mut Self {
        self.section.push_param(name, value.render());
        self
    }

    /// A list rendered as one delimited line.
    pub fn joined<T: Scalar>(&mut self, name: &str, values: &[T], separator: &str) -> &mut Self {
        if !values.is_empty() {
            let joined = values
                .iter()
                .map(Scalar::render)
                .collect::<Vec<_>>()
                .join(separator);
            self.section.push_param(name, joined);
        }
        self
    }

    /// A map rendered as one `k:v,...` line, sorted by key.
    pub fn sorted_pairs<'a, I>(&mut self, name: &str, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut pairs: Vec<_> = entries.into_iter().collect();
        if !pairs.is_empty() {
            pairs.sort();
            let joined = pairs
                .iter()
                .map(|(k, v)| format!("{k}:{v}"))
                .collect::<Vec<_>>()
                .join(",");
            self.section.push_param(name, quote(&joined));
        }
        self
    }

    /// A map rendered as a `<name>` block with one line per entry, in
    /// iteration order.
    pub fn map<'a, I>(&mut self, name: &str, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut block = Section::new(name);
        for (key, value) in entries {
            block.push_param(key.as_str(), quote(value));
        }
        if !block.params.is_empty() {
            self.section.push_child(block);
        }
        self
    }

    /// An optional nested block.
    pub fn section<D: Block>(&mut self, value: Option<&D>) -> &mut Self {
        if let Some(value) = value {
            let mut child = Self::new(value.header());
            value.describe(&mut child);
            let header = child.section.header();
            self.violations.extend(
                child
                    .violations
                    .into_iter()
                    .map(|v| format!("<{header}>: {v}")),
            );
            self.section.push_child(child.section);
        }
        self
    }

    /// One nested block per element.
    pub fn sections<D: Block>(&mut self, values: &[D]) -> &mut Self {
        for value in values {
            self.section(Some(value));
        }
        self
    }

    /// Appends an already rendered block.
    pub fn child(&mut self, section: Section) -> &mut Self {
        self.section.push_child(section);
        self
    }

    /// Returns the finished block.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Internal`] listing every violation recorded while
    /// describing, including those of nested blocks.
    pub fn finish(self) -> Result<Section> {
        if self.violations.is_empty() {
            Ok(self.section)
        } else {
            Err(Error::Internal {
                block: format!("<{}>", self.section.header()),
                reason: self.violations.join("; "),
            })
        }
    }
}

/// Quotes values the daemon would otherwise misread.
fn quote(raw: &str) -> String {
    let needs_quotes = raw.is_empty()
        || raw.contains('\n')
        || raw.starts_with('"')
        || raw.trim() != raw;
    if needs_quotes {
        serde_json::to_string(raw).unwrap_or_else(|_| format!("\"{raw}\""))
    } else {
        raw.to_string()
    }
}
