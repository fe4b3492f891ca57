//! Render engine: directive tree to nested-block daemon configuration.
//!
//! Output layout:
//!
//! ```text
//! <source>                      forward input
//! <match PREFIX.**>             label router, one <route> per directive
//! <label @HASH>                 one per directive, holding its sink blocks
//! ```
//!
//! Rendering is pure: the same tree always yields the same bytes.

pub mod descriptor;
pub mod plugins;
pub mod section;

pub use descriptor::{Block, Describe, Descriptor, Scalar};
pub use plugins::sink_section;
pub use section::Section;

use crate::error::Result;
use crate::model::{Directive, DirectiveTree};
use logroute_model::{ForwardInput, SinkConfig};
use tracing::trace;

/// `@id` of the forward input.
pub const SOURCE_ID: &str = "main_forward";

/// `@id` of the label router.
pub const ROUTER_ID: &str = "main_label_router";

/// Renders a whole directive tree.
///
/// # Errors
///
/// Returns [`crate::Error::Internal`] if a block violates an invariant that
/// model building should have enforced.
pub fn render(tree: &DirectiveTree, include_comments: bool) -> Result<String> {
    let mut out = String::new();
    if include_comments {
        out.push_str(&format!("# logging system: {}\n", tree.system));
    }

    for section in sections(tree)? {
        section.write_to(&mut out, 0);
    }

    trace!(system = %tree.system, bytes = out.len(), "rendered configuration");
    Ok(out)
}

/// Renders one sink configuration on its own.
///
/// # Errors
///
/// Same conditions as [`render`].
pub fn render_sink(sink: &SinkConfig, id: &str) -> Result<String> {
    Ok(sink_section(sink, id)?.to_string())
}

/// Top-level blocks of a tree, in output order.
///
/// # Errors
///
/// Same conditions as [`render`].
pub fn sections(tree: &DirectiveTree) -> Result<Vec<Section>> {
    let mut sections = Vec::with_capacity(tree.directives.len() + 2);
    sections.push(source_section(&tree.forward_input));
    sections.push(router_section(tree)?);
    for directive in &tree.directives {
        sections.push(label_section(directive)?);
    }
    Ok(sections)
}

fn source_section(input: &ForwardInput) -> Section {
    let mut section = Section::new("source");
    section.push_param("@type", "forward");
    section.push_param("@id", SOURCE_ID);
    section.push_param("bind", input.bind.as_str());
    section.push_param("port", input.port.to_string());
    section
}

fn router_tag(prefix: &str) -> String {
    if prefix.is_empty() {
        "**".to_string()
    } else {
        format!("{prefix}.**")
    }
}

fn router_section(tree: &DirectiveTree) -> Result<Section> {
    let mut d = Descriptor::new(Section::new("match").with_arg(router_tag(&tree.tag_prefix)));
    d.always("@type", "label_router").always("@id", ROUTER_ID);
    for directive in &tree.directives {
        d.child(route_section(directive)?);
    }
    d.finish()
}

fn route_section(directive: &Directive) -> Result<Section> {
    let mut d = Descriptor::new(Section::new("route"));
    d.required("@label", &directive.label);
    // The router stops at the first matching block while the predicate lets
    // the last matching clause decide, so clauses are written last to first.
    for clause in directive.predicate.clauses.iter().rev() {
        d.section(Some(clause));
    }
    d.finish()
}

fn label_section(directive: &Directive) -> Result<Section> {
    let mut section = Section::new("label").with_arg(directive.label.as_str());
    for (position, sink) in directive.sinks.iter().enumerate() {
        let id = directive.sink_id(position).unwrap_or_default();
        section.push_child(sink_section(&sink.config, &id)?);
    }
    Ok(section)
}
