//! Explain report generation.
//!
//! Produces a Markdown summary of what each directive selects and where it
//! sends matched streams.

use crate::model::DirectiveTree;
use crate::selector::{Clause, Polarity};

/// Generates a human-readable explanation of a directive tree.
#[must_use]
pub fn generate_report(tree: &DirectiveTree) -> String {
    let mut report = String::new();

    report.push_str(&format!("# Routing Report: {}\n\n", tree.system));

    report.push_str("## Overview\n\n");
    if !tree.tag_prefix.is_empty() {
        report.push_str(&format!("- **Tag prefix**: `{}`\n", tree.tag_prefix));
    }
    report.push_str(&format!(
        "- **Input**: forward on {}:{}\n",
        tree.forward_input.bind, tree.forward_input.port
    ));
    report.push_str(&format!("- **Directives**: {}\n", tree.directives.len()));
    report.push('\n');

    report.push_str("## Directives\n\n");
    report.push_str("Every directive receives each stream it matches; directives do not short-circuit.\n\n");

    for (i, directive) in tree.directives.iter().enumerate() {
        report.push_str(&format!(
            "### {}. {} {} (`{}`)\n\n",
            i + 1,
            directive.kind,
            directive.key,
            directive.label
        ));

        report.push_str("- **Match**:\n");
        for clause in &directive.predicate.clauses {
            report.push_str(&format!("  - {}\n", describe_clause(clause)));
        }

        if directive.sinks.is_empty() {
            report.push_str("- **Sinks**: none\n");
        } else {
            report.push_str("- **Sinks**:\n");
            for sink in &directive.sinks {
                report.push_str(&format!(
                    "  - {} {} ({})\n",
                    sink.kind,
                    sink.output,
                    sink.config.plugin_type()
                ));
            }
        }
        report.push('\n');
    }

    report
}

fn describe_clause(clause: &Clause) -> String {
    let verb = match clause.polarity {
        Polarity::Select => "select",
        Polarity::Exclude => "exclude",
    };
    let labels = if clause.labels.is_empty() {
        "all labels".to_string()
    } else {
        clause
            .labels
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", ")
    };
    let scope = if clause.namespaces.is_empty() {
        "all namespaces".to_string()
    } else {
        clause.namespaces.join(", ")
    };
    format!("{verb} {labels} in {scope}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{build, Resources};
    use logroute_model::output::NullOutput;
    use logroute_model::{Flow, LoggingSystem, Match, Output, SinkConfig};

    #[test]
    fn generate_report_basic() {
        let flows = vec![Flow::new("default", "nginx")
            .with_match(Match::select([("app", "nginx")]))
            .with_match(Match::exclude([("env", "dev")]))
            .with_output_ref("discard")];
        let outputs = vec![Output::new(
            "default",
            "discard",
            SinkConfig::Null(NullOutput::default()),
        )];
        let tree = build(
            &LoggingSystem::new("test-logging", "control"),
            Resources {
                flows: &flows,
                outputs: &outputs,
                ..Resources::default()
            },
        )
        .unwrap();

        let report = generate_report(&tree);

        assert!(report.contains("# Routing Report: test-logging"));
        assert!(report.contains("flow default/nginx"));
        assert!(report.contains("select app=nginx in default"));
        assert!(report.contains("exclude env=dev in default"));
        assert!(report.contains("output default/discard (null)"));
    }
}
