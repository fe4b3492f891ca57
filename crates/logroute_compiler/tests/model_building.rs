//! End-to-end model building behavior: validation messages, reference
//! resolution, fan-out and ordering.

use logroute_compiler::{build, Compiler, Error, ErrorKind, Origin, Resources};
use logroute_model::output::NullOutput;
use logroute_model::{
    Bundle, ClusterExclude, ClusterFlow, ClusterMatch, ClusterOutput, ClusterSelect, Flow,
    LoggingSystem, Match, Output, SinkConfig,
};
use proptest::prelude::*;

const TEST_NAMESPACE: &str = "logging-test";
const CONTROL_NAMESPACE: &str = "logging-control";

fn test_logging() -> LoggingSystem {
    let mut system = LoggingSystem::new("test-logging", CONTROL_NAMESPACE)
        .with_watch_namespaces([TEST_NAMESPACE]);
    system.flow_config_check_disabled = true;
    system
}

fn test_output() -> Output {
    Output::new(
        TEST_NAMESPACE,
        "test-output",
        SinkConfig::Null(NullOutput::default()),
    )
}

fn test_cluster_output() -> ClusterOutput {
    ClusterOutput::new(
        CONTROL_NAMESPACE,
        "test-output",
        SinkConfig::Null(NullOutput::default()),
    )
}

fn build_err(resources: Resources<'_>) -> Error {
    build(&test_logging(), resources).unwrap_err()
}

#[test]
fn invalid_flow_if_match_and_selector_both_set() {
    let flows = vec![Flow::new(TEST_NAMESPACE, "test-flow")
        .with_selector("a", "b")
        .with_match(Match::select([("c", "d")]))
        .with_output_ref("test-output")];
    let outputs = vec![test_output()];

    let err = build_err(Resources {
        flows: &flows,
        outputs: &outputs,
        ..Resources::default()
    });

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains(&format!(
        "failed to create model: match and selectors cannot be defined simultaneously for flow {TEST_NAMESPACE}/test-flow"
    )));
}

#[test]
fn invalid_flow_if_select_and_exclude_both_set() {
    let mut entry = Match::select([("c", "d")]);
    entry.exclude = Match::exclude([("c", "d")]).exclude;
    let flows = vec![Flow::new(TEST_NAMESPACE, "test-flow")
        .with_match(entry)
        .with_output_ref("test-output")];
    let outputs = vec![test_output()];

    let err = build_err(Resources {
        flows: &flows,
        outputs: &outputs,
        ..Resources::default()
    });

    assert!(err.to_string().contains(&format!(
        "failed to create model: failed to process match for {TEST_NAMESPACE}/test-flow: select and exclude cannot be set simultaneously"
    )));
}

#[test]
fn invalid_cluster_flow_if_select_and_exclude_both_set() {
    let entry = ClusterMatch {
        select: Some(ClusterSelect {
            labels: [("c".to_string(), "d".to_string())].into_iter().collect(),
            namespaces: Vec::new(),
        }),
        exclude: Some(ClusterExclude {
            labels: [("c".to_string(), "d".to_string())].into_iter().collect(),
            namespaces: Vec::new(),
        }),
    };
    let cluster_flows = vec![ClusterFlow::new(CONTROL_NAMESPACE, "test-flow")
        .with_match(entry)
        .with_output_ref("test-output")];
    let cluster_outputs = vec![test_cluster_output()];

    let err = build_err(Resources {
        cluster_flows: &cluster_flows,
        cluster_outputs: &cluster_outputs,
        ..Resources::default()
    });

    assert!(err.to_string().contains(&format!(
        "failed to create model: failed to process match for {CONTROL_NAMESPACE}/test-flow: select and exclude cannot be set simultaneously"
    )));
}

#[test]
fn invalid_cluster_flow_if_match_and_selector_both_set() {
    let cluster_flows = vec![ClusterFlow::new(CONTROL_NAMESPACE, "test-flow")
        .with_selector("a", "b")
        .with_match(ClusterMatch::select([("c", "d")], &[]))
        .with_output_ref("test-output")];
    let cluster_outputs = vec![test_cluster_output()];

    let err = build_err(Resources {
        cluster_flows: &cluster_flows,
        cluster_outputs: &cluster_outputs,
        ..Resources::default()
    });

    assert!(err.to_string().contains(&format!(
        "failed to create model: match and selectors cannot be defined simultaneously for clusterflow {CONTROL_NAMESPACE}/test-flow"
    )));
}

#[test]
fn missing_output_names_flow_and_output() {
    let flows = vec![Flow::new(TEST_NAMESPACE, "test-flow").with_output_ref("nope")];
    let err = build_err(Resources {
        flows: &flows,
        ..Resources::default()
    });

    assert_eq!(err.kind(), ErrorKind::Reference);
    let message = err.to_string();
    assert!(message.contains("test-flow"));
    assert!(message.contains("nope"));
}

#[test]
fn output_without_plugin_is_a_validation_error() {
    let mut output = test_output();
    output.spec.null = None;
    let flows = vec![Flow::new(TEST_NAMESPACE, "test-flow").with_output_ref("test-output")];
    let outputs = vec![output];

    let err = build_err(Resources {
        flows: &flows,
        outputs: &outputs,
        ..Resources::default()
    });

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("no output plugin configured"));
}

#[test]
fn same_output_twice_fans_out_twice() {
    let flows = vec![Flow::new(TEST_NAMESPACE, "test-flow")
        .with_output_ref("test-output")
        .with_output_ref("test-output")];
    let outputs = vec![test_output()];

    let tree = build(
        &test_logging(),
        Resources {
            flows: &flows,
            outputs: &outputs,
            ..Resources::default()
        },
    )
    .unwrap();

    assert_eq!(tree.directives[0].sinks.len(), 2);
    let rendered = logroute_compiler::render::render(&tree, false).unwrap();
    assert_eq!(rendered.matches("@type null").count(), 2);
}

#[test]
fn exclude_after_select_wins() {
    let flows = vec![Flow::new(TEST_NAMESPACE, "test-flow")
        .with_match(Match::select([("a", "b")]))
        .with_match(Match::exclude([("a", "b")]))];

    let tree = build(
        &test_logging(),
        Resources {
            flows: &flows,
            ..Resources::default()
        },
    )
    .unwrap();

    let origin = Origin::new(TEST_NAMESPACE, [("a", "b")]);
    assert!(!tree.directives[0].predicate.evaluate(&origin));
}

#[test]
fn bundle_compiles_end_to_end() {
    let bundle = Bundle::from_yaml(
        r#"
kind: Output
metadata:
  name: sumo
  namespace: logging-test
spec:
  sumologic:
    data_type: metrics
    metric_data_format: carbon2
    log_format: json
    source_category: prod/someapp/logs
    source_name: AppA
---
kind: Flow
metadata:
  name: app
  namespace: logging-test
spec:
  match:
    - select:
        labels:
          app: someapp
  localOutputRefs: [sumo]
"#,
    )
    .unwrap();

    let compiler = Compiler::new();
    let rendered = compiler
        .compile(&test_logging(), Resources::from(&bundle))
        .unwrap();
    let tree = compiler
        .to_directive_tree(&test_logging(), Resources::from(&bundle))
        .unwrap();
    let hash = &tree.directives[0].label[1..];

    let expected = format!(
        "  <match **>
    @type sumologic
    @id flow_logging_test_app_{hash}_sumologic_0
    data_type metrics
    log_format json
    metric_data_format carbon2
    source_category prod/someapp/logs
    source_name AppA
  </match>
</label>
"
    );
    assert!(rendered.ends_with(&expected), "{rendered}");
    assert!(rendered.contains("      labels app:someapp\n      namespaces logging-test\n"));
}

#[test]
fn rendered_plugin_ids_are_unique_across_similar_keys() {
    let system = LoggingSystem::new("test-logging", CONTROL_NAMESPACE);
    let flows = vec![
        Flow::new("a-b", "c").with_output_ref("discard"),
        Flow::new("a", "b-c").with_output_ref("discard"),
    ];
    let outputs = vec![
        Output::new("a-b", "discard", SinkConfig::Null(NullOutput::default())),
        Output::new("a", "discard", SinkConfig::Null(NullOutput::default())),
    ];

    let rendered = Compiler::new()
        .compile(
            &system,
            Resources {
                flows: &flows,
                outputs: &outputs,
                ..Resources::default()
            },
        )
        .unwrap();

    let mut ids: Vec<_> = rendered
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("@id flow_"))
        .collect();
    assert_eq!(ids.len(), 2);
    ids.dedup();
    assert_eq!(ids.len(), 2, "{rendered}");
}

#[test]
fn empty_nested_credential_is_a_validation_error() {
    let bundle = Bundle::from_yaml(
        r"
kind: Output
metadata:
  name: ingest
  namespace: logging-test
spec:
  http:
    endpoint: https://logs.example.com
    headers:
      X-Tenant: a
    auth:
      username: u
      password: ''
---
kind: Flow
metadata:
  name: app
  namespace: logging-test
spec:
  localOutputRefs: [ingest]
",
    )
    .unwrap();

    let err = Compiler::new()
        .compile(&test_logging(), Resources::from(&bundle))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("'auth.password'"));
    assert!(err.to_string().contains("output logging-test/ingest"));
}

fn flows() -> Vec<Flow> {
    ["a", "b", "c", "d"]
        .iter()
        .map(|name| {
            Flow::new(TEST_NAMESPACE, *name)
                .with_selector("app", *name)
                .with_output_ref("test-output")
        })
        .collect()
}

proptest! {
    #[test]
    fn input_order_does_not_change_output(shuffled in Just(flows()).prop_shuffle()) {
        let outputs = vec![test_output()];
        let system = test_logging();
        let compiler = Compiler::new();

        let canonical = compiler
            .compile(&system, Resources { flows: &flows(), outputs: &outputs, ..Resources::default() })
            .unwrap();
        let permuted = compiler
            .compile(&system, Resources { flows: &shuffled, outputs: &outputs, ..Resources::default() })
            .unwrap();

        prop_assert_eq!(canonical, permuted);
    }
}
