//! Typed resource model for Logroute.
//!
//! This crate provides:
//! - The logging system, flow and output resources a compile pass consumes
//! - Sink plugin configurations as an explicit tagged union ([`SinkConfig`])
//! - Decoding of resource bundles (YAML document streams or JSON arrays)
//!
//! # Example
//!
//! ```rust
//! use logroute_model::Bundle;
//!
//! let input = r#"
//! kind: Output
//! metadata:
//!   name: discard
//!   namespace: default
//! spec:
//!   "null": {}
//! "#;
//!
//! let bundle = Bundle::from_yaml(input).unwrap();
//! assert_eq!(bundle.outputs.len(), 1);
//! assert_eq!(bundle.outputs[0].spec.sink().unwrap().plugin_type(), "null");
//! ```

#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod bundle;
pub mod error;
pub mod flow;
pub mod logging;
pub mod meta;
pub mod output;

pub use bundle::{Bundle, Resource};
pub use error::{Error, Result};
pub use flow::{
    ClusterExclude, ClusterFlow, ClusterFlowSpec, ClusterMatch, ClusterSelect, Exclude, Flow,
    FlowSpec, Labels, Match, Select,
};
pub use logging::{ForwardInput, Logging, LoggingSpec, LoggingSystem};
pub use meta::{ObjectKey, ObjectKind, ObjectMeta};
pub use output::{ClusterOutput, Output, OutputSpec, SinkConfig};
