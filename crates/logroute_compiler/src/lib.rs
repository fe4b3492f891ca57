//! Flow model builder and daemon configuration renderer for Logroute.
//!
//! Pipeline, leaves first:
//! - [`selector`]: label superset tests
//! - [`matcher`]: flow matching configuration to an ordered [`Predicate`]
//! - [`registry`]: output references to validated sink configurations
//! - [`model`]: one [`Directive`] per flow, deterministically ordered
//! - [`render`]: nested-block daemon configuration text
//!
//! This crate is **pure and deterministic**:
//! - No I/O in the compile path
//! - No shared mutable state between compiles
//! - Same input always produces same output
//!
//! # Example
//!
//! ```rust
//! use logroute_compiler::{Compiler, Resources};
//! use logroute_model::output::NullOutput;
//! use logroute_model::{Flow, LoggingSystem, Output, SinkConfig};
//!
//! let system = LoggingSystem::new("default-logging", "logging-system");
//! let flows = vec![Flow::new("default", "nginx")
//!     .with_selector("app", "nginx")
//!     .with_output_ref("discard")];
//! let outputs = vec![Output::new(
//!     "default",
//!     "discard",
//!     SinkConfig::Null(NullOutput::default()),
//! )];
//!
//! let config = Compiler::new()
//!     .compile(&system, Resources { flows: &flows, outputs: &outputs, ..Resources::default() })
//!     .unwrap();
//! assert!(config.contains("@type null"));
//! ```

#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::format_push_string)]
#![allow(clippy::uninlined_format_args)]

pub mod check;
pub mod compiler;
pub mod error;
pub mod explain;
pub mod lockfile;
pub mod matcher;
pub mod model;
pub mod registry;
pub mod render;
pub mod selector;

pub use check::{run_check, CheckOutcome, ConfigCheck};
pub use compiler::{CompileOptions, Compiler, OutputFormat};
pub use error::{Error, ErrorKind, ModelError, Result};
pub use lockfile::ConfigLock;
pub use matcher::Predicate;
pub use model::{build, Directive, DirectiveTree, Resources};
pub use registry::{OutputRegistry, ResolvedSink, Scope};
pub use selector::{Clause, Origin, Polarity};
