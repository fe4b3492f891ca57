//! Discard sink.

use serde::{Deserialize, Serialize};

/// Sink that drops every record it receives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NullOutput {}
