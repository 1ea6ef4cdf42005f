//! CI test ownership mapping.
//!
//! Assigns ownership metadata (owning component, JIRA targets, capability
//! tags, stable identity) to CI test results, and verifies that regenerated
//! mappings never silently lose ownership.
//!
//! The core is two pieces:
//! - the **resolution engine**: declarative per-team rule sets evaluated
//!   against each test record, with priority-based conflict resolution
//!   ([`resolver`], [`config`], [`capabilities`]);
//! - the **regression verifier**: a diff of two ownership snapshots that
//!   rejects any test falling back from a real owner to `Unknown`
//!   ([`verify`]).
//!
//! Data acquisition and warehouse persistence live outside this crate; the
//! only wire format here is the JSON snapshot handled by [`snapshot`].

pub mod capabilities;
pub mod components;
pub mod config;
pub mod error;
pub mod registry;
pub mod resolver;
pub mod snapshot;
pub mod types;
pub mod verify;

pub use config::{Component, Matcher};
pub use error::{Error, Result};
pub use registry::ComponentRegistry;
pub use types::{TestInfo, TestOwnership, UNKNOWN_COMPONENT};
