//! Decision-tree navigation and instruction-brief compilation.
//!
//! The tree (domain → recipient → category → scenario) is loaded once into a
//! [`tree::TreeStore`] and shared read-only. A request names a path through
//! it; [`intent`] resolves that path into an [`intent::IntentState`],
//! [`brief`] compiles the state into an instruction brief, and a
//! [`gateway::Generator`] turns the brief into an email.
//!
//! ```text
//! IntentRequest --validate--> resolve (tree) --assemble--> IntentState
//!                                                              |
//!                                            brief::compile <--+
//!                                                  |
//!                                       Generator::generate --> email
//! ```

pub mod brief;
pub mod engine;
pub mod error;
pub mod gateway;
pub mod intent;
pub mod tree;

pub use engine::{Engine, GeneratedEmail, GenerationMetadata};
pub use error::{CoreError, ErrorKind};
