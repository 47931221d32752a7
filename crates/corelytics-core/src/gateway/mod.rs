//! The generation gateway: the external service that turns a brief into an
//! email.
//!
//! The core only sees the [`Generator`] trait. The trait is object-safe so
//! the engine can hold an `Arc<dyn Generator>` and tests can swap in a
//! scripted implementation.

pub mod openai;

pub use openai::{OpenAiGenerator, OpenAiSettings};

use async_trait::async_trait;
use thiserror::Error;

/// Why a generation attempt produced no email.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The service reported an error or could not be reached.
    #[error("generation service error: {0}")]
    Failed(String),

    /// The service answered but the content was missing or blank.
    #[error("generation service returned no content")]
    Empty,
}

/// Adapter interface for text-generation backends.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Short identifier for logs (e.g. "openai").
    fn name(&self) -> &str;

    /// Produce text for `brief`. Implementations must not retry and must
    /// not alter the brief.
    async fn generate(&self, brief: &str) -> Result<String, GatewayError>;
}

// Compile-time assertion: Generator must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn Generator) {}
};

/// Turn optional service content into a result, treating `None` and
/// whitespace-only text as [`GatewayError::Empty`].
pub fn require_content(content: Option<String>) -> Result<String, GatewayError> {
    match content {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(GatewayError::Empty),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoGenerator;

    #[async_trait]
    impl Generator for EchoGenerator {
        fn name(&self) -> &str {
            "echo"
        }

        async fn generate(&self, brief: &str) -> Result<String, GatewayError> {
            require_content(Some(brief.to_string()))
        }
    }

    #[tokio::test]
    async fn generator_is_usable_as_trait_object() {
        let generator: Box<dyn Generator> = Box::new(EchoGenerator);
        assert_eq!(generator.name(), "echo");
        assert_eq!(generator.generate("hello").await.unwrap(), "hello");
        assert_eq!(generator.generate("  ").await.unwrap_err(), GatewayError::Empty);
    }

    #[test]
    fn require_content_rejects_missing_and_blank() {
        assert_eq!(require_content(None), Err(GatewayError::Empty));
        assert_eq!(require_content(Some("\n\t ".into())), Err(GatewayError::Empty));
        assert_eq!(require_content(Some("Hi".into())), Ok("Hi".to_string()));
    }

    #[test]
    fn empty_and_failed_are_distinct() {
        assert_ne!(GatewayError::Empty, GatewayError::Failed(String::new()));
        assert_eq!(
            GatewayError::Failed("timeout".into()).to_string(),
            "generation service error: timeout"
        );
    }
}
