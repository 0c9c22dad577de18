//! Optional prompt-elaboration collaborator.
//!
//! An external service may pre-empt composition with a ready-made image or rewrite the prompt.
//! Its failure is never fatal: callers always have the original prompt to fall back to.

use crate::foundation::{
    core::TagId,
    error::{MontageError, MontageResult},
};

/// What an elaborator produced for a prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Elaboration {
    /// Encoded image bytes to return as-is.
    Image(Vec<u8>),
    /// A rewritten prompt. Composition still works from the caller's original prompt.
    Prompt(String),
    Nothing,
}

pub trait PromptElaborator: Send + Sync {
    fn elaborate(&self, prompt: &str, tags: &[TagId]) -> MontageResult<Elaboration>;

    /// Rewrite `original` to address `feedback`.
    fn refine(&self, original: &str, feedback: &str) -> MontageResult<String>;
}

/// Elaborator used when no service is configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoElaborator;

impl PromptElaborator for NoElaborator {
    fn elaborate(&self, _prompt: &str, _tags: &[TagId]) -> MontageResult<Elaboration> {
        Ok(Elaboration::Nothing)
    }

    fn refine(&self, _original: &str, _feedback: &str) -> MontageResult<String> {
        Err(MontageError::collaborator("no prompt elaborator configured"))
    }
}

/// Ask `elaborator` for a refinement, falling back to appending `feedback` to `original`.
#[tracing::instrument(level = "debug", skip(elaborator))]
pub fn refine_prompt(elaborator: &dyn PromptElaborator, original: &str, feedback: &str) -> String {
    match elaborator.refine(original, feedback) {
        Ok(refined) if !refined.trim().is_empty() => refined.trim().to_string(),
        Ok(_) => {
            tracing::warn!("elaborator returned an empty refinement, using fallback");
            fallback_refinement(original, feedback)
        }
        Err(err) => {
            tracing::warn!(%err, "prompt refinement failed, using fallback");
            fallback_refinement(original, feedback)
        }
    }
}

fn fallback_refinement(original: &str, feedback: &str) -> String {
    format!("{original}, {feedback}, improved version")
}

#[cfg(test)]
#[path = "../tests/unit/elaborate.rs"]
mod tests;
