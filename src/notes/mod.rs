//! Study-note generation: prompt construction, the LLM round trip, and reply parsing.

mod parser;
mod prompt;

pub use parser::{NoteSections, parse_sections};
pub use prompt::{
    BULLET_POINTS_HEADING, EXAM_SUMMARY_HEADING, SECTION_DELIMITER, SHORT_NOTES_HEADING,
    build_prompt,
};

use crate::summarization::{SummarizationClient, SummarizationClientError};

/// Produces [`NoteSections`] from cleaned text using a completion provider.
pub struct NotesGenerator {
    client: Box<dyn SummarizationClient>,
}

impl NotesGenerator {
    /// Wrap a provider client.
    pub fn new(client: Box<dyn SummarizationClient>) -> Self {
        Self { client }
    }

    /// Prompt the model and split its reply into sections.
    ///
    /// Individual missing sections degrade to empty strings. A reply with none of the headings
    /// is treated as unusable and reported as [`SummarizationClientError::InvalidResponse`].
    pub async fn generate(
        &self,
        text: &str,
        difficulty: &str,
    ) -> Result<NoteSections, SummarizationClientError> {
        let prompt = build_prompt(text, difficulty);
        tracing::debug!(
            difficulty,
            prompt_chars = prompt.chars().count(),
            "Requesting study notes"
        );
        let reply = self.client.generate(&prompt).await?;
        let notes = parse_sections(&reply).ok_or_else(|| {
            SummarizationClientError::InvalidResponse(
                "model reply contained no recognizable sections".into(),
            )
        })?;
        tracing::debug!(
            short_notes = !notes.short_notes.is_empty(),
            bullet_points = !notes.bullet_points.is_empty(),
            exam_summary = !notes.exam_summary.is_empty(),
            "Parsed study notes"
        );
        Ok(notes)
    }
}
