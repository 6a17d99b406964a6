//! Rubric evaluation orchestration.
//!
//! Triggered once when the trainee ends a session. The transcript is
//! rendered with role labels, grounding chunks are retrieved with a fixed
//! canonical query, and one generation request combines the two with the
//! rubric-output instructions. The reply is returned verbatim; nothing is
//! parsed out of it and nothing is persisted.

use crate::error::{MiPracticeError, Result};
use crate::llm::{ChatService, Message, Prompts};
use crate::retrieval::KnowledgeRetriever;
use crate::scenario::{RUBRIC_DIMENSIONS, Scenario};
use crate::session::Transcript;
use std::sync::Arc;

/// Canonical query used to retrieve grounding context.
pub const GROUNDING_QUERY: &str = "motivational interviewing feedback rubric";

/// Default number of grounding chunks per evaluation.
pub const DEFAULT_GROUNDING_TOP_K: usize = 2;

/// Free-form generated evaluation text.
#[derive(Debug, Clone)]
pub struct EvaluationReport {
    pub text: String,
}

impl std::fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Builds and sends one rubric evaluation request.
pub struct Evaluator {
    chat: Arc<dyn ChatService>,
    retriever: Arc<KnowledgeRetriever>,
    grounding_top_k: usize,
}

impl Evaluator {
    /// Create an evaluator with the default grounding depth.
    pub fn new(chat: Arc<dyn ChatService>, retriever: Arc<KnowledgeRetriever>) -> Self {
        Self {
            chat,
            retriever,
            grounding_top_k: DEFAULT_GROUNDING_TOP_K,
        }
    }

    /// Override how many chunks are retrieved as grounding context.
    pub fn with_grounding_top_k(mut self, top_k: usize) -> Self {
        self.grounding_top_k = top_k;
        self
    }

    /// Evaluate a finished session's transcript.
    ///
    /// The transcript must contain at least one trainee turn; the seeded
    /// opening line alone is nothing to score.
    pub async fn evaluate(
        &self,
        scenario: &Scenario,
        transcript: &Transcript,
    ) -> Result<EvaluationReport> {
        if transcript.trainee_turn_count() == 0 {
            return Err(MiPracticeError::NothingToEvaluate);
        }

        let rendered = transcript.render(scenario.trainee_label, scenario.persona_label);

        let trainee_lines = scenario
            .evaluate_trainee_only
            .then(|| transcript.render_trainee_lines(scenario.trainee_label));

        let grounding_context = self
            .retriever
            .retrieve(GROUNDING_QUERY, self.grounding_top_k)?
            .join("\n");

        let request = Prompts::evaluation_request(
            &rendered,
            scenario.trainee_label,
            trainee_lines.as_deref(),
            &grounding_context,
            &RUBRIC_DIMENSIONS,
        );

        let messages = vec![
            Message::system(scenario.persona_prompt),
            Message::user(request),
        ];

        let text = self.chat.reply(messages).await?;
        Ok(EvaluationReport { text })
    }
}
