//! Conversation session and dialogue orchestration.
//!
//! A [`Session`] exclusively owns its [`Transcript`] and drives the
//! turn-taking loop: append the trainee's message, forward the persona
//! instructions plus the whole transcript to the generation service, append
//! the reply. The `&mut self` receiver on [`Session::submit_trainee_turn`]
//! is what enforces the one-outstanding-call-at-a-time state machine; there
//! is no background work and no retry.

use crate::error::Result;
use crate::evaluation::{EvaluationReport, Evaluator};
use crate::llm::{ChatService, Message, Prompts};
use crate::retrieval::KnowledgeRetriever;
use crate::scenario::Scenario;
use std::sync::Arc;

/// Who produced a transcript turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    /// The simulated patient.
    Persona,
    /// The human practicing MI.
    Trainee,
}

/// One turn of the conversation.
#[derive(Debug, Clone)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

impl Turn {
    fn persona(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Persona,
            text: text.into(),
        }
    }

    fn trainee(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Trainee,
            text: text.into(),
        }
    }
}

/// Append-only ordered record of one session's turns.
///
/// Created seeded with the scenario's opening persona line; discarded with
/// the session.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    fn seeded(opening_line: &str) -> Self {
        Self {
            turns: vec![Turn::persona(opening_line)],
        }
    }

    /// All turns in order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Check if the transcript holds no turns.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Number of trainee turns.
    pub fn trainee_turn_count(&self) -> usize {
        self.turns
            .iter()
            .filter(|t| t.speaker == Speaker::Trainee)
            .count()
    }

    /// Render every turn as a labeled line.
    pub fn render(&self, trainee_label: &str, persona_label: &str) -> String {
        self.turns
            .iter()
            .map(|turn| match turn.speaker {
                Speaker::Trainee => format!("{}: {}", trainee_label, turn.text),
                Speaker::Persona => format!("{}: {}", persona_label, turn.text),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render only the trainee's turns as labeled lines.
    pub fn render_trainee_lines(&self, trainee_label: &str) -> String {
        self.turns
            .iter()
            .filter(|t| t.speaker == Speaker::Trainee)
            .map(|t| format!("{}: {}", trainee_label, t.text))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }
}

/// One interactive practice session.
pub struct Session {
    scenario: Scenario,
    chat: Arc<dyn ChatService>,
    retriever: Arc<KnowledgeRetriever>,
    grounding_top_k: usize,
    transcript: Transcript,
}

impl Session {
    /// Start a session with its dependencies injected. The transcript is
    /// seeded with the scenario's opening persona line.
    pub fn new(
        scenario: Scenario,
        chat: Arc<dyn ChatService>,
        retriever: Arc<KnowledgeRetriever>,
    ) -> Self {
        let transcript = Transcript::seeded(scenario.opening_line);
        Self {
            scenario,
            chat,
            retriever,
            grounding_top_k: crate::evaluation::DEFAULT_GROUNDING_TOP_K,
            transcript,
        }
    }

    /// Override how many chunks ground the evaluation request.
    pub fn with_grounding_top_k(mut self, top_k: usize) -> Self {
        self.grounding_top_k = top_k;
        self
    }

    /// The scenario this session practices.
    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// Read access to the transcript.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Submit one trainee turn and obtain the persona's reply.
    ///
    /// The trainee turn is appended before the generation call. If the call
    /// fails, the trainee turn stays, no persona turn is appended, and the
    /// error propagates to the caller, who may resubmit.
    pub async fn submit_trainee_turn(&mut self, text: impl Into<String>) -> Result<&Transcript> {
        self.transcript.push(Turn::trainee(text));

        let reply = self.chat.reply(self.dialogue_messages()).await?;
        self.transcript.push(Turn::persona(reply));

        Ok(&self.transcript)
    }

    /// End the dialogue phase and produce the rubric evaluation.
    ///
    /// Reads the transcript without mutating it.
    pub async fn finish(&self) -> Result<EvaluationReport> {
        Evaluator::new(self.chat.clone(), self.retriever.clone())
            .with_grounding_top_k(self.grounding_top_k)
            .evaluate(&self.scenario, &self.transcript)
            .await
    }

    /// Full message list for one dialogue call: persona instructions, the
    /// fixed turn-taking instruction, then the transcript so far.
    fn dialogue_messages(&self) -> Vec<Message> {
        let mut messages = vec![
            Message::system(self.scenario.persona_prompt),
            Message::system(Prompts::turn_instruction()),
        ];

        messages.extend(self.transcript.turns.iter().map(|turn| match turn.speaker {
            Speaker::Trainee => Message::user(turn.text.as_str()),
            Speaker::Persona => Message::assistant(turn.text.as_str()),
        }));

        messages
    }
}
