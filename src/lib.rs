//! MI Practice - a retrieval-grounded virtual patient for practicing
//! Motivational Interviewing.
//!
//! The tool simulates a patient persona over a multi-turn dialogue, then
//! produces a rubric-based evaluation of the trainee's performance. The
//! evaluation is grounded by a small retrieval step: reference rubric
//! documents are chunked, embedded with all-MiniLM-L6-v2, and indexed for
//! Euclidean nearest-neighbor search; the closest chunks are injected into
//! the evaluation request.
//!
//! # Quick Start
//!
//! ```no_run
//! use mi_practice::{
//!     Config, Embedder, KnowledgeRetriever, LlmClient, Scenario, Session,
//! };
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Load configuration (the API key travels in the config, never
//!     // through ambient environment mutation)
//!     let config = Config::load()?;
//!     config.validate()?;
//!
//!     // Build the retrieval pipeline once, before any dialogue turn
//!     let embedder: Arc<dyn Embedder> = Arc::new(mi_practice::MiniLmEmbedder::load()?);
//!     let retriever = Arc::new(KnowledgeRetriever::from_corpus_dir(
//!         Path::new("hpv_rubrics"),
//!         embedder,
//!         config.retrieval.max_chunk_chars,
//!     )?);
//!
//!     // Run a session
//!     let client = Arc::new(LlmClient::new(config.llm.clone()));
//!     let mut session = Session::new(Scenario::hpv_vaccine(), client, retriever);
//!
//!     session.submit_trainee_turn("What brings you in today?").await?;
//!     let report = session.finish().await?;
//!     println!("{}", report);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - **chunk**: word-boundary chunker for the reference corpus
//! - **embedding**: text-to-vector provider behind the [`Embedder`] trait
//! - **index**: build-once Euclidean nearest-neighbor index
//! - **retrieval**: chunker + embedder + index composition
//! - **llm**: OpenAI-compatible chat client and prompt text
//! - **scenario**: per-scenario persona, labels, and evaluation policy
//! - **session**: transcript ownership and dialogue orchestration
//! - **evaluation**: retrieval-grounded rubric evaluation

pub mod chunk;
pub mod config;
pub mod corpus;
pub mod embedding;
pub mod error;
pub mod evaluation;
pub mod index;
pub mod llm;
pub mod retrieval;
pub mod scenario;
pub mod session;

// Re-export commonly used types
pub use chunk::{KnowledgeChunk, split_into_chunks};
pub use config::Config;
#[cfg(feature = "local-embeddings")]
pub use embedding::MiniLmEmbedder;
pub use embedding::{EMBEDDING_DIM, Embedder};
pub use error::{MiPracticeError, Result};
pub use evaluation::{EvaluationReport, Evaluator, GROUNDING_QUERY};
pub use index::{Neighbor, VectorIndex};
pub use llm::{ChatService, LlmClient, Message, Role};
pub use retrieval::KnowledgeRetriever;
pub use scenario::{RUBRIC_DIMENSIONS, Scenario};
pub use session::{Session, Speaker, Transcript, Turn};
