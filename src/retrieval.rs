//! Knowledge retriever: chunker + embedder + similarity index.
//!
//! Built once at session start from the reference corpus; afterwards it is
//! read-only and shareable. `retrieve` recomputes the query embedding on
//! every call, which is fine at one call per session end.

use crate::chunk::{KnowledgeChunk, split_into_chunks};
use crate::corpus::load_corpus;
use crate::embedding::Embedder;
use crate::error::Result;
use crate::index::VectorIndex;
use std::path::Path;
use std::sync::Arc;

/// Retrieves the corpus chunks most similar to a query.
pub struct KnowledgeRetriever {
    chunks: Vec<KnowledgeChunk>,
    index: VectorIndex,
    embedder: Arc<dyn Embedder>,
}

impl KnowledgeRetriever {
    /// Chunk `corpus_text`, embed every chunk, and index the embeddings.
    pub fn build(
        corpus_text: &str,
        embedder: Arc<dyn Embedder>,
        max_chunk_chars: usize,
    ) -> Result<Self> {
        let chunks = split_into_chunks(corpus_text, max_chunk_chars);

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = embedder.embed_batch(&texts)?;
        let index = VectorIndex::build(embedder.dimension(), embeddings)?;

        Ok(Self {
            chunks,
            index,
            embedder,
        })
    }

    /// Build from a directory of `.txt` reference files.
    pub fn from_corpus_dir(
        dir: &Path,
        embedder: Arc<dyn Embedder>,
        max_chunk_chars: usize,
    ) -> Result<Self> {
        let corpus_text = load_corpus(dir)?;
        Self::build(&corpus_text, embedder, max_chunk_chars)
    }

    /// Return the `top_k` chunk texts nearest to `query`, nearest-first.
    pub fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<String>> {
        let query_embedding = self.embedder.embed(query)?;
        let neighbors = self.index.query(&query_embedding, top_k)?;

        Ok(neighbors
            .into_iter()
            .map(|n| self.chunks[n.position].text.clone())
            .collect())
    }

    /// Number of indexed chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// The indexed chunks, in corpus order.
    pub fn chunks(&self) -> &[KnowledgeChunk] {
        &self.chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::HashingEmbedder;

    fn test_embedder() -> Arc<dyn Embedder> {
        Arc::new(HashingEmbedder::new(64))
    }

    #[test]
    fn test_retrieves_most_similar_chunk_first() {
        // A 32-char budget puts each sentence in its own chunk.
        let corpus = "Collaboration means partnership.\n\nEvocation draws out motivation.";
        let retriever = KnowledgeRetriever::build(corpus, test_embedder(), 32).unwrap();
        assert_eq!(retriever.chunk_count(), 2);

        let results = retriever.retrieve("partnership", 1).unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].contains("partnership"));
    }

    #[test]
    fn test_composition_matches_index_query() {
        let corpus = "alpha beta gamma\n\ndelta epsilon zeta\n\neta theta iota";
        let embedder = test_embedder();
        let retriever = KnowledgeRetriever::build(corpus, embedder.clone(), 20).unwrap();

        let query = "delta epsilon";
        let query_embedding = embedder.embed(query).unwrap();
        let expected: Vec<String> = retriever
            .index
            .query(&query_embedding, 2)
            .unwrap()
            .into_iter()
            .map(|n| retriever.chunks[n.position].text.clone())
            .collect();

        assert_eq!(retriever.retrieve(query, 2).unwrap(), expected);
    }

    #[test]
    fn test_empty_corpus_retrieves_nothing() {
        let retriever = KnowledgeRetriever::build("", test_embedder(), 200).unwrap();
        assert_eq!(retriever.chunk_count(), 0);

        let results = retriever.retrieve("anything", 2).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_top_k_truncates_to_chunk_count() {
        let retriever =
            KnowledgeRetriever::build("only one chunk here", test_embedder(), 200).unwrap();
        let results = retriever.retrieve("chunk", 5).unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_from_corpus_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("rubric.txt"), "Reflective listening matters.").unwrap();

        let retriever =
            KnowledgeRetriever::from_corpus_dir(dir.path(), test_embedder(), 200).unwrap();
        assert_eq!(retriever.chunk_count(), 1);
        assert_eq!(
            retriever.chunks()[0].text,
            "Reflective listening matters."
        );
    }
}
