//! Word-boundary text chunker.
//!
//! Splits the reference corpus into bounded-length chunks for embedding.
//! Words are accumulated greedily: before adding the next word, if the
//! rendered buffer (words joined by single spaces) would exceed the
//! character budget, the buffer is flushed as a completed chunk and the
//! word starts a new one. Words are never split, so a chunk holding a
//! single word longer than the budget is allowed to exceed it.

use serde::{Deserialize, Serialize};

/// Default character budget per chunk.
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 200;

/// A bounded-length word sequence extracted from the reference corpus.
///
/// The `index` is the chunk's position in the corpus chunk sequence and is
/// the identity the similarity index maps back to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeChunk {
    /// Chunk text, words joined by single spaces.
    pub text: String,
    /// Position in the chunk sequence.
    pub index: usize,
}

/// Split text into chunks whose rendered length stays within `max_chars`.
///
/// Empty or whitespace-only input yields an empty sequence. Concatenating
/// the words of all returned chunks reproduces the input's word sequence.
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<KnowledgeChunk> {
    let mut chunks: Vec<String> = Vec::new();
    let mut buffer: Vec<&str> = Vec::new();
    // Rendered length of `buffer` joined by single spaces.
    let mut buffer_chars = 0usize;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();
        let appended_chars = if buffer.is_empty() {
            word_chars
        } else {
            buffer_chars + 1 + word_chars
        };

        if appended_chars > max_chars && !buffer.is_empty() {
            chunks.push(buffer.join(" "));
            buffer.clear();
            buffer_chars = word_chars;
        } else {
            buffer_chars = appended_chars;
        }

        buffer.push(word);
    }

    if !buffer.is_empty() {
        chunks.push(buffer.join(" "));
    }

    chunks
        .into_iter()
        .enumerate()
        .map(|(index, text)| KnowledgeChunk { text, index })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_no_chunks() {
        assert!(split_into_chunks("", 200).is_empty());
        assert!(split_into_chunks("   \n\t  ", 200).is_empty());
    }

    #[test]
    fn test_single_chunk_when_under_budget() {
        let chunks = split_into_chunks("collaboration means partnership", 200);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "collaboration means partnership");
        assert_eq!(chunks[0].index, 0);
    }

    #[test]
    fn test_chunks_respect_budget() {
        let text = "one two three four five six seven eight nine ten";
        let chunks = split_into_chunks(text, 15);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 15, "chunk too long: {:?}", chunk);
        }
    }

    #[test]
    fn test_word_sequence_preserved() {
        let text = "Evocation draws out the patient's own motivations rather than imposing the provider's reasons for change.";
        let chunks = split_into_chunks(text, 30);

        let original: Vec<&str> = text.split_whitespace().collect();
        let rebuilt: Vec<&str> = chunks
            .iter()
            .flat_map(|c| c.text.split_whitespace())
            .collect();
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn test_indices_are_contiguous() {
        let chunks = split_into_chunks("a b c d e f g h", 3);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, i);
        }
    }

    #[test]
    fn test_overlong_word_gets_own_chunk() {
        let chunks = split_into_chunks("hi supercalifragilistic bye", 10);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].text, "hi");
        // A single word over the budget is kept whole.
        assert_eq!(chunks[1].text, "supercalifragilistic");
        assert_eq!(chunks[2].text, "bye");
    }

    #[test]
    fn test_collapses_whitespace_runs() {
        let chunks = split_into_chunks("one\n\ntwo   three", 200);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "one two three");
    }
}
