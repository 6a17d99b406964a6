//! Text embedding provider.
//!
//! The retrieval pipeline only needs an order-preserving, deterministic
//! mapping from text to fixed-dimension vectors, so the provider is a trait
//! seam. The default implementation runs all-MiniLM-L6-v2 locally with
//! candle (behind the `local-embeddings` feature); tests use a cheap
//! deterministic stub.

use crate::error::Result;

/// Vector dimension produced by all-MiniLM-L6-v2.
pub const EMBEDDING_DIM: usize = 384;

/// Maps text to fixed-dimension vectors.
///
/// Implementations must be deterministic for a fixed model version and must
/// return one vector per input, preserving order.
pub trait Embedder: Send + Sync {
    /// Generate embeddings for a batch of texts. `result[i]` embeds `texts[i]`.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    /// Dimension of every vector this embedder produces.
    fn dimension(&self) -> usize;

    /// Generate an embedding for a single text.
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut embeddings = self.embed_batch(&[text])?;
        Ok(embeddings.pop().unwrap_or_default())
    }
}

#[cfg(feature = "local-embeddings")]
pub use minilm::MiniLmEmbedder;

#[cfg(feature = "local-embeddings")]
mod minilm {
    use super::{EMBEDDING_DIM, Embedder};
    use crate::error::{MiPracticeError, Result};
    use candle_core::{Device, Tensor};
    use candle_nn::VarBuilder;
    use candle_transformers::models::bert::{BertModel, Config as BertConfig, DTYPE};
    use hf_hub::{Repo, RepoType, api::sync::Api};
    use tokenizers::Tokenizer;

    fn embed_err(context: &str, err: impl std::fmt::Display) -> MiPracticeError {
        MiPracticeError::Embedding(format!("{}: {}", context, err))
    }

    /// Local sentence-transformer embedder backed by candle.
    pub struct MiniLmEmbedder {
        model: BertModel,
        tokenizer: Tokenizer,
        device: Device,
    }

    impl MiniLmEmbedder {
        /// Load all-MiniLM-L6-v2 from the Hugging Face Hub.
        pub fn load() -> Result<Self> {
            Self::load_model("sentence-transformers/all-MiniLM-L6-v2")
        }

        /// Load a sentence-transformers BERT model by hub id.
        ///
        /// Model-load failures are fatal at startup: nothing downstream can
        /// run without vectors.
        pub fn load_model(model_id: &str) -> Result<Self> {
            let device = Device::Cpu; // CPU for portability

            let api = Api::new().map_err(|e| embed_err("Failed to create HF Hub API", e))?;
            let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));

            let config_path = repo
                .get("config.json")
                .map_err(|e| embed_err("Failed to get config.json", e))?;
            let tokenizer_path = repo
                .get("tokenizer.json")
                .map_err(|e| embed_err("Failed to get tokenizer.json", e))?;
            let weights_path = repo
                .get("model.safetensors")
                .or_else(|_| repo.get("pytorch_model.bin"))
                .map_err(|e| embed_err("Failed to get model weights", e))?;

            let config_json = std::fs::read_to_string(&config_path)
                .map_err(|e| embed_err("Failed to read model config", e))?;
            let config: BertConfig = serde_json::from_str(&config_json)
                .map_err(|e| embed_err("Failed to parse model config", e))?;

            let tokenizer = Tokenizer::from_file(&tokenizer_path)
                .map_err(|e| embed_err("Failed to load tokenizer", e))?;

            let vb = unsafe {
                VarBuilder::from_mmaped_safetensors(&[weights_path], DTYPE, &device)
                    .map_err(|e| embed_err("Failed to load model weights", e))?
            };

            let model = BertModel::load(vb, &config)
                .map_err(|e| embed_err("Failed to load BERT model", e))?;

            Ok(Self {
                model,
                tokenizer,
                device,
            })
        }

        fn forward_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
            let encodings = self
                .tokenizer
                .encode_batch(texts.to_vec(), true)
                .map_err(|e| embed_err("Tokenization failed", e))?;

            let max_len = encodings
                .iter()
                .map(|e| e.get_ids().len())
                .max()
                .unwrap_or(0);

            let mut input_ids = Vec::new();
            let mut attention_mask = Vec::new();
            let mut token_type_ids = Vec::new();

            for encoding in &encodings {
                let mut ids = encoding.get_ids().to_vec();
                let mut mask = encoding.get_attention_mask().to_vec();
                let mut types = vec![0u32; ids.len()];

                ids.resize(max_len, 0);
                mask.resize(max_len, 0);
                types.resize(max_len, 0);

                input_ids.extend(ids);
                attention_mask.extend(mask);
                token_type_ids.extend(types);
            }

            let batch = texts.len();
            let tensor = |data: Vec<u32>| {
                Tensor::from_vec(data, (batch, max_len), &self.device)
                    .map_err(|e| embed_err("Failed to build input tensor", e))
            };

            let input_ids = tensor(input_ids)?;
            let attention_mask = tensor(attention_mask)?;
            let token_type_ids = tensor(token_type_ids)?;

            let hidden = self
                .model
                .forward(&input_ids, &token_type_ids, Some(&attention_mask))
                .map_err(|e| embed_err("Model forward pass failed", e))?;

            // Masked mean pooling over the sequence dimension, then L2
            // normalization, matching the sentence-transformers recipe.
            let pooled = (|| -> candle_core::Result<Tensor> {
                let mask = attention_mask
                    .unsqueeze(2)?
                    .to_dtype(hidden.dtype())?
                    .broadcast_as(hidden.shape())?;

                let summed = (&hidden * &mask)?.sum(1)?;
                let counts = mask.sum(1)?.clamp(1e-9, f64::MAX)?;
                let mean = (summed / counts)?;

                let norms = mean.sqr()?.sum_keepdim(1)?.sqrt()?;
                let shape = mean.shape().clone();
                mean / norms.broadcast_as(&shape)?
            })()
            .map_err(|e| embed_err("Pooling failed", e))?;

            let rows = pooled
                .to_vec2::<f32>()
                .map_err(|e| embed_err("Failed to read embeddings", e))?;

            Ok(rows)
        }
    }

    impl Embedder for MiniLmEmbedder {
        fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
            if texts.is_empty() {
                return Ok(Vec::new());
            }

            // Bounded batches keep peak tensor memory flat on large corpora.
            let mut embeddings = Vec::with_capacity(texts.len());
            for batch in texts.chunks(32) {
                embeddings.extend(self.forward_batch(batch)?);
            }
            Ok(embeddings)
        }

        fn dimension(&self) -> usize {
            EMBEDDING_DIM
        }
    }
}

/// Deterministic hashed bag-of-words embedder for tests.
///
/// Each word is hashed into one of `dimension` buckets; the vector counts
/// bucket hits. Texts sharing words land closer in Euclidean distance,
/// which is all the retrieval tests need.
#[cfg(test)]
pub(crate) struct HashingEmbedder {
    pub dimension: usize,
}

#[cfg(test)]
impl HashingEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

#[cfg(test)]
impl Embedder for HashingEmbedder {
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        use std::hash::{Hash, Hasher};

        let vectors = texts
            .iter()
            .map(|text| {
                let mut vector = vec![0.0f32; self.dimension];
                for word in text.split_whitespace() {
                    let word = word
                        .trim_matches(|c: char| !c.is_alphanumeric())
                        .to_lowercase();
                    if word.is_empty() {
                        continue;
                    }
                    let mut hasher = std::hash::DefaultHasher::new();
                    word.hash(&mut hasher);
                    let bucket = (hasher.finish() % self.dimension as u64) as usize;
                    vector[bucket] += 1.0;
                }
                vector
            })
            .collect();

        Ok(vectors)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashing_embedder_is_deterministic() {
        let embedder = HashingEmbedder::new(16);
        let a = embedder.embed("flossing feels like a hassle").unwrap();
        let b = embedder.embed("flossing feels like a hassle").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 16);
    }

    #[test]
    fn test_hashing_embedder_preserves_order() {
        let embedder = HashingEmbedder::new(16);
        let batch = embedder.embed_batch(&["alpha", "beta"]).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0], embedder.embed("alpha").unwrap());
        assert_eq!(batch[1], embedder.embed("beta").unwrap());
    }

    #[test]
    fn test_empty_batch() {
        let embedder = HashingEmbedder::new(16);
        assert!(embedder.embed_batch(&[]).unwrap().is_empty());
    }
}
