//! Pretrained word-vector model supporting nearest-neighbour queries.

use std::{
    cmp::Ordering,
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use anyhow::{anyhow, bail, Context, Result};
use ndarray::{Array2, Axis};
use strsim::jaro_winkler;
use tracing::info;

use crate::error::LexiconError;

const SUGGESTION_THRESHOLD: f64 = 0.8;
const MAX_DIM: usize = 1 << 16;
/// Headers are untrusted; buffers grow past this only as rows actually arrive.
const MAX_PREALLOC: usize = 1 << 20;

/// Unit-normalised embedding matrix with its vocabulary.
#[derive(Debug, Clone)]
pub struct EmbeddingModel {
    vocab: Vec<String>,
    index: HashMap<String, usize>,
    vectors: Array2<f32>,
}

impl EmbeddingModel {
    /// Load a `.vec` text model, or a word2vec binary model when the extension is `.bin`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("open embedding model {}", path.display()))?;
        let reader = BufReader::new(file);
        let binary = path.extension().and_then(|s| s.to_str()) == Some("bin");
        let model = if binary {
            Self::from_binary_reader(reader)
        } else {
            Self::from_text_reader(reader)
        }
        .with_context(|| format!("parse embedding model {}", path.display()))?;
        info!(
            path = %path.display(),
            vocabulary = model.len(),
            dim = model.dim(),
            "loaded embedding model"
        );
        Ok(model)
    }

    /// Parse the `<count> <dim>` header followed by one `token v1 .. vdim` line per word.
    pub fn from_text_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = reader.lines();
        let header = lines.next().ok_or_else(|| anyhow!("missing header"))??;
        let (count, dim, total) = parse_header(&header)?;

        let mut vocab = Vec::with_capacity(count.min(MAX_PREALLOC));
        let mut data = Vec::with_capacity(total.min(MAX_PREALLOC));
        for (lineno, line) in lines.enumerate() {
            let line = line?;
            let mut fields = line.split_whitespace();
            let Some(token) = fields.next() else {
                continue;
            };
            let before = data.len();
            for field in fields {
                let value: f32 = field
                    .parse()
                    .with_context(|| format!("line {}: bad value {field:?}", lineno + 2))?;
                data.push(value);
            }
            if data.len() - before != dim {
                bail!(
                    "line {}: expected {dim} values for {token:?}, found {}",
                    lineno + 2,
                    data.len() - before
                );
            }
            vocab.push(token.to_string());
        }
        if vocab.len() != count {
            bail!("header declares {count} words, found {}", vocab.len());
        }
        Self::from_parts(vocab, dim, data)
    }

    /// Parse the word2vec binary layout: text header, then `token ` + `dim` little-endian f32s.
    pub fn from_binary_reader<R: BufRead>(mut reader: R) -> Result<Self> {
        let mut header = String::new();
        reader.read_line(&mut header)?;
        let (count, dim, total) = parse_header(&header)?;

        let mut vocab = Vec::with_capacity(count.min(MAX_PREALLOC));
        let mut data = Vec::with_capacity(total.min(MAX_PREALLOC));
        let mut raw = vec![0u8; dim * 4];
        for i in 0..count {
            let mut token = Vec::new();
            reader.read_until(b' ', &mut token)?;
            if token.last() != Some(&b' ') {
                bail!("unexpected end of file at word {i}");
            }
            token.pop();
            let token = String::from_utf8_lossy(&token).trim().to_string();
            reader
                .read_exact(&mut raw)
                .with_context(|| format!("truncated vector for {token:?}"))?;
            data.extend(
                raw.chunks_exact(4)
                    .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]])),
            );
            vocab.push(token);
        }
        Self::from_parts(vocab, dim, data)
    }

    /// Build a model from in-memory vectors, mainly for fixtures.
    pub fn from_vectors<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: Into<String>,
    {
        let mut vocab = Vec::new();
        let mut data = Vec::new();
        let mut dim = None;
        for (word, vector) in words {
            let word = word.into();
            match dim {
                None => dim = Some(vector.len()),
                Some(d) if d != vector.len() => {
                    bail!("{word:?} has {} dimensions, expected {d}", vector.len())
                }
                _ => {}
            }
            vocab.push(word);
            data.extend(vector);
        }
        Self::from_parts(vocab, dim.unwrap_or(0), data)
    }

    fn from_parts(vocab: Vec<String>, dim: usize, data: Vec<f32>) -> Result<Self> {
        let mut vectors = Array2::from_shape_vec((vocab.len(), dim), data)?;
        for mut row in vectors.axis_iter_mut(Axis(0)) {
            let norm = row.dot(&row).sqrt();
            if norm > 0.0 {
                row /= norm;
            }
        }
        let index = vocab
            .iter()
            .enumerate()
            .map(|(i, word)| (word.clone(), i))
            .collect();
        Ok(Self {
            vocab,
            index,
            vectors,
        })
    }

    pub fn len(&self) -> usize {
        self.vocab.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocab.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.vectors.ncols()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.index.contains_key(token)
    }

    /// Cosine similarity between two in-vocabulary tokens.
    pub fn similarity(&self, a: &str, b: &str) -> Result<f32, LexiconError> {
        let a = self.lookup(a)?;
        let b = self.lookup(b)?;
        Ok(self.vectors.row(a).dot(&self.vectors.row(b)))
    }

    /// The `topn` tokens closest to `token` by cosine similarity, best first.
    pub fn most_similar(&self, token: &str, topn: usize) -> Result<Vec<(String, f32)>, LexiconError> {
        let idx = self.lookup(token)?;
        let scores = self.vectors.dot(&self.vectors.row(idx));
        let mut ranked: Vec<(usize, f32)> = scores
            .iter()
            .copied()
            .enumerate()
            .filter(|(i, _)| *i != idx)
            .collect();
        let by_score = |a: &(usize, f32), b: &(usize, f32)| {
            b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal).then(a.0.cmp(&b.0))
        };
        if topn < ranked.len() {
            ranked.select_nth_unstable_by(topn, by_score);
            ranked.truncate(topn);
        }
        ranked.sort_by(by_score);
        Ok(ranked
            .into_iter()
            .map(|(i, score)| (self.vocab[i].clone(), score))
            .collect())
    }

    /// Closest vocabulary entry by spelling, if any is close enough.
    pub fn suggest(&self, token: &str) -> Option<String> {
        self.vocab
            .iter()
            .map(|word| (jaro_winkler(token, word), word))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal))
            .map(|(_, word)| word.clone())
    }

    fn lookup(&self, token: &str) -> Result<usize, LexiconError> {
        self.index
            .get(token)
            .copied()
            .ok_or_else(|| LexiconError::UnknownWord {
                word: token.to_string(),
                suggestion: self.suggest(token),
            })
    }
}

/// Returns `(count, dim, count * dim)`, rejecting sizes that cannot be real.
fn parse_header(header: &str) -> Result<(usize, usize, usize)> {
    let mut parts = header.split_whitespace();
    let count: usize = parts
        .next()
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| anyhow!("bad header {header:?}"))?;
    let dim = parts
        .next()
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| anyhow!("bad header {header:?}"))?;
    if dim > MAX_DIM {
        bail!("header declares {dim} dimensions, at most {MAX_DIM} supported");
    }
    let total = count
        .checked_mul(dim)
        .ok_or_else(|| anyhow!("header declares {count} x {dim} values, which overflows"))?;
    Ok((count, dim, total))
}
