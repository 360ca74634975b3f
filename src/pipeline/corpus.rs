//! Parallel input streams of a corpus.
//!
//! ```text
//! data_dir/
//! ├── amr                 PENMAN graphs, blank-line separated
//! ├── alignment           one line of `tok-frag` records per sentence
//! ├── token               one line of tokens per sentence
//! ├── lemmatized_token    (alternative to `token`)
//! └── pos                 one line of tags per sentence
//! ```

use std::fs;
use std::path::Path;

use tracing::info;

use super::config::LinearizeConfig;
use super::error::PipelineError;
use crate::base::constants::{ALIGNMENT_FILE, AMR_FILE, POS_FILE};
use crate::graph::{SemanticGraph, parse_graphs};

/// One sentence, borrowed from its corpus.
#[derive(Clone, Copy, Debug)]
pub struct Sentence<'a> {
    pub index: usize,
    pub graph: &'a SemanticGraph,
    /// Raw alignment line.
    pub alignment: &'a str,
    pub tokens: &'a [String],
    pub pos: &'a [String],
}

/// A corpus whose streams agree on the number of sentences.
#[derive(Clone, Debug, Default)]
pub struct Corpus {
    graphs: Vec<SemanticGraph>,
    alignments: Vec<String>,
    tokens: Vec<Vec<String>>,
    pos: Vec<Vec<String>>,
}

impl Corpus {
    /// Assemble a corpus from in-memory streams.
    pub fn from_parts(
        graphs: Vec<SemanticGraph>,
        alignments: Vec<String>,
        tokens: Vec<Vec<String>>,
        pos: Vec<Vec<String>>,
    ) -> Result<Self, PipelineError> {
        let n = graphs.len();
        if alignments.len() != n || tokens.len() != n || pos.len() != n {
            return Err(PipelineError::InputShapeMismatch {
                graphs: n,
                alignments: alignments.len(),
                tokens: tokens.len(),
                pos: pos.len(),
            });
        }
        Ok(Self {
            graphs,
            alignments,
            tokens,
            pos,
        })
    }

    /// Read the corpus files named by `config`.
    pub fn load(config: &LinearizeConfig) -> Result<Self, PipelineError> {
        let amr_path = config.data_file(AMR_FILE);
        let amr_text = read(&amr_path)?;
        let graphs = parse_graphs(&amr_text).map_err(|source| PipelineError::Graph {
            path: amr_path.clone(),
            source,
        })?;

        let alignments = read_lines(&config.data_file(ALIGNMENT_FILE))?
            .into_iter()
            .map(|line| line.trim().to_string())
            .collect();
        let tokens = read_token_lines(&config.token_path())?;
        let pos = read_token_lines(&config.data_file(POS_FILE))?;

        let corpus = Self::from_parts(graphs, alignments, tokens, pos)?;
        info!(
            dir = %config.data_dir.display(),
            sentences = corpus.len(),
            lemma = config.use_lemma,
            "loaded corpus"
        );
        Ok(corpus)
    }

    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }

    pub fn graphs(&self) -> &[SemanticGraph] {
        &self.graphs
    }

    pub fn sentence(&self, index: usize) -> Option<Sentence<'_>> {
        Some(Sentence {
            index,
            graph: self.graphs.get(index)?,
            alignment: self.alignments.get(index)?,
            tokens: self.tokens.get(index)?,
            pos: self.pos.get(index)?,
        })
    }

    pub fn sentences(&self) -> impl Iterator<Item = Sentence<'_>> + '_ {
        (0..self.len()).filter_map(|i| self.sentence(i))
    }
}

fn read(path: &Path) -> Result<String, PipelineError> {
    fs::read_to_string(path).map_err(|e| PipelineError::read(path, e))
}

fn read_lines(path: &Path) -> Result<Vec<String>, PipelineError> {
    Ok(read(path)?.lines().map(str::to_string).collect())
}

fn read_token_lines(path: &Path) -> Result<Vec<Vec<String>>, PipelineError> {
    Ok(read_lines(path)?
        .iter()
        .map(|line| line.split_whitespace().map(str::to_string).collect())
        .collect())
}
