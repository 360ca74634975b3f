//! Run configuration.

use std::path::{Path, PathBuf};

use crate::base::constants::{DEFAULT_MIN_FREQ, LEMMA_FILE, TOKEN_FILE};
use crate::categorize::Thresholds;

/// What to do with a sentence whose processing fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the run at the first failing sentence, before writing output.
    #[default]
    Abort,
    /// Log the failure and write empty lines for that sentence.
    Skip,
}

/// Configuration of a corpus run
#[derive(Debug, Clone)]
pub struct LinearizeConfig {
    /// Directory holding `amr`, `alignment`, `token`/`lemmatized_token` and `pos`.
    pub data_dir: PathBuf,
    /// Directory receiving `amrseq`, `tokseq` and `mapseq`.
    pub run_dir: PathBuf,
    /// Directory the corpus statistics are written to or read from.
    pub stats_dir: PathBuf,
    /// Read lemmas instead of surface tokens.
    pub use_lemma: bool,
    /// Load statistics from `stats_dir` instead of collecting them.
    pub use_stats: bool,
    pub min_pred_freq: usize,
    pub min_var_freq: usize,
    /// Categorize concepts rarer than the thresholds as `PRED` / `NONPRED`.
    pub index_unknown: bool,
    pub failure_policy: FailurePolicy,
}

impl Default for LinearizeConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            run_dir: PathBuf::from("."),
            stats_dir: PathBuf::from("stats"),
            use_lemma: false,
            use_stats: false,
            min_pred_freq: DEFAULT_MIN_FREQ,
            min_var_freq: DEFAULT_MIN_FREQ,
            index_unknown: false,
            failure_policy: FailurePolicy::Abort,
        }
    }
}

impl LinearizeConfig {
    pub fn new(data_dir: impl Into<PathBuf>, run_dir: impl Into<PathBuf>) -> Self {
        let run_dir = run_dir.into();
        Self {
            data_dir: data_dir.into(),
            stats_dir: run_dir.join("stats"),
            run_dir,
            ..Self::default()
        }
    }

    pub fn with_stats_dir(mut self, stats_dir: impl Into<PathBuf>) -> Self {
        self.stats_dir = stats_dir.into();
        self
    }

    pub fn with_lemma(mut self, use_lemma: bool) -> Self {
        self.use_lemma = use_lemma;
        self
    }

    pub fn with_stats(mut self, use_stats: bool) -> Self {
        self.use_stats = use_stats;
        self
    }

    pub fn with_min_freq(mut self, pred: usize, var: usize) -> Self {
        self.min_pred_freq = pred;
        self.min_var_freq = var;
        self
    }

    pub fn with_index_unknown(mut self, index_unknown: bool) -> Self {
        self.index_unknown = index_unknown;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            pred: self.min_pred_freq,
            var: self.min_var_freq,
        }
    }

    /// Path of the token stream, depending on `use_lemma`.
    pub fn token_path(&self) -> PathBuf {
        let name = if self.use_lemma { LEMMA_FILE } else { TOKEN_FILE };
        self.data_dir.join(name)
    }

    pub fn data_file(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }

    pub fn run_file(&self, name: &str) -> PathBuf {
        self.run_dir.join(name)
    }

    pub fn stats_dir(&self) -> &Path {
        &self.stats_dir
    }
}
