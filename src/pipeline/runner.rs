//! Corpus runs: statistics pass, parallel linearization, output streams.

use std::fs::{self, File};
use std::io::{BufWriter, Write};

use rayon::prelude::*;
use tracing::{info, warn};

use super::config::{FailurePolicy, LinearizeConfig};
use super::corpus::Corpus;
use super::error::{PipelineError, SentenceError};
use super::report::RunReport;
use super::sentence::{ProcessedSentence, process_sentence};
use crate::base::constants::{AMR_SEQ_FILE, MAP_SEQ_FILE, TOK_SEQ_FILE};
use crate::categorize::{AmrStats, Categorizer, FrequencyCategorizer};
use crate::linearize::SentenceOutput;

/// Drives a whole corpus through the linearizer.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: LinearizeConfig,
}

impl Pipeline {
    pub fn new(config: LinearizeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LinearizeConfig {
        &self.config
    }

    /// Load the corpus, obtain statistics, and write all three streams.
    pub fn run(&self) -> Result<RunReport, PipelineError> {
        let corpus = Corpus::load(&self.config)?;
        let stats = self.statistics(&corpus)?;
        let oracle =
            FrequencyCategorizer::new(&stats).with_index_unknown(self.config.index_unknown);
        self.run_with(&corpus, &oracle)
    }

    /// Load persisted statistics, or collect and persist them.
    pub fn statistics(&self, corpus: &Corpus) -> Result<AmrStats, PipelineError> {
        let dir = self.config.stats_dir();
        let stats = if self.config.use_stats {
            AmrStats::load(dir)?
        } else {
            let stats = AmrStats::collect(corpus.graphs());
            stats.persist(dir)?;
            stats
        };
        info!(
            reentrancies = stats.num_reentrancy,
            predicates = stats.predicates.len(),
            named_entities = stats.named_entities.len(),
            "corpus statistics ready"
        );
        Ok(stats)
    }

    /// Process `corpus` with any oracle and write the output streams.
    ///
    /// Under [`FailurePolicy::Abort`] nothing is written when a sentence fails.
    pub fn run_with<C>(&self, corpus: &Corpus, oracle: &C) -> Result<RunReport, PipelineError>
    where
        C: Categorizer + ?Sized,
    {
        let thresholds = self.config.thresholds();
        let results: Vec<Result<ProcessedSentence, SentenceError>> = (0..corpus.len())
            .into_par_iter()
            .filter_map(|i| corpus.sentence(i))
            .map(|sentence| process_sentence(&sentence, oracle, thresholds))
            .collect();

        let mut report = RunReport {
            sentences: results.len(),
            ..RunReport::default()
        };
        let mut outputs = Vec::with_capacity(results.len());
        for (index, result) in results.into_iter().enumerate() {
            match result {
                Ok(processed) => {
                    report.reentrancies += processed.output.reentrancies;
                    report.self_cycles += usize::from(processed.self_cycle);
                    report.entities.add(&processed.entities);
                    outputs.push(processed.output);
                }
                Err(source) => match self.config.failure_policy {
                    FailurePolicy::Abort => {
                        return Err(PipelineError::SentenceFailed { index, source });
                    }
                    FailurePolicy::Skip => {
                        warn!(sentence = index, error = %source, "skipping sentence");
                        report.skipped += 1;
                        outputs.push(SentenceOutput::empty());
                    }
                },
            }
        }

        write_outputs(&self.config, &outputs)?;
        info!(
            sentences = report.sentences,
            skipped = report.skipped,
            self_cycles = report.self_cycles,
            reentrancies = report.reentrancies,
            single = ?report.single_ratio(),
            multiple = ?report.multiple_ratio(),
            empty = ?report.empty_ratio(),
            "linearization finished"
        );
        Ok(report)
    }
}

/// Write `amrseq`, `tokseq` and `mapseq`, one line per sentence.
pub fn write_outputs(
    config: &LinearizeConfig,
    outputs: &[SentenceOutput],
) -> Result<(), PipelineError> {
    fs::create_dir_all(&config.run_dir)?;
    let streams: [(&str, fn(&SentenceOutput) -> String); 3] = [
        (AMR_SEQ_FILE, SentenceOutput::amr_line),
        (TOK_SEQ_FILE, SentenceOutput::tok_line),
        (MAP_SEQ_FILE, SentenceOutput::map_line),
    ];
    for (name, line) in streams {
        let mut out = BufWriter::new(File::create(config.run_file(name))?);
        for output in outputs {
            writeln!(out, "{}", line(output))?;
        }
        out.flush()?;
    }
    Ok(())
}
