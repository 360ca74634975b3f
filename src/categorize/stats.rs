//! Corpus-wide concept statistics.
//!
//! On disk, one file per category inside a directory, each line
//! `<key> <count>`, sorted by descending count then key:
//!
//! ```text
//! stats/
//! ├── pred            want-01 132
//! ├── non_pred_val    boy 40
//! ├── const           - 87
//! ├── entities        date-entity 12
//! └── named_entities  person 51
//! ```
//!
//! The reentrancy total is reported but not persisted.

use std::fmt;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::info;

use super::error::StatsError;
use crate::base::constants::{
    CONST_STATS_FILE, ENTITY_STATS_FILE, NAMED_ENTITY_STATS_FILE, NON_PRED_STATS_FILE,
    PRED_STATS_FILE,
};
use crate::graph::{GraphStatistics, SemanticGraph};

type Counts = FxHashMap<SmolStr, usize>;

/// Concept frequencies over a corpus.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AmrStats {
    pub num_reentrancy: usize,
    pub predicates: Counts,
    pub nonpredicate_vals: Counts,
    pub consts: Counts,
    pub entities: Counts,
    pub named_entities: Counts,
}

fn add_counts(into: &mut Counts, from: &Counts) {
    for (key, count) in from {
        *into.entry(key.clone()).or_default() += count;
    }
}

impl AmrStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one graph's counts into the totals.
    pub fn update(&mut self, local: &GraphStatistics) {
        self.num_reentrancy += local.reentrancies;
        add_counts(&mut self.predicates, &local.predicates);
        add_counts(&mut self.nonpredicate_vals, &local.variables);
        add_counts(&mut self.consts, &local.consts);
        add_counts(&mut self.entities, &local.entities);
        add_counts(&mut self.named_entities, &local.named_entities);
    }

    /// Count every graph of a corpus.
    pub fn collect(graphs: &[SemanticGraph]) -> Self {
        let per_graph: Vec<GraphStatistics> = graphs.par_iter().map(|g| g.statistics()).collect();
        let mut stats = Self::new();
        for local in &per_graph {
            stats.update(local);
        }
        stats
    }

    pub fn predicate_count(&self, concept: &str) -> usize {
        self.predicates.get(concept).copied().unwrap_or(0)
    }

    pub fn nonpredicate_count(&self, concept: &str) -> usize {
        self.nonpredicate_vals.get(concept).copied().unwrap_or(0)
    }

    fn tables(&self) -> [(&'static str, &Counts); 5] {
        [
            (PRED_STATS_FILE, &self.predicates),
            (NON_PRED_STATS_FILE, &self.nonpredicate_vals),
            (CONST_STATS_FILE, &self.consts),
            (ENTITY_STATS_FILE, &self.entities),
            (NAMED_ENTITY_STATS_FILE, &self.named_entities),
        ]
    }

    /// Write every table into `dir`, creating it if needed.
    pub fn persist(&self, dir: &Path) -> Result<(), StatsError> {
        fs::create_dir_all(dir).map_err(|e| StatsError::io(dir, e))?;
        for (name, counts) in self.tables() {
            let path = dir.join(name);
            write_table(&path, counts).map_err(|e| StatsError::io(&path, e))?;
        }
        info!(dir = %dir.display(), "persisted corpus statistics");
        Ok(())
    }

    /// Read statistics previously written by [`AmrStats::persist`].
    pub fn load(dir: &Path) -> Result<Self, StatsError> {
        let mut stats = Self::new();
        stats.predicates = read_table(&dir.join(PRED_STATS_FILE))?;
        stats.nonpredicate_vals = read_table(&dir.join(NON_PRED_STATS_FILE))?;
        stats.consts = read_table(&dir.join(CONST_STATS_FILE))?;
        stats.entities = read_table(&dir.join(ENTITY_STATS_FILE))?;
        stats.named_entities = read_table(&dir.join(NAMED_ENTITY_STATS_FILE))?;
        info!(dir = %dir.display(), "loaded corpus statistics");
        Ok(stats)
    }
}

/// Entries sorted by descending count, then key.
pub(crate) fn sorted_entries(counts: &Counts) -> Vec<(&SmolStr, usize)> {
    let mut entries: Vec<_> = counts.iter().map(|(k, &c)| (k, c)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries
}

fn write_table(path: &Path, counts: &Counts) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for (key, count) in sorted_entries(counts) {
        writeln!(out, "{key} {count}")?;
    }
    out.flush()
}

fn read_table(path: &Path) -> Result<Counts, StatsError> {
    let file = File::open(path).map_err(|e| StatsError::io(path, e))?;
    let mut counts = Counts::default();
    for (i, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| StatsError::io(path, e))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        // Keys may contain spaces; the count is the last field.
        let parsed = line
            .rsplit_once(' ')
            .and_then(|(key, count)| Some((key, count.parse::<usize>().ok()?)));
        let Some((key, count)) = parsed else {
            return Err(StatsError::Format {
                path: path.to_path_buf(),
                line: i + 1,
                content: line.to_string(),
            });
        };
        counts.insert(SmolStr::new(key), count);
    }
    Ok(counts)
}

impl fmt::Display for AmrStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total number of reentrancies: {}", self.num_reentrancy)?;
        writeln!(f, "Total number of predicates: {}", self.predicates.len())?;
        writeln!(
            f,
            "Total number of non predicates variables: {}",
            self.nonpredicate_vals.len()
        )?;
        writeln!(f, "Total number of constants: {}", self.consts.len())?;
        writeln!(f, "Total number of entities: {}", self.entities.len())?;
        writeln!(f, "Total number of named entities: {}", self.named_entities.len())
    }
}
