//! Corpus driver.
//!
//! ```text
//! Corpus::load ──► statistics (collect + persist | load)
//!                      │ frozen, shared read-only
//!                      ▼
//!        sentences ─par_iter─► process_sentence ─► SentenceOutput
//!                                                      │ input order
//!                                                      ▼
//!                                     run_dir/{amrseq, tokseq, mapseq}
//! ```

mod config;
mod corpus;
mod error;
mod report;
mod runner;
mod sentence;

pub use config::{FailurePolicy, LinearizeConfig};
pub use corpus::{Corpus, Sentence};
pub use error::{PipelineError, SentenceError};
pub use report::RunReport;
pub use runner::{Pipeline, write_outputs};
pub use sentence::{ProcessedSentence, process_sentence};
