//! Small on-disk corpora for pipeline tests.

use std::fs;
use std::path::{Path, PathBuf};

use amr2seq::{FailurePolicy, LinearizeConfig};
use tempfile::TempDir;

/// One sentence of every input stream.
#[derive(Clone, Copy, Debug)]
pub struct SentenceFixture {
    pub amr: &'static str,
    pub alignment: &'static str,
    pub tokens: &'static str,
    pub lemmas: &'static str,
    pub pos: &'static str,
}

pub const OBAMA_SPOKE: SentenceFixture = SentenceFixture {
    amr: r#"(s / speak-01 :ARG0 (p / person :name (n / name :op1 "Barack" :op2 "Obama")))"#,
    alignment: "0-1.1.1.1 1-1.1.1.2 2-1",
    tokens: "Barack Obama spoke",
    lemmas: "Barack Obama speak",
    pos: "NNP NNP VBD",
};

pub const BOY_WANTS_TO_GO: SentenceFixture = SentenceFixture {
    amr: "(w / want-01 :ARG0 (b / boy) :ARG1 (g / go-01 :ARG0 b))",
    alignment: "1-1.1 2-1 4-1.2",
    tokens: "the boy wants to go",
    lemmas: "the boy want to go",
    pos: "DT NN VBZ TO VB",
};

pub const TWO_CATS: SentenceFixture = SentenceFixture {
    amr: "(h / have-03 :ARG0 (i / i) :ARG1 (c / cat :quant 2))",
    alignment: "0-1.1 1-1 2-1.2.1 3-1.2",
    tokens: "i have 2 cats",
    lemmas: "i have 2 cat",
    pos: "PRP VBP CD NNS",
};

pub const CORPUS: [SentenceFixture; 3] = [OBAMA_SPOKE, BOY_WANTS_TO_GO, TWO_CATS];

/// A temporary workspace with `data/`, `run/` and `stats/` directories.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new(sentences: &[SentenceFixture]) -> Self {
        let dir = TempDir::new().expect("temp dir");
        write_corpus(&dir.path().join("data"), sentences);
        Self { dir }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    pub fn run_dir(&self) -> PathBuf {
        self.dir.path().join("run")
    }

    pub fn stats_dir(&self) -> PathBuf {
        self.dir.path().join("stats")
    }

    pub fn config(&self) -> LinearizeConfig {
        LinearizeConfig::new(self.data_dir(), self.run_dir())
            .with_stats_dir(self.stats_dir())
            .with_failure_policy(FailurePolicy::Abort)
    }

    pub fn output(&self, name: &str) -> Vec<String> {
        read_lines(&self.run_dir().join(name))
    }
}

/// Write every input stream of `sentences` into `dir`.
pub fn write_corpus(dir: &Path, sentences: &[SentenceFixture]) {
    fs::create_dir_all(dir).expect("create data dir");
    let amr = sentences
        .iter()
        .map(|s| format!("# ::snt {}\n{}\n", s.tokens, s.amr))
        .collect::<Vec<_>>()
        .join("\n");
    fs::write(dir.join("amr"), amr).expect("write amr");

    let stream = |name: &str, field: fn(&SentenceFixture) -> &'static str| {
        let lines: String = sentences.iter().map(|s| format!("{}\n", field(s))).collect();
        fs::write(dir.join(name), lines).expect("write stream");
    };
    stream("alignment", |s| s.alignment);
    stream("token", |s| s.tokens);
    stream("lemmatized_token", |s| s.lemmas);
    stream("pos", |s| s.pos);
}

/// Lines of a file, trailing newline excluded.
pub fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
        .lines()
        .map(str::to_string)
        .collect()
}
