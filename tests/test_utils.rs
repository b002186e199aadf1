#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::{NamedTempFile, TempDir};

pub const VOCAB: [&str; 16] = [
    "[PAD]", "[UNK]", "[CLS]", "[SEP]", "[MASK]", "bad", "movie", "a", "film", "great", "fun",
    "##ny", "the", "plot", "is", ".",
];

pub fn write_vocab() -> anyhow::Result<NamedTempFile> {
    let mut vocab_file = NamedTempFile::new()?;
    for token in VOCAB.iter() {
        writeln!(vocab_file, "{}", token)?;
    }
    Ok(vocab_file)
}

fn write_split(dir: &Path, name: &str, trees: &[&str]) -> anyhow::Result<()> {
    fs::write(dir.join(name), trees.join("\n"))?;
    Ok(())
}

/// Treebank directory with 5 train trees (one neutral), 2 dev trees and 3 test trees
pub fn write_treebank() -> anyhow::Result<TempDir> {
    let dir = tempfile::tempdir()?;
    write_split(
        dir.path(),
        "train.txt",
        &[
            "(0 (1 bad) (0 movie))",
            "(4 (2 a) (4 (4 great) (2 film)))",
            "(2 (2 the) (2 film))",
            "(3 (3 funny) (2 movie))",
            "(1 (2 (2 the) (2 plot)) (1 (2 is) (1 bad)))",
        ],
    )?;
    write_split(
        dir.path(),
        "dev.txt",
        &["(4 (4 great) (2 movie))", "(0 (0 bad) (2 film))"],
    )?;
    write_split(
        dir.path(),
        "test.txt",
        &["(3 (2 a) (3 fun))", "(2 (2 a) (2 film))", "(1 (1 bad) (2 .))"],
    )?;
    Ok(dir)
}
