// Copyright 2019 Guillaume Becquin
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::SstError;
use crate::hub::download_treebank;
use crate::treebank::tree::LabeledTree;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

/// # Treebank split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    #[serde(alias = "val")]
    Dev,
    Test,
}

impl Split {
    pub fn all() -> [Split; 3] {
        [Split::Train, Split::Dev, Split::Test]
    }

    /// Name of the split file in the treebank directory
    pub fn file_name(&self) -> &'static str {
        match self {
            Split::Train => "train.txt",
            Split::Dev => "dev.txt",
            Split::Test => "test.txt",
        }
    }
}

impl Default for Split {
    fn default() -> Self {
        Split::Train
    }
}

impl FromStr for Split {
    type Err = SstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "train" => Ok(Split::Train),
            "dev" | "val" | "validation" => Ok(Split::Dev),
            "test" => Ok(Split::Test),
            _ => Err(SstError::InvalidSplit(s.to_owned())),
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Split::Train => "train",
            Split::Dev => "dev",
            Split::Test => "test",
        };
        write!(f, "{}", name)
    }
}

/// Reads a treebank split file (one bracketed tree per line, blank lines are skipped)
///
/// # Parameters
/// - path (`&Path`): split file
///
/// # Returns
/// - `Result<Vec<LabeledTree>, SstError>` with the trees in file order
pub fn read_trees(path: &Path) -> Result<Vec<LabeledTree>, SstError> {
    let f = File::open(path).map_err(|e| {
        SstError::FileNotFound(format!("{} treebank file not found: {}", path.display(), e))
    })?;
    let br = BufReader::new(f);
    let mut trees = Vec::new();
    for (index, line) in br.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        trees.push(LabeledTree::parse(&line, index + 1)?);
    }
    Ok(trees)
}

/// # Sentiment treebank
/// Parsed train, dev and test splits. The corpus is loaded once and handed by reference to
/// the datasets built from it.
#[derive(Debug, Clone, Default)]
pub struct Treebank {
    train: Vec<LabeledTree>,
    dev: Vec<LabeledTree>,
    test: Vec<LabeledTree>,
}

impl Treebank {
    pub fn new(train: Vec<LabeledTree>, dev: Vec<LabeledTree>, test: Vec<LabeledTree>) -> Self {
        Treebank { train, dev, test }
    }

    /// Loads the three splits from a directory containing `train.txt`, `dev.txt` and `test.txt`
    pub fn from_dir<P: AsRef<Path>>(path: P) -> Result<Self, SstError> {
        let path = path.as_ref();
        log::info!("Loading SST treebank from {:?}", path);
        Ok(Treebank {
            train: read_trees(&path.join(Split::Train.file_name()))?,
            dev: read_trees(&path.join(Split::Dev.file_name()))?,
            test: read_trees(&path.join(Split::Test.file_name()))?,
        })
    }

    /// Downloads (or reuses the cached copy of) the treebank archive and loads its splits
    pub fn download() -> Result<Self, SstError> {
        Treebank::from_dir(download_treebank()?)
    }

    pub fn split(&self, split: Split) -> &[LabeledTree] {
        match split {
            Split::Train => &self.train,
            Split::Dev => &self.dev,
            Split::Test => &self.test,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_split_names() -> anyhow::Result<()> {
        assert_eq!("train".parse::<Split>()?, Split::Train);
        assert_eq!("dev".parse::<Split>()?, Split::Dev);
        assert_eq!("val".parse::<Split>()?, Split::Dev);
        assert_eq!("Test".parse::<Split>()?, Split::Test);
        assert!(matches!(
            "holdout".parse::<Split>(),
            Err(SstError::InvalidSplit(_))
        ));
        Ok(())
    }

    #[test]
    fn test_split_serde_alias() -> anyhow::Result<()> {
        assert_eq!(serde_json::from_str::<Split>("\"val\"")?, Split::Dev);
        assert_eq!(serde_json::to_string(&Split::Dev)?, "\"dev\"");
        Ok(())
    }

    #[test]
    fn test_read_trees_skips_blank_lines() -> anyhow::Result<()> {
        //        Given
        let mut split_file = tempfile::NamedTempFile::new()?;
        write!(split_file, "(3 (2 good) (3 film))\n\n(1 (1 dull) (2 plot))\n")?;

        //        When
        let trees = read_trees(split_file.path())?;

        //        Then
        assert_eq!(trees.len(), 2);
        assert_eq!(trees[0].to_line(), "good film");
        assert_eq!(trees[1].label(), 1);
        Ok(())
    }

    #[test]
    fn test_read_trees_reports_line_number() -> anyhow::Result<()> {
        //        Given
        let mut split_file = tempfile::NamedTempFile::new()?;
        write!(split_file, "(3 (2 good) (3 film))\n(1 (1 dull)\n")?;

        //        When
        let result = read_trees(split_file.path());

        //        Then
        assert!(matches!(result, Err(SstError::TreeParse { line: 2, .. })));
        Ok(())
    }

    #[test]
    fn test_missing_split_file() {
        let result = Treebank::from_dir("/path/that/does/not/exist");
        assert!(matches!(result, Err(SstError::FileNotFound(_))));
    }
}
