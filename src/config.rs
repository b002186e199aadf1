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
use crate::extraction::ExtractionPolicy;
use crate::padding::{TruncationBoundary, SST_MAX_LEN};
use crate::treebank::Split;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// # Utility to deserialize JSON config files
pub trait Config
where
    for<'de> Self: Deserialize<'de>,
{
    /// Loads a `Config` object from a JSON file. Missing keys take their default value.
    ///
    /// # Arguments
    ///
    /// * `path` - `Path` to the configuration JSON file.
    fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SstError> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SstError::FileNotFound(format!("{} configuration file not found: {}", path.display(), e))
        })?;
        let br = BufReader::new(f);
        let config: Self = serde_json::from_reader(br)?;
        Ok(config)
    }
}

fn default_true() -> bool {
    true
}

fn default_max_len() -> usize {
    SST_MAX_LEN
}

fn default_tokenizer() -> String {
    "bert-large-uncased".to_owned()
}

fn default_batch_size() -> usize {
    32
}

fn default_num_workers() -> usize {
    4
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
/// # Dataset configuration
/// Split, extraction mode and encoding width of a single dataset
pub struct DatasetConfig {
    #[serde(default)]
    pub split: Split,
    /// Only use the root node (full sentence) of each tree
    #[serde(default = "default_true")]
    pub root: bool,
    /// Use binary instead of fine-grained labels
    #[serde(default = "default_true")]
    pub binary: bool,
    #[serde(default = "default_max_len")]
    pub max_len: usize,
    #[serde(default)]
    pub boundary: TruncationBoundary,
}

impl DatasetConfig {
    pub fn new(split: Split, root: bool, binary: bool) -> Self {
        DatasetConfig {
            split,
            root,
            binary,
            ..Default::default()
        }
    }

    pub fn policy(&self) -> ExtractionPolicy {
        ExtractionPolicy::new(self.root, self.binary)
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        DatasetConfig {
            split: Split::Train,
            root: true,
            binary: true,
            max_len: SST_MAX_LEN,
            boundary: TruncationBoundary::Legacy,
        }
    }
}

impl Config for DatasetConfig {}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
/// # Loader configuration
/// Settings shared by the train, dev and test loaders
pub struct LoaderConfig {
    /// Pretrained tokenizer identifier or path to a vocabulary file
    #[serde(default = "default_tokenizer")]
    pub tokenizer: String,
    #[serde(default = "default_max_len")]
    pub max_len: usize,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_num_workers")]
    pub num_workers: usize,
    #[serde(default)]
    pub boundary: TruncationBoundary,
    /// Seed of the train shuffling, a random seed is drawn for every epoch if absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// Directory holding the split files, the treebank is downloaded if absent
    #[serde(default)]
    pub corpus_dir: Option<PathBuf>,
}

impl LoaderConfig {
    /// Configuration of the dataset of a split: full sentences with binary labels
    pub fn dataset_config(&self, split: Split) -> DatasetConfig {
        DatasetConfig {
            split,
            root: true,
            binary: true,
            max_len: self.max_len,
            boundary: self.boundary,
        }
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            tokenizer: default_tokenizer(),
            max_len: SST_MAX_LEN,
            batch_size: default_batch_size(),
            num_workers: default_num_workers(),
            boundary: TruncationBoundary::Legacy,
            seed: None,
            corpus_dir: None,
        }
    }
}

impl Config for LoaderConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_dataset_config() -> anyhow::Result<()> {
        //        Given
        let mut config_file = tempfile::NamedTempFile::new()?;
        write!(config_file, r#"{{"split": "val", "binary": false}}"#)?;

        //        When
        let config = DatasetConfig::from_file(config_file.path())?;

        //        Then
        assert_eq!(config.split, Split::Dev);
        assert!(config.root);
        assert!(!config.binary);
        assert_eq!(config.max_len, 66);
        assert_eq!(config.boundary, TruncationBoundary::Legacy);
        assert_eq!(config.policy(), ExtractionPolicy::RootFine);
        Ok(())
    }

    #[test]
    fn test_loader_config() -> anyhow::Result<()> {
        //        Given
        let mut config_file = tempfile::NamedTempFile::new()?;
        write!(
            config_file,
            r#"{{"batch_size": 8, "boundary": "exact", "seed": 42, "corpus_dir": "data/trees"}}"#
        )?;

        //        When
        let config = LoaderConfig::from_file(config_file.path())?;

        //        Then
        assert_eq!(config.tokenizer, "bert-large-uncased");
        assert_eq!(config.batch_size, 8);
        assert_eq!(config.num_workers, 4);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.corpus_dir, Some(PathBuf::from("data/trees")));
        let dataset_config = config.dataset_config(Split::Test);
        assert_eq!(dataset_config.policy(), ExtractionPolicy::RootBinary);
        assert_eq!(dataset_config.boundary, TruncationBoundary::Exact);
        Ok(())
    }

    #[test]
    fn test_default_loader_config() {
        let config = LoaderConfig::default();
        assert_eq!(config.batch_size, 32);
        assert_eq!(config.num_workers, 4);
        assert_eq!(config.max_len, 66);
    }

    #[test]
    fn test_invalid_config() -> anyhow::Result<()> {
        let mut config_file = tempfile::NamedTempFile::new()?;
        write!(config_file, r#"{{"split": "holdout"}}"#)?;

        assert!(matches!(
            DatasetConfig::from_file(config_file.path()),
            Err(SstError::Config(_))
        ));
        Ok(())
    }
}
