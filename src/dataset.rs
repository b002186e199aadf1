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

use crate::config::DatasetConfig;
use crate::encoder::{wrap_sentence, TextEncoder};
use crate::error::SstError;
use crate::extraction::{extract, ExtractionPolicy};
use crate::padding::rpad;
use crate::treebank::{LabeledTree, Split, Treebank};

/// # SST record
/// Fixed-width token ids of an example and its label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub token_ids: Vec<i64>,
    pub label: i64,
}

/// # SST dataset
/// Records of one split under one extraction policy. All records are extracted, encoded and
/// padded when the dataset is built.
#[derive(Debug, Clone)]
pub struct SstDataset {
    split: Split,
    policy: ExtractionPolicy,
    max_len: usize,
    records: Vec<Record>,
}

impl SstDataset {
    /// Builds the dataset of `config.split` from a loaded treebank
    pub fn new<E: TextEncoder>(
        treebank: &Treebank,
        encoder: &E,
        config: &DatasetConfig,
    ) -> Result<Self, SstError> {
        log::info!("Loading SST {} set", config.split);
        SstDataset::from_trees(treebank.split(config.split), encoder, config)
    }

    /// Builds the dataset from a sequence of trees, `config.split` is only kept as metadata
    pub fn from_trees<E: TextEncoder>(
        trees: &[LabeledTree],
        encoder: &E,
        config: &DatasetConfig,
    ) -> Result<Self, SstError> {
        let policy = config.policy();
        let (texts, labels): (Vec<String>, Vec<i64>) = extract(trees, policy)?
            .into_iter()
            .map(|(text, label)| (wrap_sentence(&text), label))
            .unzip();

        log::info!("Tokenizing {} examples", texts.len());
        let records = encoder
            .encode_list(texts.as_slice())
            .into_iter()
            .zip(labels)
            .map(|(token_ids, label)| Record {
                token_ids: rpad(token_ids, config.max_len, config.boundary),
                label,
            })
            .collect::<Vec<Record>>();
        log::debug!(
            "Built {} records for the {} split ({:?})",
            records.len(),
            config.split,
            policy
        );

        Ok(SstDataset {
            split: config.split,
            policy,
            max_len: config.max_len,
            records,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the token ids (of length `max_len`) and label of a record
    pub fn get(&self, index: usize) -> Option<(&[i64], i64)> {
        self.records
            .get(index)
            .map(|record| (record.token_ids.as_slice(), record.label))
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn split(&self) -> Split {
        self.split
    }

    pub fn policy(&self) -> ExtractionPolicy {
        self.policy
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::padding::TruncationBoundary;

    /// Maps every word to its length, markers to 100 and 101
    struct WordLengthEncoder;

    impl TextEncoder for WordLengthEncoder {
        fn encode(&self, text: &str) -> Vec<i64> {
            text.split_whitespace()
                .map(|word| match word {
                    "[CLS]" => 100,
                    "[SEP]" => 101,
                    _ => word.len() as i64,
                })
                .collect()
        }
    }

    fn trees() -> Vec<LabeledTree> {
        ["(0 (1 bad) (0 movie))", "(2 (2 a) (2 film))", "(3 (2 so) (3 good))"]
            .iter()
            .map(|line| line.parse().unwrap())
            .collect()
    }

    #[test]
    fn test_root_binary_dataset() -> anyhow::Result<()> {
        //        Given
        let config = DatasetConfig::new(Split::Train, true, true);

        //        When
        let dataset = SstDataset::from_trees(&trees(), &WordLengthEncoder, &config)?;

        //        Then
        assert_eq!(dataset.len(), 2);
        let (token_ids, label) = dataset.get(0).unwrap();
        assert_eq!(token_ids.len(), 66);
        assert_eq!(&token_ids[..5], &[100, 3, 5, 101, 0]);
        assert_eq!(label, 0);
        assert_eq!(dataset.get(1).unwrap().1, 1);
        assert!(dataset.get(2).is_none());
        Ok(())
    }

    #[test]
    fn test_width_invariant() -> anyhow::Result<()> {
        for root in [true, false].iter() {
            for binary in [true, false].iter() {
                let config = DatasetConfig::new(Split::Dev, *root, *binary);
                let dataset = SstDataset::from_trees(&trees(), &WordLengthEncoder, &config)?;
                assert!(!dataset.is_empty());
                assert!(dataset
                    .records()
                    .iter()
                    .all(|record| record.token_ids.len() == 66));
            }
        }
        Ok(())
    }

    #[test]
    fn test_long_sentence_is_truncated() -> anyhow::Result<()> {
        //        Given
        let tree: LabeledTree = "(4 (4 great) (4 (4 great) (4 great)))".parse()?;
        let mut config = DatasetConfig::new(Split::Test, true, false);
        config.max_len = 4;

        //        When
        let legacy = SstDataset::from_trees(&[tree.clone()], &WordLengthEncoder, &config)?;
        config.boundary = TruncationBoundary::Exact;
        let exact = SstDataset::from_trees(&[tree], &WordLengthEncoder, &config)?;

        //        Then
        assert_eq!(legacy.get(0).unwrap(), (&[100, 5, 5, 0][..], 4));
        assert_eq!(exact.get(0).unwrap(), (&[100, 5, 5, 5][..], 4));
        Ok(())
    }

    #[test]
    fn test_dataset_from_treebank_split() -> anyhow::Result<()> {
        let treebank = Treebank::new(vec![], trees(), vec![]);
        let config = DatasetConfig::new(Split::Dev, false, false);

        let dataset = SstDataset::new(&treebank, &WordLengthEncoder, &config)?;

        assert_eq!(dataset.len(), 9);
        assert_eq!(dataset.split(), Split::Dev);
        assert_eq!(dataset.policy(), ExtractionPolicy::AllFine);
        Ok(())
    }
}
