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

//! # Batch loaders
//! Iterate over a dataset in fixed-size batches. Batches are collated by a pool of worker
//! threads which prefetches as many batches as there are workers.

use crate::config::LoaderConfig;
use crate::dataset::SstDataset;
use crate::encoder::{BertEncoder, TextEncoder};
use crate::error::SstError;
use crate::treebank::{Split, Treebank};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::collections::VecDeque;
use std::sync::Arc;

/// # Batch of records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// Token ids, `[batch_size, max_len]`
    pub token_ids: Vec<Vec<i64>>,
    /// Labels, `[batch_size]`
    pub labels: Vec<i64>,
}

impl Batch {
    fn collate(dataset: &SstDataset, indices: &[usize]) -> Batch {
        let records = dataset.records();
        let mut token_ids = Vec::with_capacity(indices.len());
        let mut labels = Vec::with_capacity(indices.len());
        for &index in indices {
            token_ids.push(records[index].token_ids.clone());
            labels.push(records[index].label);
        }
        Batch { token_ids, labels }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Shape of the token ids matrix
    pub fn shape(&self) -> (usize, usize) {
        (
            self.token_ids.len(),
            self.token_ids.first().map_or(0, Vec::len),
        )
    }
}

/// # Data loader
/// Serves the records of a dataset in batches, in a new random order for every epoch when
/// shuffling and in dataset order otherwise. The last batch of an epoch may be smaller.
pub struct DataLoader {
    dataset: Arc<SstDataset>,
    pool: Arc<ThreadPool>,
    batch_size: usize,
    num_workers: usize,
    shuffle: bool,
    seed: Option<u64>,
    epoch: u64,
}

impl DataLoader {
    /// Creates a loader and its worker pool
    ///
    /// # Parameters
    /// - dataset (`SstDataset`): records to serve
    /// - batch_size (`usize`): number of records per batch, must be positive
    /// - num_workers (`usize`): number of collation threads (at least one is used)
    /// - shuffle (`bool`): draw a new permutation of the records for every epoch
    pub fn new(
        dataset: SstDataset,
        batch_size: usize,
        num_workers: usize,
        shuffle: bool,
    ) -> Result<DataLoader, SstError> {
        if batch_size == 0 {
            return Err(SstError::Config("batch size must be positive".to_owned()));
        }
        let num_workers = num_workers.max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(num_workers)
            .thread_name(|index| format!("sst-loader-{}", index))
            .build()?;
        log::debug!(
            "Created loader over {} records (batch size {}, {} workers, shuffle: {})",
            dataset.len(),
            batch_size,
            num_workers,
            shuffle
        );
        Ok(DataLoader {
            dataset: Arc::new(dataset),
            pool: Arc::new(pool),
            batch_size,
            num_workers,
            shuffle,
            seed: None,
            epoch: 0,
        })
    }

    /// Makes the shuffling reproducible: epoch `k` uses the permutation seeded with `seed + k`
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn dataset(&self) -> &SstDataset {
        &self.dataset
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    /// Number of batches per epoch
    pub fn len(&self) -> usize {
        (self.dataset.len() + self.batch_size - 1) / self.batch_size
    }

    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    fn epoch_order(&mut self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.dataset.len()).collect();
        if self.shuffle {
            let mut rng = match self.seed {
                Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(self.epoch)),
                None => StdRng::from_entropy(),
            };
            order.shuffle(&mut rng);
        }
        self.epoch += 1;
        order
    }

    /// Starts a new epoch
    pub fn iter(&mut self) -> BatchIter {
        let batches = self
            .epoch_order()
            .chunks(self.batch_size)
            .map(|chunk| chunk.to_vec())
            .collect::<Vec<Vec<usize>>>();
        BatchIter {
            dataset: self.dataset.clone(),
            pool: self.pool.clone(),
            batches: batches.into_iter(),
            prefetched: VecDeque::with_capacity(self.num_workers),
            prefetch: self.num_workers,
        }
    }
}

/// Iterator over the batches of one epoch
pub struct BatchIter {
    dataset: Arc<SstDataset>,
    pool: Arc<ThreadPool>,
    batches: std::vec::IntoIter<Vec<usize>>,
    prefetched: VecDeque<Batch>,
    prefetch: usize,
}

impl Iterator for BatchIter {
    type Item = Batch;

    fn next(&mut self) -> Option<Self::Item> {
        if self.prefetched.is_empty() {
            let pending: Vec<Vec<usize>> = self.batches.by_ref().take(self.prefetch).collect();
            if pending.is_empty() {
                return None;
            }
            let dataset = &self.dataset;
            let collated: Vec<Batch> = self.pool.install(|| {
                pending
                    .par_iter()
                    .map(|indices| Batch::collate(dataset, indices))
                    .collect()
            });
            self.prefetched.extend(collated);
        }
        self.prefetched.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.prefetched.len() + self.batches.len();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BatchIter {}

/// Builds the train, dev and test loaders over full sentences with binary labels. Only the
/// train loader shuffles.
///
/// # Parameters
/// - treebank (`&Treebank`): loaded treebank
/// - encoder (`&E`): text encoder
/// - config (`&LoaderConfig`): batch size, workers, encoding width and shuffling seed
///
/// # Returns
/// - `Result<(DataLoader, DataLoader, DataLoader), SstError>` with the train, dev and test loaders
pub fn load_sst<E: TextEncoder>(
    treebank: &Treebank,
    encoder: &E,
    config: &LoaderConfig,
) -> Result<(DataLoader, DataLoader, DataLoader), SstError> {
    let build = |split: Split| -> Result<DataLoader, SstError> {
        let dataset = SstDataset::new(treebank, encoder, &config.dataset_config(split))?;
        Ok(DataLoader::new(
            dataset,
            config.batch_size,
            config.num_workers,
            split == Split::Train,
        )?
        .with_seed(config.seed))
    };
    Ok((build(Split::Train)?, build(Split::Dev)?, build(Split::Test)?))
}

/// Loads the tokenizer and the treebank named in the configuration (downloading them if
/// needed) and builds the train, dev and test loaders.
pub fn load_sst_from_config(
    config: &LoaderConfig,
) -> Result<(DataLoader, DataLoader, DataLoader), SstError> {
    let encoder = BertEncoder::from_pretrained(&config.tokenizer)?;
    let treebank = match &config.corpus_dir {
        Some(corpus_dir) => Treebank::from_dir(corpus_dir)?,
        None => Treebank::download()?,
    };
    load_sst(&treebank, &encoder, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatasetConfig;
    use crate::treebank::LabeledTree;

    struct CharCountEncoder;

    impl TextEncoder for CharCountEncoder {
        fn encode(&self, text: &str) -> Vec<i64> {
            text.split_whitespace()
                .map(|word| word.chars().count() as i64)
                .collect()
        }
    }

    fn dataset(num_trees: usize) -> SstDataset {
        let trees = (0..num_trees)
            .map(|index| {
                let label = if index % 2 == 0 { 0 } else { 4 };
                LabeledTree::node(
                    label,
                    vec![
                        LabeledTree::leaf(2, &"w".repeat(index + 1)),
                        LabeledTree::leaf(label, "movie"),
                    ],
                )
            })
            .collect::<Vec<LabeledTree>>();
        SstDataset::from_trees(&trees, &CharCountEncoder, &DatasetConfig::default()).unwrap()
    }

    fn sorted_ids(batches: &[Batch]) -> Vec<i64> {
        let mut ids = batches
            .iter()
            .flat_map(|batch| batch.token_ids.iter().map(|token_ids| token_ids[1]))
            .collect::<Vec<i64>>();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn test_batches_in_order() -> anyhow::Result<()> {
        //        Given
        let mut loader = DataLoader::new(dataset(10), 4, 2, false)?;

        //        When
        let batches = loader.iter().collect::<Vec<Batch>>();

        //        Then
        assert_eq!(loader.len(), 3);
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].shape(), (4, 66));
        assert_eq!(batches[2].shape(), (2, 66));
        assert_eq!(batches[0].labels, vec![0, 1, 0, 1]);
        let first_words = batches
            .iter()
            .flat_map(|batch| batch.token_ids.iter().map(|token_ids| token_ids[1]))
            .collect::<Vec<i64>>();
        assert_eq!(first_words, (1..=10).collect::<Vec<i64>>());
        Ok(())
    }

    #[test]
    fn test_shuffled_epochs_visit_every_record() -> anyhow::Result<()> {
        //        Given
        let mut loader = DataLoader::new(dataset(40), 8, 4, true)?.with_seed(Some(7));

        //        When
        let first_epoch = loader.iter().collect::<Vec<Batch>>();
        let second_epoch = loader.iter().collect::<Vec<Batch>>();

        //        Then
        assert_eq!(sorted_ids(&first_epoch), (1..=40).collect::<Vec<i64>>());
        assert_eq!(sorted_ids(&second_epoch), (1..=40).collect::<Vec<i64>>());
        assert_ne!(first_epoch, second_epoch);
        Ok(())
    }

    #[test]
    fn test_seeded_shuffling_is_reproducible() -> anyhow::Result<()> {
        let mut loader_1 = DataLoader::new(dataset(20), 5, 2, true)?.with_seed(Some(3));
        let mut loader_2 = DataLoader::new(dataset(20), 5, 3, true)?.with_seed(Some(3));

        let epoch_1 = loader_1.iter().collect::<Vec<Batch>>();
        let epoch_2 = loader_2.iter().collect::<Vec<Batch>>();

        assert_eq!(epoch_1, epoch_2);
        Ok(())
    }

    #[test]
    fn test_size_hint() -> anyhow::Result<()> {
        let mut loader = DataLoader::new(dataset(9), 2, 4, false)?;
        let mut batches = loader.iter();

        assert_eq!(batches.len(), 5);
        batches.next();
        assert_eq!(batches.len(), 4);
        assert_eq!(batches.count(), 4);
        Ok(())
    }

    #[test]
    fn test_empty_dataset() -> anyhow::Result<()> {
        let mut loader = DataLoader::new(dataset(0), 32, 4, true)?;

        assert!(loader.is_empty());
        assert_eq!(loader.len(), 0);
        assert!(loader.iter().next().is_none());
        Ok(())
    }

    #[test]
    fn test_zero_batch_size() {
        assert!(matches!(
            DataLoader::new(dataset(3), 0, 4, false),
            Err(SstError::Config(_))
        ));
    }
}
