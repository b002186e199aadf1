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

//! Configurable loaders for the Stanford Sentiment Treebank (SST), preparing the corpus for
//! BERT sentence classification.
//!
//! A dataset is configured by:
//! - its split (train, dev, test),
//! - the nodes used as examples (only the root sentence of each tree, or every phrase),
//! - its labels (binary negative/positive, or the 5 fine-grained classes).
//!
//! Every example is wrapped in `[CLS]`/`[SEP]` markers, encoded with a WordPiece tokenizer
//! and padded to a fixed width (66 tokens by default).
//!
//! ```no_run
//! use sst_loaders::{load_sst, BertEncoder, LoaderConfig, Treebank};
//!
//! # fn main() -> Result<(), sst_loaders::SstError> {
//! let encoder = BertEncoder::from_pretrained("bert-large-uncased")?;
//! let treebank = Treebank::download()?;
//! let (mut train, _dev, _test) = load_sst(&treebank, &encoder, &LoaderConfig::default())?;
//! for batch in train.iter() {
//!     assert_eq!(batch.shape().1, 66);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dataset;
pub mod encoder;
pub mod error;
pub mod extraction;
pub mod hub;
pub mod labels;
pub mod loader;
pub mod padding;
pub mod treebank;

pub use config::{Config, DatasetConfig, LoaderConfig};
pub use dataset::{Record, SstDataset};
pub use encoder::{BertEncoder, TextEncoder};
pub use error::SstError;
pub use extraction::{extract, ExtractionPolicy};
pub use labels::binary_label;
pub use loader::{load_sst, load_sst_from_config, Batch, BatchIter, DataLoader};
pub use padding::{rpad, TruncationBoundary};
pub use treebank::{LabeledTree, Split, Treebank};
