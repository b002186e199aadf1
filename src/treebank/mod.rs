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

//!# Treebank
//!
//! Reader for the Stanford Sentiment Treebank in PTB bracketed format. Every line of a split
//! file holds one binarized parse tree whose nodes are all annotated with a sentiment label:
//!
//! ```text
//! (3 (2 It) (4 (4 (2 's) (4 (3 a) (4 (3 lovely) (2 film)))) (2 .)))
//! ```

mod corpus;
mod tree;

pub use corpus::{read_trees, Split, Treebank};
pub use tree::LabeledTree;
