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

//! # Record extraction
//! Selects the labeled texts used as training examples from the treebank parse trees.

use crate::error::SstError;
use crate::labels::{binary_label, NEUTRAL_LABEL};
use crate::treebank::LabeledTree;

/// # Extraction policy variants
/// Which nodes of each tree become examples and how their labels are encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionPolicy {
    /// Full sentences, binary labels. Sentences with a neutral label are skipped.
    RootBinary,
    /// Full sentences, fine-grained labels
    RootFine,
    /// Every phrase of every tree, fine-grained labels
    AllFine,
    /// Every phrase of every tree, binary labels. Neutral phrases are skipped.
    AllBinary,
}

impl ExtractionPolicy {
    /// Builds the policy from the `root` (only use the root node of each tree) and `binary`
    /// (collapse labels to negative/positive) flags
    pub fn new(root: bool, binary: bool) -> Self {
        match (root, binary) {
            (true, true) => ExtractionPolicy::RootBinary,
            (true, false) => ExtractionPolicy::RootFine,
            (false, false) => ExtractionPolicy::AllFine,
            (false, true) => ExtractionPolicy::AllBinary,
        }
    }

    pub fn root(&self) -> bool {
        matches!(
            self,
            ExtractionPolicy::RootBinary | ExtractionPolicy::RootFine
        )
    }

    pub fn binary(&self) -> bool {
        matches!(
            self,
            ExtractionPolicy::RootBinary | ExtractionPolicy::AllBinary
        )
    }

    /// Number of classes of the labels produced under this policy
    pub fn num_classes(&self) -> usize {
        if self.binary() {
            2
        } else {
            5
        }
    }
}

fn encode_label(label: u8, binary: bool) -> Result<i64, SstError> {
    if binary {
        Ok(binary_label(label)? as i64)
    } else {
        Ok(label as i64)
    }
}

/// Extracts the (text, label) examples of a sequence of trees.
///
/// # Parameters
/// - trees (`&[LabeledTree]`): parse trees, read only
/// - policy (`ExtractionPolicy`): nodes to extract and label encoding
///
/// # Returns
/// - `Result<Vec<(String, i64)>, SstError>` with the examples in tree order (and in pre-order
/// within a tree when all phrases are extracted)
pub fn extract(
    trees: &[LabeledTree],
    policy: ExtractionPolicy,
) -> Result<Vec<(String, i64)>, SstError> {
    let binary = policy.binary();
    let candidates: Vec<(u8, String)> = match policy {
        ExtractionPolicy::RootBinary | ExtractionPolicy::RootFine => trees
            .iter()
            .filter(|tree| !(binary && tree.label() == NEUTRAL_LABEL))
            .map(|tree| (tree.label(), tree.to_line()))
            .collect(),
        ExtractionPolicy::AllFine | ExtractionPolicy::AllBinary => trees
            .iter()
            .flat_map(|tree| tree.to_labeled_lines())
            .filter(|(label, _)| !(binary && *label == NEUTRAL_LABEL))
            .collect(),
    };
    candidates
        .into_iter()
        .map(|(label, text)| encode_label(label, binary).map(|label| (text, label)))
        .collect()
}
