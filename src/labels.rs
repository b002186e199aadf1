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

//! # Sentiment labels
//! The treebank annotates every node with a fine-grained label from 0 (very negative) to
//! 4 (very positive), 2 being neutral. Binary classification drops the neutral class and
//! merges the two negative and the two positive classes.

use crate::error::SstError;

/// Neutral fine-grained label, excluded from binary datasets
pub const NEUTRAL_LABEL: u8 = 2;

/// Largest fine-grained label value
pub const MAX_FINE_LABEL: u8 = 4;

/// Checks that a raw label read from the treebank is a valid fine-grained label.
///
/// # Parameters
/// - label (`i64`): raw label value
///
/// # Returns
/// - `Result<u8, SstError>` with the label as a fine-grained label
pub fn fine_label(label: i64) -> Result<u8, SstError> {
    if (0..=MAX_FINE_LABEL as i64).contains(&label) {
        Ok(label as u8)
    } else {
        Err(SstError::InvalidLabel(label))
    }
}

/// Converts a fine-grained label to a binary label (0: negative, 1: positive).
///
/// Neutral labels have no binary counterpart: callers must filter them out beforehand and
/// an `SstError::NeutralLabel` is returned if one slips through.
///
/// # Parameters
/// - label (`u8`): fine-grained label in `0..=4`
///
/// # Returns
/// - `Result<u8, SstError>` with the binary label
pub fn binary_label(label: u8) -> Result<u8, SstError> {
    match label {
        0 | 1 => Ok(0),
        2 => Err(SstError::NeutralLabel),
        3 | 4 => Ok(1),
        _ => Err(SstError::InvalidLabel(label as i64)),
    }
}
