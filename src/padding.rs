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

use serde::{Deserialize, Serialize};

/// Nominal width of the padding function
pub const DEFAULT_PAD_WIDTH: usize = 70;

/// Width of the encoded SST sentences
pub const SST_MAX_LEN: usize = 66;

/// Padding id written in the free slots of a sequence
pub const PAD_ID: i64 = 0;

/// # Truncation boundary variants
/// Indicates how many ids of a sequence longer than the target width are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TruncationBoundary {
    /// Keep the first `n - 1` ids and leave the last slot to padding. This is the historical
    /// boundary of the SST loaders and the default, so that encodings stay comparable.
    Legacy,
    /// Keep the first `n` ids
    Exact,
}

impl Default for TruncationBoundary {
    fn default() -> Self {
        TruncationBoundary::Legacy
    }
}

impl TruncationBoundary {
    fn kept_length(&self, n: usize) -> usize {
        match self {
            TruncationBoundary::Legacy => n.saturating_sub(1),
            TruncationBoundary::Exact => n,
        }
    }
}

/// Right pads (or truncates) a sequence of token ids to exactly `n` elements.
///
/// # Parameters
/// - token_ids (`Vec<i64>`): ids to normalize
/// - n (`usize`): target width
/// - boundary (`TruncationBoundary`): number of ids kept when `token_ids` is longer than `n`
///
/// # Returns
/// - `Vec<i64>` of length `n`
///
/// # Example
///
/// ```
/// use sst_loaders::padding::{rpad, TruncationBoundary};
///
/// assert_eq!(rpad(vec![1, 2, 3], 5, TruncationBoundary::Legacy), vec![1, 2, 3, 0, 0]);
/// assert_eq!(rpad(vec![1, 2, 3, 4, 5, 6], 5, TruncationBoundary::Legacy), vec![1, 2, 3, 4, 0]);
/// assert_eq!(rpad(vec![1, 2, 3, 4, 5, 6], 5, TruncationBoundary::Exact), vec![1, 2, 3, 4, 5]);
/// ```
pub fn rpad(mut token_ids: Vec<i64>, n: usize, boundary: TruncationBoundary) -> Vec<i64> {
    if token_ids.len() > n {
        token_ids.truncate(boundary.kept_length(n));
    }
    token_ids.resize(n, PAD_ID);
    token_ids
}
