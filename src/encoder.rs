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
use crate::hub::{is_uncased, resolve_vocab};
use rayon::prelude::*;
use rust_tokenizers::tokenizer::{BertTokenizer, Tokenizer};
use std::path::Path;

/// Marker prepended to every sentence
pub const BEGIN_SEQUENCE: &str = "[CLS]";
/// Marker appended to every sentence
pub const END_SEQUENCE: &str = "[SEP]";

/// Wraps a sentence with the sequence markers: `[CLS] {text} [SEP]`
pub fn wrap_sentence(text: &str) -> String {
    format!("{} {} {}", BEGIN_SEQUENCE, text, END_SEQUENCE)
}

/// # Text encoder
/// Maps a text to the ids of its subword tokens. Encoders are `Send` and `Sync` and
/// support multi-threaded encoding of a list of texts.
pub trait TextEncoder: Send + Sync {
    /// Encodes a text, returns the token ids. Markers present in the text (such as `[CLS]`)
    /// are mapped to their own ids; no marker is added.
    fn encode(&self, text: &str) -> Vec<i64>;

    /// Multithreaded encoding of a list of texts, preserving the input order
    fn encode_list<S>(&self, text_list: &[S]) -> Vec<Vec<i64>>
    where
        S: AsRef<str> + Sync,
        Self: Sized,
    {
        text_list
            .par_iter()
            .map(|text| self.encode(text.as_ref()))
            .collect()
    }
}

/// # BERT WordPiece encoder
pub struct BertEncoder {
    tokenizer: BertTokenizer,
}

impl BertEncoder {
    /// Loads the encoder from a WordPiece vocabulary file
    ///
    /// # Parameters
    /// - path (`&Path`): vocabulary file, one token per line
    /// - lower_case (`bool`): lower case the input before tokenization
    ///
    /// # Returns
    /// - `Result<BertEncoder, SstError>`
    pub fn from_file(path: &Path, lower_case: bool) -> Result<BertEncoder, SstError> {
        let path = path.to_str().ok_or_else(|| {
            SstError::FileNotFound(format!("invalid vocabulary path {}", path.display()))
        })?;
        let tokenizer = BertTokenizer::from_file(path, lower_case, lower_case)?;
        Ok(BertEncoder { tokenizer })
    }

    /// Loads the encoder of a pretrained model (e.g. `bert-large-uncased`), downloading its
    /// vocabulary to the local cache if needed
    pub fn from_pretrained(model_name: &str) -> Result<BertEncoder, SstError> {
        log::info!("Loading {} tokenizer", model_name);
        let vocab_path = resolve_vocab(model_name)?;
        BertEncoder::from_file(&vocab_path, is_uncased(model_name))
    }

    pub fn from_existing_tokenizer(tokenizer: BertTokenizer) -> BertEncoder {
        BertEncoder { tokenizer }
    }
}

impl TextEncoder for BertEncoder {
    fn encode(&self, text: &str) -> Vec<i64> {
        let tokens = self.tokenizer.tokenize(text);
        self.tokenizer.convert_tokens_to_ids(&tokens)
    }
}
