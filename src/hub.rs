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

//! # Download cache
//! Remote resources (pretrained vocabularies and the treebank archive) are downloaded once
//! and kept in a local cache, by default `~/.cache/.sst_loaders`. The `SST_LOADERS_CACHE`
//! environment variable overrides the location.

use crate::error::SstError;
use cached_path::{Cache, Options, ProgressBar};
use std::env;
use std::path::{Path, PathBuf};

/// Archive of the treebank splits in PTB bracketed format
pub const TREEBANK_URL: &str = "https://nlp.stanford.edu/sentiment/trainDevTestTrees_PTB.zip";

const HUB_URL: &str = "https://huggingface.co";
const CACHE_ENV_VARIABLE: &str = "SST_LOADERS_CACHE";

/// Returns the directory holding downloaded resources
pub fn cache_dir() -> Result<PathBuf, SstError> {
    if let Ok(value) = env::var(CACHE_ENV_VARIABLE) {
        return Ok(PathBuf::from(value));
    }
    let mut cache_dir = dirs::home_dir().ok_or_else(|| {
        SstError::Download("could not locate the home directory for the cache".to_owned())
    })?;
    cache_dir.push(".cache");
    cache_dir.push(".sst_loaders");
    Ok(cache_dir)
}

fn cache() -> Result<Cache, SstError> {
    Ok(Cache::builder()
        .dir(cache_dir()?)
        .progress_bar(Some(ProgressBar::Light))
        .build()?)
}

/// Remote location of the WordPiece vocabulary of a pretrained model
pub fn vocab_url(model_name: &str) -> String {
    format!("{}/{}/resolve/main/vocab.txt", HUB_URL, model_name)
}

/// Whether the pretrained model expects lower cased input
pub fn is_uncased(model_name: &str) -> bool {
    model_name.ends_with("-uncased")
}

/// Resolves a pretrained model identifier to a local vocabulary file.
///
/// An identifier pointing to an existing file is used as is, any other identifier is
/// looked up on the model hub and cached.
///
/// # Parameters
/// - model_name (`&str`): model identifier (e.g. `bert-large-uncased`) or path to a vocabulary
///
/// # Returns
/// - `Result<PathBuf, SstError>` with the path to the vocabulary file
pub fn resolve_vocab(model_name: &str) -> Result<PathBuf, SstError> {
    let local_path = Path::new(model_name);
    if local_path.is_file() {
        log::debug!("Using local vocabulary {:?}", local_path);
        return Ok(local_path.to_path_buf());
    }
    let url = vocab_url(model_name);
    log::debug!("Resolving vocabulary for {} from {}", model_name, url);
    Ok(cache()?.cached_path(&url)?)
}

/// Downloads and extracts the treebank archive, returning the directory with the split files
pub fn download_treebank() -> Result<PathBuf, SstError> {
    log::debug!("Resolving treebank archive from {}", TREEBANK_URL);
    let extracted = cache()?.cached_path_with_options(TREEBANK_URL, &Options::default().extract())?;
    Ok(extracted.join("trees"))
}
