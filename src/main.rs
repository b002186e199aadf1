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

use sst_loaders::{load_sst_from_config, Config, LoaderConfig, SstError};
use std::env;

fn main() -> Result<(), SstError> {
    //    An optional `sst_config` environment variable points to a JSON loader configuration
    let config = match env::var("sst_config") {
        Ok(path) => LoaderConfig::from_file(path)?,
        Err(_) => LoaderConfig::default(),
    };

    let (mut train, dev, test) = load_sst_from_config(&config)?;
    println!(
        "train: {} records, dev: {} records, test: {} records",
        train.dataset().len(),
        dev.dataset().len(),
        test.dataset().len()
    );

    if let Some(batch) = train.iter().next() {
        println!("first train batch shape: {:?}", batch.shape());
        println!("first train labels: {:?}", batch.labels);
    }
    Ok(())
}
