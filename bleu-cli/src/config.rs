use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
#[doc(inline)]
pub use bleu::util::BleuConfig;
use log::warn;

/// Reads the config file if one is provided, falls back to the default configuration otherwise
pub fn load_config(config_file: Option<&Path>) -> Result<BleuConfig> {
    match config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            Ok(BleuConfig::default())
        }
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("could not open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).context("incorrect config file format")
        }
    }
}
