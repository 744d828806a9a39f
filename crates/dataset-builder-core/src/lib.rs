//! Core functionality for building image datasets.
//!
//! This library provides the components for assembling a training set:
//! - Image search and download
//! - Image validation
//! - Perceptual fingerprints and a reference index
//! - Duplicate classification with safe moves into the collection

use log::info;
use std::fs;

use crate::download::{next_image_counter, retrieve_image};
use crate::loader::is_valid_image;
use crate::search::SearchClient;

// -- Internal Modules --
mod error;

// -- Public Re-exports --
pub use config::*;
pub use error::{Error, Result};
pub use fingerprint::Fingerprint;
pub use index::ReferenceIndex;
pub use types::*;

// -- Public Modules --
pub mod config;
pub mod deduplication;
pub mod discovery;
pub mod download;
pub mod fingerprint;
pub mod index;
pub mod loader;
pub mod logging;
pub mod safety;
pub mod search;
pub mod types;

/// Main entry point for building a dataset
pub struct DatasetBuilder {
    config: Config,
}

impl DatasetBuilder {
    /// Create a new DatasetBuilder with the provided configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Index the reference collection, then classify the incoming directory
    /// against it. The index is rebuilt from disk on every call.
    pub fn deduplicate(&self) -> Result<DedupSummary> {
        let mut index = ReferenceIndex::new();

        info!(
            "Indexing reference images in {}",
            self.config.reference_dir.display()
        );
        index::make_reference_hashes(&self.config.reference_dir, &mut index)?;

        info!(
            "Checking incoming images in {}",
            self.config.incoming_dir.display()
        );
        deduplication::mark_duplicates(
            &self.config.incoming_dir,
            &self.config.reference_dir,
            &mut index,
        )
    }

    /// Search for `query` and download every valid result into the
    /// incoming directory, numbered after any images already there.
    /// Returns the number of images kept.
    pub fn get_images(&self, query: &str, subscription_key: &str) -> Result<usize> {
        let output_dir = &self.config.incoming_dir;
        fs::create_dir_all(output_dir)?;

        let client = SearchClient::new(subscription_key, &self.config.search)?;
        let first_page = client.search(query, 0)?;
        let total = client.estimated_total(&first_page);
        info!("{} total results for '{}'", total, query);

        let first_counter = next_image_counter(output_dir)?;
        let mut img_counter = first_counter;
        for offset in client.page_offsets(total) {
            let end_of_page = offset + self.config.search.page_size;
            info!(
                "request for group {}-{} of {}...",
                offset, end_of_page, total
            );
            let page = if offset == 0 {
                first_page.clone()
            } else {
                client.search(query, offset)?
            };

            for result in &page.value {
                info!("fetching: {}", result.content_url);
                let Some(path) =
                    retrieve_image(client.http(), &result.content_url, img_counter, output_dir)
                else {
                    continue;
                };
                if is_valid_image(&path) {
                    img_counter += 1;
                }
            }
        }

        let kept = img_counter - first_counter;
        info!("Kept {} images for '{}'", kept, query);
        Ok(kept)
    }
}
