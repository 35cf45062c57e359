//! Park data and catalog loading.
//!
//! A [`ParkCatalog`] is the host-side source of truth: parks with photos
//! plus photo-less decoys that pad the wrong-answer pool. It converts into
//! the core [`Catalog`] that sessions actually play over. Deployments can
//! ship the built-in list or load their own from JSON.

use park_guesser_core::{Catalog, CatalogError, Entry};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One park as stored in catalog data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkRecord {
    pub id: u64,
    pub name: String,
    /// US state the park sits in, for browse screens.
    pub state: String,
    /// Object-store key of the park's photo. Absent for decoys.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_key: Option<String>,
}

impl ParkRecord {
    fn to_entry(&self) -> Entry {
        Entry {
            id: self.id,
            name: self.name.clone(),
            has_image: self.image_key.is_some(),
            image_ref: self.image_key.clone(),
        }
    }
}

/// The parks a deployment plays over.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkCatalog {
    /// Parks with photos; these host rounds.
    pub parks: Vec<ParkRecord>,
    /// Photo-less parks that only pad the wrong-answer pool.
    pub decoys: Vec<ParkRecord>,
}

impl ParkCatalog {
    /// The built-in catalog: six photographed parks and six decoys.
    pub fn builtin() -> Self {
        let park = |id: u64, name: &str, state: &str, image_key: &str| ParkRecord {
            id,
            name: name.to_string(),
            state: state.to_string(),
            image_key: Some(image_key.to_string()),
        };
        let decoy = |id: u64, name: &str, state: &str| ParkRecord {
            id,
            name: name.to_string(),
            state: state.to_string(),
            image_key: None,
        };

        Self {
            parks: vec![
                park(1, "Arches National Park", "Utah", "arches.jpg"),
                park(2, "Canyonlands National Park", "Utah", "canyonlands.jpg"),
                park(3, "Denali National Park", "Alaska", "denali.jpg"),
                park(4, "Glacier National Park", "Montana", "glacier.jpg"),
                park(5, "Rocky Mountain National Park", "Colorado", "rocky-mountain.jpg"),
                park(6, "Yosemite National Park", "California", "yosemite.jpg"),
            ],
            decoys: vec![
                decoy(7, "Yellowstone National Park", "Wyoming"),
                decoy(8, "Zion National Park", "Utah"),
                decoy(9, "Grand Canyon National Park", "Arizona"),
                decoy(10, "Olympic National Park", "Washington"),
                decoy(11, "Everglades National Park", "Florida"),
                decoy(12, "Badlands National Park", "South Dakota"),
            ],
        }
    }

    /// Parse a catalog from JSON.
    pub fn from_json(json: &str) -> Result<Self, CatalogLoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a catalog from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Convert into the catalog the core plays over.
    ///
    /// Every park must carry an image key; decoys never do. Id collisions
    /// within a list and empty names are rejected by the core.
    pub fn to_catalog(&self) -> Result<Catalog, CatalogLoadError> {
        if let Some(park) = self.parks.iter().find(|p| p.image_key.is_none()) {
            return Err(CatalogLoadError::MissingImage(park.id));
        }

        let answerable = self.parks.iter().map(ParkRecord::to_entry).collect();
        let distractors = self.decoys.iter().map(ParkRecord::to_entry).collect();
        Ok(Catalog::new(answerable, distractors)?)
    }

    /// Look up a record by id, parks before decoys.
    pub fn find(&self, id: u64) -> Option<&ParkRecord> {
        self.parks
            .iter()
            .chain(self.decoys.iter())
            .find(|p| p.id == id)
    }
}

/// Errors raised while loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Park {0} has no image key")]
    MissingImage(u64),
    #[error("Invalid catalog: {0}")]
    Invalid(#[from] CatalogError),
}
