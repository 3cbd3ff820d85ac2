//! The bundled sample catalogue.
//!
//! Inserted once, when the template table is empty, so a fresh install has something
//! to fill in. Entries go through the same validation as templates created over HTTP.

use crate::store::{Store, StoreError};
use common::error::ValidationError;
use common::model::place_holder::FieldKind;
use common::requests::SaveTemplateRequest;
use log::info;
use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

const CATALOGUE: &str = include_str!("../../../seed/templates.toml");

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("invalid seed catalogue: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("seed template '{title}' rejected: {source}")]
    Invalid {
        title: String,
        source: ValidationError,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Deserialize, Debug)]
struct Catalogue {
    templates: Vec<SeedTemplate>,
}

#[derive(Deserialize, Debug)]
struct SeedTemplate {
    title: String,
    category: String,
    content: String,
    #[serde(default)]
    fields: BTreeMap<String, FieldKind>,
}

impl From<SeedTemplate> for SaveTemplateRequest {
    fn from(seed: SeedTemplate) -> Self {
        SaveTemplateRequest {
            title: seed.title,
            category: seed.category,
            content: seed.content,
            fields: seed.fields,
        }
    }
}

fn catalogue() -> Result<Vec<SaveTemplateRequest>, SeedError> {
    let catalogue: Catalogue = toml::from_str(CATALOGUE)?;
    Ok(catalogue.templates.into_iter().map(Into::into).collect())
}

/// Inserts the sample templates if there are none yet. Returns how many were added.
pub fn seed_if_empty(store: &Store) -> Result<usize, SeedError> {
    if store.count_templates()? > 0 {
        return Ok(0);
    }

    let mut inserted = 0;
    for request in catalogue()? {
        let draft = request.validate().map_err(|source| SeedError::Invalid {
            title: request.title.clone(),
            source,
        })?;
        store.create_template(&draft)?;
        inserted += 1;
    }
    info!("Seeded {} sample templates", inserted);
    Ok(inserted)
}
