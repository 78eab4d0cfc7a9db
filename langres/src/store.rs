//! JSON-file-backed resource store.
//!
//! The store owns an explicit in-memory cache with a `load`/`invalidate`
//! lifecycle: reads hit the cache, writes persist the whole list and refresh
//! it. The persisted representation is one pretty-printed JSON array of
//! resources.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::debug;

use crate::error::Error;
use crate::types::{
    Category, Locale, Product, ProductVariant, Resource, ResourceMetadata, ResourceStatus,
};

/// Fields accepted by [`ResourceStore::insert`]. The store assigns the id,
/// timestamps, and the default status.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewResource {
    pub key: String,
    pub products: Vec<Product>,
    pub common: bool,
    pub section1: Option<String>,
    pub section2: Option<String>,
    pub artboard: Option<String>,
    pub component: Option<String>,
    pub translations: BTreeMap<Locale, String>,
    pub product_specific: BTreeMap<ProductVariant, BTreeMap<Locale, String>>,
    pub status: Option<ResourceStatus>,
    pub author: String,
}

/// Partial update for [`ResourceStore::update`]. Absent fields are left
/// untouched; provided translations are merged per locale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResourcePatch {
    pub section1: Option<String>,
    pub section2: Option<String>,
    pub artboard: Option<String>,
    pub component: Option<String>,
    pub translations: BTreeMap<Locale, String>,
    pub product_specific: Option<BTreeMap<ProductVariant, BTreeMap<Locale, String>>>,
    pub status: Option<ResourceStatus>,
    pub author: Option<String>,
}

pub struct ResourceStore {
    path: PathBuf,
    cache: Option<Vec<Resource>>,
}

impl ResourceStore {
    /// Opens a store over a resource file. Nothing is read until
    /// [`load`](Self::load) is called.
    pub fn open(path: impl AsRef<Path>) -> Self {
        ResourceStore {
            path: path.as_ref().to_path_buf(),
            cache: None,
        }
    }

    /// Returns the resource list, reading the backing file on the first call
    /// and serving the cache afterwards.
    pub fn load(&mut self) -> Result<&[Resource], Error> {
        if self.cache.is_none() {
            let resources = read_resources(&self.path)?;
            debug!(
                count = resources.len(),
                path = %self.path.display(),
                "loaded resource file"
            );
            self.cache = Some(resources);
        }
        Ok(self.cache.get_or_insert_with(Vec::new).as_slice())
    }

    /// Drops the cache; the next [`load`](Self::load) re-reads the file.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// Looks up a resource by id.
    pub fn get(&mut self, id: &str) -> Result<Option<Resource>, Error> {
        Ok(self.load()?.iter().find(|r| r.id == id).cloned())
    }

    /// Validates and inserts a new resource: assigns the next numeric id,
    /// stamps both dates, and defaults the status to `draft`.
    pub fn insert(&mut self, new: NewResource) -> Result<Resource, Error> {
        validate_new(&new)?;

        let mut resources = self.load()?.to_vec();
        let key = new.key.trim().to_string();
        if resources.iter().any(|r| r.key == key) {
            return Err(Error::DuplicateKey(key));
        }

        let today = today();
        let resource = Resource {
            id: next_id(&resources),
            key,
            products: new.products,
            category: Category {
                common: new.common,
                section1: trimmed(new.section1),
                section2: trimmed(new.section2),
                artboard: trimmed(new.artboard),
                component: trimmed(new.component),
            },
            translations: trim_translations(new.translations),
            product_specific: new
                .product_specific
                .into_iter()
                .map(|(variant, texts)| (variant, trim_translations(texts)))
                .filter(|(_, texts)| !texts.is_empty())
                .collect(),
            status: new.status.unwrap_or(ResourceStatus::Draft),
            metadata: ResourceMetadata {
                created_at: today.clone(),
                updated_at: today,
                author: new.author.trim().to_string(),
            },
        };

        resources.push(resource.clone());
        self.persist(resources)?;
        Ok(resource)
    }

    /// Merges the provided fields into an existing resource and bumps
    /// `updatedAt`.
    pub fn update(&mut self, id: &str, patch: ResourcePatch) -> Result<Resource, Error> {
        let mut resources = self.load()?.to_vec();
        let index = resources
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| Error::not_found(id))?;

        {
            let resource = &mut resources[index];
            if let Some(value) = patch.section1 {
                resource.category.section1 = trimmed(Some(value));
            }
            if let Some(value) = patch.section2 {
                resource.category.section2 = trimmed(Some(value));
            }
            if let Some(value) = patch.artboard {
                resource.category.artboard = trimmed(Some(value));
            }
            if let Some(value) = patch.component {
                resource.category.component = trimmed(Some(value));
            }
            for (locale, text) in patch.translations {
                resource.translations.insert(locale, text);
            }
            if let Some(product_specific) = patch.product_specific {
                resource.product_specific = product_specific;
            }
            if let Some(status) = patch.status {
                resource.status = status;
            }
            if let Some(author) = patch.author {
                resource.metadata.author = author.trim().to_string();
            }
            resource.metadata.updated_at = today();
        }

        let updated = resources[index].clone();
        self.persist(resources)?;
        Ok(updated)
    }

    /// Removes a resource by id.
    pub fn delete(&mut self, id: &str) -> Result<(), Error> {
        let mut resources = self.load()?.to_vec();
        let before = resources.len();
        resources.retain(|r| r.id != id);
        if resources.len() == before {
            return Err(Error::not_found(id));
        }
        self.persist(resources)
    }

    fn persist(&mut self, resources: Vec<Resource>) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(Error::Io)?;
            }
        }
        let file = std::fs::File::create(&self.path).map_err(Error::Io)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &resources).map_err(Error::Parse)?;
        debug!(
            count = resources.len(),
            path = %self.path.display(),
            "persisted resource file"
        );
        self.cache = Some(resources);
        Ok(())
    }
}

fn read_resources(path: &Path) -> Result<Vec<Resource>, Error> {
    let file = std::fs::File::open(path).map_err(Error::Io)?;
    let reader = std::io::BufReader::new(file);
    serde_json::from_reader(reader).map_err(Error::Parse)
}

fn validate_new(new: &NewResource) -> Result<(), Error> {
    if new.key.trim().is_empty() {
        return Err(Error::validation("key is required"));
    }
    if new
        .translations
        .get(&Locale::KoKr)
        .is_none_or(|text| text.trim().is_empty())
    {
        return Err(Error::validation("Korean (ko-KR) text is required"));
    }
    if new.author.trim().is_empty() {
        return Err(Error::validation("author is required"));
    }
    if new.products.is_empty() && !new.common {
        return Err(Error::validation(
            "at least one product (knox, brity) or the common flag is required",
        ));
    }
    Ok(())
}

fn next_id(resources: &[Resource]) -> String {
    let max = resources
        .iter()
        .filter_map(|r| r.id.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    (max + 1).to_string()
}

fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn trim_translations(translations: BTreeMap<Locale, String>) -> BTreeMap<Locale, String> {
    translations
        .into_iter()
        .map(|(locale, text)| (locale, text.trim().to_string()))
        .filter(|(_, text)| !text.is_empty())
        .collect()
}
