//! Catalog lookup and drag-transfer payloads.
//!
//! The engine does not own the furniture catalog. A host supplies a
//! [`Catalog`] when it has one; otherwise the drop payload must carry the
//! item's name and size itself. Payload fields win over catalog fields so a
//! sidebar can send a customized size.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use std::collections::HashMap;

use serde::Deserialize;

/// Error parsing or resolving a drag-transfer payload.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("malformed transfer payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("catalog has no item {0:?} and the payload does not describe it")]
    UnknownItem(String),
    #[error("item {id:?} has invalid size {width} x {height}")]
    InvalidSize { id: String, width: f64, height: f64 },
}

/// What the catalog knows about one item.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub name: String,
    /// Width in real-world units.
    pub width: f64,
    /// Depth in real-world units.
    pub depth: f64,
    pub image: Option<String>,
}

/// Read-only catalog lookup by item id.
pub trait Catalog {
    fn lookup(&self, id: &str) -> Option<CatalogEntry>;
}

/// A catalog held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    entries: HashMap<String, CatalogEntry>,
}

impl StaticCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, id: impl Into<String>, entry: CatalogEntry) {
        self.entries.insert(id.into(), entry);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Catalog for StaticCatalog {
    fn lookup(&self, id: &str) -> Option<CatalogEntry> {
        self.entries.get(id).cloned()
    }
}

impl<K: Into<String>> FromIterator<(K, CatalogEntry)> for StaticCatalog {
    fn from_iter<I: IntoIterator<Item = (K, CatalogEntry)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect() }
    }
}

/// JSON the sidebar attaches to a drag: `{id, name, category, width, depth, image}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransferPayload {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub depth: Option<f64>,
    #[serde(default)]
    pub image: Option<String>,
}

/// A payload with every field needed to create an item.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTransfer {
    /// Catalog key; becomes the item's `type`.
    pub kind: String,
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub image: Option<String>,
}

impl TransferPayload {
    /// Parse the raw transfer string.
    ///
    /// # Errors
    ///
    /// Returns `Malformed` when the text is not a JSON object with a string `id`.
    pub fn parse(raw: &str) -> Result<Self, TransferError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Fill absent fields from `catalog` and validate the size.
    ///
    /// A missing name falls back to the catalog, then to the id.
    ///
    /// # Errors
    ///
    /// Returns `UnknownItem` when the size is absent from both the payload and
    /// the catalog, and `InvalidSize` when it is not positive and finite.
    pub fn resolve(self, catalog: Option<&dyn Catalog>) -> Result<ResolvedTransfer, TransferError> {
        let entry = catalog.and_then(|c| c.lookup(&self.id));
        let (width, depth) = match (self.width, self.depth, entry.as_ref()) {
            (Some(w), Some(d), _) => (w, d),
            (w, d, Some(e)) => (w.unwrap_or(e.width), d.unwrap_or(e.depth)),
            _ => return Err(TransferError::UnknownItem(self.id)),
        };
        if !(width.is_finite() && width > 0.0 && depth.is_finite() && depth > 0.0) {
            return Err(TransferError::InvalidSize { id: self.id, width, height: depth });
        }
        let name = self
            .name
            .or_else(|| entry.as_ref().map(|e| e.name.clone()))
            .unwrap_or_else(|| self.id.clone());
        let image = self.image.or_else(|| entry.and_then(|e| e.image));
        Ok(ResolvedTransfer { kind: self.id, name, width, height: depth, image })
    }
}
