//! Fixed registry of operations and the catalog derived from it.
//!
//! The table is a `static` slice built at compile time; nothing registers
//! operations at runtime. Lookup is an exact, case-sensitive match on the
//! (category label, operation name) pair. The [`Catalog`] is generated from
//! the same table, so every catalog entry is registered and every registered
//! operation appears in the catalog.

use serde::Serialize;

use crate::ops::{
    ContrastStretch, Gamma, GaussianFilter, Log, MeanFilter, MedianFilter, Negative, Operation,
    SobelFilter, Threshold,
};

/// All operations, in catalog order.
static REGISTRY: &[&dyn Operation] = &[
    &Negative,
    &Gamma,
    &Log,
    &Threshold,
    &MeanFilter,
    &MedianFilter,
    &GaussianFilter,
    &SobelFilter,
    &ContrastStretch,
];

/// Every registered operation, in catalog order.
pub fn operations() -> impl Iterator<Item = &'static dyn Operation> {
    REGISTRY.iter().copied()
}

/// Resolve a (category, operation) selection.
pub fn lookup(category: &str, operation: &str) -> Option<&'static dyn Operation> {
    operations().find(|op| op.category().label() == category && op.name() == operation)
}

/// One category and its operation names, for building a selection UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub category: &'static str,
    pub operations: Vec<&'static str>,
}

/// Ordered category → operations listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    pub entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Operation names listed under `category`, if it exists.
    pub fn operations_in(&self, category: &str) -> Option<&[&'static str]> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.operations.as_slice())
    }

    pub fn categories(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.category)
    }
}

/// Build the selection catalog from the registry, preserving table order.
pub fn catalog() -> Catalog {
    let mut entries: Vec<CatalogEntry> = Vec::new();
    for op in operations() {
        let label = op.category().label();
        match entries.iter_mut().find(|e| e.category == label) {
            Some(entry) => entry.operations.push(op.name()),
            None => entries.push(CatalogEntry {
                category: label,
                operations: vec![op.name()],
            }),
        }
    }
    Catalog { entries }
}
