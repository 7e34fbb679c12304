use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{DatasetKind, YearlyDataset};

/// Year label → dataset, one map per dataset kind
///
/// Built once by the pipeline and then handed to readers (typically behind an
/// `Arc`). Entries are only ever replaced whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatasetStore {
    sales: BTreeMap<String, YearlyDataset>,
    production: BTreeMap<String, YearlyDataset>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `dataset` for `year`, replacing any previous entry
    pub fn insert(&mut self, kind: DatasetKind, year: impl Into<String>, dataset: YearlyDataset) {
        self.map_mut(kind).insert(year.into(), dataset);
    }

    /// All years loaded for `kind`, in year order
    pub fn get_dataset(&self, kind: DatasetKind) -> &BTreeMap<String, YearlyDataset> {
        match kind {
            DatasetKind::Sales => &self.sales,
            DatasetKind::Production => &self.production,
        }
    }

    pub fn get(&self, kind: DatasetKind, year: &str) -> Option<&YearlyDataset> {
        self.get_dataset(kind).get(year)
    }

    pub fn years(&self, kind: DatasetKind) -> Vec<&str> {
        self.get_dataset(kind).keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.sales.len() + self.production.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn map_mut(&mut self, kind: DatasetKind) -> &mut BTreeMap<String, YearlyDataset> {
        match kind {
            DatasetKind::Sales => &mut self.sales,
            DatasetKind::Production => &mut self.production,
        }
    }
}
