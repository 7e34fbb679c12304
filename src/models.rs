use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// Canonical month labels, January first, as printed in the source workbooks
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

/// Which sheet of the yearly workbook a dataset is extracted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    /// New vehicle registrations ("I. Emplacamento")
    Sales,
    /// Manufactured units ("VI. Produção")
    Production,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 2] = [DatasetKind::Sales, DatasetKind::Production];

    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetKind::Sales => "sales",
            DatasetKind::Production => "production",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DatasetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sales" | "vendas" => Ok(DatasetKind::Sales),
            "production" | "produção" | "producao" => Ok(DatasetKind::Production),
            other => Err(format!("unknown dataset kind: {other}")),
        }
    }
}

/// Twelve monthly values, index 0 = January.
///
/// Values are never negative and never NaN; constructors clamp anything else to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthlySeries([f64; 12]);

impl MonthlySeries {
    pub fn zeros() -> Self {
        Self([0.0; 12])
    }

    pub fn new(values: [f64; 12]) -> Self {
        Self(values.map(|v| if v.is_finite() && v > 0.0 { v } else { 0.0 }))
    }

    pub fn values(&self) -> &[f64; 12] {
        &self.0
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    pub fn max(&self) -> f64 {
        self.0.iter().copied().fold(0.0, f64::max)
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|v| *v == 0.0)
    }

    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(self.0.map(f))
    }

    /// Adds `value` to the given month (0-based)
    pub(crate) fn add(&mut self, month: usize, value: f64) {
        if value.is_finite() && value > 0.0 {
            self.0[month] += value;
        }
    }
}

impl Index<usize> for MonthlySeries {
    type Output = f64;

    fn index(&self, month: usize) -> &f64 {
        &self.0[month]
    }
}

impl From<[f64; 12]> for MonthlySeries {
    fn from(values: [f64; 12]) -> Self {
        Self::new(values)
    }
}

/// Normalized monthly light/heavy series for one year of one dataset kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyDataset {
    pub months: Vec<String>,
    pub light: MonthlySeries,
    pub heavy: MonthlySeries,
}

impl YearlyDataset {
    pub fn new(light: MonthlySeries, heavy: MonthlySeries) -> Self {
        Self {
            months: MONTH_LABELS.iter().map(|m| m.to_string()).collect(),
            light,
            heavy,
        }
    }

    /// All-zero dataset stored when extraction fails for a year
    pub fn fallback() -> Self {
        Self::new(MonthlySeries::zeros(), MonthlySeries::zeros())
    }

    pub fn total_light(&self) -> f64 {
        self.light.total()
    }

    pub fn total_heavy(&self) -> f64 {
        self.heavy.total()
    }

    pub fn is_fallback(&self) -> bool {
        self.light.is_zero() && self.heavy.is_zero()
    }
}
