use std::fmt;

use serde::{Deserialize, Serialize};

/// The two measured quantities a vehicle is taxed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxDimension {
    Power,
    Weight,
}

impl TaxDimension {
    pub fn all() -> &'static [TaxDimension] {
        &[TaxDimension::Power, TaxDimension::Weight]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Power => "power",
            Self::Weight => "weight",
        }
    }

    /// Unit of the raw input value.
    pub fn unit(&self) -> &'static str {
        match self {
            Self::Power => "kW",
            Self::Weight => "kg",
        }
    }
}

impl fmt::Display for TaxDimension {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
