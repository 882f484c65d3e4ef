use serde::{Deserialize, Serialize};

/// One line of the audit trail shown next to a computed tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationStep {
    pub label: String,
    /// Formatted arithmetic, or empty for the closing summary line.
    pub detail: String,
}

impl CalculationStep {
    pub fn new(
        label: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            detail: detail.into(),
        }
    }

    /// A line that carries only a label.
    pub fn summary(label: impl Into<String>) -> Self {
        Self::new(label, String::new())
    }

    pub fn is_summary(&self) -> bool {
        self.detail.is_empty()
    }
}
