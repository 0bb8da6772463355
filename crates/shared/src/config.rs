//! Ledger configuration.

use serde::Deserialize;

use crate::types::Currency;

/// Configuration applied by the posting engine.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Currency assigned to entries that do not specify one.
    #[serde(default)]
    pub default_currency: Currency,
    /// Decimal places monetary amounts are rounded to before posting.
    #[serde(default = "default_monetary_scale")]
    pub monetary_scale: u32,
}

fn default_monetary_scale() -> u32 {
    2
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            default_currency: Currency::default(),
            monetary_scale: default_monetary_scale(),
        }
    }
}
