//! Account domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tesoria_shared::types::{AccountId, OrganizationId};

/// High-level account type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Resources owned (cash, receivables, inventory).
    Asset,
    /// Obligations owed (payables, loans).
    Liability,
    /// Owner's residual interest.
    Equity,
    /// Income earned.
    Revenue,
    /// Costs incurred.
    Expense,
}

impl AccountType {
    /// Parses an account type from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "asset" => Some(Self::Asset),
            "liability" => Some(Self::Liability),
            "equity" => Some(Self::Equity),
            "revenue" => Some(Self::Revenue),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }

    /// Returns the string representation of the type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Revenue => "revenue",
            Self::Expense => "expense",
        }
    }

    /// Returns true for debit-normal accounts (Asset, Expense).
    ///
    /// Debit-normal accounts grow with debits; credit-normal accounts
    /// (Liability, Equity, Revenue) grow with credits.
    #[must_use]
    pub fn is_debit_normal(&self) -> bool {
        matches!(self, Self::Asset | Self::Expense)
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A node in the chart of accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Organization this account belongs to. Always equals the parent's.
    pub organization_id: OrganizationId,
    /// Dotted hierarchical code (e.g. `1.1.1.5`). Unique per organization.
    pub code: String,
    /// Display name (e.g. "Caixa").
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Owning parent account, if any.
    pub parent_id: Option<AccountId>,
    /// Balance seed used until a system opening entry exists.
    pub opening_amount: Decimal,
}
