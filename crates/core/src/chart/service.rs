//! Chart of accounts storage and traversal.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use tesoria_shared::types::{AccountId, OrganizationId};

use super::error::ChartError;
use super::types::{Account, AccountType};

/// Per-organization account hierarchy.
///
/// Accounts form a forest keyed by `parent_id`; codes are unique per
/// organization. All traversal is iterative with an explicit worklist so
/// deep or malformed charts cannot overflow the stack, and cycles are
/// detected during the walk.
#[derive(Debug, Default)]
pub struct ChartOfAccounts {
    accounts: HashMap<AccountId, Account>,
    codes: HashMap<(OrganizationId, String), AccountId>,
    children: HashMap<AccountId, Vec<AccountId>>,
}

impl ChartOfAccounts {
    /// Creates an empty chart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an account.
    ///
    /// # Errors
    ///
    /// * `DuplicateCode` if `(organization, code)` already exists
    /// * `InvalidParent` if the parent is missing or belongs to another
    ///   organization
    pub fn create_account(
        &mut self,
        organization_id: OrganizationId,
        code: impl Into<String>,
        name: impl Into<String>,
        account_type: AccountType,
        parent_id: Option<AccountId>,
        opening_amount: Decimal,
    ) -> Result<Account, ChartError> {
        let code = code.into();
        if self.codes.contains_key(&(organization_id, code.clone())) {
            return Err(ChartError::DuplicateCode {
                organization_id,
                code,
            });
        }

        if let Some(parent_id) = parent_id {
            let parent = self
                .accounts
                .get(&parent_id)
                .ok_or(ChartError::InvalidParent(parent_id))?;
            if parent.organization_id != organization_id {
                return Err(ChartError::InvalidParent(parent_id));
            }
        }

        let account = Account {
            id: AccountId::new(),
            organization_id,
            code: code.clone(),
            name: name.into(),
            account_type,
            parent_id,
            opening_amount,
        };

        self.codes.insert((organization_id, code), account.id);
        if let Some(parent_id) = parent_id {
            self.children.entry(parent_id).or_default().push(account.id);
        }
        self.accounts.insert(account.id, account.clone());

        tracing::debug!(
            account_id = %account.id,
            organization_id = %organization_id,
            code = %account.code,
            "account created"
        );
        Ok(account)
    }

    /// Looks up an account by ID.
    #[must_use]
    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(&id)
    }

    /// Looks up an account by organization-scoped code.
    #[must_use]
    pub fn account_by_code(&self, organization_id: OrganizationId, code: &str) -> Option<&Account> {
        self.codes
            .get(&(organization_id, code.to_string()))
            .and_then(|id| self.accounts.get(id))
    }

    /// Returns all accounts of an organization, ordered by code.
    #[must_use]
    pub fn organization_accounts(&self, organization_id: OrganizationId) -> Vec<&Account> {
        let mut accounts: Vec<&Account> = self
            .accounts
            .values()
            .filter(|a| a.organization_id == organization_id)
            .collect();
        accounts.sort_by(|a, b| a.code.cmp(&b.code));
        accounts
    }

    /// Returns the direct children of an account.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the account does not exist.
    pub fn children(&self, id: AccountId) -> Result<Vec<&Account>, ChartError> {
        if !self.accounts.contains_key(&id) {
            return Err(ChartError::AccountNotFound(id));
        }
        Ok(self
            .children
            .get(&id)
            .map(|ids| ids.iter().filter_map(|c| self.accounts.get(c)).collect())
            .unwrap_or_default())
    }

    /// Returns the transitive closure of an account's children, depth-first.
    ///
    /// The walk uses an explicit stack and a visited set; revisiting a node
    /// means the pointer graph is malformed and fails with `CycleDetected`.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the account does not exist, or
    /// `CycleDetected` on a malformed hierarchy.
    pub fn descendants(&self, id: AccountId) -> Result<Vec<&Account>, ChartError> {
        if !self.accounts.contains_key(&id) {
            return Err(ChartError::AccountNotFound(id));
        }

        let mut result = Vec::new();
        let mut visited = HashSet::from([id]);
        let mut stack: Vec<AccountId> = self.child_ids(id).rev().collect();

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                return Err(ChartError::CycleDetected(current));
            }
            if let Some(account) = self.accounts.get(&current) {
                result.push(account);
            }
            stack.extend(self.child_ids(current).rev());
        }
        Ok(result)
    }

    /// Returns the leaf accounts under an account, or the account itself if
    /// it is a leaf. This is the posting surface used by balance roll-up.
    ///
    /// # Errors
    ///
    /// Same as [`descendants`](Self::descendants).
    pub fn leaf_descendants(&self, id: AccountId) -> Result<Vec<&Account>, ChartError> {
        if self.is_leaf(id) {
            return Ok(self.accounts.get(&id).into_iter().collect());
        }
        Ok(self
            .descendants(id)?
            .into_iter()
            .filter(|a| self.is_leaf(a.id))
            .collect())
    }

    /// Returns true if the account has no children.
    ///
    /// Only leaf accounts accept postings; an unknown ID is not a leaf.
    #[must_use]
    pub fn is_leaf(&self, id: AccountId) -> bool {
        self.accounts.contains_key(&id)
            && self.children.get(&id).is_none_or(|c| c.is_empty())
    }

    /// Moves an account under a new parent (or to the root with `None`).
    ///
    /// # Errors
    ///
    /// * `AccountNotFound` if the account does not exist
    /// * `InvalidParent` if the new parent is missing or cross-organization
    /// * `CycleDetected` if the new parent is the account itself or one of
    ///   its descendants
    pub fn reparent(
        &mut self,
        id: AccountId,
        new_parent_id: Option<AccountId>,
    ) -> Result<(), ChartError> {
        let organization_id = self
            .accounts
            .get(&id)
            .ok_or(ChartError::AccountNotFound(id))?
            .organization_id;

        if let Some(new_parent_id) = new_parent_id {
            let parent = self
                .accounts
                .get(&new_parent_id)
                .ok_or(ChartError::InvalidParent(new_parent_id))?;
            if parent.organization_id != organization_id {
                return Err(ChartError::InvalidParent(new_parent_id));
            }
            if new_parent_id == id || self.is_descendant_of(new_parent_id, id)? {
                return Err(ChartError::CycleDetected(id));
            }
        }

        let old_parent_id = self.accounts.get(&id).and_then(|a| a.parent_id);
        if let Some(old_parent_id) = old_parent_id
            && let Some(siblings) = self.children.get_mut(&old_parent_id)
        {
            siblings.retain(|c| *c != id);
        }
        if let Some(new_parent_id) = new_parent_id {
            self.children.entry(new_parent_id).or_default().push(id);
        }
        if let Some(account) = self.accounts.get_mut(&id) {
            account.parent_id = new_parent_id;
        }

        tracing::debug!(account_id = %id, new_parent = ?new_parent_id, "account reparented");
        Ok(())
    }

    /// Renames an account.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the account does not exist.
    pub fn rename(&mut self, id: AccountId, name: impl Into<String>) -> Result<(), ChartError> {
        let account = self
            .accounts
            .get_mut(&id)
            .ok_or(ChartError::AccountNotFound(id))?;
        account.name = name.into();
        Ok(())
    }

    /// Returns true if `candidate` appears in the subtree rooted at `root`.
    fn is_descendant_of(&self, candidate: AccountId, root: AccountId) -> Result<bool, ChartError> {
        Ok(self.descendants(root)?.iter().any(|a| a.id == candidate))
    }

    fn child_ids(&self, id: AccountId) -> impl DoubleEndedIterator<Item = AccountId> + '_ {
        self.children
            .get(&id)
            .map(|c| c.as_slice())
            .unwrap_or_default()
            .iter()
            .copied()
    }
}
