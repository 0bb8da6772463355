//! Approval chain resolution over context assignments.

use std::collections::HashSet;

use tesoria_shared::types::UserId;

use super::error::ApprovalError;
use super::types::{ApprovalAssignment, ApprovalContext, NextStep, Role};

/// Resolves the ordered chain of approvers for a context.
///
/// The graph is a read path over rarely-changing assignment data: roles with
/// no assigned approver are skipped (absence means "not required here"),
/// and users holding a cross-cutting role (`finance`, `ceo`, `cfo`) are
/// valid approvers at any step of any chain.
#[derive(Debug, Default)]
pub struct ApprovalGraph {
    assignments: Vec<ApprovalAssignment>,
    overrides: Vec<(UserId, Role)>,
}

impl ApprovalGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a user as the approver for a context at a hierarchy role.
    ///
    /// Duplicate assignments are accepted; resolution deduplicates.
    ///
    /// # Errors
    ///
    /// Returns `RoleNotContextScoped` for cross-cutting roles, which are
    /// never tied to a context.
    pub fn assign(
        &mut self,
        user_id: UserId,
        role: Role,
        context: ApprovalContext,
    ) -> Result<(), ApprovalError> {
        if role.is_cross_cutting() {
            return Err(ApprovalError::RoleNotContextScoped(role));
        }
        self.assignments.push(ApprovalAssignment {
            user_id,
            role,
            context,
        });
        tracing::debug!(user_id = %user_id, role = %role, "approval assignment added");
        Ok(())
    }

    /// Removes all assignments matching `(user, role, context)`.
    pub fn revoke(&mut self, user_id: UserId, role: Role, context: ApprovalContext) {
        self.assignments
            .retain(|a| !(a.user_id == user_id && a.role == role && a.context == context));
    }

    /// Grants a user a context-independent override role.
    ///
    /// # Errors
    ///
    /// Returns `RoleNotCrossCutting` for hierarchy roles.
    pub fn grant_override(&mut self, user_id: UserId, role: Role) -> Result<(), ApprovalError> {
        if !role.is_cross_cutting() {
            return Err(ApprovalError::RoleNotCrossCutting(role));
        }
        if !self.overrides.contains(&(user_id, role)) {
            self.overrides.push((user_id, role));
        }
        tracing::debug!(user_id = %user_id, role = %role, "cross-cutting override granted");
        Ok(())
    }

    /// Revokes a previously granted override.
    pub fn revoke_override(&mut self, user_id: UserId, role: Role) {
        self.overrides.retain(|o| *o != (user_id, role));
    }

    /// Returns true if the user holds any cross-cutting role.
    #[must_use]
    pub fn holds_override(&self, user_id: UserId) -> bool {
        self.overrides.iter().any(|(u, _)| *u == user_id)
    }

    /// Returns all users assigned as approvers for `(context, role)`.
    ///
    /// Order follows assignment insertion; duplicates are removed.
    #[must_use]
    pub fn approvers_for(&self, context: ApprovalContext, role: Role) -> Vec<UserId> {
        let mut seen = HashSet::new();
        self.assignments
            .iter()
            .filter(|a| a.context == context && a.role == role)
            .map(|a| a.user_id)
            .filter(|u| seen.insert(*u))
            .collect()
    }

    /// Returns the ordered subsequence of the role hierarchy that has at
    /// least one assignment for the context.
    ///
    /// Unassigned roles are skipped - they never block approval.
    #[must_use]
    pub fn required_chain(&self, context: ApprovalContext) -> Vec<Role> {
        Role::HIERARCHY
            .into_iter()
            .filter(|role| {
                self.assignments
                    .iter()
                    .any(|a| a.context == context && a.role == *role)
            })
            .collect()
    }

    /// Resolves the next approval step after `last_satisfied`.
    ///
    /// `None` means no step has been satisfied yet; `Some(i)` means the
    /// chain role at index `i` has approved.
    #[must_use]
    pub fn next_approver(
        &self,
        context: ApprovalContext,
        last_satisfied: Option<usize>,
    ) -> NextStep {
        let chain = self.required_chain(context);
        let next_index = last_satisfied.map_or(0, |i| i + 1);
        match chain.get(next_index) {
            Some(role) => NextStep::Step {
                role: *role,
                index: next_index,
                approvers: self.approvers_for(context, *role),
            },
            None => NextStep::Done,
        }
    }

    /// Returns true if the user may approve the given chain role for the
    /// context. Cross-cutting overrides are checked before the
    /// context-scoped assignments.
    #[must_use]
    pub fn can_approve(&self, context: ApprovalContext, user_id: UserId, role: Role) -> bool {
        self.holds_override(user_id) || self.approvers_for(context, role).contains(&user_id)
    }
}
