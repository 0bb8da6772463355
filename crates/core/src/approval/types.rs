//! Approval domain types.

use serde::{Deserialize, Serialize};
use tesoria_shared::types::{CostCenterId, ProjectId, UserId};

/// Approver role.
///
/// `Coordinator` through `GeneralManager` form the ordered organizational
/// hierarchy an approval chain walks through. `Finance`, `Ceo` and `Cfo`
/// are cross-cutting: they are valid approvers at any step of any chain and
/// are never assigned to a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// First hierarchy level.
    Coordinator,
    /// Second hierarchy level.
    Supervisor,
    /// Third hierarchy level.
    Manager,
    /// Fourth and final hierarchy level.
    GeneralManager,
    /// Cross-cutting finance override.
    Finance,
    /// Cross-cutting chief executive override.
    Ceo,
    /// Cross-cutting chief financial officer override.
    Cfo,
}

impl Role {
    /// The ordered role hierarchy an approval chain is built from.
    pub const HIERARCHY: [Self; 4] = [
        Self::Coordinator,
        Self::Supervisor,
        Self::Manager,
        Self::GeneralManager,
    ];

    /// Returns this role's position in the hierarchy, or `None` for
    /// cross-cutting roles.
    #[must_use]
    pub fn hierarchy_index(&self) -> Option<usize> {
        Self::HIERARCHY.iter().position(|r| r == self)
    }

    /// Returns true for context-independent override roles.
    #[must_use]
    pub fn is_cross_cutting(&self) -> bool {
        matches!(self, Self::Finance | Self::Ceo | Self::Cfo)
    }

    /// Parses a role from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "coordinator" => Some(Self::Coordinator),
            "supervisor" => Some(Self::Supervisor),
            "manager" => Some(Self::Manager),
            "general-manager" => Some(Self::GeneralManager),
            "finance" => Some(Self::Finance),
            "ceo" => Some(Self::Ceo),
            "cfo" => Some(Self::Cfo),
            _ => None,
        }
    }

    /// Returns the string representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Coordinator => "coordinator",
            Self::Supervisor => "supervisor",
            Self::Manager => "manager",
            Self::GeneralManager => "general-manager",
            Self::Finance => "finance",
            Self::Ceo => "ceo",
            Self::Cfo => "cfo",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The organizational context an approval chain is resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ApprovalContext {
    /// A cost center.
    CostCenter(CostCenterId),
    /// A project.
    Project(ProjectId),
}

/// "This user, acting in this role, is the approver for this context."
///
/// Multiple assignments may exist per `(context, role)`; the resolver
/// returns all of them rather than assuming uniqueness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalAssignment {
    /// The approving user.
    pub user_id: UserId,
    /// The hierarchy role the user acts in.
    pub role: Role,
    /// The context the assignment is scoped to.
    pub context: ApprovalContext,
}

/// Status of an approval request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "state")]
pub enum ApprovalStatus {
    /// Waiting on the chain role at `role_index`.
    Pending {
        /// Index into the request's required chain.
        role_index: usize,
    },
    /// Every required role has approved (terminal).
    Approved,
    /// An approver rejected the request (terminal).
    Rejected,
}

impl ApprovalStatus {
    /// Returns true for terminal states.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending { .. } => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// Result of resolving the next step of an approval chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextStep {
    /// The chain requires another approval.
    Step {
        /// The role whose approval is required next.
        role: Role,
        /// The role's index in the required chain.
        index: usize,
        /// Users who may satisfy this step (cross-cutting holders aside).
        approvers: Vec<UserId>,
    },
    /// The chain is exhausted.
    Done,
}
