//! Property-based tests for approval chain resolution.

use proptest::prelude::*;
use tesoria_shared::types::{CostCenterId, UserId};

use crate::approval::error::ApprovalError;
use crate::approval::graph::ApprovalGraph;
use crate::approval::state::ApprovalRequest;
use crate::approval::types::{ApprovalContext, ApprovalStatus, Role};

/// A random non-empty subset of the hierarchy, as indices into
/// `Role::HIERARCHY`, in arbitrary order with possible duplicates.
fn role_indices_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0..Role::HIERARCHY.len(), 1..=8)
}

fn build_graph(role_indices: &[usize]) -> (ApprovalGraph, ApprovalContext, Vec<(Role, UserId)>) {
    let mut graph = ApprovalGraph::new();
    let ctx = ApprovalContext::CostCenter(CostCenterId::new());
    let mut assigned = Vec::new();
    for &i in role_indices {
        let role = Role::HIERARCHY[i];
        let user = UserId::new();
        graph.assign(user, role, ctx).unwrap();
        assigned.push((role, user));
    }
    (graph, ctx, assigned)
}

/// First assigned user for each chain role, in chain order.
fn approvers_in_chain_order(
    graph: &ApprovalGraph,
    ctx: ApprovalContext,
    assigned: &[(Role, UserId)],
) -> Vec<UserId> {
    graph
        .required_chain(ctx)
        .into_iter()
        .map(|role| {
            assigned
                .iter()
                .find(|(r, _)| *r == role)
                .map(|(_, u)| *u)
                .unwrap()
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The required chain is always an ordered subsequence of the role
    /// hierarchy, whatever order assignments arrive in.
    #[test]
    fn prop_required_chain_is_ordered_subsequence(
        role_indices in role_indices_strategy(),
    ) {
        let (graph, ctx, _) = build_graph(&role_indices);
        let chain = graph.required_chain(ctx);

        prop_assert!(!chain.is_empty());
        for pair in chain.windows(2) {
            prop_assert!(pair[0].hierarchy_index() < pair[1].hierarchy_index());
        }
        for role in &chain {
            prop_assert!(role_indices.contains(&role.hierarchy_index().unwrap()));
        }
    }

    /// Approving in chain order always terminates in `Approved` after
    /// exactly chain-length steps.
    #[test]
    fn prop_in_order_approvals_terminate(
        role_indices in role_indices_strategy(),
    ) {
        let (graph, ctx, assigned) = build_graph(&role_indices);
        let approvers = approvers_in_chain_order(&graph, ctx, &assigned);

        let mut request = ApprovalRequest::new(&graph, ctx).unwrap();
        for (index, user) in approvers.iter().enumerate() {
            prop_assert_eq!(request.role_index(), Some(index));
            request.approve(&graph, *user, index).unwrap();
        }
        prop_assert_eq!(request.status(), ApprovalStatus::Approved);
        prop_assert_eq!(request.history().len(), approvers.len());
    }

    /// An approval carrying a wrong role index never changes state.
    #[test]
    fn prop_stale_index_never_advances(
        role_indices in role_indices_strategy(),
        wrong_offset in 1usize..=5,
    ) {
        let (graph, ctx, assigned) = build_graph(&role_indices);
        let approvers = approvers_in_chain_order(&graph, ctx, &assigned);

        let mut request = ApprovalRequest::new(&graph, ctx).unwrap();
        let err = request.approve(&graph, approvers[0], wrong_offset).unwrap_err();
        prop_assert!(
            matches!(err, ApprovalError::StaleApprovalState { .. }),
            "unexpected error: {err:?}"
        );
        prop_assert_eq!(request.status(), ApprovalStatus::Pending { role_index: 0 });
        prop_assert!(request.history().is_empty());
    }

    /// A user assigned only at a later chain step can never satisfy an
    /// earlier one.
    #[test]
    fn prop_later_approver_cannot_act_early(
        role_indices in role_indices_strategy(),
    ) {
        let (graph, ctx, assigned) = build_graph(&role_indices);
        let chain = graph.required_chain(ctx);
        prop_assume!(chain.len() >= 2);

        let last_role = *chain.last().unwrap();
        let late_user = assigned
            .iter()
            .find(|(r, _)| *r == last_role)
            .map(|(_, u)| *u)
            .unwrap();
        // Only meaningful when that user holds no earlier role too.
        prop_assume!(!graph.can_approve(ctx, late_user, chain[0]));

        let mut request = ApprovalRequest::new(&graph, ctx).unwrap();
        let err = request.approve(&graph, late_user, 0).unwrap_err();
        prop_assert!(
            matches!(err, ApprovalError::NotAnApprover { .. }),
            "unexpected error: {err:?}"
        );
        prop_assert_eq!(request.status(), ApprovalStatus::Pending { role_index: 0 });
    }

    /// A cross-cutting override satisfies every step of any chain.
    #[test]
    fn prop_override_satisfies_whole_chain(
        role_indices in role_indices_strategy(),
    ) {
        let (mut graph, ctx, _) = build_graph(&role_indices);
        let finance = UserId::new();
        graph.grant_override(finance, Role::Finance).unwrap();

        let chain_len = graph.required_chain(ctx).len();
        let mut request = ApprovalRequest::new(&graph, ctx).unwrap();
        for index in 0..chain_len {
            request.approve(&graph, finance, index).unwrap();
        }
        prop_assert_eq!(request.status(), ApprovalStatus::Approved);
    }
}
