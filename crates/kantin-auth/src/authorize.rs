//! Role-based authorization.
//!
//! Pure functions, no I/O. The permitted set for an operation is
//! declared statically at route composition time; these checks only
//! decide membership and the one recurring cross-cutting rule, the
//! privilege-escalation guard.

use kantin_core::models::user::Role;

/// Outcome of an authorization check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Granted,
    Denied { reason: String },
}

impl AccessDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, AccessDecision::Granted)
    }

    fn denied(reason: impl Into<String>) -> Self {
        AccessDecision::Denied {
            reason: reason.into(),
        }
    }
}

/// Allow the operation if the actor's role is in the permitted set.
pub fn authorize_roles(role: Role, permitted: &[Role]) -> AccessDecision {
    if permitted.contains(&role) {
        AccessDecision::Granted
    } else {
        AccessDecision::denied(format!("role {role} is not permitted for this operation"))
    }
}

/// Privilege-escalation guard for account mutation.
///
/// A SUPER_ADMIN record may only be edited or deleted by a SUPER_ADMIN
/// actor, regardless of whether the actor's role is otherwise permitted
/// for the generic operation.
pub fn authorize_account_mutation(actor: Role, target: Role) -> AccessDecision {
    match target {
        Role::SuperAdmin if actor != Role::SuperAdmin => {
            AccessDecision::denied("only SUPER_ADMIN may modify a SUPER_ADMIN account")
        }
        _ => AccessDecision::Granted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_of_permitted_set_is_granted() {
        let decision = authorize_roles(Role::Admin, &[Role::Admin, Role::SuperAdmin]);
        assert!(decision.is_granted());
    }

    #[test]
    fn non_member_is_denied() {
        let decision = authorize_roles(Role::Admin, &[Role::SuperAdmin]);
        assert!(!decision.is_granted());
    }

    #[test]
    fn student_is_denied_admin_operations() {
        let decision = authorize_roles(Role::Student, &[Role::Admin, Role::SuperAdmin]);
        assert!(!decision.is_granted());
    }

    #[test]
    fn admin_cannot_mutate_super_admin_account() {
        let decision = authorize_account_mutation(Role::Admin, Role::SuperAdmin);
        match decision {
            AccessDecision::Denied { reason } => {
                assert!(reason.contains("SUPER_ADMIN"), "reason: {reason}");
            }
            AccessDecision::Granted => panic!("expected denial"),
        }
    }

    #[test]
    fn super_admin_may_mutate_super_admin_account() {
        assert!(authorize_account_mutation(Role::SuperAdmin, Role::SuperAdmin).is_granted());
    }

    #[test]
    fn guard_does_not_restrict_ordinary_targets() {
        assert!(authorize_account_mutation(Role::Admin, Role::Student).is_granted());
        assert!(authorize_account_mutation(Role::Admin, Role::Admin).is_granted());
    }
}
