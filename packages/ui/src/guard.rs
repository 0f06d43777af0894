//! # Route guard
//!
//! Every dashboard route declares a [`Requirement`]; the dashboard layout
//! evaluates it once per navigation with [`evaluate`] and redirects when the
//! decision is not [`GuardDecision::Allow`].
//!
//! Evaluation order:
//!
//! 1. no stored token → sign-in page
//! 2. profile not loaded yet → wait (render nothing, do not redirect)
//! 3. email not verified → verification page
//! 4. role / plan below the requirement → dashboard root

use api::{PlanTier, Role, UserInfo};

/// What a route needs from the current user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Requirement {
    /// Anyone (landing page).
    Public,
    /// Only signed-out visitors (sign-in, sign-up). Signed-in users go to the dashboard.
    Guest,
    /// Any signed-in user, verified or not.
    SignedIn,
    /// Signed in with a verified email.
    Verified,
    /// Staff or admin.
    Staff,
    Admin,
    /// At least the given plan. Admins always pass.
    Plan(PlanTier),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Wait,
    RedirectSignIn,
    RedirectVerify,
    RedirectDashboard,
}

/// Decide whether the current user may see a route.
///
/// * `signed_in` - a token is present in storage
/// * `profile` - the profile from `/Auth/me`, `None` while it is loading
pub fn evaluate(requirement: Requirement, signed_in: bool, profile: Option<&UserInfo>) -> GuardDecision {
    match requirement {
        Requirement::Public => return GuardDecision::Allow,
        Requirement::Guest => {
            return if signed_in && profile.is_some() {
                GuardDecision::RedirectDashboard
            } else {
                GuardDecision::Allow
            };
        }
        _ => {}
    }

    if !signed_in {
        return GuardDecision::RedirectSignIn;
    }
    let Some(user) = profile else {
        return GuardDecision::Wait;
    };
    if requirement == Requirement::SignedIn {
        return GuardDecision::Allow;
    }
    if !user.is_verified {
        return GuardDecision::RedirectVerify;
    }

    let allowed = match requirement {
        Requirement::Staff => matches!(user.role, Role::Staff | Role::Admin),
        Requirement::Admin => user.role == Role::Admin,
        Requirement::Plan(min) => user.role == Role::Admin || user.plan >= min,
        _ => true,
    };
    if allowed {
        GuardDecision::Allow
    } else {
        GuardDecision::RedirectDashboard
    }
}

/// Where a user lands after signing in.
pub fn home_path(user: &UserInfo) -> &'static str {
    if !user.is_verified {
        "/verify-email"
    } else if user.is_admin() {
        "/dashboard/users"
    } else {
        "/dashboard"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role, plan: PlanTier, verified: bool) -> UserInfo {
        UserInfo {
            id: "1".into(),
            email: "t@school.ng".into(),
            first_name: None,
            last_name: None,
            role,
            plan,
            is_verified: verified,
            school_name: None,
        }
    }

    #[test]
    fn test_public_always_allowed() {
        assert_eq!(evaluate(Requirement::Public, false, None), GuardDecision::Allow);
    }

    #[test]
    fn test_missing_token_redirects_to_sign_in() {
        for req in [Requirement::SignedIn, Requirement::Verified, Requirement::Admin, Requirement::Plan(PlanTier::Basic)] {
            assert_eq!(evaluate(req, false, None), GuardDecision::RedirectSignIn);
        }
    }

    #[test]
    fn test_waits_for_profile() {
        assert_eq!(evaluate(Requirement::Verified, true, None), GuardDecision::Wait);
    }

    #[test]
    fn test_unverified_goes_to_verify() {
        let u = user(Role::Regular, PlanTier::Premium, false);
        assert_eq!(evaluate(Requirement::Verified, true, Some(&u)), GuardDecision::RedirectVerify);
        assert_eq!(evaluate(Requirement::SignedIn, true, Some(&u)), GuardDecision::Allow);
    }

    #[test]
    fn test_role_requirements() {
        let teacher = user(Role::Regular, PlanTier::Free, true);
        let staff = user(Role::Staff, PlanTier::Free, true);
        let admin = user(Role::Admin, PlanTier::Free, true);

        assert_eq!(evaluate(Requirement::Admin, true, Some(&teacher)), GuardDecision::RedirectDashboard);
        assert_eq!(evaluate(Requirement::Admin, true, Some(&staff)), GuardDecision::RedirectDashboard);
        assert_eq!(evaluate(Requirement::Admin, true, Some(&admin)), GuardDecision::Allow);

        assert_eq!(evaluate(Requirement::Staff, true, Some(&teacher)), GuardDecision::RedirectDashboard);
        assert_eq!(evaluate(Requirement::Staff, true, Some(&staff)), GuardDecision::Allow);
        assert_eq!(evaluate(Requirement::Staff, true, Some(&admin)), GuardDecision::Allow);
    }

    #[test]
    fn test_plan_requirements() {
        let free = user(Role::Regular, PlanTier::Free, true);
        let basic = user(Role::Regular, PlanTier::Basic, true);
        let admin = user(Role::Admin, PlanTier::Free, true);
        let need_basic = Requirement::Plan(PlanTier::Basic);

        assert_eq!(evaluate(need_basic, true, Some(&free)), GuardDecision::RedirectDashboard);
        assert_eq!(evaluate(need_basic, true, Some(&basic)), GuardDecision::Allow);
        assert_eq!(evaluate(need_basic, true, Some(&admin)), GuardDecision::Allow);
        assert_eq!(
            evaluate(Requirement::Plan(PlanTier::Premium), true, Some(&basic)),
            GuardDecision::RedirectDashboard
        );
    }

    #[test]
    fn test_guest_pages() {
        let u = user(Role::Regular, PlanTier::Free, true);
        assert_eq!(evaluate(Requirement::Guest, false, None), GuardDecision::Allow);
        assert_eq!(evaluate(Requirement::Guest, true, None), GuardDecision::Allow);
        assert_eq!(evaluate(Requirement::Guest, true, Some(&u)), GuardDecision::RedirectDashboard);
    }

    #[test]
    fn test_home_path_by_role() {
        assert_eq!(home_path(&user(Role::Admin, PlanTier::Free, true)), "/dashboard/users");
        assert_eq!(home_path(&user(Role::Regular, PlanTier::Free, true)), "/dashboard");
        assert_eq!(home_path(&user(Role::Admin, PlanTier::Free, false)), "/verify-email");
    }
}
