use proptest::prelude::*;
use stratum_model::Scope;

// ── Breadth ordering ────────────────────────────────────────────

#[test]
fn application_is_broadest() {
    assert!(Scope::Session < Scope::User);
    assert!(Scope::User < Scope::Application);
    assert!(Scope::Session < Scope::Application);
}

#[test]
fn includes_is_reflexive() {
    for scope in [Scope::Session, Scope::User, Scope::Application] {
        assert!(scope.includes(scope));
    }
}

#[test]
fn application_includes_everything() {
    assert!(Scope::Application.includes(Scope::Session));
    assert!(Scope::Application.includes(Scope::User));
    assert!(Scope::Application.includes(Scope::Application));
}

#[test]
fn user_includes_session_only() {
    assert!(Scope::User.includes(Scope::Session));
    assert!(Scope::User.includes(Scope::User));
    assert!(!Scope::User.includes(Scope::Application));
}

#[test]
fn session_includes_nothing_else() {
    assert!(Scope::Session.includes(Scope::Session));
    assert!(!Scope::Session.includes(Scope::User));
    assert!(!Scope::Session.includes(Scope::Application));
}

// ── View membership ─────────────────────────────────────────────

#[test]
fn every_scope_is_visible_in_session() {
    assert!(Scope::Session.visible_in(Scope::Session));
    assert!(Scope::User.visible_in(Scope::Session));
    assert!(Scope::Application.visible_in(Scope::Session));
}

#[test]
fn session_values_never_leave_the_session_view() {
    assert!(!Scope::Session.visible_in(Scope::User));
    assert!(!Scope::Session.visible_in(Scope::Application));
}

#[test]
fn user_values_are_visible_in_user_view() {
    assert!(Scope::User.visible_in(Scope::User));
    assert!(!Scope::User.visible_in(Scope::Application));
}

#[test]
fn application_values_are_visible_everywhere() {
    assert!(Scope::Application.visible_in(Scope::Session));
    assert!(Scope::Application.visible_in(Scope::User));
    assert!(Scope::Application.visible_in(Scope::Application));
}

// ── Display and serde ───────────────────────────────────────────

#[test]
fn display_names_are_lowercase() {
    assert_eq!(Scope::Session.to_string(), "session");
    assert_eq!(Scope::User.to_string(), "user");
    assert_eq!(Scope::Application.to_string(), "application");
}

#[test]
fn serde_uses_snake_case() {
    assert_eq!(serde_json::to_string(&Scope::Session).unwrap(), "\"session\"");
    assert_eq!(serde_json::to_string(&Scope::User).unwrap(), "\"user\"");
    assert_eq!(
        serde_json::to_string(&Scope::Application).unwrap(),
        "\"application\""
    );
}

#[test]
fn serde_roundtrip() {
    for scope in [Scope::Session, Scope::User, Scope::Application] {
        let json = serde_json::to_string(&scope).unwrap();
        let back: Scope = serde_json::from_str(&json).unwrap();
        assert_eq!(back, scope);
    }
}

// ── Inclusion algebra ───────────────────────────────────────────

fn any_scope() -> impl Strategy<Value = Scope> {
    prop_oneof![
        Just(Scope::Session),
        Just(Scope::User),
        Just(Scope::Application),
    ]
}

proptest! {
    #[test]
    fn inclusion_is_transitive(a in any_scope(), b in any_scope(), c in any_scope()) {
        if a.includes(b) && b.includes(c) {
            prop_assert!(a.includes(c));
        }
    }

    #[test]
    fn inclusion_is_antisymmetric(a in any_scope(), b in any_scope()) {
        if a.includes(b) && b.includes(a) {
            prop_assert_eq!(a, b);
        }
    }

    #[test]
    fn visibility_mirrors_inclusion(field in any_scope(), view in any_scope()) {
        prop_assert_eq!(field.visible_in(view), field.includes(view));
    }
}
