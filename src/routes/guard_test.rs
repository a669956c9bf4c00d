use super::*;
use crate::routes::admin::admin_table;
use crate::routes::table::RouteTable;
use crate::session::MemorySessionStore;

fn entry<'a>(table: &'a RouteTable, name: &str) -> &'a RouteEntry {
    table.by_name(name).unwrap()
}

#[test]
fn auth_route_without_token_redirects_to_login() {
    let table = admin_table().unwrap();
    let store = MemorySessionStore::new();
    let decision = NavigationGuard::default().check(entry(&table, "dashboard"), &store);
    assert_eq!(decision, GuardDecision::Redirect("login".to_owned()));
}

#[test]
fn auth_route_with_any_token_is_allowed() {
    let table = admin_table().unwrap();
    for token in ["x", "not-a-real-jwt", "eyJhbGciOiJIUzI1NiJ9.e30.sig"] {
        let store = MemorySessionStore::with_token(token);
        assert_eq!(NavigationGuard::default().check(entry(&table, "dashboard"), &store), GuardDecision::Allow);
    }
}

#[test]
fn auth_route_with_empty_token_redirects() {
    let table = admin_table().unwrap();
    let store = MemorySessionStore::with_token("");
    assert_eq!(
        NavigationGuard::default().check(entry(&table, "dashboard"), &store),
        GuardDecision::Redirect("login".to_owned())
    );
}

#[test]
fn routes_without_requires_auth_always_allowed() {
    let table = admin_table().unwrap();
    let guard = NavigationGuard::default();
    for store in [MemorySessionStore::new(), MemorySessionStore::with_token("t")] {
        for name in ["user", "login", "usermanagement", "catalog", "notfound"] {
            assert_eq!(guard.check(entry(&table, name), &store), GuardDecision::Allow, "{name}");
        }
    }
}

#[test]
fn custom_login_route_is_used_for_redirects() {
    let table = admin_table().unwrap();
    let guard = NavigationGuard::new("access");
    assert_eq!(guard.login_route(), "access");
    assert_eq!(
        guard.check(entry(&table, "dashboard"), &MemorySessionStore::new()),
        GuardDecision::Redirect("access".to_owned())
    );
}

#[test]
fn guard_accepts_trait_objects() {
    let table = admin_table().unwrap();
    let store: Box<dyn SessionStore> = Box::new(MemorySessionStore::with_token("t"));
    assert_eq!(NavigationGuard::default().check(entry(&table, "dashboard"), store.as_ref()), GuardDecision::Allow);
}
