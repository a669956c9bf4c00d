use std::collections::HashSet;

use super::*;
use crate::routes::table::Layout;

#[test]
fn admin_table_compiles() {
    let table = admin_table().unwrap();
    assert_eq!(table.entries().len(), ADMIN_VIEWS.len());
}

#[test]
fn dashboard_is_the_only_auth_gated_route() {
    let table = admin_table().unwrap();
    let gated: Vec<_> = table.entries().iter().filter(|e| e.requires_auth()).filter_map(|e| e.name()).collect();
    assert_eq!(gated, vec!["dashboard"]);
}

#[test]
fn expected_paths_resolve_to_named_routes() {
    let table = admin_table().unwrap();
    let cases = [
        ("/", "dashboard"),
        ("/user", "user"),
        ("/product", "product"),
        ("/order", "order"),
        ("/report", "report"),
        ("/wallet", "wallet"),
        ("/notification", "notification"),
        ("/setting", "setting"),
        ("/auth/login", "login"),
        ("/auth/error", "error"),
        ("/auth/access", "access"),
        ("/usermanagement", "usermanagement"),
        ("/usermanagement/permission", "permission"),
        ("/usermanagement/rolespermission", "rolespermission"),
        ("/usermanagement/users", "users"),
        ("/usermanagement/accountrequest", "accountrequest"),
        ("/usermanagement/adduser", "adduser"),
        ("/pages/empty", "empty"),
        ("/pages/notfound", "notfound"),
        ("/products/product", "catalog"),
        ("/products/addproduct", "addproduct"),
        ("/products/stock", "stock"),
        ("/products/addstock", "addstock"),
        ("/products/controllerlist", "controllerlist"),
    ];
    for (path, name) in cases {
        let resolved = table.resolve_path(path).unwrap_or_else(|| panic!("no route for {path}"));
        assert_eq!(resolved.entry.name(), Some(name), "wrong route for {path}");
    }
}

#[test]
fn mixed_case_paths_reach_their_routes() {
    let table = admin_table().unwrap();
    assert_eq!(table.resolve_path("/Wallet").and_then(|r| r.entry.name()), Some("wallet"));
    assert_eq!(table.resolve_path("/AUTH/LOGIN").and_then(|r| r.entry.name()), Some("login"));
}

#[test]
fn app_layout_groups_wrap_their_children() {
    let table = admin_table().unwrap();
    assert_eq!(table.by_name("wallet").unwrap().layout(), Some(Layout::App));
    assert_eq!(table.by_name("adduser").unwrap().layout(), Some(Layout::App));
    assert_eq!(table.by_name("stock").unwrap().layout(), Some(Layout::App));
    assert_eq!(table.by_name("login").unwrap().layout(), None);
    assert_eq!(table.by_name("notfound").unwrap().layout(), None);
}

#[test]
fn every_route_view_has_a_title() {
    let titled: HashSet<&str> = ADMIN_VIEWS.iter().map(|(id, _)| *id).collect();
    let table = admin_table().unwrap();
    for entry in table.entries() {
        let view = entry.view().unwrap();
        assert!(titled.contains(view.as_str()), "missing title for {view}");
    }
}

#[test]
fn user_management_tab_prop_parses_number_or_defaults_to_zero() {
    let mut params = Params::new();
    assert_eq!(user_management_props(&params).get("tab"), Some(&serde_json::json!(0)));

    params.insert("tab".to_owned(), "3".to_owned());
    assert_eq!(user_management_props(&params).get("tab"), Some(&serde_json::json!(3)));

    params.insert("tab".to_owned(), "1.5".to_owned());
    assert_eq!(user_management_props(&params).get("tab"), Some(&serde_json::json!(1.5)));

    params.insert("tab".to_owned(), "abc".to_owned());
    assert_eq!(user_management_props(&params).get("tab"), Some(&serde_json::json!(0)));
}
