//! Route table of the admin dashboard.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use super::table::{Layout, Params, Props, RouteRecord, RouteTable, RouteTableError};

/// Name of the route unauthenticated navigation is redirected to.
pub const LOGIN_ROUTE: &str = "login";
/// Name of the route shown for unmatched paths.
pub const NOT_FOUND_ROUTE: &str = "notfound";
/// View shown when a route's own view fails to resolve.
pub const ERROR_VIEW: &str = "pages/auth/Error";

/// Declarative admin route tree.
#[must_use]
pub fn admin_routes() -> Vec<RouteRecord> {
    vec![
        RouteRecord::new("/").layout(Layout::App).children(vec![
            RouteRecord::new("").name("dashboard").view("Dashboard").requires_auth(),
            RouteRecord::new("user").name("user").view("User"),
            RouteRecord::new("product").name("product").view("Product"),
            RouteRecord::new("order").name("order").view("Order"),
            RouteRecord::new("report").name("report").view("Report"),
            RouteRecord::new("wallet").name("wallet").view("Wallet"),
            RouteRecord::new("notification").name("notification").view("Notification"),
            RouteRecord::new("setting").name("setting").view("Setting"),
        ]),
        RouteRecord::new("/auth").children(vec![
            RouteRecord::new("login").name(LOGIN_ROUTE).view("pages/auth/Login"),
            RouteRecord::new("error").name("error").view(ERROR_VIEW),
            RouteRecord::new("access").name("access").view("pages/auth/Access"),
        ]),
        RouteRecord::new("/usermanagement").layout(Layout::App).children(vec![
            RouteRecord::new("")
                .name("usermanagement")
                .view("pages/UserManagement/UserManagement")
                .props(user_management_props),
            RouteRecord::new("permission").name("permission").view("pages/UserManagement/Permission"),
            RouteRecord::new("rolespermission")
                .name("rolespermission")
                .view("pages/UserManagement/RolesManagement"),
            RouteRecord::new("users").name("users").view("pages/UserManagement/Users"),
            RouteRecord::new("accountrequest")
                .name("accountrequest")
                .view("pages/UserManagement/AccountManagement"),
            RouteRecord::new("adduser").name("adduser").view("pages/UserManagement/AddManagement"),
        ]),
        RouteRecord::new("/pages").children(vec![
            RouteRecord::new("empty").name("empty").view("pages/Empty"),
            RouteRecord::new("notfound").name(NOT_FOUND_ROUTE).view("pages/NotFound"),
        ]),
        RouteRecord::new("/products").layout(Layout::App).children(vec![
            RouteRecord::new("product").name("catalog").view("pages/products/Product"),
            RouteRecord::new("addproduct").name("addproduct").view("pages/products/AddProduct"),
            RouteRecord::new("stock").name("stock").view("pages/products/Stock"),
            RouteRecord::new("addstock").name("addstock").view("pages/products/AddStock"),
            RouteRecord::new("controllerlist")
                .name("controllerlist")
                .view("pages/products/ControllerList"),
        ]),
    ]
}

/// Compiled admin route table.
///
/// # Errors
///
/// Only fails if the declaration above violates table invariants.
pub fn admin_table() -> Result<RouteTable, RouteTableError> {
    RouteTable::new(admin_routes())
}

/// Every view referenced by the admin table, paired with a display title.
pub const ADMIN_VIEWS: &[(&str, &str)] = &[
    ("Dashboard", "Dashboard"),
    ("User", "Users"),
    ("Product", "Products"),
    ("Order", "Orders"),
    ("Report", "Reports"),
    ("Wallet", "Wallet"),
    ("Notification", "Notifications"),
    ("Setting", "Settings"),
    ("pages/auth/Login", "Sign In"),
    (ERROR_VIEW, "Error"),
    ("pages/auth/Access", "Access Denied"),
    ("pages/UserManagement/UserManagement", "User Management"),
    ("pages/UserManagement/Permission", "Permissions"),
    ("pages/UserManagement/RolesManagement", "Roles & Permissions"),
    ("pages/UserManagement/Users", "Users"),
    ("pages/UserManagement/AccountManagement", "Account Requests"),
    ("pages/UserManagement/AddManagement", "Add User"),
    ("pages/Empty", "Empty"),
    ("pages/NotFound", "Not Found"),
    ("pages/products/Product", "Product Catalog"),
    ("pages/products/AddProduct", "Add Product"),
    ("pages/products/Stock", "Stock"),
    ("pages/products/AddStock", "Add Stock"),
    ("pages/products/ControllerList", "Controller List"),
];

/// `tab` param as a number, defaulting to the first tab.
fn user_management_props(params: &Params) -> Props {
    let tab = params
        .get("tab")
        .and_then(|t| t.trim().parse::<f64>().ok())
        .filter(|t| t.is_finite())
        .map_or(serde_json::Value::from(0), tab_number);
    let mut props = Props::new();
    props.insert("tab".to_owned(), tab);
    props
}

#[allow(clippy::cast_possible_truncation)]
fn tab_number(tab: f64) -> serde_json::Value {
    if tab.fract() == 0.0 && tab.abs() < 9_007_199_254_740_992.0 {
        serde_json::Value::from(tab as i64)
    } else {
        serde_json::Value::from(tab)
    }
}
