//! Client-side routing: route table, guard, view registry and navigator.
//!
//! SYSTEM CONTEXT
//! ==============
//! `table` compiles declarative records, `admin` declares the dashboard's
//! routes, `guard` gates auth-only routes on the session store, `views`
//! resolves view ids lazily, and `navigator` runs transitions end to end.

pub mod admin;
pub mod guard;
pub mod navigator;
pub mod table;
pub mod views;

pub use guard::{GuardDecision, NavigationGuard};
pub use navigator::{Location, NavigateError, Navigation, Navigator, Target};
pub use table::{Layout, MetaValue, Params, Props, RouteEntry, RouteRecord, RouteTable, RouteTableError, ViewId};
pub use views::{BuiltinViewLoader, View, ViewError, ViewLoader, ViewRegistry, ViewState};
