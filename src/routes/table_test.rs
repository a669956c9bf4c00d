use super::*;

fn sample() -> RouteTable {
    RouteTable::new(vec![
        RouteRecord::new("/").layout(Layout::App).meta("section", "main").children(vec![
            RouteRecord::new("").name("home").view("Home"),
            RouteRecord::new("items/:id").name("item").view("Item"),
            RouteRecord::new("items/new").name("item-new").view("ItemNew"),
        ]),
        RouteRecord::new("/secure").requires_auth().children(vec![
            RouteRecord::new("vault").name("vault").view("Vault"),
            RouteRecord::new("open").name("open").view("Open").meta(REQUIRES_AUTH, false),
        ]),
    ])
    .unwrap()
}

#[test]
fn groups_without_name_or_view_are_not_navigable() {
    let table = sample();
    let patterns: Vec<&str> = table.entries().iter().map(RouteEntry::pattern).collect();
    assert_eq!(patterns, vec!["/", "/items/:id", "/items/new", "/secure/vault", "/secure/open"]);
    assert!(table.resolve_path("/secure").is_none());
}

#[test]
fn empty_child_path_matches_parent() {
    let table = sample();
    let resolved = table.resolve_path("/").unwrap();
    assert_eq!(resolved.entry.name(), Some("home"));
    assert_eq!(resolved.path, "/");
    assert_eq!(resolved.entry.layout(), Some(Layout::App));
}

#[test]
fn trailing_slash_and_query_are_ignored() {
    let table = sample();
    let resolved = table.resolve_path("/secure/vault/?from=menu#top").unwrap();
    assert_eq!(resolved.entry.name(), Some("vault"));
    assert_eq!(resolved.path, "/secure/vault");
}

#[test]
fn param_segments_capture_values() {
    let table = sample();
    let resolved = table.resolve_path("/items/42").unwrap();
    assert_eq!(resolved.entry.name(), Some("item"));
    assert_eq!(resolved.params.get("id").map(String::as_str), Some("42"));
}

#[test]
fn static_segments_ignore_case_and_params_keep_it() {
    let table = sample();
    let vault = table.resolve_path("/Secure/VAULT").unwrap();
    assert_eq!(vault.entry.name(), Some("vault"));
    assert_eq!(vault.path, "/Secure/VAULT");

    let item = table.resolve_path("/ITEMS/AbC").unwrap();
    assert_eq!(item.entry.name(), Some("item"));
    assert_eq!(item.params.get("id").map(String::as_str), Some("AbC"));
}

#[test]
fn static_segments_outrank_params() {
    let table = sample();
    let resolved = table.resolve_path("/items/new").unwrap();
    assert_eq!(resolved.entry.name(), Some("item-new"));
    assert!(resolved.params.is_empty());
}

#[test]
fn unmatched_path_resolves_to_none() {
    let table = sample();
    assert!(table.resolve_path("/nowhere").is_none());
    assert!(table.resolve_path("/items/1/extra").is_none());
}

#[test]
fn meta_merges_parent_into_child_with_child_override() {
    let table = sample();
    let vault = table.by_name("vault").unwrap();
    assert!(vault.requires_auth());

    let open = table.by_name("open").unwrap();
    assert!(!open.requires_auth());

    let home = table.by_name("home").unwrap();
    assert_eq!(home.meta().get("section"), Some(&MetaValue::Text("main".to_owned())));
    assert!(!home.requires_auth());
}

#[test]
fn resolve_name_substitutes_params() {
    let table = sample();
    let mut params = Params::new();
    params.insert("id".to_owned(), "7".to_owned());
    params.insert("unused".to_owned(), "x".to_owned());

    let resolved = table.resolve_name("item", &params).unwrap();
    assert_eq!(resolved.path, "/items/7");
    assert_eq!(resolved.params.len(), 1);
}

#[test]
fn resolve_name_reports_missing_param_and_unknown_name() {
    let table = sample();
    assert_eq!(
        table.resolve_name("item", &Params::new()).unwrap_err(),
        ResolveError::MissingParam { route: "item".to_owned(), param: "id".to_owned() }
    );
    assert_eq!(
        table.resolve_name("ghost", &Params::new()).unwrap_err(),
        ResolveError::UnknownName("ghost".to_owned())
    );
}

#[test]
fn duplicate_names_are_rejected_across_groups() {
    let err = RouteTable::new(vec![
        RouteRecord::new("/a").children(vec![RouteRecord::new("x").name("same").view("A")]),
        RouteRecord::new("/b").children(vec![RouteRecord::new("x").name("same").view("B")]),
    ])
    .unwrap_err();
    assert_eq!(err, RouteTableError::DuplicateName("same".to_owned()));
}

#[test]
fn duplicate_sibling_paths_are_rejected() {
    let err = RouteTable::new(vec![RouteRecord::new("/a").children(vec![
        RouteRecord::new("x").name("one").view("A"),
        RouteRecord::new("x/").name("two").view("B"),
    ])])
    .unwrap_err();
    assert_eq!(err, RouteTableError::DuplicatePath { parent: "/a".to_owned(), path: "x/".to_owned() });
}

#[test]
fn same_child_path_under_different_parents_is_allowed() {
    let table = RouteTable::new(vec![
        RouteRecord::new("/a").children(vec![RouteRecord::new("x").name("ax").view("A")]),
        RouteRecord::new("/b").children(vec![RouteRecord::new("x").name("bx").view("B")]),
    ]);
    assert!(table.is_ok());
}

#[test]
fn invalid_paths_are_rejected() {
    let relative_root = RouteTable::new(vec![RouteRecord::new("a").name("a").view("A")]).unwrap_err();
    assert!(matches!(relative_root, RouteTableError::InvalidPath { .. }));

    let empty_param = RouteTable::new(vec![RouteRecord::new("/a/:").name("a").view("A")]).unwrap_err();
    assert!(matches!(empty_param, RouteTableError::InvalidPath { reason: "empty param name", .. }));
}

#[test]
fn props_for_without_mapping_is_empty() {
    let table = sample();
    assert!(table.by_name("home").unwrap().props_for(&Params::new()).is_empty());
}
