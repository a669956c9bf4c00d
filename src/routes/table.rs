//! Declarative route records and the compiled, immutable route table.
//!
//! ARCHITECTURE
//! ============
//! Routes are declared as a tree of [`RouteRecord`]s: groups share a path
//! prefix, a layout wrapper and metadata with their children. [`RouteTable::new`]
//! validates the tree once and flattens it into [`RouteEntry`]s whose paths,
//! layout and metadata are already resolved against their ancestors, so
//! matching at navigation time is a linear scan with no tree walking.

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Metadata key that marks a route as requiring a credential flag.
pub const REQUIRES_AUTH: &str = "requiresAuth";

/// Identifier of a lazily resolved view, e.g. `"pages/auth/Login"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub &'static str);

impl ViewId {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Wrapper view shared by a group of child routes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// Main application shell with navigation chrome.
    App,
}

/// Scalar metadata value attached to a route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MetaValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl From<bool> for MetaValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for MetaValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

pub type RouteMeta = BTreeMap<String, MetaValue>;
pub type Params = BTreeMap<String, String>;
pub type Props = serde_json::Map<String, serde_json::Value>;

/// Maps route params to view inputs.
pub type PropsFn = fn(&Params) -> Props;

// =============================================================================
// DECLARATION
// =============================================================================

/// One node of the declarative route tree.
#[derive(Clone, Debug)]
pub struct RouteRecord {
    path: String,
    name: Option<String>,
    view: Option<ViewId>,
    layout: Option<Layout>,
    meta: RouteMeta,
    props: Option<PropsFn>,
    children: Vec<RouteRecord>,
}

impl RouteRecord {
    /// A record at `path`. Top-level paths start with `/`; child paths are
    /// relative to their parent and may be empty to match the parent itself.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: None,
            view: None,
            layout: None,
            meta: RouteMeta::new(),
            props: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn view(mut self, view: &'static str) -> Self {
        self.view = Some(ViewId(view));
        self
    }

    #[must_use]
    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = Some(layout);
        self
    }

    #[must_use]
    pub fn meta(mut self, key: impl Into<String>, value: impl Into<MetaValue>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn requires_auth(self) -> Self {
        self.meta(REQUIRES_AUTH, true)
    }

    #[must_use]
    pub fn props(mut self, props: PropsFn) -> Self {
        self.props = Some(props);
        self
    }

    #[must_use]
    pub fn children(mut self, children: Vec<RouteRecord>) -> Self {
        self.children = children;
        self
    }
}

// =============================================================================
// COMPILED TABLE
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

/// A navigable route with ancestor state already folded in.
#[derive(Clone, Debug)]
pub struct RouteEntry {
    name: Option<String>,
    pattern: String,
    segments: Vec<Segment>,
    view: Option<ViewId>,
    layout: Option<Layout>,
    meta: RouteMeta,
    props: Option<PropsFn>,
}

impl RouteEntry {
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Full path pattern, e.g. `/usermanagement/users`.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn view(&self) -> Option<ViewId> {
        self.view
    }

    /// Nearest layout declared on this route or an ancestor.
    #[must_use]
    pub fn layout(&self) -> Option<Layout> {
        self.layout
    }

    /// Ancestor metadata overridden by this route's own metadata.
    #[must_use]
    pub fn meta(&self) -> &RouteMeta {
        &self.meta
    }

    #[must_use]
    pub fn requires_auth(&self) -> bool {
        matches!(self.meta.get(REQUIRES_AUTH), Some(MetaValue::Bool(true)))
    }

    /// View inputs for `params`; empty when the route declares no mapping.
    #[must_use]
    pub fn props_for(&self, params: &Params) -> Props {
        self.props.map(|f| f(params)).unwrap_or_default()
    }

    fn static_segments(&self) -> usize {
        self.segments.iter().filter(|s| matches!(s, Segment::Static(_))).count()
    }

    fn match_segments(&self, parts: &[&str]) -> Option<Params> {
        if parts.len() != self.segments.len() {
            return None;
        }
        let mut params = Params::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Static(s) if s.eq_ignore_ascii_case(part) => {}
                Segment::Static(_) => return None,
                Segment::Param(key) => {
                    params.insert(key.clone(), (*part).to_owned());
                }
            }
        }
        Some(params)
    }

    fn build_path(&self, params: &Params) -> Result<String, ResolveError> {
        if self.segments.is_empty() {
            return Ok("/".to_owned());
        }
        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Static(s) => path.push_str(s),
                Segment::Param(key) => {
                    let value = params.get(key).filter(|v| !v.is_empty()).ok_or_else(|| {
                        ResolveError::MissingParam {
                            route: self.name.clone().unwrap_or_default(),
                            param: key.clone(),
                        }
                    })?;
                    path.push_str(value);
                }
            }
        }
        Ok(path)
    }
}

/// A route matched against a concrete path.
#[derive(Clone, Debug)]
pub struct ResolvedRoute<'a> {
    pub entry: &'a RouteEntry,
    /// Normalized concrete path (no trailing slash, no query).
    pub path: String,
    pub params: Params,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RouteTableError {
    #[error("duplicate route name: {0}")]
    DuplicateName(String),
    #[error("duplicate path {path:?} under {parent:?}")]
    DuplicatePath { parent: String, path: String },
    #[error("invalid route path {path:?}: {reason}")]
    InvalidPath { path: String, reason: &'static str },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no route named {0:?}")]
    UnknownName(String),
    #[error("route {route:?} requires param {param:?}")]
    MissingParam { route: String, param: String },
}

/// Immutable table of navigable routes.
#[derive(Clone, Debug)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Validate and compile a route tree.
    ///
    /// # Errors
    ///
    /// Returns an error when a name repeats anywhere in the tree, when two
    /// siblings declare the same path, or when a path is malformed.
    pub fn new(records: Vec<RouteRecord>) -> Result<Self, RouteTableError> {
        if let Some(record) = records.iter().find(|r| !r.path.starts_with('/')) {
            return Err(RouteTableError::InvalidPath {
                path: record.path.clone(),
                reason: "top-level paths must start with '/'",
            });
        }
        let mut entries = Vec::new();
        let mut names = HashSet::new();
        let root = Ancestry { pattern_segments: Vec::new(), layout: None, meta: RouteMeta::new() };
        compile_siblings(&records, "", &root, &mut names, &mut entries)?;
        Ok(Self { entries })
    }

    #[must_use]
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|e| e.name() == Some(name))
    }

    /// Match a concrete path. Query strings, fragments and trailing slashes
    /// are ignored, and static segments compare case-insensitively. The most
    /// specific match wins (most static segments), then declaration order.
    #[must_use]
    pub fn resolve_path(&self, path: &str) -> Option<ResolvedRoute<'_>> {
        let parts = split_path(strip_query(path));
        let mut best: Option<(usize, &RouteEntry, Params)> = None;
        for entry in &self.entries {
            let Some(params) = entry.match_segments(&parts) else {
                continue;
            };
            let score = entry.static_segments();
            if best.as_ref().map_or(true, |(s, _, _)| score > *s) {
                best = Some((score, entry, params));
            }
        }
        best.map(|(_, entry, params)| ResolvedRoute { entry, path: join_parts(&parts), params })
    }

    /// Resolve a named route, substituting `params` into its path.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::UnknownName`] for unknown names and
    /// [`ResolveError::MissingParam`] when a path param has no value.
    pub fn resolve_name(&self, name: &str, params: &Params) -> Result<ResolvedRoute<'_>, ResolveError> {
        let entry = self.by_name(name).ok_or_else(|| ResolveError::UnknownName(name.to_owned()))?;
        let path = entry.build_path(params)?;
        let params = entry
            .segments
            .iter()
            .filter_map(|s| match s {
                Segment::Param(key) => params.get(key).map(|v| (key.clone(), v.clone())),
                Segment::Static(_) => None,
            })
            .collect();
        Ok(ResolvedRoute { entry, path, params })
    }
}

// =============================================================================
// COMPILATION
// =============================================================================

struct Ancestry {
    pattern_segments: Vec<Segment>,
    layout: Option<Layout>,
    meta: RouteMeta,
}

fn compile_siblings(
    records: &[RouteRecord],
    parent_pattern: &str,
    ancestry: &Ancestry,
    names: &mut HashSet<String>,
    out: &mut Vec<RouteEntry>,
) -> Result<(), RouteTableError> {
    let mut sibling_paths = HashSet::new();
    for record in records {
        if !sibling_paths.insert(record.path.trim_end_matches('/')) {
            return Err(RouteTableError::DuplicatePath {
                parent: parent_pattern.to_owned(),
                path: record.path.clone(),
            });
        }
        compile_record(record, ancestry, names, out)?;
    }
    Ok(())
}

fn compile_record(
    record: &RouteRecord,
    ancestry: &Ancestry,
    names: &mut HashSet<String>,
    out: &mut Vec<RouteEntry>,
) -> Result<(), RouteTableError> {
    let own = parse_segments(&record.path)?;
    let segments = if record.path.starts_with('/') {
        own
    } else {
        let mut joined = ancestry.pattern_segments.clone();
        joined.extend(own);
        joined
    };

    let mut meta = ancestry.meta.clone();
    meta.extend(record.meta.iter().map(|(k, v)| (k.clone(), v.clone())));
    let layout = record.layout.or(ancestry.layout);
    let pattern = render_pattern(&segments);

    if let Some(name) = &record.name {
        if !names.insert(name.clone()) {
            return Err(RouteTableError::DuplicateName(name.clone()));
        }
    }

    if record.name.is_some() || record.view.is_some() {
        out.push(RouteEntry {
            name: record.name.clone(),
            pattern: pattern.clone(),
            segments: segments.clone(),
            view: record.view,
            layout,
            meta: meta.clone(),
            props: record.props,
        });
    }

    let child_ancestry = Ancestry { pattern_segments: segments, layout, meta };
    compile_siblings(&record.children, &pattern, &child_ancestry, names, out)
}

fn parse_segments(path: &str) -> Result<Vec<Segment>, RouteTableError> {
    split_path(path)
        .into_iter()
        .map(|part| match part.strip_prefix(':') {
            Some("") => Err(RouteTableError::InvalidPath { path: path.to_owned(), reason: "empty param name" }),
            Some(key) => Ok(Segment::Param(key.to_owned())),
            None => Ok(Segment::Static(part.to_owned())),
        })
        .collect()
}

fn render_pattern(segments: &[Segment]) -> String {
    if segments.is_empty() {
        return "/".to_owned();
    }
    segments
        .iter()
        .map(|s| match s {
            Segment::Static(s) => format!("/{s}"),
            Segment::Param(key) => format!("/:{key}"),
        })
        .collect()
}

fn strip_query(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or_default()
}

fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|p| !p.is_empty()).collect()
}

fn join_parts(parts: &[&str]) -> String {
    if parts.is_empty() {
        return "/".to_owned();
    }
    parts.iter().map(|p| format!("/{p}")).collect()
}
