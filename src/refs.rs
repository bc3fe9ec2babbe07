//! Git ref normalization.
//!
//! Every CI provider hands out the current ref in its own shape: fully
//! qualified (`refs/heads/main`, `refs/tags/1.0.0`), as a pull request
//! merge ref (`refs/pull/12/merge`) or as a bare provider-native name
//! (`main`). [`normalize`] maps all of them onto one canonical string.
//!
//! | raw                  | `include_prefix = false` | `include_prefix = true` |
//! |----------------------|--------------------------|-------------------------|
//! | `refs/heads/<name>`  | `<name>`                 | `refs/heads/<name>`     |
//! | `refs/tags/<name>`   | `<name>`                 | `refs/tags/<name>`      |
//! | `refs/pull/<n>/merge`| unchanged                | unchanged               |
//! | anything else        | unchanged                | unchanged               |
//!
//! Unknown shapes are never rejected. They pass through verbatim so the
//! caller still sees what the provider reported.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Prefix of fully qualified branch refs.
pub const BRANCH_PREFIX: &str = "refs/heads/";

/// Prefix of fully qualified tag refs.
pub const TAG_PREFIX: &str = "refs/tags/";

static PULL_REQUEST_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^refs/(?:pull|pull-requests)/\d+/(?:merge|head|from)$")
        .expect("pull request ref pattern is valid")
});

/// What a ref points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefKind {
    /// `refs/heads/<name>`.
    Branch,
    /// `refs/tags/<name>`.
    Tag,
    /// `refs/pull/<n>/merge` and friends.
    PullRequest,
    /// No recognized prefix.
    Other,
}

/// A parsed ref that remembers whether it was a branch, tag or pull request.
///
/// Two refs with the same short name but different kinds never compare
/// equal, so a tag `1.0` and a branch `1.0` stay distinguishable even when
/// [`normalize`] renders both as `1.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GitRef {
    kind: RefKind,
    name: String,
}

impl GitRef {
    /// Parse a raw ref. Returns `None` for the empty string.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }

        if PULL_REQUEST_REF.is_match(raw) {
            return Some(Self {
                kind: RefKind::PullRequest,
                name: raw.to_string(),
            });
        }

        if let Some(name) = raw.strip_prefix(BRANCH_PREFIX).filter(|n| !n.is_empty()) {
            return Some(Self::branch(name));
        }

        if let Some(name) = raw.strip_prefix(TAG_PREFIX).filter(|n| !n.is_empty()) {
            return Some(Self::tag(name));
        }

        Some(Self {
            kind: RefKind::Other,
            name: raw.to_string(),
        })
    }

    /// A branch ref with the given short name.
    pub fn branch(name: &str) -> Self {
        Self {
            kind: RefKind::Branch,
            name: name.to_string(),
        }
    }

    /// A tag ref with the given short name.
    pub fn tag(name: &str) -> Self {
        Self {
            kind: RefKind::Tag,
            name: name.to_string(),
        }
    }

    /// The kind of ref.
    pub fn kind(&self) -> RefKind {
        self.kind
    }

    /// The short name (for pull requests and unrecognized refs, the full ref).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check whether this is a pull request ref.
    pub fn is_pull_request(&self) -> bool {
        self.kind == RefKind::PullRequest
    }

    /// Render the ref, optionally keeping the `refs/heads/` or `refs/tags/` prefix.
    pub fn render(&self, include_prefix: bool) -> String {
        match (self.kind, include_prefix) {
            (RefKind::Branch, true) => format!("{}{}", BRANCH_PREFIX, self.name),
            (RefKind::Tag, true) => format!("{}{}", TAG_PREFIX, self.name),
            _ => self.name.clone(),
        }
    }
}

impl fmt::Display for GitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(true))
    }
}

/// Normalize a raw provider ref.
///
/// `None` and the empty string normalize to `None`; nothing is fabricated.
/// With `include_prefix` the raw value is kept as-is. Without it, branch
/// and tag prefixes are stripped until none remains, so normalizing an
/// already normalized ref returns it unchanged. Pull request refs keep
/// their full shape either way.
///
/// # Example
///
/// ```
/// use buildagent::refs::normalize;
///
/// assert_eq!(normalize(Some("refs/heads/main"), false).as_deref(), Some("main"));
/// assert_eq!(normalize(Some("refs/heads/main"), true).as_deref(), Some("refs/heads/main"));
/// assert_eq!(normalize(Some("refs/pull/1/merge"), false).as_deref(), Some("refs/pull/1/merge"));
/// assert_eq!(normalize(None, false), None);
/// ```
pub fn normalize(raw: Option<&str>, include_prefix: bool) -> Option<String> {
    let raw = raw.filter(|r| !r.is_empty())?;

    if include_prefix {
        return Some(raw.to_string());
    }

    let mut current = GitRef::parse(raw)?;
    loop {
        match current.kind {
            RefKind::Branch | RefKind::Tag => match GitRef::parse(&current.name) {
                Some(inner) if matches!(inner.kind, RefKind::Branch | RefKind::Tag) => {
                    current = inner;
                }
                _ => return Some(current.name),
            },
            RefKind::PullRequest | RefKind::Other => return Some(current.name),
        }
    }
}
