//! Identifier management using string interning.
//!
//! Node and cluster identifiers are compared and hashed constantly while a
//! graph is built and validated, so they are interned once and passed around
//! as a `Copy` symbol. See [`Id`].

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner shared by every [`Id`].
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock")
}

/// Interned identifier for graph nodes and clusters.
///
/// # Examples
///
/// ```
/// use archsketch_core::identifier::Id;
///
/// let services = Id::new("services");
/// assert_eq!(services, "services");
///
/// let cluster = Id::new("mobile").with_prefix("cluster_");
/// assert_eq!(cluster, "cluster_mobile");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from `&str`, interning it on first use.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Returns a new identifier made of `prefix` followed by this identifier.
    ///
    /// Graphviz only treats a subgraph as a cluster when its name starts with
    /// `cluster`, which is what this is used for.
    pub fn with_prefix(&self, prefix: &str) -> Self {
        let mut interner = interner();
        let name = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        let prefixed = format!("{prefix}{name}");
        Self(interner.get_or_intern(prefixed))
    }
}

/// Returns `true` if `text` can be written to DOT without quoting.
///
/// DOT accepts unquoted alphanumeric identifiers (with underscores) that do
/// not start with a digit.
///
/// ```
/// use archsketch_core::identifier::is_plain_identifier;
///
/// assert!(is_plain_identifier("local_storage"));
/// assert!(!is_plain_identifier("local storage"));
/// assert!(!is_plain_identifier("9lives"));
/// ```
pub fn is_plain_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let str_value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        write!(f, "{str_value}")
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        let interner = interner();
        let self_str = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        self_str == other
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
