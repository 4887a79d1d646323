//! Process-wide string interner for action symbols.
//!
//! Symbols are compared on every `submit`, so they are interned once and
//! compared as integer keys afterwards.

use std::sync::LazyLock;

use lasso::{Spur, ThreadedRodeo};

/// Interned string key.
pub type IStr = Spur;

static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::new);

/// Intern a string, returning its key (existing key if already interned).
pub fn intern(s: &str) -> IStr {
    INTERNER.get_or_intern(s)
}

/// Resolve a key back to its string.
///
/// Keys only come from [`intern`] and the interner is never cleared, so this
/// cannot miss.
pub fn resolve(key: IStr) -> &'static str {
    INTERNER.resolve(&key)
}
