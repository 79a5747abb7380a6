//! Debug-string rendering shared by the collection `Display` impls.
//!
//! The contract is type name + current size + a truncation marker past the
//! preview budget; punctuation is a display convenience.

use std::fmt;

/// Elements shown before the output truncates with `...`
pub(crate) const PREVIEW_LIMIT: usize = 8;

pub(crate) fn write_preview(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    len: usize,
    items: impl Iterator<Item = impl fmt::Debug>,
) -> fmt::Result {
    write!(f, "{}(len={})[", name, len)?;
    for (i, item) in items.take(PREVIEW_LIMIT).enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{:?}", item)?;
    }
    if len > PREVIEW_LIMIT {
        write!(f, ", ...")?;
    }
    write!(f, "]")
}

pub(crate) fn write_entry_preview<K: fmt::Debug, V: fmt::Debug>(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    len: usize,
    entries: impl Iterator<Item = (K, V)>,
) -> fmt::Result {
    write!(f, "{}(len={}){{", name, len)?;
    for (i, (key, value)) in entries.take(PREVIEW_LIMIT).enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{:?}: {:?}", key, value)?;
    }
    if len > PREVIEW_LIMIT {
        write!(f, ", ...")?;
    }
    write!(f, "}}")
}
