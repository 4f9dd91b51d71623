//! Name ordering.

use std::cmp::Ordering;

use super::Name;
use crate::locale::Locale;

/// Collated comparison key for a name.
///
/// Field order is the comparison order: family, then given, then suffix.
/// Particles do not take part in ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NameSortKey {
    pub family: String,
    pub given: String,
    pub suffix: String,
}

impl Name {
    /// Build the collated sort key for this name. Literal names sort by
    /// their whole text in the family position.
    pub fn sort_key<L: Locale + ?Sized>(&self, locale: &L) -> NameSortKey {
        let collate = |part: Option<&str>| part.map(|s| locale.collate(s)).unwrap_or_default();
        match self {
            Name::Literal(text) => NameSortKey {
                family: locale.collate(text),
                given: String::new(),
                suffix: String::new(),
            },
            Name::Structured(p) => NameSortKey {
                family: locale.collate(&p.family),
                given: collate(p.given.as_deref()),
                suffix: collate(p.suffix.as_deref()),
            },
        }
    }
}

/// Total order over names: family, then given, then suffix, each collated.
pub fn compare<L: Locale + ?Sized>(a: &Name, b: &Name, locale: &L) -> Ordering {
    a.sort_key(locale).cmp(&b.sort_key(locale))
}

/// Stable sort of names. Names with equal keys keep their relative order.
pub fn sort_names<L: Locale + ?Sized>(names: &mut [Name], locale: &L) {
    names.sort_by_cached_key(|name| name.sort_key(locale));
}

/// Stable sort of arbitrary items by a name they carry.
pub fn sort_by_name<T, L, F>(items: &mut [T], name_of: F, locale: &L)
where
    L: Locale + ?Sized,
    F: Fn(&T) -> &Name,
{
    items.sort_by_cached_key(|item| name_of(item).sort_key(locale));
}
