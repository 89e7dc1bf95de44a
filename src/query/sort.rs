use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::Sort;
use crate::model::Recipe;

/// Return a sorted copy of `recipes`. Both orderings are stable.
pub fn apply_sort<'a>(recipes: &[&'a Recipe], sort: Sort) -> Vec<&'a Recipe> {
    let mut sorted = recipes.to_vec();
    match sort {
        Sort::None => {}
        Sort::Name => sorted.sort_by(|a, b| locale_cmp(&a.title, &b.title)),
        Sort::Time => sorted.sort_by_key(|r| r.time),
    }
    sorted
}

/// Human-oriented string ordering, close to a root-locale collator.
///
/// Strings compare in three passes, each only breaking ties left by the one
/// before: base letters ignoring accents and case, then accents (unaccented
/// first), then case (lowercase first).
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| accented(a).cmp(accented(b)))
        .then_with(|| {
            a.nfd()
                .zip(b.nfd())
                .find(|(x, y)| x != y)
                .map(|(x, y)| x.is_uppercase().cmp(&y.is_uppercase()))
                .unwrap_or(Ordering::Equal)
        })
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn accented(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}
