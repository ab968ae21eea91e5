//! Talent exclusion check

use crate::catalog::{Talent, TalentCatalog, TalentId};

/// Check talent exclusion (bidirectional).
///
/// Returns the first owned talent that either lists `candidate` in its
/// exclude list or is listed in `candidate`'s. Owned ids missing from the
/// catalog can only conflict through `candidate`'s own list.
pub fn check_exclusion(
    candidate: &Talent,
    owned: &[TalentId],
    catalog: &TalentCatalog,
) -> Option<TalentId> {
    owned.iter().copied().find(|&id| {
        candidate.exclude.contains(&id)
            || catalog
                .get(id)
                .is_some_and(|talent| talent.exclude.contains(&candidate.id))
    })
}
