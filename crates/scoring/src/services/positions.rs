use crate::models::{RaceResult, cmp_corrected};

/// Re-ranks one (race, class) group by corrected time.
///
/// Results without a corrected time go last. Equal corrected times keep
/// their relative order in `group`, so recomputing an unchanged group never
/// moves anyone. Returns the group size.
pub fn recompute_positions<'a>(group: impl IntoIterator<Item = &'a mut RaceResult>) -> usize {
    let mut entries: Vec<&mut RaceResult> = group.into_iter().collect();
    debug_assert!(
        entries
            .windows(2)
            .all(|w| w[0].race_id == w[1].race_id && w[0].class_id == w[1].class_id),
        "recompute_positions called with results from several groups"
    );

    entries.sort_by(|a, b| cmp_corrected(a.corrected_time, b.corrected_time));
    for (idx, result) in entries.iter_mut().enumerate() {
        result.position = idx as u32 + 1;
    }
    entries.len()
}

/// True when the positions in `group` are exactly `1..=n` and never go
/// backwards in corrected time.
pub fn positions_are_consistent<'a>(group: impl IntoIterator<Item = &'a RaceResult>) -> bool {
    let mut ranked: Vec<&RaceResult> = group.into_iter().collect();
    ranked.sort_by_key(|r| r.position);

    let contiguous = ranked
        .iter()
        .enumerate()
        .all(|(idx, r)| r.position as usize == idx + 1);
    let ordered = ranked
        .windows(2)
        .all(|w| cmp_corrected(w[0].corrected_time, w[1].corrected_time).is_le());

    contiguous && ordered
}
