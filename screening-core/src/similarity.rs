use crate::distance::edit_distance;
use crate::normalize::normalize;

/// Similarity of two raw names as an integer percentage.
///
/// Both names are normalized first. A blank key never matches, not even
/// another blank key. Otherwise the score is `(1 - distance / max_len) * 100`
/// rounded half-up.
pub fn similarity(s1: &str, s2: &str) -> u8 {
    let key1 = normalize(s1);
    let key2 = normalize(s2);
    key_similarity(&key1, &key2)
}

/// Same as [`similarity`] for keys that are already normalized.
pub(crate) fn key_similarity(key1: &str, key2: &str) -> u8 {
    if key1.is_empty() || key2.is_empty() {
        return 0;
    }
    if key1 == key2 {
        return 100;
    }

    let distance = edit_distance(key1, key2);
    let max_len = key1.chars().count().max(key2.chars().count());
    percentage(distance, max_len)
}

/// `round((1 - distance / max_len) * 100)` with halves rounded up, done in
/// integer arithmetic so borderline scores never drift.
fn percentage(distance: usize, max_len: usize) -> u8 {
    let matched = max_len.saturating_sub(distance);
    let score = (200 * matched + max_len) / (2 * max_len);
    score.min(100) as u8
}
