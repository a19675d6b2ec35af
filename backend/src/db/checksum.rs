//! Fingerprints for schedule-generation deduplication.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use super::repository::GenerationKey;
use crate::models::{Gender, SportId};

/// Derive the stored key for a caller-supplied idempotency key.
///
/// The sport and division are folded in, so the same caller key used for two
/// different divisions never collides. Fields are length-prefixed to keep
/// `("ab", "c")` and `("a", "bc")` apart.
pub fn generation_key(sport_id: SportId, division: &str, idempotency_key: &str) -> GenerationKey {
    let mut hasher = Sha256::new();
    hasher.update(sport_id.value().to_be_bytes());
    for part in [division, idempotency_key] {
        update_field(&mut hasher, part);
    }
    GenerationKey(hex::encode(hasher.finalize()))
}

fn update_field(hasher: &mut Sha256, part: &str) {
    hasher.update((part.len() as u64).to_be_bytes());
    hasher.update(part.as_bytes());
}

/// Fingerprint of the generation parameters that shape a season.
///
/// A key replayed with a different fingerprint is a different request under
/// a reused key. An absent gender filter hashes as `"*"`, which no gender
/// category serializes to.
pub fn request_fingerprint(
    gender: Option<Gender>,
    start_date: DateTime<Utc>,
    games_per_week: usize,
    venue: &str,
) -> String {
    let mut hasher = Sha256::new();
    update_field(&mut hasher, gender.map_or("*", |g| g.as_str()));
    update_field(&mut hasher, &start_date.to_rfc3339());
    hasher.update((games_per_week as u64).to_be_bytes());
    update_field(&mut hasher, venue);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn july_first() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_key_consistency() {
        let a = generation_key(SportId(1), "competitive", "req-1");
        let b = generation_key(SportId(1), "competitive", "req-1");
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 64);
    }

    #[test]
    fn test_key_depends_on_every_field() {
        let base = generation_key(SportId(1), "competitive", "req-1");
        assert_ne!(base, generation_key(SportId(2), "competitive", "req-1"));
        assert_ne!(base, generation_key(SportId(1), "recreational", "req-1"));
        assert_ne!(base, generation_key(SportId(1), "competitive", "req-2"));
    }

    #[test]
    fn test_field_boundaries_do_not_collide() {
        assert_ne!(
            generation_key(SportId(1), "ab", "c"),
            generation_key(SportId(1), "a", "bc")
        );
    }

    #[test]
    fn test_fingerprint_tracks_gender_filter() {
        let any = request_fingerprint(None, july_first(), 2, "TBD");
        let men = request_fingerprint(Some(Gender::Men), july_first(), 2, "TBD");
        let women = request_fingerprint(Some(Gender::Women), july_first(), 2, "TBD");
        assert_ne!(any, men);
        assert_ne!(men, women);
        assert_eq!(men, request_fingerprint(Some(Gender::Men), july_first(), 2, "TBD"));
    }

    #[test]
    fn test_fingerprint_tracks_season_shape() {
        let base = request_fingerprint(None, july_first(), 2, "TBD");
        let later = Utc.with_ymd_and_hms(2025, 7, 8, 0, 0, 0).unwrap();
        assert_ne!(base, request_fingerprint(None, later, 2, "TBD"));
        assert_ne!(base, request_fingerprint(None, july_first(), 3, "TBD"));
        assert_ne!(base, request_fingerprint(None, july_first(), 2, "Gym B"));
    }
}
