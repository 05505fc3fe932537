//! Global Match Registry
//!
//! Process-wide store for the matches driven through the JSON API.
//! Each access takes the lock once, so commands on one match never
//! interleave.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use uuid::Uuid;

use crate::engine::KabaddiMatch;
use crate::error::{MatchError, Result};

/// 진행 중인 경기 목록
pub static MATCHES: Lazy<RwLock<HashMap<Uuid, KabaddiMatch>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

fn parse_id(match_id: &str) -> Result<Uuid> {
    Uuid::parse_str(match_id.trim()).map_err(|_| MatchError::MatchNotFound(match_id.to_string()))
}

/// Register a match under a fresh id.
pub fn insert(m: KabaddiMatch) -> Uuid {
    let id = Uuid::new_v4();
    MATCHES.write().unwrap_or_else(PoisonError::into_inner).insert(id, m);
    id
}

/// Read-only access to a registered match.
pub fn with_match<T>(match_id: &str, f: impl FnOnce(&KabaddiMatch) -> T) -> Result<T> {
    let id = parse_id(match_id)?;
    let guard = MATCHES.read().unwrap_or_else(PoisonError::into_inner);
    let m = guard.get(&id).ok_or_else(|| MatchError::MatchNotFound(match_id.to_string()))?;
    Ok(f(m))
}

pub fn with_match_mut<T>(
    match_id: &str,
    f: impl FnOnce(&mut KabaddiMatch) -> Result<T>,
) -> Result<T> {
    let id = parse_id(match_id)?;
    let mut guard = MATCHES.write().unwrap_or_else(PoisonError::into_inner);
    let m = guard.get_mut(&id).ok_or_else(|| MatchError::MatchNotFound(match_id.to_string()))?;
    f(m)
}

pub fn remove(match_id: &str) -> Result<KabaddiMatch> {
    let id = parse_id(match_id)?;
    MATCHES
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .remove(&id)
        .ok_or_else(|| MatchError::MatchNotFound(match_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::new_match;

    #[test]
    fn test_insert_access_remove() {
        let id = insert(new_match()).to_string();

        let phase = with_match(&id, |m| m.phase()).unwrap();
        assert_eq!(phase, crate::engine::MatchPhase::NotStarted);

        with_match_mut(&id, |m| m.start_match()).unwrap();
        assert!(with_match(&id, |m| m.phase().is_live()).unwrap());

        assert!(remove(&id).is_ok());
        assert!(matches!(with_match(&id, |_| ()), Err(MatchError::MatchNotFound(_))));
    }

    #[test]
    fn test_bad_id() {
        assert!(matches!(with_match("not-a-uuid", |_| ()), Err(MatchError::MatchNotFound(_))));
        assert!(matches!(remove(&Uuid::new_v4().to_string()), Err(MatchError::MatchNotFound(_))));
    }

    #[test]
    fn test_rejected_command_keeps_match() {
        let id = insert(new_match()).to_string();
        let err = with_match_mut(&id, |m| m.request_halftime()).unwrap_err();
        assert!(matches!(err, MatchError::InvalidTransition(_)));
        assert!(with_match(&id, |m| m.phase()).is_ok());
        remove(&id).unwrap();
    }
}
