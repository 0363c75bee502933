//! Server-side register of live sign-ins.
//!
//! The session cookie only carries an opaque token. The user a token stands
//! for lives here, so revoking the entry invalidates every copy of the
//! cookie, including ones captured before logout.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use mockable::{Clock, DefaultClock};
use tracing::debug;
use uuid::Uuid;

use crate::domain::UserId;
use crate::inbound::http::session_config::DEFAULT_SESSION_TTL_HOURS;

#[derive(Debug, Clone, Copy)]
struct Entry {
    user_id: UserId,
    expires_at: DateTime<Utc>,
}

/// Tokens issued at sign-in, each bound to one user until it expires or is
/// revoked. Clones share the same table.
#[derive(Clone)]
pub struct SessionRegistry {
    entries: Arc<Mutex<HashMap<Uuid, Entry>>>,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl SessionRegistry {
    /// Registry whose tokens live for `ttl` after issue.
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::default(),
            ttl: TimeDelta::from_std(ttl).unwrap_or_else(|_| TimeDelta::weeks(52)),
            clock,
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<Uuid, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mint a token for `user_id`, dropping any expired entries first.
    pub fn issue(&self, user_id: UserId) -> Uuid {
        let now = self.clock.utc();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let token = Uuid::new_v4();

        let mut entries = self.entries();
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            token,
            Entry {
                user_id,
                expires_at,
            },
        );
        token
    }

    /// The user bound to `token`, if it is live.
    pub fn resolve(&self, token: &Uuid) -> Option<UserId> {
        let now = self.clock.utc();
        let mut entries = self.entries();
        let entry = *entries.get(token)?;
        if entry.expires_at <= now {
            entries.remove(token);
            debug!(%token, "session token expired");
            return None;
        }
        Some(entry.user_id)
    }

    /// Forget `token`; later requests presenting it are anonymous.
    pub fn revoke(&self, token: &Uuid) {
        self.entries().remove(token);
    }

    /// Number of tokens currently held, expired or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Whether no tokens are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(
            Duration::from_secs(DEFAULT_SESSION_TTL_HOURS * 3600),
            Arc::new(DefaultClock),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mockable::MockClock;
    use rstest::rstest;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0)
            .single()
            .expect("fixture time")
    }

    fn clock_at(times: Vec<DateTime<Utc>>) -> Arc<dyn Clock> {
        let mut clock = MockClock::new();
        let mut times = times.into_iter();
        clock
            .expect_utc()
            .returning(move || times.next().expect("clock reading"));
        Arc::new(clock)
    }

    fn user(raw: i64) -> UserId {
        UserId::new(raw).expect("fixture id")
    }

    #[rstest]
    fn issued_token_resolves_until_revoked() {
        let registry = SessionRegistry::default();
        let token = registry.issue(user(7));

        assert_eq!(registry.resolve(&token), Some(user(7)));
        registry.revoke(&token);
        assert_eq!(registry.resolve(&token), None);
        assert!(registry.is_empty());
    }

    #[rstest]
    fn unknown_token_is_unresolved() {
        let registry = SessionRegistry::default();
        registry.issue(user(1));

        assert_eq!(registry.resolve(&Uuid::new_v4()), None);
    }

    #[rstest]
    fn tokens_are_independent() {
        let registry = SessionRegistry::default();
        let first = registry.issue(user(1));
        let second = registry.issue(user(1));

        registry.revoke(&first);
        assert_eq!(registry.resolve(&second), Some(user(1)));
    }

    #[rstest]
    #[case(TimeDelta::minutes(59), Some(7))]
    #[case(TimeDelta::hours(1), None)]
    #[case(TimeDelta::hours(3), None)]
    fn expiry_follows_ttl(#[case] elapsed: TimeDelta, #[case] expected: Option<i64>) {
        let registry = SessionRegistry::new(
            Duration::from_secs(3600),
            clock_at(vec![start(), start() + elapsed]),
        );
        let token = registry.issue(user(7));

        assert_eq!(registry.resolve(&token), expected.map(user));
    }

    #[rstest]
    fn issuing_prunes_expired_tokens() {
        let registry = SessionRegistry::new(
            Duration::from_secs(3600),
            clock_at(vec![start(), start() + TimeDelta::hours(2)]),
        );
        registry.issue(user(1));
        registry.issue(user(2));

        assert_eq!(registry.len(), 1);
    }
}
