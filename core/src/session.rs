use chrono::{DateTime, TimeDelta, Utc};
use core::hash::Hash;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SessionPolicy {
    /// Upper bound on concurrently tracked games; the least recently active one makes room.
    pub max_sessions: usize,
    /// Games untouched for longer than this are dropped.
    pub idle_timeout: TimeDelta,
}

impl SessionPolicy {
    pub const DEFAULT_MAX_SESSIONS: usize = 1024;
    pub const DEFAULT_IDLE_TIMEOUT_SECS: i64 = 30 * 60;
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            max_sessions: Self::DEFAULT_MAX_SESSIONS,
            idle_timeout: TimeDelta::seconds(Self::DEFAULT_IDLE_TIMEOUT_SECS),
        }
    }
}

/// One player's game as owned by a host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub engine: FloodEngine,
    pub difficulty: Difficulty,
    pub seed: u64,
    pub started_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl Session {
    fn new(difficulty: Difficulty, seed: u64, now: DateTime<Utc>) -> Self {
        Self {
            engine: FloodEngine::new_game(difficulty, seed),
            difficulty,
            seed,
            started_at: now,
            last_active_at: now,
            ended_at: None,
        }
    }

    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> u32 {
        (self.ended_at.unwrap_or(now) - self.started_at)
            .num_seconds()
            .clamp(0, u32::MAX.into()) as u32
    }

    fn is_idle(&self, now: DateTime<Utc>, timeout: TimeDelta) -> bool {
        now - self.last_active_at > timeout
    }
}

/// Independent games keyed by player or session id.
///
/// Starting a game for a key replaces whatever that key had before.
#[derive(Clone, Debug)]
pub struct SessionStore<K> {
    sessions: HashMap<K, Session>,
    policy: SessionPolicy,
}

impl<K: Eq + Hash + Clone + core::fmt::Debug> SessionStore<K> {
    pub fn new(policy: SessionPolicy) -> Self {
        Self {
            sessions: HashMap::new(),
            policy,
        }
    }

    pub fn policy(&self) -> SessionPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn get(&self, key: &K) -> Option<&Session> {
        self.sessions.get(key)
    }

    pub fn start(
        &mut self,
        key: K,
        difficulty: Difficulty,
        seed: u64,
        now: DateTime<Utc>,
    ) -> &Session {
        self.evict_idle(now);
        if !self.sessions.contains_key(&key) {
            self.make_room();
        }

        log::debug!("starting {difficulty} game for {key:?} (seed {seed})");
        let session = Session::new(difficulty, seed, now);
        self.sessions.insert(key.clone(), session);
        &self.sessions[&key]
    }

    /// Forwards a pick to the key's engine, stamping activity and the end time when it finishes.
    pub fn choose_color(&mut self, key: &K, color: Color, now: DateTime<Utc>) -> Result<MoveOutcome> {
        let session = self
            .sessions
            .get_mut(key)
            .ok_or(GameError::UnknownSession)?;

        let outcome = session.engine.choose_color(color);
        if outcome.has_update() {
            session.last_active_at = now;
        }
        if outcome.is_terminal() && session.ended_at.is_none() {
            session.ended_at = Some(now);
        }
        Ok(outcome)
    }

    /// Discards a game, as when the player gives up or leaves to the menu.
    pub fn end(&mut self, key: &K) -> Option<Session> {
        let removed = self.sessions.remove(key);
        if removed.is_some() {
            log::debug!("ended session {key:?}");
        }
        removed
    }

    pub fn evict_idle(&mut self, now: DateTime<Utc>) -> usize {
        let timeout = self.policy.idle_timeout;
        let before = self.sessions.len();
        self.sessions.retain(|key, session| {
            let idle = session.is_idle(now, timeout);
            if idle {
                log::debug!("evicting idle session {key:?}");
            }
            !idle
        });
        before - self.sessions.len()
    }

    fn make_room(&mut self) {
        let max_sessions = self.policy.max_sessions.max(1);
        while self.sessions.len() >= max_sessions {
            let Some(oldest) = self
                .sessions
                .iter()
                .min_by_key(|(_, session)| session.last_active_at)
                .map(|(key, _)| key.clone())
            else {
                break;
            };
            log::debug!("session store full, evicting {oldest:?}");
            self.sessions.remove(&oldest);
        }
    }
}

impl<K: Eq + Hash + Clone + core::fmt::Debug> Default for SessionStore<K> {
    fn default() -> Self {
        Self::new(SessionPolicy::default())
    }
}
