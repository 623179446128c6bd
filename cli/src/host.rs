use chrono::{DateTime, Utc};
use floodfill_core as game;
use floodfill_protocol::{GameResultSubmission, ResultAck, UserProfile, balance_after};
use std::collections::HashMap;

pub(crate) const WINS_PER_LEVEL: u32 = 5;

pub(crate) fn level_for_wins(wins: u32) -> u32 {
    1 + wins / WINS_PER_LEVEL
}

/// Receives terminal results for bookkeeping.
pub(crate) trait ResultSink {
    fn submit(&mut self, submission: &GameResultSubmission) -> anyhow::Result<ResultAck>;
}

/// Non-persistent profile store acting as both profile lookup and result sink.
#[derive(Debug, Default)]
pub(crate) struct MemoryLedger {
    profiles: HashMap<i64, UserProfile>,
    starting_balance: f64,
}

impl MemoryLedger {
    pub fn new(starting_balance: f64) -> Self {
        Self {
            profiles: HashMap::new(),
            starting_balance,
        }
    }

    pub fn profile(&mut self, user_id: i64, name: &str) -> &UserProfile {
        self.entry(user_id, name)
    }

    fn entry(&mut self, user_id: i64, name: &str) -> &mut UserProfile {
        let starting_balance = self.starting_balance;
        self.profiles.entry(user_id).or_insert_with(|| {
            log::debug!("creating profile for user {user_id}");
            UserProfile {
                balance: starting_balance,
                ..UserProfile::new(user_id, name)
            }
        })
    }
}

impl ResultSink for MemoryLedger {
    fn submit(&mut self, submission: &GameResultSubmission) -> anyhow::Result<ResultAck> {
        let profile = self.entry(submission.user_id, "Player");
        profile.balance = balance_after(profile.balance, submission.score);
        if submission.won {
            profile.wins += 1;
        }
        profile.level = level_for_wins(profile.wins);

        log::debug!(
            "user {}: score {} -> balance {:.4}, level {}",
            profile.id,
            submission.score,
            profile.balance,
            profile.level
        );
        Ok(ResultAck::accepted(
            submission.won,
            profile.balance,
            profile.level,
        ))
    }
}

pub(crate) fn submission_for(user_id: i64, session: &game::Session) -> Option<GameResultSubmission> {
    let engine = &session.engine;
    let score = engine.score()?;
    Some(GameResultSubmission {
        user_id,
        score: score.value(),
        won: engine.state() == game::EngineState::Won,
        difficulty: session.difficulty.name().to_owned(),
        filled_percent: engine.view().filled_percent(),
    })
}

/// Owns one game per user and forwards finished games to the sink.
#[derive(Debug)]
pub(crate) struct Host<S> {
    store: game::SessionStore<i64>,
    sink: S,
}

impl<S: ResultSink> Host<S> {
    pub fn new(policy: game::SessionPolicy, sink: S) -> Self {
        Self {
            store: game::SessionStore::new(policy),
            sink,
        }
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn session(&self, user_id: i64) -> Option<&game::Session> {
        self.store.get(&user_id)
    }

    pub fn start(
        &mut self,
        user_id: i64,
        difficulty: game::Difficulty,
        seed: u64,
        now: DateTime<Utc>,
    ) -> &game::Session {
        self.store.start(user_id, difficulty, seed, now)
    }

    /// Applies a pick and, when it ends the game, submits the result exactly once.
    pub fn pick(
        &mut self,
        user_id: i64,
        color: game::Color,
        now: DateTime<Utc>,
    ) -> anyhow::Result<(game::MoveOutcome, Option<ResultAck>)> {
        let outcome = self.store.choose_color(&user_id, color, now)?;
        if !outcome.is_terminal() {
            return Ok((outcome, None));
        }

        let submission = self
            .store
            .get(&user_id)
            .and_then(|session| submission_for(user_id, session))
            .ok_or(game::GameError::UnknownSession)?;
        let ack = self.sink.submit(&submission)?;
        Ok((outcome, Some(ack)))
    }

    pub fn leave(&mut self, user_id: i64) -> Option<game::Session> {
        self.store.end(&user_id)
    }
}
