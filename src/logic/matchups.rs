//! Doubles matchup generation: randomized search that spreads partners and opponents
//! across rounds and rotates byes.

use crate::logic::history::History;
use crate::logic::scoring::{GroupScorer, WeightedScorer};
use crate::models::{
    CourtMatch, CourtPolicy, GameMatch, Player, PlayerId, Round, Schedule, ScheduleConfig,
    SplitStrategy, Team,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::cmp::Reverse;

const PLAYERS_PER_MATCH: usize = 4;

/// Builds rounds of doubles matches for one session.
///
/// Each call to [`MatchupGenerator::generate`] starts from an empty [`History`], so a generator
/// can be reused and shared across threads.
#[derive(Clone, Debug)]
pub struct MatchupGenerator<S = WeightedScorer> {
    config: ScheduleConfig,
    scorer: S,
}

impl MatchupGenerator<WeightedScorer> {
    pub fn new(config: ScheduleConfig) -> Self {
        Self::with_scorer(config, WeightedScorer::default())
    }
}

impl<S: GroupScorer> MatchupGenerator<S> {
    pub fn with_scorer(config: ScheduleConfig, scorer: S) -> Self {
        Self { config, scorer }
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Generate `num_rounds` rounds for the given players.
    ///
    /// An empty player list yields no rounds. Fewer than four active players yields rounds with
    /// only a bye entry.
    pub fn generate<R: Rng + ?Sized>(&self, players: &[Player], rng: &mut R) -> Vec<Round> {
        if players.is_empty() {
            return Vec::new();
        }
        let mut history = History::new();
        (1..=self.config.num_rounds)
            .map(|round| self.generate_round(round, players, &mut history, rng))
            .collect()
    }

    /// Generate a single round and record its matches into `history`.
    ///
    /// 1. Keep players still present in this round.
    /// 2. Shuffle; with a rest rule, put the longest-waiting players first (stable, so ties keep
    ///    the shuffled order).
    /// 3. Fill courts with the best group found by the trial search until fewer than four
    ///    players remain or the court cap is hit.
    /// 4. Everyone left over sits out.
    pub fn generate_round<R: Rng + ?Sized>(
        &self,
        round: u32,
        players: &[Player],
        history: &mut History,
        rng: &mut R,
    ) -> Round {
        let mut pool: Vec<PlayerId> = players
            .iter()
            .filter(|p| p.is_active_in_round(round))
            .map(|p| p.id)
            .collect();
        pool.shuffle(rng);
        if self.config.min_rest > 0 {
            pool.sort_by_key(|&id| Reverse(history.rounds_waited(id, round).unwrap_or(u32::MAX)));
        }

        let num_courts = self.config.num_courts.max(1);
        let max_matches = match self.config.court_policy {
            CourtPolicy::SingleBatch => self.config.num_courts as usize,
            CourtPolicy::CycleBatches => usize::MAX,
        };

        let mut matches = Vec::new();
        while pool.len() >= PLAYERS_PER_MATCH && matches.len() < max_matches {
            let Some(game) = self.best_group(&pool, history, round, rng) else {
                break;
            };
            pool.retain(|&id| !game.contains(id));
            history.record(&game, round);

            let slot = matches.len() as u32;
            let court = slot % num_courts + 1;
            let batch = slot / num_courts + 1;
            log::debug!("Round {} court {} (batch {}): {:?}", round, court, batch, game);
            matches.push(CourtMatch { court, batch, game });
        }

        Round {
            number: round,
            matches,
            bye: pool,
        }
    }

    /// Bounded randomized search over groups of four from `pool`.
    ///
    /// Trial 0 takes the head of the pool (which carries the rest ordering); later trials take a
    /// random sample. The lowest score wins and the first one found keeps ties.
    fn best_group<R: Rng + ?Sized>(
        &self,
        pool: &[PlayerId],
        history: &History,
        round: u32,
        rng: &mut R,
    ) -> Option<GameMatch> {
        if pool.len() < PLAYERS_PER_MATCH {
            return None;
        }
        let mut scratch = pool.to_vec();
        let mut best: Option<(u32, GameMatch)> = None;

        for trial in 0..self.config.trials.max(1) {
            let group = if trial == 0 {
                [pool[0], pool[1], pool[2], pool[3]]
            } else {
                let (picked, _) = scratch.partial_shuffle(rng, PLAYERS_PER_MATCH);
                [picked[0], picked[1], picked[2], picked[3]]
            };
            for game in splits(group, self.config.split) {
                let score = self
                    .scorer
                    .score(&game, history, round, self.config.min_rest);
                if best.map_or(true, |(s, _)| score < s) {
                    best = Some((score, game));
                }
            }
        }
        best.map(|(_, game)| game)
    }
}

/// Candidate matches for a group of four under the given split strategy.
fn splits(group: [PlayerId; 4], strategy: SplitStrategy) -> Vec<GameMatch> {
    let [a, b, c, d] = group;
    let ab_cd = GameMatch::new(Team::new(a, b), Team::new(c, d));
    match strategy {
        SplitStrategy::Induced => vec![ab_cd],
        SplitStrategy::AllSplits => vec![
            ab_cd,
            GameMatch::new(Team::new(a, c), Team::new(b, d)),
            GameMatch::new(Team::new(a, d), Team::new(b, c)),
        ],
    }
}

/// Generate a schedule with the default scorer and a thread-local RNG.
pub fn generate_schedule(players: &[Player], config: ScheduleConfig) -> Schedule {
    let rounds = MatchupGenerator::new(config).generate(players, &mut rand::thread_rng());
    finish(config, rounds, players.len())
}

/// Same as [`generate_schedule`] but reproducible for a given seed.
pub fn generate_schedule_seeded(players: &[Player], config: ScheduleConfig, seed: u64) -> Schedule {
    let mut rng = StdRng::seed_from_u64(seed);
    let rounds = MatchupGenerator::new(config).generate(players, &mut rng);
    finish(config, rounds, players.len())
}

fn finish(config: ScheduleConfig, rounds: Vec<Round>, player_count: usize) -> Schedule {
    let schedule = Schedule::new(config, rounds);
    log::info!(
        "Generated {} round(s), {} match(es) for {} player(s) on {} court(s)",
        schedule.rounds.len(),
        schedule.match_count(),
        player_count,
        config.num_courts
    );
    schedule
}
