use std::time::Duration;

use log::{debug, info, warn};
use web_time::Instant;

use crate::ai::heuristic::evaluate;
use crate::ai::movegen::legal_actions;
use crate::ai::tt::{Bound, TableKey, TranspositionTable};
use crate::config::SearchConfig;
use crate::game::apply_action;
use crate::types::{Action, Color, GameState};

const MIN_SCORE: i32 = i32::MIN;
const MAX_SCORE: i32 = i32::MAX;

#[derive(Debug, Clone, Copy, PartialEq)]
enum SearchResult<T> {
    Complete(T),
    TimedOut,
}

/// Counters collected during one search call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub tt_hits: u64,
    /// Deepest iteration that finished before the deadline.
    pub completed_depth: u8,
}

/// Iterative-deepening alpha-beta search for one side.
///
/// Scores are always from `color`'s perspective: nodes where `color` is to
/// move maximize, the others minimize.
pub struct Searcher {
    color: Color,
    max_depth: u8,
    start_time: Instant,
    timeout: Duration,
    table: TranspositionTable,
    stats: SearchStats,
    timed_out: bool,
}

impl Searcher {
    pub fn new(color: Color, config: &SearchConfig) -> Self {
        let config = config.sanitized();
        Self::with_timeout(
            color,
            config.max_depth,
            Duration::from_millis(config.time_limit_ms),
        )
    }

    pub fn with_timeout(color: Color, max_depth: u8, timeout: Duration) -> Self {
        Self {
            color,
            max_depth,
            start_time: Instant::now(),
            timeout,
            table: TranspositionTable::new(),
            stats: SearchStats::default(),
            timed_out: false,
        }
    }

    /// Picks a move for `color`. Returns `None` when the game is not being
    /// played, it is not `color`'s turn, or no legal action exists.
    pub fn search(&mut self, state: &GameState) -> Option<Action> {
        self.start_time = Instant::now();
        self.timed_out = false;
        self.stats = SearchStats::default();
        self.table = TranspositionTable::new();

        if !state.is_playing() || state.turn != self.color {
            debug!(
                "search skipped: status {:?}, turn {:?}, searching {:?}",
                state.status, state.turn, self.color
            );
            return None;
        }

        let mut actions = legal_actions(state, self.color);
        let first = *actions.first()?;
        let mut best = None;

        for depth in 1..=self.max_depth {
            match self.search_root(state, &actions, depth) {
                SearchResult::TimedOut => break,
                SearchResult::Complete((action, score)) => {
                    best = Some(action);
                    self.stats.completed_depth = depth;
                    debug!(
                        "depth {depth}: best {action:?} score {score} nodes {} tt hits {}",
                        self.stats.nodes, self.stats.tt_hits
                    );
                    // Previous best first so the next iteration cuts earlier.
                    if let Some(idx) = actions.iter().position(|a| *a == action) {
                        let promoted = actions.remove(idx);
                        actions.insert(0, promoted);
                    }
                }
            }
        }

        info!(
            "search for {:?} done: depth {} of {}, timed out {}, {} ms",
            self.color,
            self.stats.completed_depth,
            self.max_depth,
            self.timed_out,
            self.start_time.elapsed().as_millis()
        );

        best.or_else(|| {
            warn!("no depth completed in time; falling back to first legal action");
            Some(first)
        })
    }

    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    fn deadline_passed(&mut self) -> bool {
        if self.start_time.elapsed() >= self.timeout {
            self.timed_out = true;
        }
        self.timed_out
    }

    fn search_root(
        &mut self,
        state: &GameState,
        actions: &[Action],
        depth: u8,
    ) -> SearchResult<(Action, i32)> {
        let mut best: Option<(Action, i32)> = None;
        let mut alpha = MIN_SCORE;

        for action in actions {
            let Ok(next) = apply_action(state, action) else {
                continue;
            };
            let score = match self.alpha_beta(&next, depth - 1, alpha, MAX_SCORE) {
                SearchResult::TimedOut => return SearchResult::TimedOut,
                SearchResult::Complete(score) => score,
            };
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((*action, score));
            }
            alpha = alpha.max(score);
        }

        match best {
            Some(found) => SearchResult::Complete(found),
            // Nothing applied; treat like an unfinished iteration.
            None => SearchResult::TimedOut,
        }
    }

    fn alpha_beta(
        &mut self,
        state: &GameState,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
    ) -> SearchResult<i32> {
        if self.deadline_passed() {
            return SearchResult::TimedOut;
        }
        self.stats.nodes += 1;

        if depth == 0 || state.is_finished() {
            return SearchResult::Complete(evaluate(state, self.color));
        }

        let key = TableKey::new(state, depth);
        if let Some(score) = self.table.probe(&key, depth, alpha, beta) {
            self.stats.tt_hits += 1;
            return SearchResult::Complete(score);
        }

        let actions = legal_actions(state, state.turn);
        if actions.is_empty() {
            return SearchResult::Complete(evaluate(state, self.color));
        }

        let maximizing = state.turn == self.color;
        let (alpha_in, beta_in) = (alpha, beta);
        let mut best: Option<i32> = None;

        for action in &actions {
            let Ok(next) = apply_action(state, action) else {
                continue;
            };
            let score = match self.alpha_beta(&next, depth - 1, alpha, beta) {
                SearchResult::TimedOut => return SearchResult::TimedOut,
                SearchResult::Complete(score) => score,
            };

            if maximizing {
                best = Some(best.map_or(score, |b| b.max(score)));
                alpha = alpha.max(score);
            } else {
                best = Some(best.map_or(score, |b| b.min(score)));
                beta = beta.min(score);
            }
            if alpha >= beta {
                break;
            }
        }

        let Some(best) = best else {
            return SearchResult::Complete(evaluate(state, self.color));
        };

        let bound = if best <= alpha_in {
            Bound::Upper
        } else if best >= beta_in {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.table.store(key, depth, best, bound);

        SearchResult::Complete(best)
    }
}

/// Best action for `color` within the limits of `config`.
///
/// Returns `None` when the game is not being played, when it is not
/// `color`'s turn, or when `color` has no legal action. The JS export maps
/// `None` to `null`.
pub fn search_best_move(state: &GameState, color: Color, config: &SearchConfig) -> Option<Action> {
    Searcher::new(color, config).search(state)
}
