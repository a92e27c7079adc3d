//! Bots that play a session by choosing among enumerated moves

use crate::game::{Action, Game};
use crate::grid::Grid;
use crate::movegen::{generate_moves_with_depth, DiscoveredMove, Placement};
use crate::search::alpha_beta;
use crate::settings::{BotSettings, PolicyKind};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

/// Rows shown when logging the board around a bot move
const LOGGED_ROWS: usize = 4;

/// Picks one of the candidate moves for the current grid.
/// Returns an index into `moves`, or None if there is nothing to pick.
pub trait Policy {
    fn name(&self) -> &'static str;
    fn choose(&mut self, grid: &Grid, moves: &[DiscoveredMove]) -> Option<usize>;
}

/// Alpha-beta search over the candidate placements
#[derive(Debug, Clone)]
pub struct AlphaBetaPolicy {
    depth: u32,
}

impl AlphaBetaPolicy {
    pub fn new(depth: u32) -> Self {
        Self { depth }
    }
}

impl Policy for AlphaBetaPolicy {
    fn name(&self) -> &'static str {
        "alpha-beta"
    }

    fn choose(&mut self, grid: &Grid, moves: &[DiscoveredMove]) -> Option<usize> {
        let placements: Vec<Placement> = moves.iter().map(|m| m.placement).collect();
        let result = alpha_beta(grid, self.depth, i32::MIN, i32::MAX, true, &placements);
        debug!(
            score = result.score,
            nodes = result.nodes,
            candidates = placements.len(),
            "alpha-beta choice"
        );
        let best = result.best_move?;
        placements.iter().position(|&p| p == best)
    }
}

/// Uniformly random legal move
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: ChaCha8Rng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn choose(&mut self, _grid: &Grid, moves: &[DiscoveredMove]) -> Option<usize> {
        (0..moves.len()).choose(&mut self.rng)
    }
}

/// Drives a game one placement at a time until it runs out of moves
pub struct Bot {
    policy: Box<dyn Policy>,
    max_moves: u32,
    move_count: u32,
    move_search_depth: usize,
}

impl Bot {
    pub fn new(policy: Box<dyn Policy>, max_moves: u32, move_search_depth: usize) -> Self {
        Self {
            policy,
            max_moves,
            move_count: 0,
            move_search_depth,
        }
    }

    /// Build the configured bot. `seed` is the session seed already resolved
    /// from `settings.seed`, so the random policy replays with the queue.
    pub fn from_settings(settings: &BotSettings, seed: u64) -> Self {
        let policy: Box<dyn Policy> = match settings.policy {
            PolicyKind::AlphaBeta => Box::new(AlphaBetaPolicy::new(settings.search_depth)),
            PolicyKind::Random => Box::new(RandomPolicy::new(seed)),
        };
        Self::new(policy, settings.max_moves, settings.move_search_depth)
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn is_active<R: RngCore>(&self, game: &Game<R>) -> bool {
        self.move_count < self.max_moves && !game.is_game_over()
    }

    /// Choose and play one placement. Returns the placement played, or None
    /// if the bot is done or no move exists.
    pub fn make_move<R: RngCore>(&mut self, game: &mut Game<R>) -> Option<Placement> {
        if !self.is_active(game) {
            return None;
        }

        debug!(board = %bottom_rows(game.grid(), LOGGED_ROWS), "board before move");

        let moves = generate_moves_with_depth(game.current(), game.grid(), self.move_search_depth);
        let Some(chosen) = self
            .policy
            .choose(game.grid(), &moves)
            .and_then(|index| moves.get(index))
        else {
            warn!(
                piece = %game.current().piece_type,
                candidates = moves.len(),
                "no move available"
            );
            return None;
        };

        debug!(
            policy = self.policy.name(),
            candidates = moves.len(),
            placement = ?chosen.placement,
            commands = ?chosen.commands,
            "bot move"
        );

        for &action in &chosen.commands {
            game.process_action(action);
        }
        if Placement::from(game.current()) == chosen.placement {
            game.process_action(Action::HardDrop);
        } else if !game.place(chosen.placement) {
            warn!(placement = ?chosen.placement, "replayed path diverged and placement is blocked");
            return None;
        }

        self.move_count += 1;
        debug!(board = %bottom_rows(game.grid(), LOGGED_ROWS), "board after move");
        Some(chosen.placement)
    }

    /// Play until the move budget is spent or the game ends.
    /// Returns the number of placements made.
    pub fn run<R: RngCore>(&mut self, game: &mut Game<R>) -> u32 {
        let start = self.move_count;
        while self.make_move(game).is_some() {}

        let played = self.move_count - start;
        info!(
            policy = self.policy.name(),
            played,
            score = game.score().points,
            lines = game.lines_cleared(),
            game_over = game.is_game_over(),
            "bot finished"
        );
        played
    }
}

/// The bottom `count` rows of the grid as text
fn bottom_rows(grid: &Grid, count: usize) -> String {
    let text = grid.to_string();
    let lines: Vec<&str> = text.lines().collect();
    lines[lines.len().saturating_sub(count)..].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tetromino::TetrominoType;

    fn game() -> Game {
        Game::with_seed(20, 10, 99)
    }

    #[test]
    fn test_alpha_beta_policy_takes_first_candidate() {
        let g = game();
        let moves = generate_moves_with_depth(g.current(), g.grid(), 30);
        let mut policy = AlphaBetaPolicy::new(3);
        assert_eq!(policy.choose(g.grid(), &moves), Some(0));
        assert_eq!(policy.choose(g.grid(), &[]), None);
    }

    #[test]
    fn test_random_policy_is_seeded() {
        let g = game();
        let moves = generate_moves_with_depth(g.current(), g.grid(), 30);
        let mut a = RandomPolicy::new(5);
        let mut b = RandomPolicy::new(5);
        for _ in 0..20 {
            let pick = a.choose(g.grid(), &moves);
            assert_eq!(pick, b.choose(g.grid(), &moves));
            assert!(pick.is_some_and(|i| i < moves.len()));
        }
        assert_eq!(a.choose(g.grid(), &[]), None);
    }

    #[test]
    fn test_bot_stops_at_max_moves() {
        // tall enough that ten pieces can never top out
        let mut g = Game::with_seed(44, 10, 99);
        let mut bot = Bot::new(Box::new(RandomPolicy::new(1)), 10, 30);
        let played = bot.run(&mut g);
        assert_eq!(played, 10);
        assert_eq!(bot.move_count(), 10);
        assert_eq!(g.pieces_placed(), 10);
        assert!(!bot.is_active(&g));
        assert_eq!(bot.make_move(&mut g), None);
    }

    #[test]
    fn test_alpha_beta_bot_stacks_at_spawn_column() {
        let mut g = game();
        let mut bot = Bot::new(Box::new(AlphaBetaPolicy::new(3)), 3, 30);
        let first = g.current().piece_type;
        let placement = bot.make_move(&mut g);
        assert_eq!(
            placement,
            Some(Placement {
                x: 3,
                y: 0,
                rotation: crate::tetromino::Rotation::North
            })
        );
        assert_eq!(g.pieces_placed(), 1);
        let filled = g.grid().iter_rows().flatten().filter(|c| c.is_filled()).count();
        assert_eq!(filled, 4);
        assert!(TetrominoType::all().contains(&first));
    }

    #[test]
    fn test_bot_stops_on_game_over() {
        let mut g = Game::with_seed(6, 10, 3);
        let mut bot = Bot::new(Box::new(AlphaBetaPolicy::new(1)), 1000, 30);
        let played = bot.run(&mut g);
        assert!(g.is_game_over());
        assert!(played < 1000);
        assert!(!bot.is_active(&g));
    }

    #[test]
    fn test_from_settings() {
        let settings = BotSettings {
            policy: PolicyKind::Random,
            seed: Some(11),
            ..BotSettings::default()
        };
        let bot = Bot::from_settings(&settings, 11);
        assert_eq!(bot.policy_name(), "random");
        assert_eq!(Bot::from_settings(&BotSettings::default(), 11).policy_name(), "alpha-beta");
    }

    #[test]
    fn test_random_policy_uses_session_seed() {
        // no seed in the file: the runner draws one and the policy must follow it
        let settings = BotSettings {
            policy: PolicyKind::Random,
            seed: None,
            ..BotSettings::default()
        };
        let g = game();
        let moves = generate_moves_with_depth(g.current(), g.grid(), 30);
        let mut bot = Bot::from_settings(&settings, 4242);
        let mut expected = RandomPolicy::new(4242);
        let picks: Vec<_> = (0..20).map(|_| bot.policy.choose(g.grid(), &moves)).collect();
        let replay: Vec<_> = (0..20).map(|_| expected.choose(g.grid(), &moves)).collect();
        assert_eq!(picks, replay);

        let mut unseeded = RandomPolicy::new(0);
        let zero: Vec<_> = (0..20).map(|_| unseeded.choose(g.grid(), &moves)).collect();
        assert_ne!(picks, zero);
    }

    #[test]
    fn test_bottom_rows() {
        let grid = Grid::from_ascii(&["I...", "O...", "T...", "S...", "Z..."]).unwrap();
        assert_eq!(bottom_rows(&grid, 2), "S...\nZ...");
        assert_eq!(bottom_rows(&grid, 9).lines().count(), 5);
    }
}
