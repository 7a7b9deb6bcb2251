//! Integration tests for the session lifecycle

use tui_2048::core::{GameConfig, GameSetup, GameError, GameState, Grid, SimpleRng, TileRng};
use tui_2048::types::{
    Difficulty, Direction, GameAction, GameEvent, GameStatus, Mode, MAX_LEVEL, WIN_TILE,
};

/// Always returns the same value; 0 picks the first empty cell and a 4.
#[derive(Debug, Clone)]
struct Fixed(u32);

impl TileRng for Fixed {
    fn next_u32(&mut self) -> u32 {
        self.0
    }
}

fn with_pair_to_win(size: u8) -> Grid {
    let mut grid = Grid::new(size).unwrap();
    grid.set(0, 0, WIN_TILE / 2);
    grid.set(0, 1, WIN_TILE / 2);
    grid
}

#[test]
fn test_start_requires_a_mode() {
    let mut setup = GameSetup::new(3);
    assert_eq!(setup.config(), Err(GameError::NoModeSelected));
    assert_eq!(GameError::NoModeSelected.to_string(), "no game mode selected");

    setup.select(Mode::Endless(Difficulty::Easy));
    let state = GameState::new(setup.config().unwrap());
    assert_eq!(state.mode(), Mode::Endless(Difficulty::Easy));
}

#[test]
fn test_initial_sizes_per_mode() {
    let cases = [
        (Mode::Classic, 9),
        (Mode::Campaign, 8),
        (Mode::Endless(Difficulty::Easy), 8),
        (Mode::Endless(Difficulty::Normal), 6),
        (Mode::Endless(Difficulty::Hard), 4),
    ];
    for (mode, size) in cases {
        let mut state = GameState::new(GameConfig::new(mode, 1));
        state.start();
        assert_eq!(state.grid().size(), size, "{:?}", mode);
        assert_eq!(state.grid().empty_count(), size as usize * size as usize - 2);
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
    }
}

#[test]
fn test_same_seed_replays_same_game() {
    let config = GameConfig::new(Mode::Endless(Difficulty::Normal), 777);
    let mut a = GameState::new(config);
    let mut b = GameState::new(config);
    a.start();
    b.start();
    for direction in [Direction::Left, Direction::Up, Direction::Right, Direction::Down].repeat(5) {
        assert_eq!(a.move_tiles(direction), b.move_tiles(direction));
    }
    assert_eq!(a.grid(), b.grid());
    assert_eq!(a.score(), b.score());
}

#[test]
fn test_each_effective_move_spawns_exactly_one_tile() {
    let mut state = GameState::with_rng(GameConfig::new(Mode::Endless(Difficulty::Hard), 0), Fixed(0));
    state.start();
    state
        .load_grid(Grid::from_rows(&[[2, 2, 0, 0], [8, 0, 0, 0], [0; 4], [0; 4]]).unwrap())
        .unwrap();

    let outcome = state.apply_action(GameAction::Move(Direction::Left));
    assert!(outcome.moved);
    assert_eq!(outcome.score_gained, 4);
    assert_eq!(state.score(), 4);
    assert_eq!(outcome.merges().count(), 1);
    let spawned = outcome.spawned.unwrap();
    assert_eq!((spawned.row, spawned.col, spawned.value), (0, 1, 4));
    // merged 4, the 8 and the spawned 4
    assert_eq!(state.grid().empty_count(), 13);
    assert_eq!(state.moves(), 1);

    // Everything already sits against the top edge.
    let before = *state.grid();
    let outcome = state.apply_action(GameAction::Move(Direction::Up));
    assert!(!outcome.moved);
    assert!(outcome.spawned.is_none());
    assert!(outcome.events.is_empty());
    assert_eq!(*state.grid(), before);
    assert_eq!(state.moves(), 1);
}

#[test]
fn test_campaign_level_transition_keeps_score_and_resets_clock() {
    let mut state = GameState::with_rng(GameConfig::new(Mode::Campaign, 0), Fixed(0));
    state.start();
    state.load_grid(with_pair_to_win(8)).unwrap();
    state.tick(5_000);
    assert_eq!(state.elapsed_ms(), 5_000);

    let outcome = state.move_tiles(Direction::Left);
    assert!(outcome.won);
    assert!(outcome.level_completed());
    assert_eq!(
        outcome.events.last(),
        Some(&GameEvent::LevelComplete {
            level: 1,
            elapsed_ms: 5_000,
            score: 2048,
        })
    );

    assert_eq!(state.level(), 2);
    assert_eq!(state.grid().size(), 7);
    assert_eq!(state.score(), 2048);
    assert_eq!(state.elapsed_ms(), 0);
    assert_eq!(state.status(), GameStatus::Active);
    // Fresh level grid: two starting tiles, no tile from the winning move
    assert_eq!(state.grid().empty_count(), 47);
    assert!(outcome.spawned.is_none());

    state.tick(16);
    assert_eq!(state.elapsed_ms(), 16);
}

#[test]
fn test_campaign_completes_after_last_level() {
    let mut state = GameState::with_rng(GameConfig::new(Mode::Campaign, 0), Fixed(0));
    state.start();

    for level in 1..=MAX_LEVEL {
        assert_eq!(state.level(), level);
        let size = state.grid().size();
        state.load_grid(with_pair_to_win(size)).unwrap();
        state.tick(1_000);
        let outcome = state.move_tiles(Direction::Left);
        assert!(outcome.level_completed());
    }

    assert_eq!(state.status(), GameStatus::Completed);
    assert_eq!(state.level(), MAX_LEVEL);
    assert_eq!(state.score(), 2048 * MAX_LEVEL as u32);
    assert_eq!(
        state.last_event(),
        Some(GameEvent::CampaignComplete {
            score: 2048 * MAX_LEVEL as u32,
            total_ms: 5_000,
        })
    );
    assert_eq!(state.total_elapsed_ms(), 5_000);

    // Terminal until restart
    assert!(!state.move_tiles(Direction::Right).moved);
    state.tick(1_000);
    assert_eq!(state.total_elapsed_ms(), 5_000);

    state.apply_action(GameAction::Restart);
    assert_eq!(state.status(), GameStatus::Active);
    assert_eq!(state.level(), 1);
    assert_eq!(state.grid().size(), 8);
    assert_eq!(state.score(), 0);
}

#[test]
fn test_endless_keeps_playing_after_2048() {
    let mut state = GameState::with_rng(GameConfig::new(Mode::Classic, 0), Fixed(0));
    state.start();
    state.load_grid(with_pair_to_win(9)).unwrap();

    let outcome = state.move_tiles(Direction::Left);
    assert!(outcome.won);
    assert!(outcome.events.contains(&GameEvent::Win { value: 2048 }));
    assert!(!outcome.level_completed());
    assert!(outcome.spawned.is_some());
    assert_eq!(state.status(), GameStatus::Active);
    assert_eq!(state.grid().size(), 9);
}

#[test]
fn test_each_winning_merge_emits_a_win_event() {
    let mut state = GameState::with_rng(GameConfig::new(Mode::Endless(Difficulty::Hard), 0), Fixed(0));
    state.start();
    state
        .load_grid(
            Grid::from_rows(&[[1024, 1024, 0, 0], [1024, 1024, 0, 0], [0; 4], [0; 4]]).unwrap(),
        )
        .unwrap();

    let outcome = state.move_tiles(Direction::Left);
    assert!(outcome.won);
    let wins = outcome
        .events
        .iter()
        .filter(|ev| matches!(ev, GameEvent::Win { value: 2048 }))
        .count();
    assert_eq!(wins, 2);
    assert_eq!(state.status(), GameStatus::Active);
}

#[test]
fn test_game_over_after_final_spawn() {
    let mut state = GameState::with_rng(GameConfig::new(Mode::Endless(Difficulty::Hard), 0), Fixed(0));
    state.start();
    state
        .load_grid(
            Grid::from_rows(&[[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 8], [2, 4, 2, 0]]).unwrap(),
        )
        .unwrap();
    state.tick(3_000);

    // Bottom row slides right; the spawned 4 lands in the corner and locks the grid.
    let outcome = state.move_tiles(Direction::Right);
    assert!(outcome.moved);
    assert!(outcome.game_over());
    assert_eq!(state.grid().to_rows()[3], vec![4, 2, 4, 2]);
    assert_eq!(state.status(), GameStatus::Over);
    assert_eq!(
        state.last_event(),
        Some(GameEvent::GameOver {
            score: 0,
            elapsed_ms: 3_000,
            level: None,
        })
    );

    for direction in Direction::ALL {
        assert!(!state.move_tiles(direction).moved);
    }
    state.tick(1_000);
    assert_eq!(state.elapsed_ms(), 3_000);
}

#[test]
fn test_campaign_game_over_reports_whole_run_time() {
    // u32::MAX spawns a 2 on the last empty cell.
    let mut state = GameState::with_rng(GameConfig::new(Mode::Campaign, 0), Fixed(u32::MAX));
    state.start();
    state.load_grid(with_pair_to_win(8)).unwrap();
    state.tick(2_000);
    state.move_tiles(Direction::Left);
    assert_eq!(state.level(), 2);

    // 7x7 checkerboard of 2/4 above a bottom row that cannot merge with it.
    let mut rows = [[0u32; 7]; 7];
    for (r, row) in rows.iter_mut().enumerate().take(6) {
        for (c, cell) in row.iter_mut().enumerate() {
            *cell = if (r + c) % 2 == 0 { 2 } else { 4 };
        }
    }
    rows[6] = [0, 8, 16, 8, 16, 8, 16];
    state.load_grid(Grid::from_rows(&rows).unwrap()).unwrap();
    state.tick(3_000);

    // Bottom row slides left; the 2 lands at (6, 6) between a 16 and a 4.
    let outcome = state.move_tiles(Direction::Left);
    assert!(outcome.game_over());
    assert_eq!(state.elapsed_ms(), 3_000);
    assert_eq!(
        state.last_event(),
        Some(GameEvent::GameOver {
            score: 2048,
            elapsed_ms: 5_000,
            level: Some(2),
        })
    );
}

#[test]
fn test_restart_bumps_episode_and_clears_score() {
    let mut state = GameState::new(GameConfig::new(Mode::Endless(Difficulty::Normal), 9));
    state.start();
    let mut rng = SimpleRng::new(5);
    for _ in 0..30 {
        let direction = Direction::ALL[rng.next_range(4) as usize];
        state.move_tiles(direction);
    }
    let episode = state.episode_id();

    state.apply_action(GameAction::Restart);
    assert_eq!(state.episode_id(), episode + 1);
    assert_eq!(state.score(), 0);
    assert_eq!(state.moves(), 0);
    assert_eq!(state.elapsed_ms(), 0);
    assert_eq!(state.grid().empty_count(), 34);
}

#[test]
fn test_snapshot_mirrors_session() {
    let mut state = GameState::with_rng(GameConfig::new(Mode::Campaign, 0), Fixed(0));
    state.start();
    state.load_grid(with_pair_to_win(8)).unwrap();
    state.move_tiles(Direction::Left);

    let snap = state.snapshot();
    assert_eq!(snap.size, 7);
    assert_eq!(snap.level, 2);
    assert_eq!(snap.score, 2048);
    assert!(snap.playable());
    assert!(matches!(
        snap.last_event,
        Some(GameEvent::LevelComplete { level: 1, .. })
    ));
}
