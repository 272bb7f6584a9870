//! Invariants that must hold at every step of randomly played games.

use backgammon::backgammon::{CHECKERS_PER_PLAYER, Game, GamePhase, Player, Position};
use backgammon::{GameConfig, GameError, GameState};
use proptest::prelude::*;
use rand::{Rng, SeedableRng, seq::IteratorRandom};
use rand_chacha::ChaCha8Rng;

const MAX_STEPS: usize = 4000;

fn assert_consistent(state: &GameState) -> Result<(), TestCaseError> {
    for (count, color) in state.piece_counts.iter().zip(state.colors.iter()) {
        prop_assert_eq!(*count == 0, color.is_none());
    }
    for player in Player::ALL {
        let on_points: u32 = state
            .piece_counts
            .iter()
            .zip(state.colors.iter())
            .filter(|(_, color)| **color == Some(player))
            .map(|(count, _)| *count as u32)
            .sum();
        let total = on_points + state.bar(player) as u32 + state.borne_off(player) as u32;
        prop_assert_eq!(total, CHECKERS_PER_PLAYER as u32);
    }
    Ok(())
}

fn random_position(rng: &mut ChaCha8Rng, player: Player) -> Position {
    Position::from_index(rng.random_range(-1..=25), player).unwrap_or(Position::Bar)
}

fn open(game: &mut Game) {
    game.start();
    while game.phase() != GamePhase::InProgress {
        if game.opening_dice() != [0, 0] && game.phase() == GamePhase::OpeningRollCompare {
            game.start_game_after_opening().unwrap();
        } else {
            game.roll_opening_dice().unwrap();
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Random play conserves checkers, keeps columns consistent and only
    /// changes state on accepted commands.
    #[test]
    fn random_games_keep_invariants(seed in any::<u64>()) {
        let config = GameConfig { seed: Some(seed), opening_roll: true };
        let mut game = Game::new(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        open(&mut game);

        for _ in 0..MAX_STEPS {
            if game.phase() == GamePhase::Finished {
                break;
            }
            if !game.dice_rolled() {
                game.roll_dice().unwrap();
                continue;
            }

            // Stray attempt: must either succeed or leave everything untouched.
            let before = game.state();
            let player = game.current_player();
            let (from, to) = (random_position(&mut rng, player), random_position(&mut rng, player));
            let legal = game.legal_targets(from).contains(&to);
            match game.make_move(from, to) {
                Ok(_) => prop_assert!(legal),
                Err(_) => {
                    prop_assert!(!legal);
                    prop_assert_eq!(game.state(), before);
                }
            }
            assert_consistent(&game.state())?;
            if game.phase() == GamePhase::Finished || !game.dice_rolled() {
                continue;
            }

            match game.legal_moves().into_iter().choose(&mut rng) {
                Some(mv) => {
                    prop_assert!(game.make_move(mv.from(), mv.to()).is_ok());
                }
                None => {
                    prop_assert!(!game.has_moves_available());
                    prop_assert_eq!(game.pass_turn(), Ok(()));
                }
            }
            assert_consistent(&game.state())?;
        }

        if let Some(winner) = game.winner() {
            prop_assert_eq!(game.borne_off_count(winner), CHECKERS_PER_PLAYER);
            prop_assert_eq!(game.roll_dice(), Err(GameError::GameAlreadyOver));
        }
    }

    /// No checker leaves the board while its owner still has one outside home.
    #[test]
    fn bear_off_needs_all_checkers_home(seed in any::<u64>()) {
        let config = GameConfig { seed: Some(seed), opening_roll: false };
        let mut game = Game::new(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(seed.rotate_left(17));
        game.start();

        for _ in 0..MAX_STEPS {
            if game.phase() == GamePhase::Finished {
                break;
            }
            if !game.dice_rolled() {
                game.roll_dice().unwrap();
                continue;
            }
            let player = game.current_player();
            let home_before = game.board().all_home(player);
            match game.legal_moves().into_iter().choose(&mut rng) {
                Some(mv) => {
                    let outcome = game.make_move(mv.from(), mv.to()).unwrap();
                    if outcome.borne_off {
                        prop_assert!(home_before);
                    }
                }
                None => game.pass_turn().unwrap(),
            }
        }
    }

    /// Queries never change what a later snapshot reports.
    #[test]
    fn queries_are_idempotent(seed in any::<u64>(), index in 0usize..30) {
        let config = GameConfig { seed: Some(seed), opening_roll: false };
        let mut game = Game::new(&config);
        game.start();
        game.roll_dice().unwrap();

        let before = game.state();
        let from = Position::from_index(index as i32, game.current_player()).unwrap_or(Position::Bar);
        let first = (game.can_select_point(from), game.legal_targets(from), game.legal_moves());
        let second = (game.can_select_point(from), game.legal_targets(from), game.legal_moves());
        prop_assert_eq!(first, second);
        prop_assert_eq!(game.column_count(index), game.column_count(index));
        prop_assert_eq!(game.has_moves_available(), game.has_moves_available());
        prop_assert_eq!(game.state(), before);
    }
}
