use std::{cell::Cell, path::PathBuf, rc::Rc};

use anyhow::{Context, Result};
use backgammon::{
    backgammon::{Game, GameObserver, GamePhase, MoveResult, Player, Position},
    config::AppConfig,
};
use clap::Parser;
use rand::{SeedableRng, seq::IteratorRandom};
use rand_chacha::ChaCha8Rng;

/// Plays backgammon games between two random movers and reports the results.
#[derive(Parser)]
#[command(name = "backgammon", about = "Random self-play on the backgammon rules engine")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "backgammon.toml")]
    config: PathBuf,

    /// Override number of games
    #[arg(long)]
    games: Option<u32>,

    /// Override dice seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print the board after every move
    #[arg(long)]
    verbose: bool,
}

#[derive(Default)]
struct Tally {
    wins: [Cell<u32>; 2],
    moves: Cell<u32>,
    hits: Cell<u32>,
    turns: Cell<u32>,
}

impl GameObserver for Tally {
    fn on_move_made(&self, _player: Player, _from: Position, _to: Position, result: &MoveResult) {
        if let Ok(outcome) = result {
            self.moves.set(self.moves.get() + 1);
            if outcome.hit {
                self.hits.set(self.hits.get() + 1);
            }
        }
    }

    fn on_turn_changed(&self, _current_player: Player) {
        self.turns.set(self.turns.get() + 1);
    }

    fn on_game_finished(&self, winner: Player) {
        let wins = &self.wins[winner.index()];
        wins.set(wins.get() + 1);
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(games) = cli.games {
        config.runner.games = games;
    }
    if cli.seed.is_some() {
        config.game.seed = cli.seed;
    }
    config.runner.verbose |= cli.verbose;
    config.validate()?;

    let tally = Rc::new(Tally::default());
    let mut game = Game::new(&config.game);
    game.add_observer(&tally);

    let mut rng = match config.game.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)),
        None => ChaCha8Rng::from_rng(&mut rand::rng()),
    };

    for _ in 0..config.runner.games {
        let winner = play_game(&mut game, &mut rng, config.runner.verbose)?;
        if config.runner.verbose {
            println!("Player {:?} wins!", winner);
        }
    }

    let games = config.runner.games;
    let white_wins = tally.wins[Player::White.index()].get();
    let black_wins = tally.wins[Player::Black.index()].get();
    println!("============================================");
    println!("Games: {}, White Wins: {}, Black Wins: {}", games, white_wins, black_wins);
    println!(
        "White Win Rate: {:.2}%, Black Win Rate: {:.2}%",
        white_wins as f32 / games as f32 * 100.0,
        black_wins as f32 / games as f32 * 100.0
    );
    println!(
        "Moves per game: {:.1}, Hits per game: {:.1}, Turns per game: {:.1}",
        tally.moves.get() as f32 / games as f32,
        tally.hits.get() as f32 / games as f32,
        tally.turns.get() as f32 / games as f32
    );
    println!("============================================");
    Ok(())
}

fn play_game(game: &mut Game, rng: &mut ChaCha8Rng, verbose: bool) -> Result<Player> {
    game.start();
    while game.phase() != GamePhase::InProgress {
        if game.phase() == GamePhase::OpeningRollCompare && game.opening_dice() != [0, 0] {
            game.start_game_after_opening()?;
        } else {
            game.roll_opening_dice()?;
        }
    }

    loop {
        let player = game.current_player();
        let dice = game.roll_dice()?;
        if verbose {
            println!("{:?} rolled {}", player, dice);
        }

        while game.dice_rolled() && game.current_player() == player {
            match game.legal_moves().into_iter().choose(rng) {
                Some(mv) => {
                    game.make_move(mv.from(), mv.to())?;
                    if verbose {
                        println!("{:?} moved {:?}", player, mv);
                        println!("{}", game.board());
                    }
                }
                None => {
                    if verbose {
                        println!("{:?} cannot move", player);
                    }
                    game.pass_turn()?;
                }
            }
            if let Some(winner) = game.winner() {
                return Ok(winner);
            }
        }
    }
}
