//! Fruitfall entry point
//!
//! Headless demo runner: plays a scripted session against the real physics
//! world and logs what happens. A graphical frontend would drive the same
//! `InputTracker`/`tick` surface from real key events.

use fruitfall::catalog;
use fruitfall::consts::DROP_COOLDOWN_TICKS;
use fruitfall::sim::{tick, GameEvent, GameState, InputTracker, Key};

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xF00D);

    let mut state = GameState::new(seed);
    let mut input = InputTracker::default();

    // Steer each piece to an alternating offset, drop it, wait out the
    // cooldown plus some settling time.
    for round in 0..24u32 {
        if state.is_game_over() {
            break;
        }

        let key = if round % 2 == 0 { Key::Left } else { Key::Right };
        input.key_down(key);
        run(&mut state, &mut input, 40 + (round % 5) * 25);
        input.key_up(key);

        input.key_down(Key::Drop);
        run(&mut state, &mut input, DROP_COOLDOWN_TICKS + 30);
    }

    // Let the last pieces settle.
    run(&mut state, &mut input, 240);

    println!("seed {seed}: {} ticks simulated", state.time_ticks);
    let mut census = vec![0usize; catalog::FRUITS.len()];
    for fruit in state.physics.fruits() {
        census[fruit.rank as usize] += 1;
    }
    for (rank, count) in census.iter().enumerate().filter(|(_, c)| **c > 0) {
        let name = catalog::get(rank as u8).map(|s| s.name).unwrap_or("?");
        println!("  rank {rank} ({name}): {count}");
    }
    if state.is_game_over() {
        println!("game over");
    }
}

fn run(state: &mut GameState, input: &mut InputTracker, ticks: u32) {
    for _ in 0..ticks {
        tick(state, &input.tick_input());
        for event in state.drain_events() {
            match event {
                GameEvent::Spawned { rank } => log::info!("spawned rank {rank}"),
                GameEvent::Merged { rank, pos } => {
                    log::info!("merge -> rank {rank} at ({:.0}, {:.0})", pos.x, pos.y)
                }
                GameEvent::GameOver => log::info!("game over"),
            }
        }
    }
}
