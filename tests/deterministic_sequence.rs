use std::time::{Duration, Instant};

use grid_snake::config::{GameSettings, GridSize};
use grid_snake::game::{GameLoop, Phase};
use grid_snake::input::Command;
use grid_snake::scheduler::TickScheduler;
use grid_snake::snake::{Heading, Position, Velocity};

#[test]
fn walk_to_the_initial_food_and_eat_it() {
    let mut game = GameLoop::with_seed(GameSettings::default(), 42);

    assert_eq!(game.state().snake.head(), Position::new(10, 10));
    assert_eq!(game.velocity(), Velocity::STILL);
    assert_eq!(game.state().food.position, Position::new(15, 15));
    assert_eq!(game.phase(), Phase::NotStarted);

    game.start();
    assert_eq!(game.phase(), Phase::Running);

    game.set_direction(Heading::Right);
    assert_eq!(game.velocity(), Velocity { dx: 1, dy: 0 });

    for _ in 0..5 {
        game.tick();
    }
    assert_eq!(game.state().snake.head(), Position::new(15, 10));
    assert_eq!(game.state().snake.len(), 1);
    assert_eq!(game.state().score, 0);

    game.set_direction(Heading::Down);
    for _ in 0..4 {
        game.tick();
    }
    assert_eq!(game.state().snake.head(), Position::new(15, 14));
    assert_eq!(game.state().snake.len(), 1);

    game.tick();
    assert_eq!(game.phase(), Phase::Running);
    assert_eq!(game.state().snake.head(), Position::new(15, 15));
    assert_eq!(game.state().score, 10);
    assert_eq!(game.state().snake.len(), 2);
    assert_eq!(game.state().tick_interval_ms, 95);
    assert!(game.state().food.position.is_within_bounds(GridSize::default()));
}

#[test]
fn same_seed_replays_the_same_game() {
    let play = |seed: u64| {
        let mut game = GameLoop::with_seed(GameSettings::default(), seed);
        game.apply(Command::Start);
        game.apply(Command::Direction(Heading::Right));
        for _ in 0..5 {
            game.tick();
        }
        game.apply(Command::Direction(Heading::Down));
        for _ in 0..5 {
            game.tick();
        }
        game.state().clone()
    };

    assert_eq!(play(7), play(7));
}

#[test]
fn scheduler_runs_the_snake_into_the_wall() {
    let origin = Instant::now();
    let mut game = GameLoop::with_seed(GameSettings::default(), 1);
    let mut scheduler = TickScheduler::new(origin, Duration::from_millis(16));

    scheduler.poll(&mut game, origin);
    game.apply(Command::Start);
    game.apply(Command::Direction(Heading::Up));

    let mut now = origin;
    let mut ticks = 0;
    while game.phase() == Phase::Running {
        now += Duration::from_millis(100);
        if scheduler.poll(&mut game, now) {
            ticks += 1;
        }
        assert!(ticks <= 20, "snake should have left the grid by now");
    }

    assert_eq!(ticks, 11);
    assert_eq!(game.phase(), Phase::Over);
    assert!(!scheduler.poll(&mut game, now + Duration::from_secs(1)));
}
