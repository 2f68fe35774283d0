//! Deterministic-step Snake simulation with a terminal front end.
//!
//! [`game::GameLoop`] owns all game state and is advanced by
//! [`scheduler::TickScheduler`]. Input and rendering live at the edges in
//! [`input`] and [`renderer`].

pub mod config;
pub mod food;
pub mod game;
pub mod input;
pub mod renderer;
pub mod scheduler;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
