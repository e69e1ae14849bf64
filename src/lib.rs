//! Galactic Invasion: a frame-driven arcade shooter.
//!
//! The simulation core (`entities`, `collision`, `wave`, `compute`) has no
//! I/O of its own. It talks to the outside world through the traits in
//! `boundary`; `display` and `input` are the crossterm implementations.

pub mod boundary;
pub mod collision;
pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod input;
pub mod sprite;
pub mod tuning;
pub mod wave;
