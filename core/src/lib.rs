//! Game-state engine for a grid of hidden cells, some of them trapped.
//!
//! A [`Board`] is set up once (dimensions, trap placement, neighbor counts)
//! and then driven one player action at a time through [`reveal`], which
//! uncovers cells and reports the resulting [`GameState`]. Drawing is left to
//! the caller, which reads a [`CellView`] per cell after each action.

#![no_std]

extern crate alloc;

pub use board::*;
pub use cell::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use types::*;

mod board;
mod cell;
mod config;
mod engine;
mod error;
mod types;
