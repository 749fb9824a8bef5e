//! # Cellmate
//! A board and move-legality core for two-player grid chess.
//!
//! The crate models the board as a flat grid of cells mutated exclusively
//! through small reversible actions, which makes king-safety filtering a
//! cheap make-test-unmake procedure rather than a board copy. It is usable
//! as a library to embed into your own turn driver or UI, and ships a
//! small standalone binary for random self-play and position inspection.

pub mod board;
