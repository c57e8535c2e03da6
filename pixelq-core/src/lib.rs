#![warn(missing_docs)]
//! Core abstractions for learning an action-value function from pixel
//! observations.
//!
//! This crate defines the contracts shared by the other workspace members:
//! the environment and policy traits ([`Env`], [`Policy`]), the interface of
//! the trainable action-value function ([`ValueApproximator`]), and the
//! fixed-capacity experience [`replay_buffer`]. It carries no numeric
//! backend; concrete environments and approximators live in the
//! `pixelq-pixel-env` and `pixelq-candle-agent` crates.
pub mod error;
pub mod replay_buffer;

mod base;
pub use base::{Act, Env, Info, Obs, Policy, Step, ValueApproximator};
