//! Core library components.
//!
//! Everything that decides what runs and in which order. Nothing here
//! prints; progress flows out through the [`pipeline::Reporter`] trait.

pub mod config;
pub mod constants;
pub mod domain;
pub mod git;
pub mod notion;
pub mod pipeline;
pub mod platform;
pub mod runner;
pub mod validation;
