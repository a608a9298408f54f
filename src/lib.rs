//! Hookline - guided short-form video planning
//!
//! This crate implements the project workflow behind Hookline: a creator
//! describes a video in conversation, picks an opening hook (one list, or
//! one each for on-screen text, spoken line and visual), and receives a
//! production package of script, storyboard, specs, b-roll and captions.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
