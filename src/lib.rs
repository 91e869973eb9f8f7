//! Game logic for a side-scrolling dinosaur runner.
//!
//! Everything in this crate is terminal-agnostic: the controller in
//! [`compute`] advances an explicit [`entities::Session`] one frame at a time,
//! and [`render`] describes a frame in terms of a [`render::Surface`] that the
//! binary implements.

pub mod collision;
pub mod compute;
pub mod constants;
pub mod entities;
pub mod input;
pub mod render;
pub mod spawner;
pub mod storage;
