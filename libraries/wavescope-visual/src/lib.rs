//! Wavescope Visual
//!
//! Turns 50 ms chunks of PCM into drawing primitives.
//!
//! This crate provides:
//! - The fixed surface [`Layout`] (size and bar pitch)
//! - Three visualization strategies selected by [`VisualizationMode`]
//! - [`DisplayList`], a [`wavescope_core::Surface`] that records what was drawn
//!
//! Strategies emit primitives lazily through [`Primitives`]; the caller clears
//! the surface, feeds every primitive to it and presents the frame.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod display_list;
pub mod layout;
pub mod strategy;

pub use display_list::DisplayList;
pub use layout::{InvalidLayout, Layout, DEFAULT_BAR_PITCH, DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use strategy::{
    BarAnchor, BarPrimitives, Primitives, UnknownMode, VisualizationMode, WaveformPrimitives,
    DRAWN_CHANNEL,
};
