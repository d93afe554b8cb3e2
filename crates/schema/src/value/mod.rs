//! Numeric value providers embedded in effect payloads.

mod float_provider;
mod level_based;

pub use float_provider::{FloatProvider, FloatProviderCodec};
pub use level_based::{Clamped, Fraction, LevelBasedValue, LevelsSquared, Linear, Lookup, NumberRange};
