//! Boundary with the coordinate-transform engine.
//!
//! The engine receives fully resolved records and returns whatever table of sky
//! positions it produces. `azely` never looks inside the result.

use std::error::Error;

use crate::{location::Location, object::Object, time::TimeSpec};

pub type EngineError = Box<dyn Error + Send + Sync>;

pub trait SkyEngine {
    /// Time-indexed positions (azimuth, elevation, ...) produced by the engine.
    type Output;

    /// Compute the positions of `object` seen from `site` at every instant of `time`.
    ///
    /// Arguments
    /// ---------
    /// * `object`: a solar body (ephemeris) or fixed coordinates
    /// * `site`: the observer
    /// * `time`: instants, see [`TimeSpec::epochs`] for the UTC epochs
    /// * `frame`: observation frame requested by the caller
    fn compute(
        &self,
        object: &Object,
        site: &Location,
        time: &TimeSpec,
        frame: &str,
    ) -> Result<Self::Output, EngineError>;
}
