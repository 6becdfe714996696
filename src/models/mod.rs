//! Data models for the donation subsystem.
//!
//! Field names match the site's persisted `Donation` objects exactly so existing local data keeps loading.

mod donation;
mod draft;
mod samples;

pub use donation::*;
pub use draft::*;
pub use samples::*;
