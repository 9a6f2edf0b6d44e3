//! Corporations: types, runtime state, and the registry of pools.
//!
//! - `corporation`: the `Corporation` record, share certificates, tokens
//! - `company`: private companies and their holders
//! - `registry`: typed pools, fleets, and the canonical ordering

pub mod company;
pub mod corporation;
pub mod registry;

pub use company::Company;
pub use corporation::{Corporation, CorporationType, Owner, Share, ShareHolder, Token};
pub use registry::CorporationRegistry;
