//! Round descriptors and their construction.
//!
//! - `round`: the `Round` descriptor, round kinds and step kinds
//! - `factory`: `RoundFactory`, which picks participants and step lists

pub mod factory;
pub mod round;

pub use factory::RoundFactory;
pub use round::{CompanyVariant, Round, RoundKind, StepKind, StepList, StepSpec};
