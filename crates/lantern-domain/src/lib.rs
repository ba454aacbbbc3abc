//! Static description of a prover flag search space.
//!
//! A flag space has one dimension per preprocessor flag group, each with an
//! ordered list of candidate values plus the implicit unset sentinel. A
//! declared order relation between values lets the search engine propagate
//! prover verdicts between related points without re-querying.

pub mod parse;
pub mod space;
pub mod value;

pub use parse::{parse_flag_space, ParseError};
pub use space::{Dimension, DomainError, FlagSpace, OrderRelation, PriorityPattern};
pub use value::{Assignment, FlagValue};
