use serde::Deserialize;

use crate::space::{Dimension, DomainError, FlagSpace, OrderRelation, PriorityPattern};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// On-disk shape of a flag space description.
#[derive(Debug, Deserialize)]
struct FlagSpaceDoc {
    dimensions: Vec<Dimension>,
    #[serde(default)]
    orders: OrderRelation,
    #[serde(default)]
    priority: Vec<PriorityPattern>,
}

/// Parse and validate a flag space description file.
pub fn parse_flag_space(json: &str) -> Result<FlagSpace, ParseError> {
    let doc: FlagSpaceDoc = serde_json::from_str(json)?;
    Ok(FlagSpace::new(doc.dimensions, doc.orders, doc.priority)?)
}
