use std::fmt;

/// One slot of an assignment: an explicit flag or the unset sentinel.
///
/// `Unset` is available in every dimension and is always the weakest value
/// of its dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FlagValue {
    Unset,
    Set(String),
}

impl FlagValue {
    pub fn set(name: impl Into<String>) -> Self {
        FlagValue::Set(name.into())
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, FlagValue::Unset)
    }

    /// The flag name, or `None` for the unset sentinel.
    pub fn as_set(&self) -> Option<&str> {
        match self {
            FlagValue::Set(name) => Some(name),
            FlagValue::Unset => None,
        }
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagValue::Set(name) => write!(f, "{name}"),
            FlagValue::Unset => Ok(()),
        }
    }
}

/// A full choice of value per dimension — one point in the search space.
///
/// Immutable, structurally compared, usable as a map key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Assignment {
    values: Vec<FlagValue>,
}

impl Assignment {
    pub fn new(values: Vec<FlagValue>) -> Self {
        Self { values }
    }

    /// The all-unset assignment over `dims` dimensions.
    pub fn unset(dims: usize) -> Self {
        Self {
            values: vec![FlagValue::Unset; dims],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, dim: usize) -> Option<&FlagValue> {
        self.values.get(dim)
    }

    pub fn values(&self) -> &[FlagValue] {
        &self.values
    }

    /// The explicitly set flag names, in dimension order.
    pub fn active_flags(&self) -> Vec<&str> {
        self.values.iter().filter_map(FlagValue::as_set).collect()
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_flags_skip_unset() {
        let a = Assignment::new(vec![
            FlagValue::set("a1"),
            FlagValue::Unset,
            FlagValue::set("c2"),
        ]);
        assert_eq!(a.active_flags(), vec!["a1", "c2"]);
    }

    #[test]
    fn test_all_unset_has_no_active_flags() {
        let a = Assignment::unset(3);
        assert_eq!(a.len(), 3);
        assert!(a.active_flags().is_empty());
    }

    #[test]
    fn test_structural_equality() {
        let a = Assignment::new(vec![FlagValue::set("x"), FlagValue::Unset]);
        let b = Assignment::new(vec![FlagValue::set("x"), FlagValue::Unset]);
        assert_eq!(a, b);

        let c = Assignment::new(vec![FlagValue::Unset, FlagValue::set("x")]);
        assert_ne!(a, c);
    }

    #[test]
    fn test_display_renders_unset_as_empty() {
        let a = Assignment::new(vec![FlagValue::set("a1"), FlagValue::Unset]);
        assert_eq!(a.to_string(), "[a1,]");
    }
}
