//! Configuration for the reduction-order decider.

/// Configuration for [`ReductionOrder`](crate::ReductionOrder).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderConfig {
    /// Name prefix marking a constant wildcard.
    ///
    /// Constant wildcards only ever match literal constants, so a wildcard
    /// that appears on the right side alone comes from constant folding and
    /// is exempt from the variable containment check.
    pub constant_wildcard_prefix: String,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            constant_wildcard_prefix: "c".to_string(),
        }
    }
}

impl OrderConfig {
    /// Returns true if `name` is a constant wildcard under this configuration.
    #[must_use]
    pub fn is_constant_wildcard(&self, name: &str) -> bool {
        !self.constant_wildcard_prefix.is_empty()
            && name.starts_with(self.constant_wildcard_prefix.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prefix() {
        let config = OrderConfig::default();
        assert!(config.is_constant_wildcard("c0"));
        assert!(config.is_constant_wildcard("c12"));
        assert!(!config.is_constant_wildcard("x"));
        assert!(!config.is_constant_wildcard("_c0"));
    }

    #[test]
    fn test_empty_prefix_disables_wildcards() {
        let config = OrderConfig {
            constant_wildcard_prefix: String::new(),
        };
        assert!(!config.is_constant_wildcard("c0"));
    }
}
