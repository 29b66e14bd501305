//! Checker configuration: strictness switches for the assignability engine.

/// Options that change how strictly assignability is decided.
///
/// Host tools typically load this from their own config file (with the
/// `serde` feature enabled) and hand it to an
/// [`AssignabilityContext`](crate::AssignabilityContext).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct CheckerConfig {
    /// Reject source properties the target does not declare (excess
    /// property checking, as for fresh object literals).
    pub exact_objects: bool,

    /// Check function parameters contravariantly. When off, parameters are
    /// compared bivariantly.
    pub strict_function_types: bool,

    /// Let a literal type stand in for its primitive (`"ADM"` to `string`).
    pub widen_literals: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        CheckerConfig {
            exact_objects: false,
            strict_function_types: true,
            widen_literals: true,
        }
    }
}

impl CheckerConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Stricter preset used for fresh object literals
    pub fn strict() -> Self {
        CheckerConfig {
            exact_objects: true,
            ..Self::default()
        }
    }

    /// Toggle excess property checking
    pub fn with_exact_objects(mut self, on: bool) -> Self {
        self.exact_objects = on;
        self
    }

    /// Toggle contravariant parameter checking
    pub fn with_strict_function_types(mut self, on: bool) -> Self {
        self.strict_function_types = on;
        self
    }

    /// Toggle literal widening
    pub fn with_widen_literals(mut self, on: bool) -> Self {
        self.widen_literals = on;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CheckerConfig::new();
        assert!(!config.exact_objects);
        assert!(config.strict_function_types);
        assert!(config.widen_literals);
    }

    #[test]
    fn test_strict_preset() {
        let config = CheckerConfig::strict();
        assert!(config.exact_objects);
        // Other switches keep their defaults
        assert!(config.strict_function_types);
    }

    #[test]
    fn test_builder_toggles() {
        let config = CheckerConfig::new()
            .with_strict_function_types(false)
            .with_widen_literals(false);
        assert!(!config.strict_function_types);
        assert!(!config.widen_literals);
        assert!(!config.exact_objects);
    }
}
