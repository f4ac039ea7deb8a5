//! Evaluation limits

/// Resource limits applied while a program runs
///
/// Both limits are off by default, so a runaway loop or recursion runs until
/// the host stops it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalConfig {
    /// Maximum iterations of any single `while` execution
    pub max_loop_iterations: Option<usize>,
    /// Maximum nesting of user function calls
    pub max_call_depth: Option<usize>,
}

impl EvalConfig {
    /// Environment variable holding the loop iteration limit
    pub const MAX_ITERATIONS_VAR: &'static str = "FUNLANG_MAX_ITERATIONS";
    /// Environment variable holding the call depth limit
    pub const MAX_CALL_DEPTH_VAR: &'static str = "FUNLANG_MAX_CALL_DEPTH";

    /// No limits
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Reads limits from `FUNLANG_MAX_ITERATIONS` and `FUNLANG_MAX_CALL_DEPTH`
    ///
    /// Unset or unparsable values leave the limit off.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let limit = |key: &str| lookup(key).and_then(|raw| raw.trim().parse().ok());
        EvalConfig {
            max_loop_iterations: limit(Self::MAX_ITERATIONS_VAR),
            max_call_depth: limit(Self::MAX_CALL_DEPTH_VAR),
        }
    }

    pub fn with_max_loop_iterations(mut self, limit: usize) -> Self {
        self.max_loop_iterations = Some(limit);
        self
    }

    pub fn with_max_call_depth(mut self, limit: usize) -> Self {
        self.max_call_depth = Some(limit);
        self
    }
}
