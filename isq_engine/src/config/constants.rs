//! Compile-time limits for the query engine
//!
//! Queries are typed by a player into a search box, so every limit here is a
//! hard upper bound on hostile or accidental pathological input. None of
//! these are tunable at runtime.

pub mod compile_time {
    pub mod lexical {
        /// Maximum query length in bytes
        /// Search boxes are short; anything past this is rejected outright
        pub const MAX_QUERY_LENGTH: usize = 4_096;

        /// Maximum number of tokens produced from a single query
        pub const MAX_TOKEN_COUNT: usize = 1_024;

        /// Maximum quoted literal length in bytes
        pub const MAX_QUOTED_LENGTH: usize = 512;
    }

    pub mod syntax {
        /// Maximum parser recursion depth to prevent stack overflow
        /// Bounds group nesting like `(((((...)))))`
        pub const MAX_PARSE_DEPTH: usize = 64;

        /// Maximum error history buffer size
        pub const MAX_ERROR_HISTORY: usize = 50;

        /// Maximum context stack depth for error reporting
        pub const MAX_CONTEXT_STACK_DEPTH: usize = 20;

        /// Token lookahead limit for parsing decisions
        pub const MAX_LOOKAHEAD_TOKENS: usize = 4;
    }
}

#[cfg(test)]
mod tests {
    use super::compile_time::{lexical, syntax};

    #[test]
    fn test_limits_are_nonzero() {
        assert!(lexical::MAX_QUERY_LENGTH > 0);
        assert!(lexical::MAX_TOKEN_COUNT > 0);
        assert!(lexical::MAX_QUOTED_LENGTH > 0);
        assert!(syntax::MAX_PARSE_DEPTH > 0);
        assert!(syntax::MAX_LOOKAHEAD_TOKENS > 0);
    }

    #[test]
    fn test_quoted_limit_fits_in_query_limit() {
        assert!(lexical::MAX_QUOTED_LENGTH < lexical::MAX_QUERY_LENGTH);
    }
}
