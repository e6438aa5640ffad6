//! Query compilation pipeline
//!
//! Drives a query string through the staged pipeline (lexical -> syntax)
//! and wraps the result with compilation metadata. `compile_or_match_all`
//! implements the caller-facing failure policy: an unparsable query becomes
//! an always-matching fallback filter, never an error.

mod error;
mod result;

pub use error::PipelineError;
pub use result::CompiledQuery;

use crate::lexical::QueryLexer;
use crate::logging;
use crate::syntax::QueryParser;
use crate::{log_info, log_success};
use std::time::Instant;

/// Compile a query string through the complete pipeline
pub fn compile_query(query: &str) -> Result<CompiledQuery, PipelineError> {
    let start_time = Instant::now();

    // Set up query context for global logging
    logging::with_query_context(query, || {
        log_info!("Starting query compilation pipeline", "length" => query.len());

        // Stage 1: Lexical analysis
        let mut lexer = QueryLexer::new();
        let tokens = lexer.tokenize(query)?;
        let lexical_metrics = lexer.metrics().clone();

        // Stage 2: Syntax analysis
        let expression = QueryParser::new(tokens).parse()?;

        let compiled = CompiledQuery::new(query, expression, lexical_metrics, start_time.elapsed());
        compiled.log_success();

        Ok(compiled)
    })
}

/// Compile a query, falling back to an always-matching filter on failure.
/// This is the player-facing entry point: a malformed query must degrade to
/// "no filter", never to a crash.
pub fn compile_or_match_all(query: &str) -> CompiledQuery {
    match compile_query(query) {
        Ok(compiled) => compiled,
        Err(error) => logging::with_query_context(query, || {
            log_success!(
                crate::logging::codes::success::FALLBACK_FILTER_APPLIED,
                "Query compilation failed, applying always-matching fallback",
                "error" => error
            );
            CompiledQuery::fallback(query)
        }),
    }
}
