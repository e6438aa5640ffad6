use crate::lexical::LexerError;
use crate::syntax::SyntaxError;

/// Compilation pipeline errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum PipelineError {
    #[error("Lexical analysis failed: {0}")]
    LexicalAnalysis(#[from] LexerError),

    #[error("Syntax analysis failed: {0}")]
    SyntaxAnalysis(#[from] SyntaxError),

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },
}

impl PipelineError {
    pub fn pipeline_error(message: &str) -> Self {
        Self::Pipeline {
            message: message.to_string(),
        }
    }

    /// Check if the fallback filter may stand in for this failure
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::LexicalAnalysis(_) => true,
            Self::SyntaxAnalysis(error) => error.is_recoverable(),
            Self::Pipeline { .. } => false,
        }
    }
}
