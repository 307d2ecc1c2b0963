//! Condition-expression contract.
//!
//! # Data Flow
//! ```text
//! Pattern compilation keeps {{expr}} text verbatim
//!     → matcher reaches a Condition part
//!     → evaluator.evaluate(expr) against the caller's bound context
//!     → true: the match attempt continues
//!     → false or error: the attempt fails at this alternative
//! ```
//!
//! # Design Decisions
//! - The tokenizer/AST/evaluator for expressions is an external collaborator;
//!   only the boolean contract lives here
//! - Implementors bind their own request context before evaluation
//! - Caches are explicit injected objects, never module-level globals

pub mod cache;

pub use cache::Cache;

use thiserror::Error;

/// Failure reported by an expression engine.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("expression parse error: {0}")]
    Parse(String),
    #[error("expression evaluation error: {0}")]
    Evaluation(String),
}

/// Boolean evaluation of a `{{condition}}` block. Implementations must be
/// safe for concurrent use by request-handling workers.
pub trait ConditionEvaluator: Send + Sync {
    fn evaluate(&self, expr: &str) -> Result<bool, EvalError>;
}

impl<F> ConditionEvaluator for F
where
    F: Fn(&str) -> Result<bool, EvalError> + Send + Sync,
{
    fn evaluate(&self, expr: &str) -> Result<bool, EvalError> {
        self(expr)
    }
}

/// Evaluator used when no expression engine is configured: every condition
/// block evaluates to false, so conditional patterns simply never match.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoConditions;

impl ConditionEvaluator for NoConditions {
    fn evaluate(&self, _expr: &str) -> Result<bool, EvalError> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_implement_the_contract() {
        let eval = |expr: &str| -> Result<bool, EvalError> { Ok(expr == "yes") };
        assert!(eval.evaluate("yes").unwrap());
        assert!(!eval.evaluate("no").unwrap());
    }

    #[test]
    fn no_conditions_rejects_everything() {
        assert!(!NoConditions.evaluate("anything").unwrap());
    }
}
