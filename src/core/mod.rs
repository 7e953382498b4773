//! Core business logic module
//!
//! This module contains the instruction evaluation components:
//! - `tokenizer` - Whitespace tokenization with case-folded keyword views
//! - `validators` - Account identifier and execution date predicates
//! - `parser` - Recursive-descent parser for the instruction grammar
//! - `resolver` - Account lookup in the caller-supplied list
//! - `pipeline` - Ordered business-rule cascade
//! - `result_builder` - Result assembly and transfer execution on snapshots
//! - `traits` - Clock abstraction for scheduling decisions
//! - `engine` - Evaluation orchestration

pub mod engine;
pub mod parser;
pub mod pipeline;
pub mod resolver;
pub mod result_builder;
pub mod tokenizer;
pub mod traits;
pub mod validators;

pub use engine::{evaluate, InstructionEngine};
pub use parser::{parse_instruction, try_parse_instruction};
pub use traits::{Clock, FixedClock, SystemClock};
