//! Integration tests for nebula-rules.

mod composition;
mod execution;
mod messages;
