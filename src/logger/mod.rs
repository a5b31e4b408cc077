//! Append-only JSONL logging of panel transitions.

pub mod jsonl;
