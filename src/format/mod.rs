//! Formatting helpers for rendering expressions and solver answers.

pub mod expr;

pub use expr::{pretty, pretty_list, show_rational};
