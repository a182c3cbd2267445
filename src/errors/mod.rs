//! Error types and error handling for the parser.
//!
//! This module defines the diagnostics recorded while turning tokens into
//! an AST. It includes:
//!
//! - Error structures with source position information
//! - One variant per kind of structural problem in the input
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions

pub mod errors;
