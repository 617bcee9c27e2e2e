//! # KNOWCODE Context
//!
//! Resolves a cursor position in a source buffer to the code region around
//! it: the enclosing function, the variable declaration under the cursor, or
//! the enclosing class.
//!
//! ## Approach
//!
//! The resolver is a heuristic scanner, not a parser:
//! - Per-language regular expressions recognise the line that opens a
//!   function, class or variable declaration
//! - A brace counter (or, for Python, an indentation comparison) finds where
//!   the construct ends
//! - A fixed precedence picks exactly one context per query
//!
//! Malformed or partial code simply fails to match.
//!
//! ```text
//! TextBuffer + Position
//!     │
//!     ├──> PatternTables (per-language openers, JavaScript fallback)
//!     │
//!     ├──> Upward scan for the nearest opener
//!     │
//!     ├──> Boundary scan (braces / dedent)
//!     │
//!     └──> CodeContext { kind, region, text, name }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use knowcode_context::{ContextKind, Language, PatternTables, Position, RegionResolver, TextBuffer};
//!
//! let tables = PatternTables::builtin().unwrap();
//! let resolver = RegionResolver::new(&tables);
//!
//! let buffer = TextBuffer::new("function add(a, b) {\n  return a + b;\n}", Language::JavaScript);
//! let context = resolver.get_context_at_position(&buffer, Position::new(1, 4));
//!
//! assert_eq!(context.kind, ContextKind::Function);
//! assert_eq!(context.name.as_deref(), Some("add"));
//! ```

mod boundary;
mod buffer;
mod config;
mod error;
mod language;
mod members;
mod names;
mod patterns;
mod position;
mod resolver;
mod shape;
mod signature;
mod types;

pub use boundary::{find_region_end, indentation};
pub use buffer::TextBuffer;
pub use config::{BoundaryMode, ExtraPatterns, ResolverConfig};
pub use error::{ContextError, Result};
pub use language::{BlockStyle, Language};
pub use members::ClassMembers;
pub use names::{extract_class_name, extract_function_name, extract_variable_name};
pub use patterns::{PatternCategory, PatternTables, StructurePatterns};
pub use position::{byte_to_utf16, utf16_len, utf16_to_byte, Position, Region};
pub use resolver::RegionResolver;
pub use shape::CodeShape;
pub use signature::FunctionSignature;
pub use types::{CodeContext, ContextKind};
