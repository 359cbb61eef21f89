//! Oniguruma-flavoured regular expressions.
//!
//! A backtracking engine with the constructs a platform-native regex usually
//! lacks: possessive quantifiers, atomic groups, lookaround (variable-length
//! lookbehind included), named backreferences, subroutine calls by number or
//! name, and whole-pattern recursion. Patterns that use only the common
//! subset are transparently delegated to the `regex` crate.
//!
//! Positions are code-point offsets into the searched input.
//!
//! ```
//! use onigiri::{Regex, RegexOptions};
//!
//! let re = Regex::new(r"(?<word>\w+)\s+\k<word>", RegexOptions::new()).unwrap();
//! let m = re.first_match("hello hello world").unwrap();
//! assert_eq!(m.text(), "hello hello");
//! assert_eq!(m.named_group("word"), Some("hello"));
//! ```

mod ast;
mod char_class;
mod delegate;
mod engine;
mod error;
mod matches;
mod options;
mod parser;
mod regex;
mod replace;
pub mod repl;
mod trace;

pub use crate::error::{ErrorCode, ErrorKind, RegexError};
pub use crate::matches::{Match, Matches};
pub use crate::options::RegexOptions;
pub use crate::regex::Regex;
