//! Label selector parsing.
//!
//! Compiles Kubernetes-style label selectors such as
//! `env=prod,!deprecated,tier in (web,api)` into an ordered list of
//! [`Requirement`]s that a storage layer can turn into filters.
//!
//! ```
//! use label_selector::{parse, Operator};
//!
//! let requirements = parse("tier in (web,api),!deprecated").unwrap();
//! assert_eq!(requirements[0].operator(), Operator::In);
//! assert_eq!(requirements[0].values(), ["web", "api"]);
//! assert_eq!(requirements[1].key(), "deprecated");
//! ```

pub mod errors;
pub mod lexer;
pub mod parser;
pub mod requirement;

pub use errors::{token_context, LabelSelectorError, ParseErrors};
pub use lexer::{scan, Token, TokenKind};
pub use parser::{action, parse, Action, LabelSelectorParser, ParseContext, State, Step};
pub use requirement::{LabelSelector, Operator, PartialRequirement, Requirement};
