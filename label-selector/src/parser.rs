//! Table-driven label selector parser
//!
//! The parser walks the token stream produced by [`crate::lexer::scan`] with a
//! deterministic state machine. Every `(State, TokenKind)` pair maps to exactly
//! one [`Action`]:
//!
//! - `Goto` moves to another state without touching the pending requirement
//! - `Run` executes a [`Step`] that builds or commits the pending requirement
//!   and picks the next state
//! - `Fail` rejects the token, naming what the state expected instead
//!
//! Accepted grammar (whitespace between tokens is ignored):
//!
//! ```text
//! selector    := requirement ("," requirement)*
//! requirement := key | "!" key | key ("=" | "==" | "!=") value
//!              | key ("in" | "notin") "(" value ("," value)* ")"
//! ```
//!
//! All mutable state of a parse lives in a [`ParseContext`] owned by that call,
//! so a single [`LabelSelectorParser`] can be shared freely between threads.

use crate::errors::{LabelSelectorError, ParseErrors};
use crate::lexer::{scan, Token, TokenKind};
use crate::requirement::{Operator, PartialRequirement, Requirement};
use log::{debug, trace};
use strum_macros::{EnumIter, IntoStaticStr};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum State {
    Start,
    HasNotOperator,
    HasKey,
    ExpectValue,
    ExpectOpenParen,
    ExpectSetValue,
    ExpectCommaOrCloseParen,
    ExpectCommaOrEnd,
}

impl State {
    /// What the state accepts, used as the message when a token is rejected.
    pub const fn expected(&self) -> &'static str {
        match self {
            State::Start => "a key or '!'",
            State::HasNotOperator => "a key",
            State::HasKey => "a ',', operator, or end",
            State::ExpectValue => "a value",
            State::ExpectOpenParen => "a '('",
            State::ExpectSetValue => "a value",
            State::ExpectCommaOrCloseParen => "a ',' or ')'",
            State::ExpectCommaOrEnd => "a ',' or end",
        }
    }

    /// Whether the state has an entry for the end of input.
    pub const fn accepts_end(&self) -> bool {
        matches!(self, State::HasKey | State::ExpectCommaOrEnd)
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name: &'static str = self.into();
        write!(f, "{}", name)
    }
}

/// Multi-step behaviors of the action table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Open a requirement keyed by the word
    OpenKey,
    /// Commit a `NotExists` requirement keyed by the word
    CommitNotExists,
    /// Read `in` or `notin` after a key
    SetBasedOperator,
    /// Set the operator from `=` or `!=` and wait for the value
    ValueOperator(Operator),
    /// Commit an `Exists` requirement and start the next one
    CommitExists,
    /// Commit an `Exists` requirement and finish
    CommitExistsAndFinish,
    /// Store the single value and commit
    CommitValue,
    /// Store one member of a value set
    PushSetValue,
    /// Close the value set and commit
    CommitSet,
    Finish,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Goto(State),
    Run(Step),
    Fail(&'static str),
}

/// The action table: one entry per `(state, token kind)` pair.
pub const fn action(state: State, kind: TokenKind) -> Action {
    use Action::*;
    use TokenKind as K;

    match (state, kind) {
        (State::Start, K::Word) => Run(Step::OpenKey),
        (State::Start, K::Not) => Goto(State::HasNotOperator),

        (State::HasNotOperator, K::Word) => Run(Step::CommitNotExists),

        (State::HasKey, K::Word) => Run(Step::SetBasedOperator),
        (State::HasKey, K::Equal) => Run(Step::ValueOperator(Operator::Equals)),
        (State::HasKey, K::NotEqual) => Run(Step::ValueOperator(Operator::NotEquals)),
        (State::HasKey, K::Comma) => Run(Step::CommitExists),
        (State::HasKey, K::End) => Run(Step::CommitExistsAndFinish),

        (State::ExpectValue, K::Word) => Run(Step::CommitValue),

        (State::ExpectOpenParen, K::OpenParen) => Goto(State::ExpectSetValue),

        (State::ExpectSetValue, K::Word) => Run(Step::PushSetValue),

        (State::ExpectCommaOrCloseParen, K::Comma) => Goto(State::ExpectSetValue),
        (State::ExpectCommaOrCloseParen, K::CloseParen) => Run(Step::CommitSet),

        (State::ExpectCommaOrEnd, K::Comma) => Goto(State::Start),
        (State::ExpectCommaOrEnd, K::End) => Run(Step::Finish),

        (state, _) => Fail(state.expected()),
    }
}

/// Per-call parser state.
#[derive(Debug)]
pub struct ParseContext<'a> {
    input: &'a str,
    state: State,
    node: Option<PartialRequirement>,
    requirements: Vec<Requirement>,
    done: bool,
}

impl<'a> ParseContext<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            state: State::Start,
            node: None,
            requirements: Vec::new(),
            done: false,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    /// Feeds one token through the action table.
    pub fn advance(&mut self, token: &Token) -> Result<(), LabelSelectorError> {
        match action(self.state, token.kind) {
            Action::Goto(next) => {
                self.goto(next, token);
                Ok(())
            }
            Action::Run(step) => self.run(step, token),
            Action::Fail(expected) => Err(LabelSelectorError::unexpected_token(
                expected, self.input, token,
            )),
        }
    }

    fn goto(&mut self, next: State, token: &Token) {
        trace!(
            "{} --{}({:?})--> {}",
            self.state,
            token.kind,
            token.text,
            next
        );
        self.state = next;
    }

    fn run(&mut self, step: Step, token: &Token) -> Result<(), LabelSelectorError> {
        match step {
            Step::OpenKey => {
                self.node = Some(PartialRequirement::new(token.text));
                self.goto(State::HasKey, token);
            }
            Step::CommitNotExists => {
                self.node = Some(PartialRequirement::with_operator(
                    token.text,
                    Operator::NotExists,
                ));
                self.commit()?;
                self.goto(State::ExpectCommaOrEnd, token);
            }
            Step::SetBasedOperator => {
                let operator = match token.text {
                    "in" => Operator::In,
                    "notin" => Operator::NotIn,
                    _ => {
                        return Err(LabelSelectorError::unexpected_token(
                            self.state.expected(),
                            self.input,
                            token,
                        ))
                    }
                };
                self.node_mut()?.set_operator(operator);
                self.goto(State::ExpectOpenParen, token);
            }
            Step::ValueOperator(operator) => {
                self.node_mut()?.set_operator(operator);
                self.goto(State::ExpectValue, token);
            }
            Step::CommitExists => {
                self.node_mut()?.set_operator(Operator::Exists);
                self.commit()?;
                self.goto(State::Start, token);
            }
            Step::CommitExistsAndFinish => {
                self.node_mut()?.set_operator(Operator::Exists);
                self.commit()?;
                self.done = true;
            }
            Step::CommitValue => {
                self.node_mut()?.push_value(token.text);
                self.commit()?;
                self.goto(State::ExpectCommaOrEnd, token);
            }
            Step::PushSetValue => {
                self.node_mut()?.push_value(token.text);
                self.goto(State::ExpectCommaOrCloseParen, token);
            }
            Step::CommitSet => {
                self.commit()?;
                self.goto(State::ExpectCommaOrEnd, token);
            }
            Step::Finish => self.done = true,
        }
        Ok(())
    }

    fn node_mut(&mut self) -> Result<&mut PartialRequirement, LabelSelectorError> {
        let state = self.state;
        self.node.as_mut().ok_or_else(|| {
            LabelSelectorError::Internal(format!("no open requirement in state {}", state))
        })
    }

    fn commit(&mut self) -> Result<(), LabelSelectorError> {
        let node = self.node.take().ok_or_else(|| {
            LabelSelectorError::Internal(format!("nothing to commit in state {}", self.state))
        })?;
        let requirement = node.commit()?;
        debug!("committed requirement {}", requirement);
        self.requirements.push(requirement);
        Ok(())
    }

    /// Consumes the context, returning the requirements if the end was reached.
    pub fn finish(self) -> Result<Vec<Requirement>, LabelSelectorError> {
        if !self.done {
            return Err(LabelSelectorError::Incomplete);
        }
        Ok(self.requirements)
    }
}

/// Compiles label selector strings into requirement lists.
#[derive(Debug, Default, Clone, Copy)]
pub struct LabelSelectorParser;

impl LabelSelectorParser {
    pub fn new() -> Self {
        Self
    }

    /// Parses `selector`, returning every requirement or the errors that
    /// stopped the parse. At most one error is reported today.
    pub fn parse(&self, selector: &str) -> Result<Vec<Requirement>, ParseErrors> {
        self.parse_tokens(selector).map_err(|err| {
            debug!("rejected label selector {:?}: {}", selector, err);
            ParseErrors::from(err)
        })
    }

    fn parse_tokens(&self, selector: &str) -> Result<Vec<Requirement>, LabelSelectorError> {
        if selector.is_empty() {
            return Err(LabelSelectorError::EmptySelector);
        }

        let tokens = scan(selector);
        if let Some(bad) = tokens.iter().find(|t| t.kind == TokenKind::Error) {
            return Err(LabelSelectorError::invalid_character(selector, bad));
        }

        let mut ctx = ParseContext::new(selector);
        let tokens = tokens
            .into_iter()
            .filter(|t| t.kind != TokenKind::Space)
            .chain(std::iter::once(Token::end(selector)));
        for token in tokens {
            ctx.advance(&token)?;
            if ctx.is_done() {
                break;
            }
        }
        ctx.finish()
    }
}

/// Parses `selector` with a fresh [`LabelSelectorParser`].
pub fn parse(selector: &str) -> Result<Vec<Requirement>, ParseErrors> {
    LabelSelectorParser::new().parse(selector)
}
