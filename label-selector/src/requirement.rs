use crate::errors::{LabelSelectorError, ParseErrors};
use crate::lexer::is_word_char;
use serde::Serialize;
use std::fmt;
use strum_macros::EnumIter;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// Key is present, value ignored
    Exists,
    /// Key is absent
    NotExists,
    Equals,
    NotEquals,
    /// Value is one of a set
    In,
    /// Value is none of a set
    NotIn,
}

impl Operator {
    /// Spelling of the operator in selector syntax
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Exists => "",
            Operator::NotExists => "!",
            Operator::Equals => "=",
            Operator::NotEquals => "!=",
            Operator::In => "in",
            Operator::NotIn => "notin",
        }
    }

    pub fn is_set_based(&self) -> bool {
        matches!(self, Operator::In | Operator::NotIn)
    }

    pub fn takes_single_value(&self) -> bool {
        matches!(self, Operator::Equals | Operator::NotEquals)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Exists => write!(f, "exists"),
            Operator::NotExists => write!(f, "not_exists"),
            Operator::Equals => write!(f, "equals"),
            Operator::NotEquals => write!(f, "not_equals"),
            Operator::In => write!(f, "in"),
            Operator::NotIn => write!(f, "not_in"),
        }
    }
}

impl std::str::FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exists" => Ok(Operator::Exists),
            "not_exists" => Ok(Operator::NotExists),
            "equals" => Ok(Operator::Equals),
            "not_equals" => Ok(Operator::NotEquals),
            "in" => Ok(Operator::In),
            "not_in" => Ok(Operator::NotIn),
            _ => Err(format!(
                "Invalid operator '{}'. Valid operators: exists, not_exists, equals, not_equals, in, not_in",
                s
            )),
        }
    }
}

/// One clause of a label selector.
///
/// `values` is empty for `Exists`/`NotExists`, holds exactly one entry for
/// `Equals`/`NotEquals` and at least one for `In`/`NotIn`. The key and every
/// value are non-empty runs of selector word characters, so the `Display`
/// output always parses back to an equal requirement. The constructors are
/// the only way to build one.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Requirement {
    key: String,
    operator: Operator,
    values: Vec<String>,
}

impl Requirement {
    pub fn exists(key: impl Into<String>) -> Result<Self, LabelSelectorError> {
        Self::build(key.into(), Operator::Exists, Vec::new())
    }

    pub fn not_exists(key: impl Into<String>) -> Result<Self, LabelSelectorError> {
        Self::build(key.into(), Operator::NotExists, Vec::new())
    }

    pub fn equals(
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, LabelSelectorError> {
        Self::build(key.into(), Operator::Equals, vec![value.into()])
    }

    pub fn not_equals(
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, LabelSelectorError> {
        Self::build(key.into(), Operator::NotEquals, vec![value.into()])
    }

    pub fn in_set<I, V>(key: impl Into<String>, values: I) -> Result<Self, LabelSelectorError>
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self::set_based(key.into(), Operator::In, values)
    }

    pub fn not_in<I, V>(key: impl Into<String>, values: I) -> Result<Self, LabelSelectorError>
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self::set_based(key.into(), Operator::NotIn, values)
    }

    fn set_based<I, V>(key: String, operator: Operator, values: I) -> Result<Self, LabelSelectorError>
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(LabelSelectorError::EmptyValueSet { key });
        }
        Self::build(key, operator, values)
    }

    fn build(
        key: String,
        operator: Operator,
        values: Vec<String>,
    ) -> Result<Self, LabelSelectorError> {
        check_word(&key)?;
        for value in &values {
            check_word(value)?;
        }
        Ok(Self {
            key,
            operator,
            values,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operator {
            Operator::Exists => write!(f, "{}", self.key),
            Operator::NotExists => write!(f, "!{}", self.key),
            Operator::Equals | Operator::NotEquals => {
                write!(f, "{}{}{}", self.key, self.operator.symbol(), self.values[0])
            }
            Operator::In | Operator::NotIn => write!(
                f,
                "{} {} ({})",
                self.key,
                self.operator.symbol(),
                self.values.join(",")
            ),
        }
    }
}

/// Rejects text that would not scan back as a single word token.
fn check_word(word: &str) -> Result<(), LabelSelectorError> {
    if word.is_empty() || !word.chars().all(is_word_char) {
        return Err(LabelSelectorError::InvalidWord {
            word: word.to_string(),
        });
    }
    Ok(())
}

/// A requirement still being assembled by the parser.
///
/// Created when a key is read, filled in by later tokens and turned into a
/// [`Requirement`] exactly once by [`PartialRequirement::commit`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartialRequirement {
    key: String,
    operator: Option<Operator>,
    values: Vec<String>,
}

impl PartialRequirement {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            operator: None,
            values: Vec::new(),
        }
    }

    pub fn with_operator(key: impl Into<String>, operator: Operator) -> Self {
        Self {
            operator: Some(operator),
            ..Self::new(key)
        }
    }

    pub fn set_operator(&mut self, operator: Operator) {
        self.operator = Some(operator);
    }

    pub fn push_value(&mut self, value: impl Into<String>) {
        self.values.push(value.into());
    }

    /// Finalizes the node, checking the value count against the operator.
    pub fn commit(self) -> Result<Requirement, LabelSelectorError> {
        let Some(operator) = self.operator else {
            return Err(LabelSelectorError::Internal(format!(
                "requirement for key '{}' committed without an operator",
                self.key
            )));
        };
        let well_formed = match operator {
            Operator::Exists | Operator::NotExists => self.values.is_empty(),
            Operator::Equals | Operator::NotEquals => self.values.len() == 1,
            Operator::In | Operator::NotIn => !self.values.is_empty(),
        };
        if !well_formed {
            return Err(LabelSelectorError::Internal(format!(
                "requirement for key '{}' has {} value(s) for operator {}",
                self.key,
                self.values.len(),
                operator
            )));
        }
        Requirement::build(self.key, operator, self.values)
    }
}

/// An ordered list of requirements compiled from one selector string.
///
/// Never empty: an empty selector has no text form, so `new` refuses an
/// empty list the same way parsing refuses an empty string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LabelSelector {
    requirements: Vec<Requirement>,
}

impl LabelSelector {
    pub fn new(requirements: Vec<Requirement>) -> Result<Self, LabelSelectorError> {
        if requirements.is_empty() {
            return Err(LabelSelectorError::EmptySelector);
        }
        Ok(Self { requirements })
    }

    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    /// Keys in selector order, repeats included.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.requirements.iter().map(Requirement::key)
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    pub fn into_requirements(self) -> Vec<Requirement> {
        self.requirements
    }
}

impl std::str::FromStr for LabelSelector {
    type Err = ParseErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let requirements = crate::parser::parse(s)?;
        Ok(LabelSelector::new(requirements)?)
    }
}

impl fmt::Display for LabelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, requirement) in self.requirements.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", requirement)?;
        }
        Ok(())
    }
}

impl IntoIterator for LabelSelector {
    type Item = Requirement;
    type IntoIter = std::vec::IntoIter<Requirement>;

    fn into_iter(self) -> Self::IntoIter {
        self.requirements.into_iter()
    }
}

impl<'a> IntoIterator for &'a LabelSelector {
    type Item = &'a Requirement;
    type IntoIter = std::slice::Iter<'a, Requirement>;

    fn into_iter(self) -> Self::IntoIter {
        self.requirements.iter()
    }
}
