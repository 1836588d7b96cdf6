use label_selector::{LabelSelectorParser, ParseErrors, Requirement, Token, TokenKind};

/// Parse result for one selector of a batch.
#[derive(Debug)]
pub struct SelectorOutcome {
    pub selector: String,
    pub result: Result<Vec<Requirement>, ParseErrors>,
}

/// Parse results for a batch of selectors, in input order.
///
/// The `lsel` exit status comes from `all_accepted`.
#[derive(Debug, Default)]
pub struct SelectorReport {
    outcomes: Vec<SelectorOutcome>,
}

impl SelectorReport {
    pub fn parse_all<S: AsRef<str>>(parser: &LabelSelectorParser, selectors: &[S]) -> Self {
        let outcomes = selectors
            .iter()
            .map(|selector| SelectorOutcome {
                selector: selector.as_ref().to_string(),
                result: parser.parse(selector.as_ref()),
            })
            .collect();
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[SelectorOutcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of selectors that failed to parse.
    pub fn rejected(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_err()).count()
    }

    pub fn all_accepted(&self) -> bool {
        self.rejected() == 0
    }
}

/// Whether a token stream scanned without any invalid character.
pub fn tokens_accepted(tokens: &[Token]) -> bool {
    tokens.iter().all(|t| t.kind != TokenKind::Error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_batch_is_accepted() {
        let report = SelectorReport::parse_all(&LabelSelectorParser::new(), &[] as &[&str]);
        assert!(report.is_empty());
        assert!(report.all_accepted());
    }
}
