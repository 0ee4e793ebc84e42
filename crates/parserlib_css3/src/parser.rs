use crate::tokens::TokenKind;
use crate::Css3;
use parserlib_shared::errors::CssError;

mod at_rule;
mod block;
mod condition;
mod declaration;
mod media;
mod rule;
mod selector;
mod stylesheet;
mod value;

pub(crate) use block::BlockOptions;

/// Tokens that can start a simple selector sequence
pub(crate) const SELECTOR_START: &[TokenKind] = &[
    TokenKind::Amp,
    TokenKind::Pipe,
    TokenKind::Ident,
    TokenKind::Star,
    TokenKind::Hash,
    TokenKind::Dot,
    TokenKind::LBracket,
    TokenKind::Colon,
];

pub(crate) const COMBINATORS: &[TokenKind] = &[TokenKind::Plus, TokenKind::Gt, TokenKind::Combinator];

/// Tokens that can start a nested style rule
pub(crate) fn is_nested_selector_start(kind: TokenKind) -> bool {
    SELECTOR_START.contains(&kind) || COMBINATORS.contains(&kind)
}

/// Result of trying to read a style rule
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RuleOutcome {
    /// A rule with a body (possibly taken from the cache)
    Parsed,
    /// A rule with errors, which have been reported and skipped
    Failed,
    /// No selector here, the token was pushed back
    NotRule,
}

impl Css3<'_> {
    /// Recovers from an error inside a block: skips the rest of the broken declaration or rule
    /// and reports the error.
    pub(crate) fn declaration_failed(&mut self, error: CssError, in_block: bool) {
        log::trace!("declaration_failed");
        if let Some(close) = self.pair.take() {
            if self.parse_expr(&[close], true).is_err() {
                log::debug!("unbalanced {} while recovering", close.describe());
            }
        }
        self.tokenizer.skip_decl_block(in_block);
        self.report(error);
    }
}
