//! Tree traversal and token dispatch.

use crate::check::{Check, CheckBox};
use crate::context::CheckContext;
use crate::token::TokenType;
use crate::types::Violation;

use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// Errors raised while building a [`TreeWalker`].
#[derive(Debug, Error)]
pub enum WalkerError {
    /// A check was registered for a token it cannot process.
    #[error("token {token} is not acceptable for check '{check}'")]
    UnacceptableToken {
        /// Name of the check.
        check: String,
        /// Offending token.
        token: TokenType,
    },
}

/// A check together with the token list it was configured for.
pub struct CheckRegistration {
    /// The check itself.
    pub check: CheckBox,
    /// Explicit token interest; `None` uses the check's default tokens.
    pub tokens: Option<Vec<TokenType>>,
}

impl CheckRegistration {
    /// Registers a check with its default tokens.
    #[must_use]
    pub fn new(check: CheckBox) -> Self {
        Self {
            check,
            tokens: None,
        }
    }

    /// Registers a check with an explicit token list.
    #[must_use]
    pub fn with_tokens(check: CheckBox, tokens: Vec<TokenType>) -> Self {
        Self {
            check,
            tokens: Some(tokens),
        }
    }

    /// Effective token interest: configured (or default) tokens plus the
    /// check's required tokens, without duplicates.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured token is not acceptable.
    pub fn interest(&self) -> Result<Vec<TokenType>, WalkerError> {
        let acceptable = self.check.acceptable_tokens();
        let configured: &[TokenType] = match &self.tokens {
            Some(tokens) => tokens,
            None => self.check.default_tokens(),
        };

        let mut interest = Vec::new();
        for token in configured {
            if !acceptable.contains(token) {
                return Err(WalkerError::UnacceptableToken {
                    check: self.check.name().to_string(),
                    token: *token,
                });
            }
            if !interest.contains(token) {
                interest.push(*token);
            }
        }
        for token in self.check.required_tokens() {
            if !interest.contains(token) {
                interest.push(*token);
            }
        }
        Ok(interest)
    }
}

impl From<CheckBox> for CheckRegistration {
    fn from(check: CheckBox) -> Self {
        Self::new(check)
    }
}

/// Builder for a [`TreeWalker`].
#[derive(Default)]
pub struct TreeWalkerBuilder {
    registrations: Vec<CheckRegistration>,
}

impl TreeWalkerBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a check with its default tokens.
    #[must_use]
    pub fn check<C: Check + 'static>(mut self, check: C) -> Self {
        self.registrations
            .push(CheckRegistration::new(Box::new(check)));
        self
    }

    /// Adds a registration.
    #[must_use]
    pub fn registration(mut self, registration: CheckRegistration) -> Self {
        self.registrations.push(registration);
        self
    }

    /// Builds the dispatch table.
    ///
    /// # Errors
    ///
    /// Returns an error if any registration asks for an unacceptable token.
    pub fn build(self) -> Result<TreeWalker, WalkerError> {
        let mut dispatch: HashMap<TokenType, Vec<usize>> = HashMap::new();
        let mut checks = Vec::with_capacity(self.registrations.len());

        for (index, registration) in self.registrations.into_iter().enumerate() {
            let interest = registration.interest()?;
            debug!(
                "Registering {} for {:?}",
                registration.check.name(),
                interest
            );
            for token in interest {
                dispatch.entry(token).or_default().push(index);
            }
            checks.push(registration.check);
        }

        Ok(TreeWalker { checks, dispatch })
    }
}

/// Drives checks over a syntax tree.
///
/// The walker visits every node once in pre-order and hands it to each
/// check registered for the node's token type, in registration order.
pub struct TreeWalker {
    checks: Vec<CheckBox>,
    dispatch: HashMap<TokenType, Vec<usize>>,
}

impl TreeWalker {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> TreeWalkerBuilder {
        TreeWalkerBuilder::new()
    }

    /// Returns the registered checks.
    #[must_use]
    pub fn checks(&self) -> &[CheckBox] {
        &self.checks
    }

    /// Returns `true` if some check is interested in `token`.
    #[must_use]
    pub fn is_interested(&self, token: TokenType) -> bool {
        self.dispatch.contains_key(&token)
    }

    /// Walks the tree of `ctx` and returns violations sorted by
    /// (line, column); ties keep traversal order.
    #[must_use]
    pub fn walk(&self, ctx: &CheckContext<'_>) -> Vec<Violation> {
        let mut violations = Vec::new();

        for id in ctx.tree.preorder() {
            let Some(node) = ctx.tree.get(id) else {
                continue;
            };
            let Some(interested) = self.dispatch.get(&node.token_type()) else {
                continue;
            };
            for &index in interested {
                if let Some(violation) = self.checks[index].evaluate(ctx, id) {
                    violations.push(violation);
                }
            }
        }

        violations.sort_by(|a, b| {
            a.location
                .line
                .cmp(&b.location.line)
                .then(a.location.column.cmp(&b.location.column))
        });
        violations
    }
}
