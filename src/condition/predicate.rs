//! Compiled predicates

use std::fmt;
use std::str::FromStr;

use crate::condition::ast::AstNode;
use crate::condition::{evaluator, parser};
use crate::error::{LifeError, Result};
use crate::property::LifeState;

/// A condition parsed once at catalog load and evaluated many times
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    source: String,
    ast: AstNode,
}

impl Condition {
    pub fn parse(source: &str) -> Result<Self> {
        Ok(Self {
            source: source.trim().to_string(),
            ast: parser::parse(source)?,
        })
    }

    /// Compile an optional condition; blank strings mean "always"
    pub fn parse_optional(source: Option<&str>) -> Result<Option<Self>> {
        match source.map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => Self::parse(s).map(Some),
        }
    }

    /// Pure function of the snapshot
    #[inline]
    pub fn check(&self, state: &LifeState) -> bool {
        evaluator::check(&self.ast, state)
    }

    pub fn ast(&self) -> &AstNode {
        &self.ast
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Absent conditions always hold
#[inline]
pub fn holds(condition: Option<&Condition>, state: &LifeState) -> bool {
    condition.map_or(true, |c| c.check(state))
}

impl FromStr for Condition {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
