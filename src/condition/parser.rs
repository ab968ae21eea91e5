//! Condition string parser

use crate::condition::ast::{AstNode, ConditionValue, Operator, SingleCondition};
use crate::error::{LifeError, Result};
use crate::property::Property;

/// Parse a condition string into an AST
///
/// Unknown property names are rejected here, so a parsed AST is always
/// evaluable against any [`LifeState`](crate::property::LifeState).
pub fn parse(condition: &str) -> Result<AstNode> {
    let condition = condition.trim();
    if condition.is_empty() {
        return Err(invalid(condition, "empty condition"));
    }

    let tokens = tokenize(condition)?;
    parse_tokens(&tokens).map_err(|err| match err {
        LifeError::InvalidCondition { reason, .. } => invalid(condition, reason),
        other => other,
    })
}

fn invalid(condition: &str, reason: impl Into<String>) -> LifeError {
    LifeError::InvalidCondition {
        condition: condition.to_string(),
        reason: reason.into(),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Condition(String),
    And,
    Or,
    OpenParen,
    CloseParen,
}

fn tokenize(condition: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut paren_depth = 0i32;
    let mut in_array = false;

    fn flush(current: &mut String, tokens: &mut Vec<Token>) {
        if !current.is_empty() {
            tokens.push(Token::Condition(std::mem::take(current)));
        }
    }

    for c in condition.chars() {
        match c {
            // Whitespace only separates tokens at '&', '|' and parentheses
            c if c.is_whitespace() => {}
            '[' => {
                in_array = true;
                current.push(c);
            }
            ']' => {
                in_array = false;
                current.push(c);
            }
            '(' => {
                flush(&mut current, &mut tokens);
                tokens.push(Token::OpenParen);
                paren_depth += 1;
            }
            ')' => {
                flush(&mut current, &mut tokens);
                tokens.push(Token::CloseParen);
                paren_depth -= 1;
                if paren_depth < 0 {
                    return Err(invalid(condition, "unbalanced parentheses"));
                }
            }
            '&' => {
                flush(&mut current, &mut tokens);
                tokens.push(Token::And);
            }
            '|' => {
                flush(&mut current, &mut tokens);
                tokens.push(Token::Or);
            }
            _ => current.push(c),
        }
    }
    flush(&mut current, &mut tokens);

    if paren_depth != 0 || in_array {
        return Err(invalid(condition, "unbalanced parentheses or brackets"));
    }

    Ok(tokens)
}

fn parse_tokens(tokens: &[Token]) -> Result<AstNode> {
    if tokens.is_empty() {
        return Err(invalid("", "empty expression"));
    }

    // Find the lowest precedence operator (OR has lower precedence than AND)
    let mut paren_depth = 0;
    let mut or_pos = None;
    let mut and_pos = None;

    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::OpenParen => paren_depth += 1,
            Token::CloseParen => paren_depth -= 1,
            Token::Or if paren_depth == 0 => or_pos = Some(i),
            Token::And if paren_depth == 0 && or_pos.is_none() => and_pos = Some(i),
            _ => {}
        }
    }

    if let Some(pos) = or_pos {
        let left = parse_tokens(&tokens[..pos])?;
        let right = parse_tokens(&tokens[pos + 1..])?;
        return Ok(AstNode::Or(Box::new(left), Box::new(right)));
    }

    if let Some(pos) = and_pos {
        let left = parse_tokens(&tokens[..pos])?;
        let right = parse_tokens(&tokens[pos + 1..])?;
        return Ok(AstNode::And(Box::new(left), Box::new(right)));
    }

    if tokens.len() >= 2 {
        if let (Token::OpenParen, Token::CloseParen) = (&tokens[0], &tokens[tokens.len() - 1]) {
            return parse_tokens(&tokens[1..tokens.len() - 1]);
        }
    }

    if let [Token::Condition(cond)] = tokens {
        return parse_single_condition(cond);
    }

    Err(invalid("", format!("cannot parse tokens: {:?}", tokens)))
}

fn parse_single_condition(condition: &str) -> Result<AstNode> {
    // Two-character operators first so ">=" never reads as ">"
    let operators = [
        (">=", Operator::GreaterEqual),
        ("<=", Operator::LessEqual),
        ("!=", Operator::NotEqual),
        (">", Operator::Greater),
        ("<", Operator::Less),
        ("=", Operator::Equal),
        ("?", Operator::IncludesAny),
        ("!", Operator::ExcludesAll),
    ];

    for (op_str, operator) in operators {
        if let Some(pos) = condition.find(op_str) {
            let property: Property = condition[..pos].trim().parse()?;
            let value = parse_value(condition[pos + op_str.len()..].trim())?;

            return Ok(AstNode::Single(SingleCondition {
                property,
                operator,
                value,
            }));
        }
    }

    Err(invalid(condition, "no operator found"))
}

fn parse_value(value_str: &str) -> Result<ConditionValue> {
    if let Some(inner) = value_str
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    {
        return inner
            .split(',')
            .map(|s| s.trim().parse::<i32>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(ConditionValue::Array)
            .map_err(|_| invalid(value_str, "invalid array"));
    }

    if let Ok(i) = value_str.parse::<i32>() {
        return Ok(ConditionValue::Integer(i));
    }

    if let Ok(f) = value_str.parse::<f64>() {
        return Ok(ConditionValue::Float(f));
    }

    Err(invalid(value_str, "invalid value"))
}
