//! Condition evaluator

use ahash::AHashSet;

use crate::condition::ast::{AstNode, ConditionValue, Operator, SingleCondition};
use crate::property::{LifeState, Property};

/// Evaluate an AST against a LifeState
pub fn check(ast: &AstNode, state: &LifeState) -> bool {
    match ast {
        AstNode::Single(cond) => check_single(cond, state),
        AstNode::And(left, right) => check(left, state) && check(right, state),
        AstNode::Or(left, right) => check(left, state) || check(right, state),
    }
}

fn check_single(cond: &SingleCondition, state: &LifeState) -> bool {
    let prop_value = state.get(cond.property);

    match (&prop_value, &cond.value, cond.operator) {
        // Integer comparisons
        (PropertyValue::Integer(pv), ConditionValue::Integer(cv), Operator::Greater) => pv > cv,
        (PropertyValue::Integer(pv), ConditionValue::Integer(cv), Operator::Less) => pv < cv,
        (PropertyValue::Integer(pv), ConditionValue::Integer(cv), Operator::GreaterEqual) => {
            pv >= cv
        }
        (PropertyValue::Integer(pv), ConditionValue::Integer(cv), Operator::LessEqual) => pv <= cv,
        (PropertyValue::Integer(pv), ConditionValue::Integer(cv), Operator::Equal) => pv == cv,
        (PropertyValue::Integer(pv), ConditionValue::Integer(cv), Operator::NotEqual) => pv != cv,

        // Float comparisons
        (PropertyValue::Integer(pv), ConditionValue::Float(cv), Operator::Greater) => {
            f64::from(*pv) > *cv
        }
        (PropertyValue::Integer(pv), ConditionValue::Float(cv), Operator::Less) => {
            f64::from(*pv) < *cv
        }
        (PropertyValue::Integer(pv), ConditionValue::Float(cv), Operator::GreaterEqual) => {
            f64::from(*pv) >= *cv
        }
        (PropertyValue::Integer(pv), ConditionValue::Float(cv), Operator::LessEqual) => {
            f64::from(*pv) <= *cv
        }
        (PropertyValue::Integer(pv), ConditionValue::Float(cv), Operator::Equal) => {
            f64::from(*pv) == *cv
        }
        (PropertyValue::Integer(pv), ConditionValue::Float(cv), Operator::NotEqual) => {
            f64::from(*pv) != *cv
        }

        // Set membership (=, !=)
        (PropertyValue::Set(set), ConditionValue::Integer(cv), Operator::Equal) => {
            set.contains(cv)
        }
        (PropertyValue::Set(set), ConditionValue::Integer(cv), Operator::NotEqual) => {
            !set.contains(cv)
        }

        // Includes any (?)
        (PropertyValue::Set(set), ConditionValue::Array(arr), Operator::IncludesAny) => {
            arr.iter().any(|v| set.contains(v))
        }
        (PropertyValue::Integer(pv), ConditionValue::Array(arr), Operator::IncludesAny) => {
            arr.contains(pv)
        }

        // Excludes all (!)
        (PropertyValue::Set(set), ConditionValue::Array(arr), Operator::ExcludesAll) => {
            arr.iter().all(|v| !set.contains(v))
        }
        (PropertyValue::Integer(pv), ConditionValue::Array(arr), Operator::ExcludesAll) => {
            !arr.contains(pv)
        }

        // Unsupported combinations never hold
        _ => false,
    }
}

/// Property value as seen by a condition
#[derive(Debug, Clone)]
pub enum PropertyValue<'a> {
    Integer(i32),
    Set(&'a AHashSet<i32>),
}

impl LifeState {
    /// Get property value for condition evaluation
    pub fn get(&self, prop: Property) -> PropertyValue<'_> {
        match prop {
            Property::Trait(t) => PropertyValue::Integer(self.trait_value(t)),
            Property::Age => PropertyValue::Integer(self.age),
            Property::Lif => PropertyValue::Integer(self.lif),
            Property::Tms => PropertyValue::Integer(self.tms),
            Property::Tlt => PropertyValue::Set(&self.tlt),
            Property::Evt => PropertyValue::Set(&self.evt),
        }
    }
}
