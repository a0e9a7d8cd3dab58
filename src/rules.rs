//! Declarative validation rules over digested attribute values.
//!
//! A rule is an ordered list of conditions plus a joiner. Conditions are
//! evaluated in order; when the joined result is true the combination is
//! forbidden and the rule reports a violation built from the messages of
//! the conditions that held.

use crate::error::SpecError;
use crate::model::SpecRecord;
use crate::schema::AttrId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Equals,
    NotEquals,
}

impl Relation {
    fn holds(self, lhs: &str, rhs: &str) -> bool {
        match self {
            Relation::Equals => lhs == rhs,
            Relation::NotEquals => lhs != rhs,
        }
    }
}

/// Right-hand side of a condition: a literal token or another attribute.
#[derive(Debug, Clone, Copy)]
pub enum Operand {
    Attr(AttrId),
    Literal(&'static str),
}

impl Operand {
    fn resolve<'a>(&self, record: &'a SpecRecord) -> Option<&'a str> {
        match self {
            Operand::Attr(id) => record.get(*id),
            Operand::Literal(token) => Some(token),
        }
    }
}

impl From<AttrId> for Operand {
    fn from(id: AttrId) -> Self {
        Operand::Attr(id)
    }
}

impl From<&'static str> for Operand {
    fn from(token: &'static str) -> Self {
        Operand::Literal(token)
    }
}

/// One comparison between an attribute's value and an expected operand,
/// with the message fragment reported when it holds.
#[derive(Debug, Clone)]
pub struct Condition {
    option: AttrId,
    rel: Relation,
    expected: Operand,
    message: &'static str,
}

impl Condition {
    pub fn new(
        option: AttrId,
        rel: Relation,
        expected: impl Into<Operand>,
        message: &'static str,
    ) -> Self {
        Self {
            option,
            rel,
            expected: expected.into(),
            message,
        }
    }

    /// A condition over an attribute the record does not carry cannot hold.
    fn eval(&self, record: &SpecRecord) -> bool {
        match (record.get(self.option), self.expected.resolve(record)) {
            (Some(lhs), Some(rhs)) => self.rel.holds(lhs, rhs),
            _ => false,
        }
    }
}

/// How a rule's condition results are combined. Carries both the
/// aggregation and the short-circuit behavior as data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Joiner {
    AllMustHold,
    AnyMayHold,
}

impl Joiner {
    fn join_text(self) -> &'static str {
        match self {
            Joiner::AllMustHold => " and ",
            Joiner::AnyMayHold => " or ",
        }
    }

    fn break_on_true(self) -> bool {
        matches!(self, Joiner::AnyMayHold)
    }

    fn aggregate(self, results: &[bool]) -> bool {
        match self {
            Joiner::AllMustHold => results.iter().all(|r| *r),
            Joiner::AnyMayHold => results.iter().any(|r| *r),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rule {
    conditions: Vec<Condition>,
    joiner: Joiner,
}

impl Rule {
    pub fn new(conditions: Vec<Condition>, joiner: Joiner) -> Self {
        Self { conditions, joiner }
    }

    /// Evaluate against one record; a joined-true result is a violation.
    pub fn check(&self, record: &SpecRecord) -> Result<(), SpecError> {
        let mut results = Vec::with_capacity(self.conditions.len());
        let mut messages = Vec::new();
        for condition in &self.conditions {
            let held = condition.eval(record);
            results.push(held);
            if held {
                messages.push(format!("{} {}", condition.option.name_key(), condition.message));
                if self.joiner.break_on_true() {
                    break;
                }
            }
        }

        if self.joiner.aggregate(&results) {
            return Err(SpecError::RuleViolation {
                category: record.category,
                name: record
                    .get(AttrId::InternalName)
                    .unwrap_or(record.get(AttrId::ShortName).unwrap_or("?"))
                    .to_string(),
                message: messages.join(self.joiner.join_text()),
            });
        }
        Ok(())
    }
}

/// The validators every digested record must pass, in evaluation order.
pub fn standard_rules() -> Vec<Rule> {
    vec![
        Rule::new(
            vec![
                Condition::new(
                    AttrId::Dims,
                    Relation::Equals,
                    "MAPL_DimsHorzVert",
                    "is equal to MAPL_DimsHorzVert",
                ),
                Condition::new(
                    AttrId::Vlocation,
                    Relation::Equals,
                    "MAPL_VlocationNone",
                    "is equal to MAPL_VlocationNone",
                ),
            ],
            Joiner::AllMustHold,
        ),
        Rule::new(
            vec![
                Condition::new(
                    AttrId::Dims,
                    Relation::Equals,
                    "MAPL_DimsHorzOnly",
                    "is equal to MAPL_DimsHorzOnly",
                ),
                Condition::new(
                    AttrId::Vlocation,
                    Relation::NotEquals,
                    "MAPL_VlocationNone",
                    "is not equal to MAPL_VlocationNone",
                ),
            ],
            Joiner::AllMustHold,
        ),
    ]
}
