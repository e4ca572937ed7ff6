//! Operand defaultability for operators.
//!
//! An operator application where an operand is the untyped default-value
//! placeholder is rejected outright, even when exactly one applicable
//! operator exists under the current type set: uniqueness computed today
//! is not stable under tomorrow's operator overloads, so the rejection is
//! unconditional rather than a tie-break fallback.

use std::fmt;

use thiserror::Error;

use crate::hir::Type;
use crate::span::Span;

/// The operator being applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    // Unary
    Neg,
    Not,
    BitNot,
    // Binary
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl OperatorKind {
    /// The surface syntax of the operator.
    pub fn symbol(self) -> &'static str {
        match self {
            OperatorKind::Neg => "-",
            OperatorKind::Not => "!",
            OperatorKind::BitNot => "~",
            OperatorKind::Add => "+",
            OperatorKind::Sub => "-",
            OperatorKind::Mul => "*",
            OperatorKind::Div => "/",
            OperatorKind::Rem => "%",
            OperatorKind::Eq => "==",
            OperatorKind::Ne => "!=",
            OperatorKind::Lt => "<",
            OperatorKind::Le => "<=",
            OperatorKind::Gt => ">",
            OperatorKind::Ge => ">=",
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One operand of an operator application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// An operand with a known type.
    Typed(Type),
    /// The untyped default-value placeholder.
    DefaultLiteral,
}

/// A unary or binary operator application, as far as the defaultability
/// rule needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorApp {
    pub op: OperatorKind,
    /// One operand for unary operators, two for binary.
    pub operands: Vec<Operand>,
    pub span: Span,
}

impl OperatorApp {
    pub fn unary(op: OperatorKind, operand: Operand) -> Self {
        Self { op, operands: vec![operand], span: Span::dummy() }
    }

    pub fn binary(op: OperatorKind, lhs: Operand, rhs: Operand) -> Self {
        Self { op, operands: vec![lhs, rhs], span: Span::dummy() }
    }
}

/// An operator application with an untyped default-value operand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("operator `{op}` cannot be applied to an untyped default value")]
pub struct DefaultOperandRejected {
    pub op: OperatorKind,
    /// Zero-based positions of the default-value operands.
    pub positions: Vec<usize>,
    pub span: Span,
}

/// Reject any operator application with a default-value operand.
pub fn check_operator_operand(app: &OperatorApp) -> Result<(), DefaultOperandRejected> {
    let positions: Vec<usize> = app
        .operands
        .iter()
        .enumerate()
        .filter(|(_, operand)| matches!(operand, Operand::DefaultLiteral))
        .map(|(i, _)| i)
        .collect();

    if positions.is_empty() {
        return Ok(());
    }
    Err(DefaultOperandRejected { op: app.op, positions, span: app.span })
}
