//! Gate formula parsing.
//!
//! Formulas are arithmetic expressions in the time variable `t`, e.g.
//! `sin(pi*t)` or `t^2 - ½`. Vulgar fraction glyphs are expanded before
//! lexing, then the tokens are parsed by precedence climbing into a
//! [`ParameterExpression`].

use quirk_ir::{Function, ParameterExpression};
use serde_json::Value;
use std::f64::consts::TAU;

use crate::error::{QuirkError, QuirkResult};
use crate::lexer::{SpannedToken, Token, tokenize};

/// The only free variable a gate formula may use.
pub const TIME_SYMBOL: &str = "t";

const UNICODE_FRACTIONS: [(&str, &str); 18] = [
    ("½", "(1/2)"),
    ("¼", "(1/4)"),
    ("¾", "(3/4)"),
    ("⅓", "(1/3)"),
    ("⅔", "(2/3)"),
    ("⅕", "(1/5)"),
    ("⅖", "(2/5)"),
    ("⅗", "(3/5)"),
    ("⅘", "(4/5)"),
    ("⅙", "(1/6)"),
    ("⅚", "(5/6)"),
    ("⅐", "(1/7)"),
    ("⅛", "(1/8)"),
    ("⅜", "(3/8)"),
    ("⅝", "(5/8)"),
    ("⅞", "(7/8)"),
    ("⅑", "(1/9)"),
    ("⅒", "(1/10)"),
];

/// Replace fraction glyphs with parenthesized divisions.
///
/// `√` directly before a glyph becomes a square root of the fraction.
pub fn expand_unicode_fractions(text: &str) -> String {
    let mut text = text.to_string();
    for (glyph, expansion) in UNICODE_FRACTIONS {
        if !text.contains(glyph) {
            continue;
        }
        text = text
            .replace(&format!("√{glyph}"), &format!("(sqrt{expansion})"))
            .replace(glyph, expansion);
    }
    text
}

/// Parse a cell's formula argument.
///
/// An absent (or `null`) argument falls back to `default`. A formula without
/// free variables is folded to a constant.
pub fn parse_formula(value: Option<&Value>, default: &str) -> QuirkResult<ParameterExpression> {
    let text = match value {
        None | Some(Value::Null) => default,
        Some(Value::String(s)) => s.as_str(),
        Some(other) => return Err(QuirkError::FormulaType(other.to_string())),
    };
    parse_formula_text(text)
}

/// Parse formula text.
pub fn parse_formula_text(text: &str) -> QuirkResult<ParameterExpression> {
    let expanded = expand_unicode_fractions(text);
    let expr = parse_expression(&expanded).map_err(|detail| QuirkError::FormulaSyntax {
        formula: text.to_string(),
        detail,
    })?;

    let symbols = expr.symbols();
    if symbols.iter().any(|s| s != TIME_SYMBOL) {
        return Err(QuirkError::ExtraVariable(text.to_string()));
    }
    let expr = expr.simplify();
    if !constants_are_finite(&expr) {
        return Err(QuirkError::FormulaSyntax {
            formula: text.to_string(),
            detail: "does not evaluate to a finite number".into(),
        });
    }
    Ok(expr)
}

/// Check that no constant part of a simplified expression is infinite,
/// NaN or a division by zero.
fn constants_are_finite(expr: &ParameterExpression) -> bool {
    match expr {
        ParameterExpression::Constant(v) => v.is_finite(),
        ParameterExpression::Symbol(_) | ParameterExpression::Pi | ParameterExpression::Euler => {
            true
        }
        ParameterExpression::Neg(e) | ParameterExpression::Call(_, e) => constants_are_finite(e),
        ParameterExpression::Div(a, b) => {
            b.as_f64() != Some(0.0) && constants_are_finite(a) && constants_are_finite(b)
        }
        ParameterExpression::Add(a, b)
        | ParameterExpression::Sub(a, b)
        | ParameterExpression::Mul(a, b)
        | ParameterExpression::Pow(a, b) => constants_are_finite(a) && constants_are_finite(b),
    }
}

/// Parse already-expanded expression text.
///
/// Identifiers other than constants and function names become symbols; the
/// caller decides which are allowed.
pub(crate) fn parse_expression(source: &str) -> Result<ParameterExpression, String> {
    let mut parser = Parser::new(source)?;
    let expr = parser.parse_expression()?;
    if let Some(token) = parser.peek() {
        return Err(format!("unexpected '{token}'"));
    }
    Ok(expr)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Binding power of unary minus: tighter than `*`, looser than `^`.
const UNARY_PREC: u8 = 3;

fn op_precedence(op: BinOp) -> u8 {
    match op {
        BinOp::Add | BinOp::Sub => 1,
        BinOp::Mul | BinOp::Div => 2,
        BinOp::Pow => 4,
    }
}

/// Parser state.
struct Parser {
    tokens: Vec<SpannedToken>,
    pos: usize,
}

impl Parser {
    fn new(source: &str) -> Result<Self, String> {
        let mut tokens = Vec::new();
        for result in tokenize(source) {
            match result {
                Ok(t) => tokens.push(t),
                Err((span, msg)) => return Err(format!("{msg} at position {}", span.start)),
            }
        }
        Ok(Self { tokens, pos: 0 })
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos)?.token.clone();
        self.pos += 1;
        Some(token)
    }

    fn check(&self, token: &Token) -> bool {
        self.peek() == Some(token)
    }

    fn consume(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: &Token) -> Result<(), String> {
        match self.advance() {
            Some(ref found) if found == expected => Ok(()),
            Some(found) => Err(format!("expected '{expected}', found '{found}'")),
            None => Err(format!("expected '{expected}', found end of formula")),
        }
    }

    fn parse_expression(&mut self) -> Result<ParameterExpression, String> {
        self.parse_binary_expr(0)
    }

    /// Parse binary expression with precedence climbing.
    fn parse_binary_expr(&mut self, min_prec: u8) -> Result<ParameterExpression, String> {
        let mut left = self.parse_unary_expr()?;

        while let Some(op) = self.peek_binary_op() {
            let prec = op_precedence(op);
            if prec < min_prec {
                break;
            }
            self.advance();

            // `^` is right-associative
            let next_min = if op == BinOp::Pow { prec } else { prec + 1 };
            let right = self.parse_binary_expr(next_min)?;
            left = match op {
                BinOp::Add => left + right,
                BinOp::Sub => left - right,
                BinOp::Mul => left * right,
                BinOp::Div => left / right,
                BinOp::Pow => left.pow(right),
            };
        }

        Ok(left)
    }

    fn parse_unary_expr(&mut self) -> Result<ParameterExpression, String> {
        if self.consume(&Token::Minus) {
            let operand = self.parse_binary_expr(UNARY_PREC)?;
            return Ok(-operand);
        }
        if self.consume(&Token::Plus) {
            return self.parse_binary_expr(UNARY_PREC);
        }
        if self.consume(&Token::Root) {
            let operand = self.parse_binary_expr(UNARY_PREC)?;
            return Ok(ParameterExpression::call(Function::Sqrt, operand));
        }
        self.parse_primary_expr()
    }

    fn parse_primary_expr(&mut self) -> Result<ParameterExpression, String> {
        let token = self
            .advance()
            .ok_or_else(|| "unexpected end of formula".to_string())?;

        match token {
            Token::Number(v) => Ok(ParameterExpression::Constant(v)),
            Token::Pi => Ok(ParameterExpression::Pi),
            Token::Identifier(name) => {
                if self.check(&Token::LParen) {
                    let function = Function::from_name(&name)
                        .ok_or_else(|| format!("unknown function '{name}'"))?;
                    self.advance();
                    let arg = self.parse_expression()?;
                    self.expect(&Token::RParen)?;
                    return Ok(ParameterExpression::call(function, arg));
                }
                Ok(match name.as_str() {
                    "pi" => ParameterExpression::Pi,
                    "e" => ParameterExpression::Euler,
                    "tau" => ParameterExpression::Constant(TAU),
                    _ => ParameterExpression::Symbol(name),
                })
            }
            Token::LParen => {
                let expr = self.parse_expression()?;
                self.expect(&Token::RParen)?;
                Ok(expr)
            }
            other => Err(format!("unexpected '{other}'")),
        }
    }

    fn peek_binary_op(&self) -> Option<BinOp> {
        match self.peek()? {
            Token::Plus => Some(BinOp::Add),
            Token::Minus => Some(BinOp::Sub),
            Token::Star => Some(BinOp::Mul),
            Token::Slash => Some(BinOp::Div),
            Token::Caret | Token::Power => Some(BinOp::Pow),
            _ => None,
        }
    }
}
