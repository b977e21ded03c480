//! Matrix literal parsing.
//!
//! Quirk writes matrices as `{{a,b},{c,d}}` with complex entries such as
//! `1`, `-i`, `√½` or `0.5+0.5i`.

use num_complex::Complex64;
use quirk_ir::{Function, ParameterExpression};

use crate::error::{QuirkError, QuirkResult};
use crate::formula::{expand_unicode_fractions, parse_expression};

/// A dense row-major complex matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexMatrix {
    rows: usize,
    cols: usize,
    data: Vec<Complex64>,
}

impl ComplexMatrix {
    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Entry at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Option<Complex64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.data[row * self.cols + col])
    }

    /// Check if the matrix is square.
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Row-major entries.
    pub fn data(&self) -> &[Complex64] {
        &self.data
    }

    /// Consume the matrix, returning its row-major entries.
    pub fn into_data(self) -> Vec<Complex64> {
        self.data
    }
}

/// Parse a `{{a,b},{c,d}}` matrix literal.
pub fn parse_matrix(text: &str) -> QuirkResult<ComplexMatrix> {
    let inner = text
        .strip_prefix("{{")
        .and_then(|t| t.strip_suffix("}}"))
        .ok_or_else(|| QuirkError::MatrixFormat(format!("no opening/closing braces in {text:?}")))?;
    let inner = expand_unicode_fractions(inner);

    let mut cols = None;
    let mut rows = 0;
    let mut data = Vec::new();
    for row in inner.split("},{") {
        let entries = row
            .split(',')
            .map(parse_complex)
            .collect::<QuirkResult<Vec<_>>>()?;
        match cols {
            None => cols = Some(entries.len()),
            Some(n) if n != entries.len() => {
                return Err(QuirkError::MatrixFormat(format!(
                    "row {rows} has {} entries, expected {n}",
                    entries.len()
                )));
            }
            Some(_) => {}
        }
        data.extend(entries);
        rows += 1;
    }

    Ok(ComplexMatrix {
        rows,
        cols: cols.unwrap_or(0),
        data,
    })
}

/// Parse one complex matrix entry.
pub fn parse_complex(text: &str) -> QuirkResult<Complex64> {
    let text = text.trim();
    let failed = || QuirkError::ComplexLiteral(text.to_string());

    // `2i` is shorthand for `2*i`
    let coefficient = text.strip_suffix('i').filter(|head| {
        head.chars()
            .last()
            .is_some_and(|c| c.is_ascii_digit() || matches!(c, '.' | ')' | 'π'))
    });
    let rewritten = match coefficient {
        Some(head) => format!("{head}*i"),
        None => text.to_string(),
    };

    let expr = parse_expression(&rewritten).map_err(|_| failed())?;
    eval_complex(&expr).ok_or_else(failed)
}

/// Evaluate an expression over the complex numbers with `i` as the
/// imaginary unit.
fn eval_complex(expr: &ParameterExpression) -> Option<Complex64> {
    let value = match expr {
        ParameterExpression::Constant(v) => Complex64::new(*v, 0.0),
        ParameterExpression::Symbol(name) if name == "i" => Complex64::i(),
        ParameterExpression::Symbol(_) => return None,
        ParameterExpression::Pi => Complex64::new(std::f64::consts::PI, 0.0),
        ParameterExpression::Euler => Complex64::new(std::f64::consts::E, 0.0),
        ParameterExpression::Neg(e) => -eval_complex(e)?,
        ParameterExpression::Add(a, b) => eval_complex(a)? + eval_complex(b)?,
        ParameterExpression::Sub(a, b) => eval_complex(a)? - eval_complex(b)?,
        ParameterExpression::Mul(a, b) => eval_complex(a)? * eval_complex(b)?,
        ParameterExpression::Div(a, b) => {
            let divisor = eval_complex(b)?;
            if divisor.norm_sqr() == 0.0 {
                return None;
            }
            eval_complex(a)? / divisor
        }
        ParameterExpression::Pow(a, b) => eval_complex(a)?.powc(eval_complex(b)?),
        ParameterExpression::Call(f, e) => apply_complex(*f, eval_complex(e)?),
    };
    (value.re.is_finite() && value.im.is_finite()).then_some(value)
}

fn apply_complex(function: Function, z: Complex64) -> Complex64 {
    match function {
        Function::Sin => z.sin(),
        Function::Cos => z.cos(),
        Function::Tan => z.tan(),
        Function::Asin => z.asin(),
        Function::Acos => z.acos(),
        Function::Atan => z.atan(),
        Function::Sinh => z.sinh(),
        Function::Cosh => z.cosh(),
        Function::Tanh => z.tanh(),
        Function::Exp => z.exp(),
        Function::Ln => z.ln(),
        Function::Sqrt => z.sqrt(),
        Function::Abs => Complex64::new(z.norm(), 0.0),
    }
}
