//! Reversible register arithmetic.
//!
//! Registers are unsigned little-endian integers: bit 0 is the register's
//! first qubit. Every operation maps the target value `x` to a new value of
//! the same width, wrapping modulo `2^width`, and is a bijection on the
//! target for each fixed set of input values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named input registers that arithmetic cells read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputRegister {
    A,
    B,
    R,
}

impl InputRegister {
    /// The register's letter as written on the board.
    pub fn letter(self) -> char {
        match self {
            InputRegister::A => 'A',
            InputRegister::B => 'B',
            InputRegister::R => 'R',
        }
    }
}

impl fmt::Display for InputRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Relations tested by comparison cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparison {
    Less,
    Greater,
    LessOrEqual,
    GreaterOrEqual,
    Equal,
    NotEqual,
}

impl Comparison {
    /// Whether the relation holds between `a` and `b`.
    pub fn holds(self, a: u64, b: u64) -> bool {
        match self {
            Comparison::Less => a < b,
            Comparison::Greater => a > b,
            Comparison::LessOrEqual => a <= b,
            Comparison::GreaterOrEqual => a >= b,
            Comparison::Equal => a == b,
            Comparison::NotEqual => a != b,
        }
    }

    /// Operator symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Comparison::Less => "<",
            Comparison::Greater => ">",
            Comparison::LessOrEqual => "<=",
            Comparison::GreaterOrEqual => ">=",
            Comparison::Equal => "=",
            Comparison::NotEqual => "!=",
        }
    }
}

/// A reversible integer transform of a target register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArithmeticOp {
    /// `x + 1`
    Increment,
    /// `x - 1`
    Decrement,
    /// `x + a`
    AddA,
    /// `x - a`
    SubA,
    /// `x + a*a`
    AddASquared,
    /// `x - a*a`
    SubASquared,
    /// `x + a*b`
    AddAB,
    /// `x - a*b`
    SubAB,
    /// `x ^ a`
    XorA,
    /// `x + popcount(a)`
    AddPopcountA,
    /// `x - popcount(a)`
    SubPopcountA,
    /// Reverses the order of the values below `a`.
    FlipBelowA,
    /// `x * a` when `a` is odd.
    MulA,
    /// `x * a^-1` when `a` is odd.
    DivA,
    /// Toggles a single target bit when the relation between `a` and `b` holds.
    Compare(Comparison),
}

impl ArithmeticOp {
    /// The input registers this operation reads, in qubit order after the target.
    pub fn inputs(self) -> &'static [InputRegister] {
        match self {
            ArithmeticOp::Increment | ArithmeticOp::Decrement => &[],
            ArithmeticOp::AddA
            | ArithmeticOp::SubA
            | ArithmeticOp::AddASquared
            | ArithmeticOp::SubASquared
            | ArithmeticOp::XorA
            | ArithmeticOp::AddPopcountA
            | ArithmeticOp::SubPopcountA
            | ArithmeticOp::FlipBelowA
            | ArithmeticOp::MulA
            | ArithmeticOp::DivA => &[InputRegister::A],
            ArithmeticOp::AddAB | ArithmeticOp::SubAB | ArithmeticOp::Compare(_) => {
                &[InputRegister::A, InputRegister::B]
            }
        }
    }

    /// Apply the transform to a `width`-bit target value.
    ///
    /// `inputs` holds the values of the registers named by [`Self::inputs`],
    /// in the same order. Missing inputs read as zero.
    pub fn apply(self, x: u64, inputs: &[u64], width: u32) -> u64 {
        let a = inputs.first().copied().unwrap_or(0);
        let b = inputs.get(1).copied().unwrap_or(0);
        let result = match self {
            ArithmeticOp::Increment => x.wrapping_add(1),
            ArithmeticOp::Decrement => x.wrapping_sub(1),
            ArithmeticOp::AddA => x.wrapping_add(a),
            ArithmeticOp::SubA => x.wrapping_sub(a),
            ArithmeticOp::AddASquared => x.wrapping_add(a.wrapping_mul(a)),
            ArithmeticOp::SubASquared => x.wrapping_sub(a.wrapping_mul(a)),
            ArithmeticOp::AddAB => x.wrapping_add(a.wrapping_mul(b)),
            ArithmeticOp::SubAB => x.wrapping_sub(a.wrapping_mul(b)),
            ArithmeticOp::XorA => x ^ a,
            ArithmeticOp::AddPopcountA => x.wrapping_add(u64::from(a.count_ones())),
            ArithmeticOp::SubPopcountA => x.wrapping_sub(u64::from(a.count_ones())),
            ArithmeticOp::FlipBelowA => {
                if x < a {
                    a - x - 1
                } else {
                    x
                }
            }
            ArithmeticOp::MulA => {
                if a & 1 == 1 {
                    x.wrapping_mul(a)
                } else {
                    x
                }
            }
            ArithmeticOp::DivA => {
                if a & 1 == 1 {
                    x.wrapping_mul(odd_inverse(a))
                } else {
                    x
                }
            }
            ArithmeticOp::Compare(cmp) => {
                if cmp.holds(a, b) {
                    x ^ 1
                } else {
                    x
                }
            }
        };
        result & mask(width)
    }

    /// The operation undoing this one, when it exists as an `ArithmeticOp`.
    pub fn inverse(self) -> Self {
        match self {
            ArithmeticOp::Increment => ArithmeticOp::Decrement,
            ArithmeticOp::Decrement => ArithmeticOp::Increment,
            ArithmeticOp::AddA => ArithmeticOp::SubA,
            ArithmeticOp::SubA => ArithmeticOp::AddA,
            ArithmeticOp::AddASquared => ArithmeticOp::SubASquared,
            ArithmeticOp::SubASquared => ArithmeticOp::AddASquared,
            ArithmeticOp::AddAB => ArithmeticOp::SubAB,
            ArithmeticOp::SubAB => ArithmeticOp::AddAB,
            ArithmeticOp::AddPopcountA => ArithmeticOp::SubPopcountA,
            ArithmeticOp::SubPopcountA => ArithmeticOp::AddPopcountA,
            ArithmeticOp::MulA => ArithmeticOp::DivA,
            ArithmeticOp::DivA => ArithmeticOp::MulA,
            ArithmeticOp::XorA | ArithmeticOp::FlipBelowA | ArithmeticOp::Compare(_) => self,
        }
    }
}

/// Multiplicative inverse of an odd number modulo 2^64.
fn odd_inverse(a: u64) -> u64 {
    // Newton iteration; each step doubles the number of correct low bits.
    let mut inv = a;
    for _ in 0..6 {
        inv = inv.wrapping_mul(2u64.wrapping_sub(a.wrapping_mul(inv)));
    }
    inv
}

/// Bit mask selecting the low `width` bits.
pub fn mask(width: u32) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

/// An arithmetic operation laid out over concrete register widths.
///
/// The operation's qubits are the target register followed by each input
/// register in [`ArithmeticOp::inputs`] order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArithmeticGate {
    /// The transform.
    pub op: ArithmeticOp,
    /// Width of the target register.
    pub target_width: u32,
    /// Width of each input register.
    pub input_widths: Vec<u32>,
}

impl ArithmeticGate {
    /// Create a new arithmetic gate.
    pub fn new(op: ArithmeticOp, target_width: u32, input_widths: Vec<u32>) -> Self {
        Self {
            op,
            target_width,
            input_widths,
        }
    }

    /// Total number of qubits touched.
    pub fn num_qubits(&self) -> u32 {
        self.target_width + self.input_widths.iter().sum::<u32>()
    }

    /// Apply the gate to the bits of its own qubits.
    ///
    /// `bits` is the little-endian concatenation of target and inputs; the
    /// input bits are returned unchanged.
    pub fn apply_to_bits(&self, bits: u64) -> u64 {
        let target = bits & mask(self.target_width);
        let mut offset = self.target_width;
        let inputs: Vec<u64> = self
            .input_widths
            .iter()
            .map(|&w| {
                let v = (bits >> offset) & mask(w);
                offset += w;
                v
            })
            .collect();
        let new_target = self.op.apply(target, &inputs, self.target_width);
        (bits & !mask(self.target_width)) | new_target
    }
}
