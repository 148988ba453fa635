//! Binary operators on runtime values.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};
use plc_core::{RuntimeError, RuntimeResult, Value};
use plc_parser::BinaryOp;
use std::cmp::Ordering;

/// Apply a binary operator to two evaluated operands.
///
/// `AND`/`OR` short-circuit in the interpreter before reaching here; when both
/// operands are already evaluated they combine as plain booleans.
pub fn apply_binary(op: BinaryOp, left: Value, right: Value) -> RuntimeResult<Value> {
    match op {
        BinaryOp::Eq => Ok(Value::Boolean(left == right)),
        BinaryOp::NotEq => Ok(Value::Boolean(left != right)),
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            let ordering = compare(&left, &right).ok_or_else(|| invalid(op, &left, &right))?;
            let result = match op {
                BinaryOp::Lt => ordering == Ordering::Less,
                BinaryOp::LtEq => ordering != Ordering::Greater,
                BinaryOp::Gt => ordering == Ordering::Greater,
                _ => ordering != Ordering::Less,
            };
            Ok(Value::Boolean(result))
        }
        BinaryOp::And | BinaryOp::Or => match (&left, &right) {
            (Value::Boolean(a), Value::Boolean(b)) => {
                let result = if op == BinaryOp::And { *a && *b } else { *a || *b };
                Ok(Value::Boolean(result))
            }
            _ => Err(invalid(op, &left, &right)),
        },
        BinaryOp::Add => add(left, right),
        BinaryOp::Sub => match (left, right) {
            (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a - b)),
            (Value::Decimal(a), Value::Decimal(b)) => Ok(Value::Decimal(a - b)),
            (left, right) => Err(invalid(op, &left, &right)),
        },
        BinaryOp::Mul => match (left, right) {
            (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a * b)),
            (Value::Decimal(a), Value::Decimal(b)) => Ok(Value::Decimal(a * b)),
            (left, right) => Err(invalid(op, &left, &right)),
        },
        BinaryOp::Div => match (left, right) {
            (Value::Integer(a), Value::Integer(b)) => {
                if b.is_zero() {
                    return Err(RuntimeError::DivisionByZero);
                }
                // BigInt division truncates toward zero.
                Ok(Value::Integer(a / b))
            }
            (Value::Decimal(a), Value::Decimal(b)) => Ok(Value::Decimal(divide_decimal(&a, &b)?)),
            (left, right) => Err(invalid(op, &left, &right)),
        },
    }
}

fn add(left: Value, right: Value) -> RuntimeResult<Value> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a + b)),
        (Value::Decimal(a), Value::Decimal(b)) => Ok(Value::Decimal(a + b)),
        (left, right) if is_string(&left) || is_string(&right) => {
            Ok(Value::String(format!("{}{}", left, right)))
        }
        (left, right) => Err(invalid(BinaryOp::Add, &left, &right)),
    }
}

fn is_string(value: &Value) -> bool {
    matches!(value, Value::String(_))
}

/// Natural ordering between like-kinded ordered values.
fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
        (Value::Decimal(a), Value::Decimal(b)) => Some(a.cmp(b)),
        (Value::Character(a), Value::Character(b)) => Some(a.cmp(b)),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn invalid(op: BinaryOp, left: &Value, right: &Value) -> RuntimeError {
    RuntimeError::invalid_operator(op.to_string(), left.kind_name(), right.kind_name())
}

/// Divide two decimals, keeping the dividend's scale and rounding half to even.
pub fn divide_decimal(dividend: &BigDecimal, divisor: &BigDecimal) -> RuntimeResult<BigDecimal> {
    if divisor.is_zero() {
        return Err(RuntimeError::DivisionByZero);
    }

    // dividend = a * 10^-sa, divisor = b * 10^-sb; the quotient at scale sa is a * 10^sb / b.
    let (a, scale) = dividend.as_bigint_and_exponent();
    let (b, divisor_scale) = divisor.as_bigint_and_exponent();
    let (numerator, denominator) = if divisor_scale >= 0 {
        (a * pow10(divisor_scale.unsigned_abs()), b)
    } else {
        (a, b * pow10(divisor_scale.unsigned_abs()))
    };

    Ok(BigDecimal::new(
        round_half_even(&numerator, &denominator),
        scale,
    ))
}

fn pow10(exponent: u64) -> BigInt {
    num_traits::pow(BigInt::from(10), exponent as usize)
}

fn round_half_even(numerator: &BigInt, denominator: &BigInt) -> BigInt {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    if remainder.is_zero() {
        return quotient;
    }

    let step = if numerator.is_negative() == denominator.is_negative() {
        BigInt::one()
    } else {
        -BigInt::one()
    };
    let twice = remainder.abs() * BigInt::from(2);
    let is_odd = !(&quotient % BigInt::from(2)).is_zero();

    match twice.cmp(&denominator.abs()) {
        Ordering::Greater => quotient + step,
        Ordering::Equal if is_odd => quotient + step,
        _ => quotient,
    }
}
