// Fun fact text

use super::predicates::{decimal_digits, is_armstrong};

/// Human-readable sentence about `n`.
///
/// Armstrong numbers get their digit power expansion spelled out, e.g.
/// `153 is an Armstrong number because 1^3 + 5^3 + 3^3 = 153`.
pub fn build_fun_fact(n: i64) -> String {
    if !is_armstrong(n) {
        return format!("{n} is an interesting number.");
    }

    let digits = decimal_digits(n.unsigned_abs());
    let exponent = digits.len();
    let expansion = digits
        .iter()
        .map(|d| format!("{d}^{exponent}"))
        .collect::<Vec<_>>()
        .join(" + ");
    format!("{n} is an Armstrong number because {expansion} = {n}")
}
