//! Numeric predicates
//!
//! Every function here is total over `i64`: no input panics or overflows.
//! Magnitudes are handled as `u64` (so `i64::MIN` is representable) and
//! accumulated sums as `u128`.

use std::sync::atomic::{AtomicBool, Ordering};

/// Divisor-loop iterations between cancellation checks
const CANCEL_CHECK_INTERVAL: u64 = 1 << 16;

/// Flag that is never raised, for the uncancellable entry points
static NEVER_CANCELLED: AtomicBool = AtomicBool::new(false);

fn cancelled(iteration: u64, cancel: &AtomicBool) -> bool {
    iteration % CANCEL_CHECK_INTERVAL == 0 && cancel.load(Ordering::Relaxed)
}

/// Trial division primality test.
///
/// Returns false below 2. Otherwise checks every candidate divisor up to and
/// including `floor(sqrt(n))`, skipping multiples of 2 and 3 after testing
/// them directly.
pub fn is_prime(n: i64) -> bool {
    is_prime_cancellable(n, &NEVER_CANCELLED).unwrap_or(false)
}

/// `is_prime` that gives up with `None` once `cancel` is raised
pub fn is_prime_cancellable(n: i64, cancel: &AtomicBool) -> Option<bool> {
    if n < 2 {
        return Some(false);
    }
    let n = n.unsigned_abs();
    if n < 4 {
        return Some(true);
    }
    if n % 2 == 0 || n % 3 == 0 {
        return Some(false);
    }

    // Remaining candidates have the form 6k ± 1
    let mut i: u64 = 5;
    let mut iteration: u64 = 0;
    while i * i <= n {
        if cancelled(iteration, cancel) {
            return None;
        }
        if n % i == 0 || n % (i + 2) == 0 {
            return Some(false);
        }
        i += 6;
        iteration += 1;
    }
    Some(true)
}

/// Perfect number test: `n` equals the sum of its proper positive divisors.
///
/// Divisors are found in pairs `(i, n / i)` while `i * i <= n`, counting the
/// square root only once.
pub fn is_perfect(n: i64) -> bool {
    is_perfect_cancellable(n, &NEVER_CANCELLED).unwrap_or(false)
}

/// `is_perfect` that gives up with `None` once `cancel` is raised
pub fn is_perfect_cancellable(n: i64, cancel: &AtomicBool) -> Option<bool> {
    if n < 2 {
        return Some(false);
    }
    let n = n.unsigned_abs();
    let target = u128::from(n);

    let mut sum: u128 = 1;
    let mut i: u64 = 2;
    while i * i <= n {
        if cancelled(i - 2, cancel) {
            return None;
        }
        if n % i == 0 {
            sum += u128::from(i);
            let pair = n / i;
            if pair != i {
                sum += u128::from(pair);
            }
            if sum > target {
                return Some(false);
            }
        }
        i += 1;
    }
    Some(sum == target)
}

/// Armstrong (narcissistic) number test.
///
/// Negative values are never Armstrong numbers: the digit power sum is
/// non-negative and so can never equal them.
pub fn is_armstrong(n: i64) -> bool {
    if n < 0 {
        return false;
    }
    let n = n.unsigned_abs();
    let digits = decimal_digits(n);
    let target = u128::from(n);
    power_sum(&digits) == target
}

/// Sum of the base-10 digits of `|n|`.
pub fn digit_sum(n: i64) -> u64 {
    let mut rest = n.unsigned_abs();
    let mut sum = 0;
    while rest > 0 {
        sum += rest % 10;
        rest /= 10;
    }
    sum
}

/// Parity of `|n|`.
pub const fn is_even(n: i64) -> bool {
    n.unsigned_abs() % 2 == 0
}

/// Base-10 digits of `n`, most significant first. `0` yields `[0]`.
pub(crate) fn decimal_digits(n: u64) -> Vec<u8> {
    if n == 0 {
        return vec![0];
    }
    let mut digits = Vec::with_capacity(20);
    let mut rest = n;
    while rest > 0 {
        #[allow(clippy::cast_possible_truncation)]
        let digit = (rest % 10) as u8;
        digits.push(digit);
        rest /= 10;
    }
    digits.reverse();
    digits
}

/// Sum of each digit raised to the digit count.
///
/// A `u64` has at most 20 digits and `9^20 * 20` fits comfortably in `u128`.
fn power_sum(digits: &[u8]) -> u128 {
    #[allow(clippy::cast_possible_truncation)]
    let exponent = digits.len() as u32;
    digits
        .iter()
        .map(|&d| u128::from(d).pow(exponent))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reference check: any divisor in `[2, n-1]`
    fn naive_prime(n: i64) -> bool {
        n >= 2 && (2..n).all(|i| n % i != 0)
    }

    #[test]
    fn test_is_prime_small_values() {
        assert!(!is_prime(0));
        assert!(!is_prime(1));
        assert!(is_prime(2));
        assert!(is_prime(3));
        assert!(!is_prime(4));
        assert!(is_prime(17));
        assert!(!is_prime(25));
        assert!(!is_prime(49));
    }

    #[test]
    fn test_is_prime_negative() {
        assert!(!is_prime(-7));
        assert!(!is_prime(i64::MIN));
    }

    #[test]
    fn test_is_prime_matches_naive_division() {
        for n in -10..2000 {
            assert_eq!(is_prime(n), naive_prime(n), "mismatch for {n}");
        }
    }

    #[test]
    fn test_is_prime_large() {
        // Largest prime below 2^31
        assert!(is_prime(2_147_483_647));
        assert!(!is_prime(2_147_483_649));
    }

    #[test]
    fn test_is_perfect_known_values() {
        assert!(is_perfect(6));
        assert!(is_perfect(28));
        assert!(is_perfect(496));
        assert!(is_perfect(8128));
        assert!(is_perfect(33_550_336));
    }

    #[test]
    fn test_is_perfect_rejects_primes_and_small() {
        for n in [-6, 0, 1, 2, 3, 5, 7, 13, 97] {
            assert!(!is_perfect(n), "{n} should not be perfect");
        }
        // Square: divisor 3 must be counted once
        assert!(!is_perfect(9));
        assert!(!is_perfect(12));
    }

    #[test]
    fn test_is_perfect_matches_linear_scan() {
        for n in 2..3000_i64 {
            let linear: i64 = (1..n).filter(|i| n % i == 0).sum();
            assert_eq!(is_perfect(n), linear == n, "mismatch for {n}");
        }
    }

    /// Largest prime below 2^63
    const LARGEST_I64_PRIME: i64 = 9_223_372_036_854_775_783;

    #[test]
    fn test_cancellable_stops_on_raised_flag() {
        let cancel = AtomicBool::new(true);
        assert_eq!(is_prime_cancellable(LARGEST_I64_PRIME, &cancel), None);
        assert_eq!(is_perfect_cancellable(LARGEST_I64_PRIME, &cancel), None);
    }

    #[test]
    fn test_cancellable_short_circuits_before_loop() {
        // Answers that need no divisor loop ignore the flag
        let cancel = AtomicBool::new(true);
        assert_eq!(is_prime_cancellable(3, &cancel), Some(true));
        assert_eq!(is_prime_cancellable(1_000_000, &cancel), Some(false));
        assert_eq!(is_perfect_cancellable(1, &cancel), Some(false));
    }

    #[test]
    fn test_cancellable_matches_plain_when_not_raised() {
        let cancel = AtomicBool::new(false);
        for n in [-5, 0, 2, 4, 6, 28, 97, 496, 7919, 8128] {
            assert_eq!(is_prime_cancellable(n, &cancel), Some(is_prime(n)));
            assert_eq!(is_perfect_cancellable(n, &cancel), Some(is_perfect(n)));
        }
    }

    #[test]
    fn test_is_armstrong() {
        assert!(is_armstrong(0));
        assert!(is_armstrong(5));
        assert!(is_armstrong(9));
        assert!(is_armstrong(153));
        assert!(is_armstrong(370));
        assert!(is_armstrong(9474));
        assert!(!is_armstrong(10));
        assert!(!is_armstrong(154));
        assert!(!is_armstrong(-153));
    }

    #[test]
    fn test_is_armstrong_extremes_do_not_overflow() {
        assert!(!is_armstrong(i64::MAX));
        assert!(!is_armstrong(i64::MIN));
        // 18 nines: 18 * 9^18
        assert!(!is_armstrong(999_999_999_999_999_999));
    }

    #[test]
    fn test_digit_sum() {
        assert_eq!(digit_sum(0), 0);
        assert_eq!(digit_sum(123), 6);
        assert_eq!(digit_sum(-45), 9);
        assert_eq!(digit_sum(28), 10);
        // |i64::MIN| = 9223372036854775808
        assert_eq!(digit_sum(i64::MIN), 89);
    }

    #[test]
    fn test_is_even_uses_magnitude() {
        assert!(is_even(0));
        assert!(is_even(-4));
        assert!(!is_even(-3));
        assert!(is_even(i64::MIN));
    }

    #[test]
    fn test_decimal_digits() {
        assert_eq!(decimal_digits(0), vec![0]);
        assert_eq!(decimal_digits(1_530), vec![1, 5, 3, 0]);
    }
}
