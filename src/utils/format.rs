// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Float rendering for the evaluation log

/// Render a float the way the historical evaluation logs print it.
///
/// Shortest round-trip digits, always with a fractional part (`2000.0`), and
/// scientific notation with a signed two-digit exponent outside
/// `1e-4 <= |v| < 1e16` (`1e-05`, `1.5e+16`).
pub fn py_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let sign = if value.is_sign_negative() { "-" } else { "" };
    if value == 0.0 {
        return format!("{sign}0.0");
    }

    let sci = shortest_scientific(value.abs());
    let (mantissa, exp) = sci.split_once('e').unwrap_or((&sci, "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    if (-4..16).contains(&exp) {
        format!("{sign}{}", fixed(&digits, exp))
    } else {
        let (head, tail) = digits.split_at(1);
        let mantissa = if tail.is_empty() {
            head.to_string()
        } else {
            format!("{head}.{tail}")
        };
        let exp_sign = if exp < 0 { '-' } else { '+' };
        format!("{sign}{mantissa}e{exp_sign}{:02}", exp.abs())
    }
}

/// Shortest round-trip digits in `{:e}` form, e.g. "1.2345e-5".
///
/// `{:e}` breaks an exact tie between two shortest candidates upward. Redo the
/// rounding at the same precision, which is exact and rounds half to even, and
/// keep it when it still reads back as `value`.
fn shortest_scientific(value: f64) -> String {
    let shortest = format!("{:e}", value);
    let precision = shortest
        .split_once('e')
        .map_or(0, |(mantissa, _)| mantissa.len().saturating_sub(2));

    let even = format!("{:.*e}", precision, value);
    if even != shortest && even.parse::<f64>() == Ok(value) {
        even
    } else {
        shortest
    }
}

fn fixed(digits: &str, exp: i32) -> String {
    if exp < 0 {
        let zeros = "0".repeat((-exp - 1) as usize);
        return format!("0.{zeros}{digits}");
    }

    let int_len = exp as usize + 1;
    if digits.len() <= int_len {
        let zeros = "0".repeat(int_len - digits.len());
        format!("{digits}{zeros}.0")
    } else {
        let (int_part, frac_part) = digits.split_at(int_len);
        format!("{int_part}.{frac_part}")
    }
}
