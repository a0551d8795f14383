// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    let rounded = (value * scale).round() / scale;
    // Keep `-0.0` out of serialized output
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Convert metres to whole millimetres, truncating toward zero
pub fn to_millimetres(metres: f64) -> i64 {
    (metres * 1000.0) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456789, 6), 1.234568);
        assert_eq!(round_to(-0.0000001, 6), 0.0);
        assert!(round_to(-0.0000001, 6).is_sign_positive());
        assert_eq!(round_to(2.5, 0), 3.0);
    }

    #[test]
    fn test_to_millimetres_truncates() {
        assert_eq!(to_millimetres(1.2349), 1234);
        assert_eq!(to_millimetres(-0.0019), -1);
        assert_eq!(to_millimetres(0.0), 0);
    }
}
