//! Shared formatting utilities for UI components.

/// Format a number with thousand separators.
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format an axis value with precision suited to its magnitude.
pub fn format_axis_value(val: f64) -> String {
    if !val.is_finite() {
        return "NaN".to_string();
    }
    let abs_val = val.abs();
    if abs_val == 0.0 {
        "0".to_string()
    } else if !(1e-2..1e5).contains(&abs_val) {
        format!("{:.1e}", val)
    } else if abs_val >= 10.0 {
        format!("{:.0}", val)
    } else {
        format!("{:.1}", val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn axis_values() {
        assert_eq!(format_axis_value(0.0), "0");
        assert_eq!(format_axis_value(1.3), "1.3");
        assert_eq!(format_axis_value(-2.0), "-2.0");
        assert_eq!(format_axis_value(42.4), "42");
        assert_eq!(format_axis_value(0.001), "1.0e-3");
    }
}
