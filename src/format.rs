//! Rounding and pt-BR display formatting shared by every dashboard number.
//!
//! All integer renderings go through [`custom_round`], which rounds up only
//! when the fractional part reaches 0.6. Percentages keep one decimal and are
//! not rounded through it.
use num_format::{CustomFormat, Grouping, ToFormattedString};
use once_cell::sync::Lazy;

// `.` thousands, `,` decimal. Built once; `None` only if the builder rejects
// the separators, in which case digits are left ungrouped.
static PT_BR: Lazy<Option<CustomFormat>> = Lazy::new(|| {
    CustomFormat::builder()
        .grouping(Grouping::Standard)
        .separator(".")
        .decimal(",")
        .minus_sign("-")
        .build()
        .ok()
});

const CURRENCY_PREFIX: &str = "R$\u{a0}";

/// Round with a 0.6 threshold on the fractional part.
///
/// `decimal = value - floor(value)`; the result is `ceil(value)` when
/// `decimal >= 0.6` and `floor(value)` otherwise. Negative numbers use the
/// same arithmetic, so `-1.4` (decimal `0.6`) rounds to `-1` while `-1.5`
/// rounds to `-2`. Missing and non-finite input yields `0`; magnitudes past
/// the `i64` range saturate to `i64::MIN`/`i64::MAX`.
pub fn custom_round<V: Into<Option<f64>>>(value: V) -> i64 {
    let Some(v) = value.into() else {
        return 0;
    };
    if !v.is_finite() {
        return 0;
    }
    let floor = v.floor();
    let decimal = v - floor;
    let rounded = if decimal >= 0.6 { v.ceil() } else { floor };
    rounded as i64
}

fn group_thousands<T: ToFormattedString + ToString>(n: T) -> String {
    match PT_BR.as_ref() {
        Some(format) => n.to_formatted_string(format),
        None => n.to_string(),
    }
}

/// `custom_round(value)` with `.` as thousands separator, e.g. `1.234.568`.
pub fn format_number<V: Into<Option<f64>>>(value: V) -> String {
    group_thousands(custom_round(value))
}

/// BRL with zero decimals, e.g. `R$ 1.500` (non-breaking space after the
/// symbol, minus sign in front of it).
pub fn format_currency<V: Into<Option<f64>>>(value: V) -> String {
    let n = custom_round(value);
    let digits = group_thousands(n.unsigned_abs());
    if n < 0 {
        format!("-{CURRENCY_PREFIX}{digits}")
    } else {
        format!("{CURRENCY_PREFIX}{digits}")
    }
}

// One decimal, with exact ties (`x.x5` representable in binary, e.g. 12.25)
// rounded away from zero instead of to even.
fn to_fixed_1(v: f64) -> String {
    let quarter = v.abs() * 4.0;
    let twentieths = (quarter * 5.0).round();
    let is_tie = twentieths < 9.0e15
        && twentieths % 2.0 == 1.0
        && quarter.mul_add(5.0, -twentieths) == 0.0;
    if !is_tie {
        return format!("{v:.1}");
    }
    let tenths = (twentieths as u64 + 1) / 2;
    let sign = if v < 0.0 { "-" } else { "" };
    format!("{sign}{}.{}", tenths / 10, tenths % 10)
}

/// Raw value with exactly one decimal and a `%` suffix; `0%` when missing.
pub fn format_percent<V: Into<Option<f64>>>(value: V) -> String {
    match value.into() {
        Some(v) if v.is_finite() => {
            // -0.0 would otherwise print as "-0.0"
            let v = if v == 0.0 { 0.0 } else { v };
            format!("{}%", to_fixed_1(v))
        }
        _ => "0%".to_string(),
    }
}

/// Thousands-grouped integer for counts in console messages.
pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString + ToString,
{
    group_thousands(n)
}
