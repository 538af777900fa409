//! printf-style message interpolation
//!
//! Messages are written as a template plus positional arguments, e.g.
//! `logger.error("disk at %d%%", &[&90])`. Mismatches between verbs and
//! arguments never fail; they show up in the rendered text instead:
//!
//! - missing argument: `%!d(MISSING)`
//! - extra arguments: `%!(EXTRA a, b)` appended at the end
//! - verb that cannot apply to the argument: `%!x(value)`
//! - `%` at the very end of the template: `%!(NOVERB)`
//!
//! Supported verbs are `v s q d i f F e E g G x X o b t`, with the `-`, `0`
//! and `+` flags, a width and a `.precision`.

use std::fmt::{self, Write};
use std::iter::Peekable;
use std::str::CharIndices;

/// Upper bound for widths and precisions taken from a template
const MAX_WIDTH: usize = 1024;

/// A value that can be interpolated into a message template
///
/// Every argument renders through `Display` for `%v`/`%s`. Numeric and boolean
/// verbs ask for the typed views below; the defaults mean "not applicable".
pub trait Arg: fmt::Display {
    fn as_integer(&self) -> Option<i128> {
        None
    }

    fn as_float(&self) -> Option<f64> {
        None
    }

    fn as_bool(&self) -> Option<bool> {
        None
    }
}

macro_rules! integer_arg {
    ($($t:ty),*) => {
        $(
            impl Arg for $t {
                fn as_integer(&self) -> Option<i128> {
                    Some(*self as i128)
                }

                fn as_float(&self) -> Option<f64> {
                    Some(*self as f64)
                }
            }
        )*
    };
}

integer_arg!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl Arg for u128 {
    fn as_integer(&self) -> Option<i128> {
        i128::try_from(*self).ok()
    }

    fn as_float(&self) -> Option<f64> {
        Some(*self as f64)
    }
}

impl Arg for f32 {
    fn as_float(&self) -> Option<f64> {
        Some(f64::from(*self))
    }
}

impl Arg for f64 {
    fn as_float(&self) -> Option<f64> {
        Some(*self)
    }
}

impl Arg for bool {
    fn as_bool(&self) -> Option<bool> {
        Some(*self)
    }
}

impl Arg for str {}
impl Arg for String {}
impl Arg for char {}
impl Arg for fmt::Arguments<'_> {}
impl Arg for dyn fmt::Display + '_ {}
impl Arg for super::level::Level {}

impl<T: Arg + ?Sized> Arg for &T {
    fn as_integer(&self) -> Option<i128> {
        (**self).as_integer()
    }

    fn as_float(&self) -> Option<f64> {
        (**self).as_float()
    }

    fn as_bool(&self) -> Option<bool> {
        (**self).as_bool()
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Directive {
    left: bool,
    zero: bool,
    plus: bool,
    width: Option<usize>,
    precision: Option<usize>,
}

/// Combine a template and its arguments into the final message text
pub fn interpolate(template: &str, args: &[&dyn Arg]) -> String {
    if args.is_empty() && !template.contains('%') {
        return template.to_string();
    }

    let mut out = String::with_capacity(template.len() + 8 * args.len());
    let mut remaining = args.iter();
    let mut chars = template.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let directive = parse_directive(&mut chars);
        let Some((_, verb)) = chars.next() else {
            out.push_str("%!(NOVERB)");
            break;
        };

        if verb == '%' {
            out.push('%');
            continue;
        }

        match remaining.next() {
            Some(arg) => out.push_str(&directive.render(verb, *arg)),
            None => {
                let _ = write!(out, "%!{}(MISSING)", verb);
            }
        }
    }

    let extra: Vec<String> = remaining.map(|arg| arg.to_string()).collect();
    if !extra.is_empty() {
        let _ = write!(out, "%!(EXTRA {})", extra.join(", "));
    }

    out
}

fn parse_directive(chars: &mut Peekable<CharIndices<'_>>) -> Directive {
    let mut directive = Directive::default();

    while let Some(&(_, flag)) = chars.peek() {
        match flag {
            '-' => directive.left = true,
            '0' => directive.zero = true,
            '+' => directive.plus = true,
            _ => break,
        }
        chars.next();
    }

    directive.width = take_number(chars).map(|w| w.min(MAX_WIDTH));
    if let Some(&(_, '.')) = chars.peek() {
        chars.next();
        directive.precision = Some(take_number(chars).unwrap_or(0).min(MAX_WIDTH));
    }

    directive
}

fn take_number(chars: &mut Peekable<CharIndices<'_>>) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some(&(_, c)) = chars.peek() {
        let Some(digit) = c.to_digit(10) else {
            break;
        };
        value = Some(
            value
                .unwrap_or(0)
                .saturating_mul(10)
                .saturating_add(digit as usize),
        );
        chars.next();
    }
    value
}

impl Directive {
    fn render(&self, verb: char, arg: &dyn Arg) -> String {
        let (body, numeric) = match verb {
            'v' | 's' => (self.truncate(arg.to_string()), false),
            'q' => (format!("{:?}", self.truncate(arg.to_string())), false),
            'd' | 'i' => match arg.as_integer() {
                Some(n) => (self.signed(n.to_string(), n >= 0), true),
                None => return bad_verb(verb, arg),
            },
            'x' | 'X' | 'o' | 'b' => match arg.as_integer() {
                Some(n) => (radix(n, verb), true),
                None => return bad_verb(verb, arg),
            },
            'f' | 'F' | 'e' | 'E' | 'g' | 'G' => match arg.as_float() {
                Some(x) => {
                    let non_negative = x.is_sign_positive() && !x.is_nan();
                    (self.signed(self.float(verb, x), non_negative), true)
                }
                None => return bad_verb(verb, arg),
            },
            't' => match arg.as_bool() {
                Some(b) => (b.to_string(), false),
                None => return bad_verb(verb, arg),
            },
            _ => return bad_verb(verb, arg),
        };

        self.pad(body, numeric)
    }

    fn truncate(&self, text: String) -> String {
        match self.precision {
            Some(max) if text.chars().count() > max => text.chars().take(max).collect(),
            _ => text,
        }
    }

    fn signed(&self, text: String, non_negative: bool) -> String {
        if self.plus && non_negative && !text.starts_with('+') {
            format!("+{}", text)
        } else {
            text
        }
    }

    fn float(&self, verb: char, x: f64) -> String {
        if x.is_nan() {
            return "NaN".to_string();
        }
        if x.is_infinite() {
            return if x > 0.0 { "+Inf" } else { "-Inf" }.to_string();
        }

        match verb {
            'e' | 'E' => scientific(x, self.precision.unwrap_or(6), verb == 'E'),
            'g' | 'G' => general(x, self.precision, verb == 'G'),
            _ => format!("{:.*}", self.precision.unwrap_or(6), x),
        }
    }

    fn pad(&self, body: String, numeric: bool) -> String {
        let len = body.chars().count();
        let width = match self.width {
            Some(width) if width > len => width,
            _ => return body,
        };
        let fill = width - len;

        if self.left {
            format!("{}{}", body, " ".repeat(fill))
        } else if self.zero && numeric {
            let split = if body.starts_with(['-', '+']) { 1 } else { 0 };
            let (sign, digits) = body.split_at(split);
            format!("{}{}{}", sign, "0".repeat(fill), digits)
        } else {
            format!("{}{}", " ".repeat(fill), body)
        }
    }
}

fn radix(n: i128, verb: char) -> String {
    let sign = if n < 0 { "-" } else { "" };
    let magnitude = n.unsigned_abs();
    match verb {
        'x' => format!("{}{:x}", sign, magnitude),
        'X' => format!("{}{:X}", sign, magnitude),
        'o' => format!("{}{:o}", sign, magnitude),
        _ => format!("{}{:b}", sign, magnitude),
    }
}

/// Split Rust's `{:e}` output into significant digits (trailing zeros
/// trimmed, empty for zero) and the decimal exponent
fn decompose(rendered: &str) -> (String, i32) {
    let (mantissa, exponent) = rendered.split_once('e').unwrap_or((rendered, "0"));
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let digits = digits.trim_end_matches('0').to_string();
    (digits, exponent.parse().unwrap_or(0))
}

/// Mantissa followed by a signed exponent of at least two digits
fn with_exponent(mantissa: &str, exponent: i32, upper: bool) -> String {
    format!(
        "{}{}{}{:02}",
        mantissa,
        if upper { 'E' } else { 'e' },
        if exponent < 0 { '-' } else { '+' },
        exponent.unsigned_abs()
    )
}

/// `%e`: fixed number of digits after the point, exponent as `e+03`
fn scientific(x: f64, precision: usize, upper: bool) -> String {
    let sign = if x.is_sign_negative() { "-" } else { "" };
    let rendered = format!("{:.*e}", precision, x.abs());
    let (mantissa, exponent) = rendered.split_once('e').unwrap_or((&rendered, "0"));
    format!("{}{}", sign, with_exponent(mantissa, exponent.parse().unwrap_or(0), upper))
}

/// `%g`: precision counts significant digits (shortest round-trip digits
/// when absent). Exponent form is used for exponents below -4 or at least
/// the precision, and trailing zeros are dropped.
fn general(x: f64, precision: Option<usize>, upper: bool) -> String {
    let sign = if x.is_sign_negative() { "-" } else { "" };
    let magnitude = x.abs();
    let rendered = match precision {
        Some(p) => format!("{:.*e}", p.max(1) - 1, magnitude),
        None => format!("{:e}", magnitude),
    };

    let (digits, exponent) = decompose(&rendered);
    let count = digits.len() as i32;
    let point = if digits.is_empty() { 0 } else { exponent + 1 };

    let mut prec = precision.map_or(count, |p| p.max(1) as i32);
    let threshold = match precision {
        None => 6,
        Some(_) if prec > count && count >= point => count,
        Some(_) => prec,
    };

    let exponent = point - 1;
    if exponent < -4 || exponent >= threshold {
        let shown = prec.min(count).max(1) as usize;
        let mut mantissa = digits[..1].to_string();
        if shown > 1 {
            mantissa.push('.');
            mantissa.push_str(&digits[1..shown]);
        }
        return format!("{}{}", sign, with_exponent(&mantissa, exponent, upper));
    }

    if prec > point {
        prec = count;
    }
    let decimals = (prec - point).max(0) as usize;
    format!("{}{:.*}", sign, decimals, magnitude)
}

fn bad_verb(verb: char, arg: &dyn Arg) -> String {
    format!("%!{}({})", verb, arg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_template_is_untouched() {
        assert_eq!(interpolate("plain text", &[]), "plain text");
    }

    #[test]
    fn test_basic_verbs() {
        assert_eq!(interpolate("y %d", &[&5]), "y 5");
        assert_eq!(interpolate("disk at %d%%", &[&90]), "disk at 90%");
        assert_eq!(interpolate("%s=%v", &[&"key", &1.5]), "key=1.5");
        assert_eq!(interpolate("%t", &[&true]), "true");
        assert_eq!(interpolate("%q", &[&"quoted"]), "\"quoted\"");
    }

    #[test]
    fn test_width_and_precision() {
        assert_eq!(interpolate("[%5d]", &[&42]), "[   42]");
        assert_eq!(interpolate("[%-5d]", &[&42]), "[42   ]");
        assert_eq!(interpolate("[%05d]", &[&-42]), "[-0042]");
        assert_eq!(interpolate("%.2f", &[&3.14159]), "3.14");
        assert_eq!(interpolate("%f", &[&2]), "2.000000");
        assert_eq!(interpolate("%.3s", &[&"abcdef"]), "abc");
        assert_eq!(interpolate("%+d", &[&7]), "+7");
    }

    #[test]
    fn test_exponent_verbs() {
        assert_eq!(interpolate("%e", &[&1234.5]), "1.234500e+03");
        assert_eq!(interpolate("%E", &[&1234.5]), "1.234500E+03");
        assert_eq!(interpolate("%.2e", &[&0.000123]), "1.23e-04");
        assert_eq!(interpolate("%e", &[&-1234.5]), "-1.234500e+03");
        assert_eq!(interpolate("%.1e", &[&1e100]), "1.0e+100");
        assert_eq!(interpolate("%e", &[&0.0]), "0.000000e+00");
    }

    #[test]
    fn test_general_verbs() {
        assert_eq!(interpolate("%g", &[&3.14159]), "3.14159");
        assert_eq!(interpolate("%g", &[&1e21]), "1e+21");
        assert_eq!(interpolate("%g", &[&100000.0]), "100000");
        assert_eq!(interpolate("%g", &[&1234567.0]), "1.234567e+06");
        assert_eq!(interpolate("%g", &[&0.0001]), "0.0001");
        assert_eq!(interpolate("%g", &[&0.00001]), "1e-05");
        assert_eq!(interpolate("%g", &[&0.0]), "0");
        assert_eq!(interpolate("%G", &[&1e-7]), "1E-07");
        assert_eq!(interpolate("%g", &[&-2.5]), "-2.5");
    }

    #[test]
    fn test_general_precision_counts_significant_digits() {
        assert_eq!(interpolate("%.3g", &[&3.14159]), "3.14");
        assert_eq!(interpolate("%.3g", &[&2.5]), "2.5");
        assert_eq!(interpolate("%.3g", &[&100.0]), "100");
        assert_eq!(interpolate("%.2g", &[&123.0]), "1.2e+02");
        assert_eq!(interpolate("%.2g", &[&9.99]), "10");
        assert_eq!(interpolate("%.0g", &[&7.6]), "8");
    }

    #[test]
    fn test_non_finite_floats() {
        assert_eq!(interpolate("%f", &[&f64::INFINITY]), "+Inf");
        assert_eq!(interpolate("%+e", &[&f64::INFINITY]), "+Inf");
        assert_eq!(interpolate("%g", &[&f64::NEG_INFINITY]), "-Inf");
        assert_eq!(interpolate("%.2f", &[&f64::NAN]), "NaN");
    }

    #[test]
    fn test_huge_width_is_clamped() {
        let rendered = interpolate("%99999999999999999999d", &[&1]);
        assert_eq!(rendered.len(), MAX_WIDTH);
        assert!(rendered.ends_with('1'));
    }

    #[test]
    fn test_radix_verbs() {
        assert_eq!(interpolate("%x %X %o %b", &[&255, &255, &8, &5]), "ff FF 10 101");
        assert_eq!(interpolate("%x", &[&-255]), "-ff");
    }

    #[test]
    fn test_missing_arguments() {
        assert_eq!(interpolate("%d and %s", &[&1]), "1 and %!s(MISSING)");
    }

    #[test]
    fn test_extra_arguments() {
        assert_eq!(interpolate("only %d", &[&1, &2, &"three"]), "only 1%!(EXTRA 2, three)");
        assert_eq!(interpolate("none", &[&1]), "none%!(EXTRA 1)");
    }

    #[test]
    fn test_bad_verbs() {
        assert_eq!(interpolate("%d", &[&"text"]), "%!d(text)");
        assert_eq!(interpolate("%z", &[&3]), "%!z(3)");
        assert_eq!(interpolate("%t", &[&1]), "%!t(1)");
    }

    #[test]
    fn test_dangling_percent() {
        assert_eq!(interpolate("100%", &[]), "100%!(NOVERB)");
    }

    #[test]
    fn test_display_values() {
        let level = crate::core::level::Level::Error;
        let shown: &dyn fmt::Display = &level;
        assert_eq!(interpolate("%s / %v", &[&level, &shown]), "ERROR / ERROR");
    }
}
