use std::fmt::Write as _;

/// A trait for values that can be stored in a sample log.
///
/// A log holds words of one fixed element type. To be persistable that type
/// must render itself for text dumps and convert to and from the 64-bit
/// float word used by the binary dump format. Implementations are provided
/// for the primitive numeric types and `bool`.
///
/// The `Default` bound supplies the value used when a text dump has to
/// render a cell of the current row that was never written.
pub trait Sample: Copy + Default {
    /// Renders the sample for a text dump.
    ///
    /// Floating point implementations render at 15 significant digits with
    /// trailing zeros trimmed, so whole values print as plain integers
    /// (`1.0` renders as `"1"`).
    fn render(&self) -> String;

    /// Converts the sample to the 64-bit float word stored in binary dumps.
    fn to_f64(&self) -> f64;

    /// Converts a 64-bit float word read from a binary dump back into a
    /// sample. Narrowing follows `as`-cast semantics for the integer types.
    fn from_f64(word: f64) -> Self;
}

impl Sample for f64 {
    fn render(&self) -> String {
        render_f64(*self)
    }

    fn to_f64(&self) -> f64 {
        *self
    }

    fn from_f64(word: f64) -> Self {
        word
    }
}

impl Sample for f32 {
    fn render(&self) -> String {
        render_f64(f64::from(*self))
    }

    fn to_f64(&self) -> f64 {
        f64::from(*self)
    }

    fn from_f64(word: f64) -> Self {
        word as f32
    }
}

impl Sample for bool {
    fn render(&self) -> String {
        if *self { "1".to_owned() } else { "0".to_owned() }
    }

    fn to_f64(&self) -> f64 {
        if *self { 1.0 } else { 0.0 }
    }

    fn from_f64(word: f64) -> Self {
        word != 0.0
    }
}

macro_rules! impl_sample_for_int {
    ($($ty:ty),*) => {
        $(
            impl Sample for $ty {
                fn render(&self) -> String {
                    self.to_string()
                }

                fn to_f64(&self) -> f64 {
                    *self as f64
                }

                fn from_f64(word: f64) -> Self {
                    word as $ty
                }
            }
        )*
    };
}

impl_sample_for_int!(i8, i16, i32, i64, u8, u16, u32, u64, isize, usize);

/// Renders a float at 15 significant digits, matching the precision a text
/// dump promises: trailing zeros trimmed, fixed notation for moderate
/// exponents, scientific notation outside `[1e-4, 1e15)`.
pub(crate) fn render_f64(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0".to_owned() } else { "0".to_owned() };
    }

    // 15 significant digits in scientific form, e.g. "3.14159265358979e0".
    let scientific = format!("{:.14e}", value);
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');

    if !(-4..15).contains(&exponent) {
        return format!("{mantissa}e{exponent}");
    }

    let (sign, digits) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let digits: String = digits.chars().filter(|c| *c != '.').collect();
    let point = exponent + 1; // digit count left of the decimal point

    let mut out = String::from(sign);
    if point <= 0 {
        out.push_str("0.");
        for _ in 0..-point {
            out.push('0');
        }
        out.push_str(&digits);
    } else if point as usize >= digits.len() {
        out.push_str(&digits);
        for _ in 0..(point as usize - digits.len()) {
            out.push('0');
        }
    } else {
        out.push_str(&digits[..point as usize]);
        let _ = write!(out, ".{}", &digits[point as usize..]);
    }
    out
}
