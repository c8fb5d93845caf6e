//! printf-style message rendering for classified errors.
//!
//! Arguments arrive as `Display` values, so each verb works on the
//! argument's text:
//!
//! ```text
//! %s %v       text as-is (precision truncates)
//! %q          double-quoted, Go escapes (\n, \t, \x1b, \u0085)
//! %t          text that reads `true` or `false`
//! %d          integer text; precision is the minimum digit count
//! %b %o %x %X integer text in base 2/8/16; %x/%X hex-encode other text
//! %c          integer text as a Unicode scalar
//! %f %F       float text, precision defaults to 6
//! %e %E       float text in exponent form, precision defaults to 6
//! %g %G       float text, shortest form or `precision` significant digits
//! %%          literal percent
//! ```
//!
//! Flags `-`, `+`, `#`, space and `0`, a width, and a precision are
//! honored. Width and precision may be `*` (taken from the next argument)
//! and any argument may be picked explicitly with `[n]` (1-based).
//!
//! Rendering never fails. Mismatches leave a marker in the output:
//!
//! ```text
//! missing argument        %!s(MISSING)
//! surplus arguments       %!(EXTRA a, b)     (not reported after [n])
//! text unfit for verb     %!d(abc)
//! unknown verb            %!z(value)
//! bad [n] index           %!s(BADINDEX)
//! bad * width/precision   %!(BADWIDTH) %!(BADPREC)
//! trailing '%'            %!(NOVERB)
//! ```

use std::fmt::{Display, Write};
use std::iter::Peekable;
use std::str::Chars;

const MAX_WIDTH: i64 = 1_000_000;

/// Render `format`, substituting `args` in order.
pub fn sprintf(format: &str, args: &[&dyn Display]) -> String {
    let mut printer = Printer {
        args,
        next: 0,
        reordered: false,
        good_index: true,
        out: String::with_capacity(format.len()),
    };
    printer.run(format);
    printer.out
}

struct Printer<'a> {
    args: &'a [&'a dyn Display],
    next: usize,
    reordered: bool,
    good_index: bool,
    out: String,
}

impl Printer<'_> {
    fn run(&mut self, format: &str) {
        let mut chars = format.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '%' {
                self.out.push(c);
                continue;
            }
            self.good_index = true;

            let mut spec = Spec::flags(&mut chars);

            self.arg_index(&mut chars);
            if chars.next_if_eq(&'*').is_some() {
                match self.int_arg() {
                    Some(width) => {
                        if width < 0 {
                            spec.left = true;
                            spec.zero = false;
                        }
                        spec.width = Some(width.unsigned_abs() as usize);
                    }
                    None => self.out.push_str("%!(BADWIDTH)"),
                }
            } else {
                spec.width = take_number(&mut chars);
            }

            if chars.next_if_eq(&'.').is_some() {
                self.arg_index(&mut chars);
                if chars.next_if_eq(&'*').is_some() {
                    match self.int_arg() {
                        Some(precision) if precision >= 0 => {
                            spec.precision = Some(precision as usize);
                        }
                        Some(_) => spec.precision = None,
                        None => self.out.push_str("%!(BADPREC)"),
                    }
                } else {
                    spec.precision = Some(take_number(&mut chars).unwrap_or(0));
                }
            }

            self.arg_index(&mut chars);
            let Some(verb) = chars.next() else {
                self.out.push_str("%!(NOVERB)");
                break;
            };
            if verb == '%' {
                self.out.push('%');
                continue;
            }
            if !self.good_index {
                let _ = write!(self.out, "%!{verb}(BADINDEX)");
                continue;
            }
            let Some(arg) = self.args.get(self.next) else {
                let _ = write!(self.out, "%!{verb}(MISSING)");
                continue;
            };
            let text = arg.to_string();
            self.next += 1;

            spec.render(&mut self.out, verb, &text);
        }

        if !self.reordered && self.next < self.args.len() {
            self.out.push_str("%!(EXTRA ");
            for (i, arg) in self.args[self.next..].iter().enumerate() {
                if i > 0 {
                    self.out.push_str(", ");
                }
                let _ = write!(self.out, "{arg}");
            }
            self.out.push(')');
        }
    }

    /// Consume an optional `[n]` and point the next argument at it.
    fn arg_index(&mut self, chars: &mut Peekable<Chars<'_>>) {
        if chars.next_if_eq(&'[').is_none() {
            return;
        }
        self.reordered = true;
        let index = take_number(chars);
        let closed = chars.next_if_eq(&']').is_some();
        match index {
            Some(n) if closed && n >= 1 && n <= self.args.len() => self.next = n - 1,
            _ => self.good_index = false,
        }
    }

    /// Next argument as a `*` width or precision.
    fn int_arg(&mut self) -> Option<i64> {
        let arg = self.args.get(self.next)?;
        self.next += 1;
        arg.to_string()
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|n| n.abs() <= MAX_WIDTH)
    }
}

/// Flags, width and precision between `%` and the verb.
#[derive(Debug, Default)]
struct Spec {
    left: bool,
    zero: bool,
    plus: bool,
    space: bool,
    sharp: bool,
    width: Option<usize>,
    precision: Option<usize>,
}

impl Spec {
    fn flags(chars: &mut Peekable<Chars<'_>>) -> Self {
        let mut spec = Spec::default();
        while let Some(&flag) = chars.peek() {
            match flag {
                '-' => {
                    spec.left = true;
                    spec.zero = false;
                }
                '0' => spec.zero = !spec.left,
                '+' => spec.plus = true,
                ' ' => spec.space = true,
                '#' => spec.sharp = true,
                _ => break,
            }
            chars.next();
        }
        spec
    }

    fn render(&self, out: &mut String, verb: char, text: &str) {
        match verb {
            's' | 'v' => self.pad(out, &self.truncate(text)),
            'q' => self.pad(out, &quote(&self.truncate(text))),
            't' if text == "true" || text == "false" => self.pad(out, text),
            'c' => match text.parse::<u32>().ok().and_then(char::from_u32) {
                Some(c) => self.pad(out, &c.to_string()),
                None => bad_verb(out, verb, text),
            },
            'd' | 'b' | 'o' | 'x' | 'X' => match text.parse::<i128>() {
                Ok(n) => self.integer(out, n, verb),
                Err(_) if verb == 'x' || verb == 'X' => self.hex_text(out, text, verb),
                Err(_) => bad_verb(out, verb, text),
            },
            'f' | 'F' | 'e' | 'E' | 'g' | 'G' => match text.parse::<f64>() {
                Ok(f) => self.float(out, f, verb),
                Err(_) => bad_verb(out, verb, text),
            },
            _ => bad_verb(out, verb, text),
        }
    }

    fn integer(&self, out: &mut String, n: i128, verb: char) {
        let magnitude = n.unsigned_abs();
        let mut digits = match verb {
            'b' => format!("{magnitude:b}"),
            'o' => format!("{magnitude:o}"),
            'x' => format!("{magnitude:x}"),
            'X' => format!("{magnitude:X}"),
            _ => magnitude.to_string(),
        };
        if let Some(min) = self.precision {
            if min == 0 && magnitude == 0 {
                digits.clear();
            } else if digits.len() < min {
                digits.insert_str(0, &"0".repeat(min - digits.len()));
            }
        }

        let mut prefix = self.sign(n < 0).to_string();
        if self.sharp {
            prefix.push_str(match verb {
                'b' => "0b",
                'o' => "0",
                'x' => "0x",
                'X' => "0X",
                _ => "",
            });
        }
        // A precision turns off zero padding.
        self.pad_number(out, &prefix, &digits, self.precision.is_none());
    }

    fn hex_text(&self, out: &mut String, text: &str, verb: char) {
        let mut hex = String::with_capacity(text.len() * 2 + 2);
        if self.sharp {
            hex.push_str(if verb == 'X' { "0X" } else { "0x" });
        }
        for byte in text.bytes() {
            let _ = if verb == 'X' {
                write!(hex, "{byte:02X}")
            } else {
                write!(hex, "{byte:02x}")
            };
        }
        self.pad(out, &hex);
    }

    fn float(&self, out: &mut String, f: f64, verb: char) {
        if f.is_nan() {
            let sign = self.sign(false);
            return self.pad(out, &format!("{sign}NaN"));
        }
        if f.is_infinite() {
            let sign = if f < 0.0 { "-" } else { "+" };
            return self.pad(out, &format!("{sign}Inf"));
        }

        let magnitude = f.abs();
        let body = match verb {
            'f' | 'F' => format!("{magnitude:.prec$}", prec = self.precision.unwrap_or(6)),
            'e' | 'E' => {
                go_exponent(&format!("{magnitude:.prec$e}", prec = self.precision.unwrap_or(6)))
            }
            _ => general(magnitude, self.precision),
        };
        let body = if verb.is_ascii_uppercase() {
            body.to_uppercase()
        } else {
            body
        };
        self.pad_number(out, self.sign(f.is_sign_negative()), &body, true);
    }

    fn sign(&self, negative: bool) -> &'static str {
        if negative {
            "-"
        } else if self.plus {
            "+"
        } else if self.space {
            " "
        } else {
            ""
        }
    }

    fn truncate(&self, s: &str) -> String {
        match self.precision {
            Some(max) => s.chars().take(max).collect(),
            None => s.to_string(),
        }
    }

    fn pad_number(&self, out: &mut String, prefix: &str, digits: &str, zero_ok: bool) {
        let len = prefix.chars().count() + digits.chars().count();
        let fill = self.width.unwrap_or(0).saturating_sub(len);
        if self.zero && zero_ok && fill > 0 {
            // Zeros go after the sign and base prefix.
            out.push_str(prefix);
            out.extend(std::iter::repeat_n('0', fill));
            out.push_str(digits);
        } else {
            self.pad(out, &format!("{prefix}{digits}"));
        }
    }

    fn pad(&self, out: &mut String, s: &str) {
        let fill = self.width.unwrap_or(0).saturating_sub(s.chars().count());
        if self.left {
            out.push_str(s);
            out.extend(std::iter::repeat_n(' ', fill));
        } else {
            out.extend(std::iter::repeat_n(' ', fill));
            out.push_str(s);
        }
    }
}

fn bad_verb(out: &mut String, verb: char, text: &str) {
    let _ = write!(out, "%!{verb}({text})");
}

fn take_number(chars: &mut Peekable<Chars<'_>>) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        chars.next();
        value = Some(
            value
                .unwrap_or(0)
                .saturating_mul(10)
                .saturating_add(digit as usize),
        );
    }
    value
}

/// Double-quote `s` with Go string-literal escapes.
fn quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\x07' => quoted.push_str("\\a"),
            '\x08' => quoted.push_str("\\b"),
            '\x0c' => quoted.push_str("\\f"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '\x0b' => quoted.push_str("\\v"),
            c if c.is_ascii_control() => {
                let _ = write!(quoted, "\\x{:02x}", c as u32);
            }
            c if c.is_control() => {
                let _ = write!(quoted, "\\u{:04x}", c as u32);
            }
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Rewrite Rust's `1.5e3` exponent form as `1.5e+03`.
fn go_exponent(sci: &str) -> String {
    match sci.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
        }
        None => sci.to_string(),
    }
}

fn exponent_of(sci: &str) -> i32 {
    sci.split_once('e')
        .and_then(|(_, exp)| exp.parse().ok())
        .unwrap_or(0)
}

fn trim_fraction_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// `%g`: exponent form for small or large magnitudes, plain otherwise.
fn general(magnitude: f64, precision: Option<usize>) -> String {
    match precision {
        None => {
            let sci = format!("{magnitude:e}");
            let exp = exponent_of(&sci);
            if magnitude != 0.0 && !(-4..6).contains(&exp) {
                go_exponent(&sci)
            } else {
                magnitude.to_string()
            }
        }
        Some(digits) => {
            let digits = digits.max(1);
            let sci = format!("{magnitude:.prec$e}", prec = digits - 1);
            let exp = exponent_of(&sci);
            if exp < -4 || exp >= digits as i32 {
                let mantissa = sci.split_once('e').map_or(sci.as_str(), |(m, _)| m);
                go_exponent(&format!("{}e{exp}", trim_fraction_zeros(mantissa)))
            } else {
                let decimals = (digits as i32 - 1 - exp) as usize;
                trim_fraction_zeros(&format!("{magnitude:.decimals$}")).to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_in_order() {
        let out = sprintf("pod %s in %s restarted %d times", &[&"web-1", &"prod", &4]);
        assert_eq!(out, "pod web-1 in prod restarted 4 times");
    }

    #[test]
    fn literal_format_is_unchanged() {
        assert_eq!(sprintf("waiting for rollout", &[]), "waiting for rollout");
        assert_eq!(sprintf("", &[]), "");
    }

    #[test]
    fn percent_escape() {
        assert_eq!(sprintf("%d%% ready", &[&80]), "80% ready");
    }

    #[test]
    fn quoted_verb() {
        assert_eq!(
            sprintf("image %q not found", &[&"repo/app:v\"2\""]),
            r#"image "repo/app:v\"2\"" not found"#
        );
    }

    #[test]
    fn quoted_control_characters_use_go_escapes() {
        assert_eq!(sprintf("%q", &[&"\x1b[0m"]), r#""\x1b[0m""#);
        assert_eq!(sprintf("%q", &[&"a\nb\tc\\"]), r#""a\nb\tc\\""#);
        assert_eq!(sprintf("%q", &[&"\u{85}"]), r#""\u0085""#);
        assert_eq!(sprintf("%q", &[&"wéb"]), "\"wéb\"");
    }

    #[test]
    fn missing_argument_marker() {
        assert_eq!(
            sprintf("pod %s container %s", &[&"web-1"]),
            "pod web-1 container %!s(MISSING)"
        );
    }

    #[test]
    fn extra_arguments_marker() {
        assert_eq!(
            sprintf("pod %s", &[&"web-1", &"web-2", &3]),
            "pod web-1%!(EXTRA web-2, 3)"
        );
    }

    #[test]
    fn unknown_verb_marker() {
        assert_eq!(sprintf("pod %z", &[&"web-1"]), "pod %!z(web-1)");
    }

    #[test]
    fn trailing_percent() {
        assert_eq!(sprintf("100%", &[]), "100%!(NOVERB)");
    }

    #[test]
    fn width_and_precision() {
        assert_eq!(sprintf("[%5s]", &[&"ab"]), "[   ab]");
        assert_eq!(sprintf("[%-5s]", &[&"ab"]), "[ab   ]");
        assert_eq!(sprintf("[%03d]", &[&7]), "[007]");
        assert_eq!(sprintf("[%04d]", &[&-7]), "[-007]");
        assert_eq!(sprintf("[%.3s]", &[&"abcdef"]), "[abc]");
        assert_eq!(sprintf("[%.2q]", &[&"abcdef"]), "[\"ab\"]");
    }

    #[test]
    fn boolean_verb() {
        assert_eq!(sprintf("ready=%t", &[&true]), "ready=true");
        assert_eq!(sprintf("[%6t]", &[&false]), "[ false]");
        assert_eq!(sprintf("ready=%t", &[&"yes"]), "ready=%!t(yes)");
    }

    #[test]
    fn integer_flags_and_precision() {
        assert_eq!(sprintf("delta %+d", &[&4]), "delta +4");
        assert_eq!(sprintf("delta %+d", &[&-4]), "delta -4");
        assert_eq!(sprintf("[% d]", &[&5]), "[ 5]");
        assert_eq!(sprintf("%.3d", &[&7]), "007");
        assert_eq!(sprintf("[%6.3d]", &[&-7]), "[  -007]");
        assert_eq!(sprintf("[%.0d]", &[&0]), "[]");
        assert_eq!(sprintf("%d replicas", &[&"three"]), "%!d(three) replicas");
    }

    #[test]
    fn radix_verbs() {
        assert_eq!(sprintf("id %x", &[&255]), "id ff");
        assert_eq!(sprintf("id %X", &[&255]), "id FF");
        assert_eq!(sprintf("id %#x", &[&255]), "id 0xff");
        assert_eq!(sprintf("%x", &[&-255]), "-ff");
        assert_eq!(sprintf("%o %#o", &[&8, &8]), "10 010");
        assert_eq!(sprintf("%b", &[&5]), "101");
        assert_eq!(sprintf("[%#06x]", &[&255]), "[0x00ff]");
        assert_eq!(sprintf("%x", &[&"hi"]), "6869");
        assert_eq!(sprintf("%X", &[&"hi"]), "6869");
        assert_eq!(sprintf("%b", &[&"hi"]), "%!b(hi)");
    }

    #[test]
    fn char_verb() {
        assert_eq!(sprintf("%c%c", &[&82, &87]), "RW");
        assert_eq!(sprintf("%c", &[&"R"]), "%!c(R)");
    }

    #[test]
    fn fixed_point_verb() {
        assert_eq!(sprintf("cpu %f cores", &[&1.5]), "cpu 1.500000 cores");
        assert_eq!(sprintf("%.2f", &[&3.14159]), "3.14");
        assert_eq!(sprintf("%f", &[&2]), "2.000000");
        assert_eq!(sprintf("[%08.3f]", &[&-3.14159]), "[-003.142]");
        assert_eq!(sprintf("[%+.1f]", &[&2.34]), "[+2.3]");
        assert_eq!(sprintf("%f", &[&f64::INFINITY]), "+Inf");
        assert_eq!(sprintf("%f", &[&f64::NAN]), "NaN");
        assert_eq!(sprintf("%f", &[&"fast"]), "%!f(fast)");
    }

    #[test]
    fn exponent_verb() {
        assert_eq!(sprintf("%e", &[&123456.789]), "1.234568e+05");
        assert_eq!(sprintf("%.2E", &[&0.000123]), "1.23E-04");
        assert_eq!(sprintf("%e", &[&0.0]), "0.000000e+00");
    }

    #[test]
    fn general_verb() {
        assert_eq!(sprintf("%g", &[&1.5]), "1.5");
        assert_eq!(sprintf("%g", &[&100000.0]), "100000");
        assert_eq!(sprintf("%g", &[&1234567.0]), "1.234567e+06");
        assert_eq!(sprintf("%g", &[&0.00001234]), "1.234e-05");
        assert_eq!(sprintf("%.3g", &[&3.14159]), "3.14");
        assert_eq!(sprintf("%.3g", &[&1234567.0]), "1.23e+06");
        assert_eq!(sprintf("%.3g", &[&100.0]), "100");
    }

    #[test]
    fn star_width_and_precision() {
        assert_eq!(sprintf("[%*d]", &[&5, &7]), "[    7]");
        assert_eq!(sprintf("[%-*d]", &[&5, &7]), "[7    ]");
        assert_eq!(sprintf("[%*d]", &[&-3, &7]), "[7  ]");
        assert_eq!(sprintf("%.*f", &[&2, &3.14159]), "3.14");
        assert_eq!(sprintf("%*d", &[&"wide", &7]), "%!(BADWIDTH)7");
        assert_eq!(sprintf("%.*s", &[&"x", &"abc"]), "%!(BADPREC)abc");
    }

    #[test]
    fn explicit_argument_indexes() {
        assert_eq!(sprintf("%[2]s %[1]s", &[&"a", &"b"]), "b a");
        assert_eq!(sprintf("%[1]d %[1]x", &[&255]), "255 ff");
        assert_eq!(sprintf("%[2]s %s", &[&"a", &"b", &"c"]), "b c");
        assert_eq!(sprintf("%[3]s", &[&"a"]), "%!s(BADINDEX)");
        assert_eq!(sprintf("%[0]s", &[&"a"]), "%!s(BADINDEX)");
        assert_eq!(sprintf("[%[2]*[1]d]", &[&7, &4]), "[   7]");
    }

    #[test]
    fn multibyte_text_passes_through() {
        assert_eq!(sprintf("pod %s — %s", &[&"wéb", &"ü"]), "pod wéb — ü");
    }
}
