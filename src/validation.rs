//! Value predicates used to validate data read from resource files.
//!
//! A [`Comparator`] is a closed set of predicate kinds over a comparand type.
//! Readers hand one to the field extractors in [`crate::json`]; when a value
//! is rejected the comparator's [`describe`](Comparator::describe) output ends
//! up in the diagnostic ("It must be greater or equal to 0").

use std::fmt::Display;

/// A predicate over values of type `T`.
///
/// Ordering variants use `PartialOrd`, so `NaN` fails every ordering check.
/// `StartsWith` and `EndsWith` work on the textual form of both sides, which
/// makes them meaningful for strings and usable (if rarely useful) for numbers.
#[derive(Clone, Debug, PartialEq)]
pub enum Comparator<T> {
    Always,
    Equal(T),
    NotEqual(T),
    LessThan(T),
    LessEqual(T),
    GreaterThan(T),
    GreaterEqual(T),
    InRangeInclusive(T, T),
    InRangeExclusive(T, T),
    StartsWith(T),
    EndsWith(T),
}

impl<T> Default for Comparator<T> {
    fn default() -> Self {
        Self::Always
    }
}

impl<T: PartialOrd + Display> Comparator<T> {
    /// Returns `true` when `value` satisfies the predicate.
    pub fn compare(&self, value: &T) -> bool {
        match self {
            Self::Always => true,
            Self::Equal(b) => value == b,
            Self::NotEqual(b) => value != b,
            Self::LessThan(b) => value < b,
            Self::LessEqual(b) => value <= b,
            Self::GreaterThan(b) => value > b,
            Self::GreaterEqual(b) => value >= b,
            Self::InRangeInclusive(low, high) => low <= value && value <= high,
            Self::InRangeExclusive(low, high) => low < value && value < high,
            Self::StartsWith(b) => value.to_string().starts_with(&b.to_string()),
            Self::EndsWith(b) => value.to_string().ends_with(&b.to_string()),
        }
    }

    /// The constraint template, with one `{}` per comparand.
    pub fn template(&self) -> &'static str {
        match self {
            Self::Always => "be anything",
            Self::Equal(_) => "be equal to {}",
            Self::NotEqual(_) => "be different from {}",
            Self::LessThan(_) => "be less than {}",
            Self::LessEqual(_) => "be less or equal to {}",
            Self::GreaterThan(_) => "be greater than {}",
            Self::GreaterEqual(_) => "be greater or equal to {}",
            Self::InRangeInclusive(..) => "be in the range [{}, {}]",
            Self::InRangeExclusive(..) => "be in the range ]{}, {}[",
            Self::StartsWith(_) => "start with \"{}\"",
            Self::EndsWith(_) => "end with \"{}\"",
        }
    }

    /// Human readable constraint with the comparands substituted.
    pub fn describe(&self) -> String {
        let comparands: Vec<String> = match self {
            Self::Always => Vec::new(),
            Self::Equal(b)
            | Self::NotEqual(b)
            | Self::LessThan(b)
            | Self::LessEqual(b)
            | Self::GreaterThan(b)
            | Self::GreaterEqual(b)
            | Self::StartsWith(b)
            | Self::EndsWith(b) => vec![b.to_string()],
            Self::InRangeInclusive(low, high) | Self::InRangeExclusive(low, high) => {
                vec![low.to_string(), high.to_string()]
            }
        };
        fill_template(self.template(), &comparands)
    }
}

/// Replaces each `{}` in `template` with the next argument, in order.
///
/// Extra placeholders are left untouched and extra arguments are ignored, so a
/// message template coming from a data file can never make formatting fail.
pub fn fill_template<S: AsRef<str>>(template: &str, args: &[S]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut rest = template;
    while let Some(pos) = rest.find("{}") {
        out.push_str(&rest[..pos]);
        match args.next() {
            Some(arg) => out.push_str(arg.as_ref()),
            None => out.push_str("{}"),
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_template_keeps_unmatched_placeholders() {
        assert_eq!(fill_template("a {} b {}", &["1"]), "a 1 b {}");
        assert_eq!(fill_template("no holes", &["1", "2"]), "no holes");
    }

    #[test]
    fn nan_fails_ordering() {
        assert!(!Comparator::GreaterEqual(0.0_f64).compare(&f64::NAN));
        assert!(Comparator::Always.compare(&f64::NAN));
    }
}
