//! Conversions between document conventions and the cell model
//!
//! The document measures lengths in `in`/`cm`/`mm`/`pt` and writes cell
//! references as `[.A1:.B2]`; the cell model uses points and plain `A1:B2`.

use std::borrow::Cow;

use lazy_regex::regex;
use regex::{Captures, Regex};
use sods_core::ValueType;

const POINTS_PER_INCH: f64 = 72.0;
const POINTS_PER_CM: f64 = 72.0 / 2.54;
const POINTS_PER_MM: f64 = 72.0 / 25.4;

/// Rewrite every `in`/`cm`/`mm` length in `s` as whole points
///
/// `"1in"` becomes `"72pt"`, `"0.06cm solid #ff0000"` becomes
/// `"2pt solid #ff0000"`. Text without those units passes through, so the
/// function is idempotent. Returns `None` for an empty input.
pub fn length_to_points(s: &str) -> Option<String> {
    if s.is_empty() {
        return None;
    }

    let unescaped = quick_xml::escape::unescape(s).unwrap_or(Cow::Borrowed(s));
    let out = convert_unit(&unescaped, regex!(r"([0-9.]+)in"), POINTS_PER_INCH);
    let out = convert_unit(&out, regex!(r"([0-9.]+)cm"), POINTS_PER_CM);
    let out = convert_unit(&out, regex!(r"([0-9.]+)mm"), POINTS_PER_MM);
    Some(out)
}

fn convert_unit(s: &str, re: &Regex, factor: f64) -> String {
    re.replace_all(s, |caps: &Captures| match caps[1].parse::<f64>() {
        Ok(v) => format!("{}pt", (v * factor).round() as i64),
        // "1.2.3in" is not a number; leave it alone
        Err(_) => caps[0].to_string(),
    })
    .into_owned()
}

/// Strip document reference markup from a formula or condition
///
/// Removes quoted sheet prefixes (`$'Sheet1'.`), all whitespace, the `[.`
/// and `]` range brackets, and turns `:.` into `:`. Returns `None` for an
/// empty input.
///
/// ```
/// use sods_ods::normalize::clean_formula;
///
/// assert_eq!(clean_formula("$'Sheet1'.[.A1:.B2]").as_deref(), Some("A1:B2"));
/// assert_eq!(clean_formula("=SUM([.C5:.C8])").as_deref(), Some("=SUM(C5:C8)"));
/// ```
pub fn clean_formula(s: &str) -> Option<String> {
    if s.is_empty() {
        return None;
    }

    let out = regex!(r"\$'[^']*'\.?").replace_all(s, "");
    let out: String = out.chars().filter(|c| !c.is_whitespace()).collect();
    Some(out.replace("[.", "").replace(']', "").replace(":.", ":"))
}

/// Drop the namespace marker from a formula attribute (`of:=A1` → `=A1`)
///
/// Only an alphabetic prefix followed by `:` counts as a namespace, so range
/// syntax such as `=A1:B2` is never mistaken for one.
pub fn strip_formula_namespace(s: &str) -> &str {
    match s.split_once(':') {
        Some((prefix, rest))
            if !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_alphabetic()) =>
        {
            rest
        }
        _ => s,
    }
}

/// Map an `office:value-type` attribute to the cell model
///
/// Missing or unknown types fall back to [`ValueType::String`]. Percentages
/// become floats and lose their percentage marker.
pub fn normalize_value_type(s: Option<&str>) -> ValueType {
    let Some(s) = s else {
        return ValueType::String;
    };

    if s == "percentage" {
        log::warn!("percentage value read as float; percentage formatting is dropped");
    }

    ValueType::parse(s).unwrap_or_else(|| {
        log::debug!("unknown value type {:?}, reading as string", s);
        ValueType::String
    })
}
