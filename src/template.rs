//! Placeholder substitution for user-configurable templates.
//!
//! Block and header templates are opaque format strings with named
//! placeholders (`{time}`, `{tags}`, `{date}`, `{message}`). [`substitute`]
//! replaces the placeholders it is given values for and leaves everything
//! else — including unknown `{...}` sequences — as literal text. A typo in a
//! template therefore shows up verbatim in the output instead of crashing
//! the run.
//!
//! # Examples
//!
//! ```
//! use teletolo::template::substitute;
//!
//! let line = substitute(
//!     "**{time}** {tags} {message}",
//!     &[("time", "09:30"), ("tags", "#tg"), ("message", "hello")],
//! );
//! assert_eq!(line, "**09:30** #tg hello");
//!
//! // Unknown placeholders survive untouched.
//! assert_eq!(substitute("{date} {nope}", &[("date", "2024-01-01")]), "2024-01-01 {nope}");
//! ```

/// Substitutes `{key}` placeholders in `template` with the paired values.
///
/// Keys not present in `values` stay as literal `{key}` text. Unpaired
/// braces are also kept literally; this function never fails.
pub fn substitute(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];
        match after_open.find('}') {
            Some(close) => {
                let key = &after_open[..close];
                match values.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after_open[close + 1..];
            }
            None => {
                // Unclosed brace: keep the tail as-is.
                out.push_str(&rest[open..]);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}
