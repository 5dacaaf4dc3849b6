//! Directive-line parsing for `#+begin_src` headers.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{ArgValue, HeaderArgs};

/// Pattern for `:key value` pairs. Values are either double-quoted (quotes
/// stripped) or a run of non-whitespace, non-colon characters. A key with
/// no value is a bare flag.
static ARG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#":(?P<key>[A-Za-z0-9_-]+)(?:[ \t]+(?:"(?P<quoted>[^"]*)"|(?P<value>[^\s:]+)))?"#)
        .unwrap()
});

/// Parses the text after the `begin_src` keyword into `(language, args)`.
///
/// The first whitespace-delimited token is the language, original case
/// retained. A header with no language token yields an empty language and
/// whatever args could still be read, so inheritance can later make the
/// block tangleable.
pub fn parse_src_header(rest: &str) -> (String, HeaderArgs) {
    let rest = rest.trim();
    if rest.is_empty() {
        return (String::new(), HeaderArgs::new());
    }

    if rest.starts_with(':') {
        // Malformed fence: args with no language token
        return (String::new(), parse_args(rest));
    }

    match rest.split_once(char::is_whitespace) {
        Some((language, args_part)) => (language.to_string(), parse_args(args_part)),
        None => (rest.to_string(), HeaderArgs::new()),
    }
}

/// Parses a run of `:key value` arguments.
pub fn parse_args(input: &str) -> HeaderArgs {
    let mut args = HeaderArgs::new();

    for caps in ARG_PATTERN.captures_iter(input) {
        let key = &caps["key"];
        let value = match (caps.name("quoted"), caps.name("value")) {
            (Some(quoted), _) => normalize_value(quoted.as_str()),
            (None, Some(value)) => normalize_value(value.as_str()),
            (None, None) => ArgValue::Bool(true),
        };
        args.insert(key, value);
    }

    args
}

/// Normalizes boolean-ish tokens.
///
/// `yes`/`t` become true and `no`/`nil` become false, case-insensitively.
/// The boolean reading wins over the string reading, so `:key yes` and
/// `:key "yes"` are indistinguishable.
fn normalize_value(value: &str) -> ArgValue {
    if value.eq_ignore_ascii_case("yes") || value.eq_ignore_ascii_case("t") {
        ArgValue::Bool(true)
    } else if value.eq_ignore_ascii_case("no") || value.eq_ignore_ascii_case("nil") {
        ArgValue::Bool(false)
    } else {
        ArgValue::Str(value.to_string())
    }
}
