//! Message catalog for violation texts.
//!
//! Violations carry a message key plus positional arguments; the rendered
//! text comes from this catalog. Placeholders are `{0}`, `{1}`, …

/// Identifier does not match the configured naming pattern.
/// Arguments: identifier, pattern source.
pub const MSG_INVALID_PATTERN: &str = "name.invalidPattern";

/// Source file could not be parsed. Arguments: parser message.
pub const MSG_PARSE_ERROR: &str = "parse.error";

/// Source file could not be read as UTF-8 text. Arguments: IO message.
pub const MSG_READ_ERROR: &str = "read.error";

const CATALOG: &[(&str, &str)] = &[
    (MSG_INVALID_PATTERN, "Name '{0}' must match pattern '{1}'."),
    (MSG_PARSE_ERROR, "Unable to parse file: {0}"),
    (MSG_READ_ERROR, "Unable to read file: {0}"),
];

/// Returns the template registered for `key`.
#[must_use]
pub fn template(key: &str) -> Option<&'static str> {
    CATALOG
        .iter()
        .find_map(|(k, template)| (*k == key).then_some(*template))
}

/// Renders `key` with `args`.
///
/// Unknown keys render as the key followed by the arguments. Placeholders
/// without a matching argument are kept verbatim; argument text is never
/// re-scanned for placeholders.
#[must_use]
pub fn format_message(key: &str, args: &[String]) -> String {
    let Some(template) = template(key) else {
        if args.is_empty() {
            return key.to_string();
        }
        return format!("{key}: {}", args.join(", "));
    };

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substituted = after.find('}').and_then(|close| {
            let index: usize = after[..close].parse().ok()?;
            let arg = args.get(index)?;
            Some((arg, close))
        });
        match substituted {
            Some((arg, close)) => {
                out.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
