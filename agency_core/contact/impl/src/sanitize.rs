use std::sync::LazyLock;

use agency_models::contact::ContactForm;
use regex::Regex;

/// Upper bound for any free-text value after sanitization, in characters.
pub const MAX_LENGTH: usize = 1000;

static JAVASCRIPT_URI_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript:").unwrap());
static EVENT_HANDLER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)on\w+=").unwrap());

/// Neutralizes markup and script injection in a free-text value.
///
/// Removes angle brackets, `javascript:` and inline event handler prefixes
/// (`onclick=` and the like), trims surrounding whitespace and caps the value at
/// [`MAX_LENGTH`] characters.
///
/// Removal is repeated until nothing matches, so a fragment like
/// `javajavascript:script:` cannot reassemble into a pattern. This makes the
/// function idempotent.
pub fn sanitize(input: &str) -> String {
    let mut value = input.to_owned();
    loop {
        let stripped = strip(&value);
        if stripped == value {
            break;
        }
        value = stripped;
    }

    let truncated = value.trim().chars().take(MAX_LENGTH).collect::<String>();
    truncated.trim().to_owned()
}

fn strip(value: &str) -> String {
    let value = value.replace(['<', '>'], "");
    let value = JAVASCRIPT_URI_REGEX.replace_all(&value, "");
    EVENT_HANDLER_REGEX.replace_all(&value, "").into_owned()
}

/// Applies [`sanitize`] to every free-text field of the form.
pub fn sanitize_form(form: ContactForm) -> ContactForm {
    let optional = |value: Option<String>| value.as_deref().map(sanitize);

    ContactForm {
        full_name: sanitize(&form.full_name),
        company: sanitize(&form.company),
        country: optional(form.country),
        phone: sanitize(&form.phone),
        email: sanitize(&form.email),
        services: form.services.iter().map(String::as_str).map(sanitize).collect(),
        custom_message: optional(form.custom_message),
        date: optional(form.date),
        time: optional(form.time),
        privacy_accepted: form.privacy_accepted,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn strips_injection() {
        for (input, expected) in [
            ("  Ana López  ", "Ana López"),
            ("<script>alert(1)</script>", "scriptalert(1)/script"),
            ("JavaScript:alert(1)", "alert(1)"),
            ("<img src=x onerror=alert(1)>", "img src=x alert(1)"),
            ("<a ONCLICK=go()>", "a go()"),
            ("javajavascript:script:void(0)", "void(0)"),
            ("on<click=x", "x"),
            ("", ""),
            ("   ", ""),
        ] {
            assert_eq!(sanitize(input), expected, "{input:?}");
        }
    }

    #[test]
    fn truncates_to_max_length() {
        let input = "ñ".repeat(MAX_LENGTH + 50);

        let output = sanitize(&input);

        assert_eq!(output.chars().count(), MAX_LENGTH);
    }

    #[test]
    fn trims_after_truncation() {
        let input = format!("{} tail", "a".repeat(MAX_LENGTH - 1));

        let output = sanitize(&input);

        assert_eq!(output, "a".repeat(MAX_LENGTH - 1));
    }

    #[test]
    fn idempotent() {
        let long = format!("{}<x>{}", "b ".repeat(600), " c".repeat(600));
        for input in [
            "plain text",
            "  padded  ",
            "< onclick= >",
            "javajavascript:script:",
            "oonclick=nclick=hello",
            "<<>>javascript:on>load=",
            " <a> ",
            "ononerror==",
            long.as_str(),
        ] {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "{input:?}");
        }
    }

    #[test]
    fn form_keeps_missing_optionals_missing() {
        let form = ContactForm {
            full_name: " <b>Ana</b> ".into(),
            privacy_accepted: true,
            ..Default::default()
        };

        let output = sanitize_form(form);

        assert_eq!(output.full_name, "bAna/b");
        assert_eq!(output.country, None);
        assert!(output.privacy_accepted);
    }
}
