use serde::{Deserialize, Serialize};

/// Language used for user-facing text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl Locale {
    fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag.split(['-', '_']).next()?.trim();
        if primary.eq_ignore_ascii_case("es") {
            Some(Self::Es)
        } else if primary.eq_ignore_ascii_case("en") {
            Some(Self::En)
        } else {
            None
        }
    }

    /// Picks the supported locale with the highest weight from an
    /// `Accept-Language` header value. Falls back to [`Locale::Es`].
    pub fn from_accept_language(header: &str) -> Self {
        header
            .split(',')
            .filter_map(|entry| {
                let mut parts = entry.split(';');
                let locale = Self::from_tag(parts.next()?)?;
                let weight = parts
                    .filter_map(|param| param.trim().strip_prefix("q="))
                    .find_map(|q| q.trim().parse::<f32>().ok())
                    .unwrap_or(1.0);
                (weight > 0.0).then_some((locale, weight))
            })
            .fold(None, |best: Option<(Self, f32)>, (locale, weight)| match best {
                Some((_, best_weight)) if best_weight >= weight => best,
                _ => Some((locale, weight)),
            })
            .map(|(locale, _)| locale)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_language() {
        for (header, expected) in [
            ("", Locale::Es),
            ("en", Locale::En),
            ("en-US,en;q=0.9", Locale::En),
            ("es-MX,es;q=0.9,en;q=0.8", Locale::Es),
            ("de-DE,en;q=0.5,es;q=0.7", Locale::Es),
            ("fr, en;q=0.3", Locale::En),
            ("en;q=0", Locale::Es),
            ("*", Locale::Es),
        ] {
            assert_eq!(Locale::from_accept_language(header), expected, "{header}");
        }
    }
}
