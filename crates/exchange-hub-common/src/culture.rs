//! Culture (locale) definitions for the marketplace.
//!
//! The backend localizes certain responses through a two-letter language
//! code inserted as the first path segment of the request URI.

/// A culture supported by the marketplace, identified by an IETF tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Culture {
    /// Swedish (`sv-SE`), the default.
    SvSe,
    /// British English (`en-GB`).
    EnGb,
}

impl Culture {
    /// All supported cultures.
    pub const SUPPORTED: [Culture; 2] = [Culture::SvSe, Culture::EnGb];

    /// The IETF tag of this culture.
    pub fn tag(self) -> &'static str {
        match self {
            Culture::SvSe => "sv-SE",
            Culture::EnGb => "en-GB",
        }
    }

    /// The lower-case two-letter ISO 639-1 language code.
    pub fn language_code(self) -> &'static str {
        match self {
            Culture::SvSe => "sv",
            Culture::EnGb => "en",
        }
    }

    /// Resolve the best supported culture for an arbitrary tag.
    ///
    /// Matching is by two-letter language prefix, case-insensitively, so
    /// `en-US` resolves to `en-GB`. Unknown or missing tags fall back to
    /// the default culture.
    pub fn best_match(tag: Option<&str>) -> Culture {
        let Some(tag) = tag else {
            return Culture::default();
        };

        let prefix = tag.get(..2).unwrap_or(tag);
        Culture::SUPPORTED
            .into_iter()
            .find(|c| c.language_code().eq_ignore_ascii_case(prefix))
            .unwrap_or_default()
    }
}

impl Default for Culture {
    fn default() -> Self {
        Culture::SvSe
    }
}
