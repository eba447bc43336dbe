//! Interface language selection.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Russian,
    English,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LanguagePreference {
    #[default]
    System,
    Russian,
    English,
}

impl LanguagePreference {
    pub fn resolve(self) -> Language {
        match self {
            LanguagePreference::Russian => Language::Russian,
            LanguagePreference::English => Language::English,
            LanguagePreference::System => {
                language_for_locale(sys_locale::get_locale().as_deref())
            }
        }
    }
}

/// English for `en*` locales, Russian for everything else.
pub fn language_for_locale(locale: Option<&str>) -> Language {
    match locale {
        Some(tag) if tag.to_ascii_lowercase().starts_with("en") => Language::English,
        _ => Language::Russian,
    }
}

impl Language {
    pub fn pick<'a>(self, ru: &'a str, en: &'a str) -> &'a str {
        match self {
            Language::Russian => ru,
            Language::English => en,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("en-US"), Language::English)]
    #[case(Some("EN"), Language::English)]
    #[case(Some("ru-RU"), Language::Russian)]
    #[case(Some("nl-NL"), Language::Russian)]
    #[case(None, Language::Russian)]
    fn locale_maps_to_language(#[case] locale: Option<&str>, #[case] expected: Language) {
        assert_eq!(language_for_locale(locale), expected);
    }

    #[test]
    fn explicit_preference_wins() {
        assert_eq!(LanguagePreference::English.resolve(), Language::English);
        assert_eq!(LanguagePreference::Russian.resolve(), Language::Russian);
        assert_eq!(Language::English.pick("Загрузка", "Upload"), "Upload");
    }
}
