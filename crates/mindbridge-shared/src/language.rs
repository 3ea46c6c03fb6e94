//! Supported interface languages, their speech locales and the small set of
//! translated notification strings.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
    De,
    Pt,
    Hi,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::En,
        Language::Es,
        Language::Fr,
        Language::De,
        Language::Pt,
        Language::Hi,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::De => "de",
            Language::Pt => "pt",
            Language::Hi => "hi",
        }
    }

    /// BCP 47 locale used by speech recognition and synthesis.
    pub fn speech_locale(self) -> &'static str {
        match self {
            Language::En => "en-US",
            Language::Es => "es-ES",
            Language::Fr => "fr-FR",
            Language::De => "de-DE",
            Language::Pt => "pt-PT",
            Language::Hi => "hi-IN",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, ValidationError> {
        let code = code.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|l| l.code() == code)
            .ok_or(ValidationError::UnknownLanguage(code))
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

/// Keys of translated notification strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationKey {
    LanguageChanged,
    ErrorOccurred,
    ConnectionError,
}

/// Translate `key` into `language`, falling back to English.
pub fn translate(key: TranslationKey, language: Language) -> &'static str {
    use Language::*;
    use TranslationKey::*;

    match (key, language) {
        (LanguageChanged, Es) => "Idioma cambiado exitosamente",
        (LanguageChanged, Fr) => "Langue changée avec succès",
        (LanguageChanged, De) => "Sprache erfolgreich geändert",
        (LanguageChanged, Pt) => "Idioma alterado com sucesso",
        (LanguageChanged, _) => "Language changed successfully",

        (ErrorOccurred, Es) => "Ocurrió un error. Por favor intenta de nuevo.",
        (ErrorOccurred, Fr) => "Une erreur s'est produite. Veuillez réessayer.",
        (ErrorOccurred, De) => "Ein Fehler ist aufgetreten. Bitte versuchen Sie es erneut.",
        (ErrorOccurred, Pt) => "Ocorreu um erro. Tente novamente.",
        (ErrorOccurred, _) => "An error occurred. Please try again.",

        (ConnectionError, Es) => "Error de conexión. Por favor verifica tu conexión a internet.",
        (ConnectionError, Fr) => "Erreur de connexion. Veuillez vérifier votre connexion internet.",
        (ConnectionError, De) => "Verbindungsfehler. Bitte überprüfen Sie Ihre Internetverbindung.",
        (ConnectionError, Pt) => "Erro de conexão. Verifique sua conexão com a internet.",
        (ConnectionError, _) => "Connection error. Please check your internet connection.",
    }
}
