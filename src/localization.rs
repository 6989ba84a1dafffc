//! Localized user-facing strings for the command line front end.
//!
//! Bundles are read from `locales/<lang>/main.ftl` next to the crate
//! manifest when available, otherwise from the copies embedded at compile
//! time. Unknown languages fall back to English.

use crate::config::SUPPORTED_LANGUAGES;
use anyhow::Result;
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use std::collections::HashMap;
use std::fs;
use std::sync::Arc;
use unic_langid::LanguageIdentifier;

const EMBEDDED_EN: &str = include_str!("../locales/en/main.ftl");
const EMBEDDED_FR: &str = include_str!("../locales/fr/main.ftl");

/// Localization manager for the Dishcovery CLI
pub struct LocalizationManager {
    bundles: HashMap<String, FluentBundle<FluentResource>>,
}

impl LocalizationManager {
    /// Create a new localization manager
    pub fn new() -> Result<Self> {
        let mut bundles = HashMap::new();

        for locale_str in SUPPORTED_LANGUAGES {
            let locale: LanguageIdentifier = locale_str.parse()?;
            let bundle = Self::create_bundle(&locale, locale_str)?;
            bundles.insert(locale_str.to_string(), bundle);
        }

        Ok(Self { bundles })
    }

    /// Create a fluent bundle for a specific locale
    fn create_bundle(
        locale: &LanguageIdentifier,
        locale_str: &str,
    ) -> Result<FluentBundle<FluentResource>> {
        let mut bundle = FluentBundle::new(vec![locale.clone()]);
        // terminal output, no bidi isolation marks around placeables
        bundle.set_use_isolating(false);

        let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
        let resource_path = format!("{}/locales/{}/main.ftl", manifest_dir, locale_str);
        let content = match fs::read_to_string(&resource_path) {
            Ok(content) => content,
            Err(_) => embedded_resource(locale_str).to_string(),
        };

        let resource = FluentResource::try_new(content).map_err(|(_, errors)| {
            anyhow::anyhow!("Invalid Fluent resource for '{}': {:?}", locale_str, errors)
        })?;
        bundle
            .add_resource(resource)
            .map_err(|errors| anyhow::anyhow!("Duplicate Fluent messages: {:?}", errors))?;

        Ok(bundle)
    }

    /// Get a localized message in a specific language
    pub fn get_message_in_language(
        &self,
        key: &str,
        language: &str,
        args: Option<&HashMap<&str, &str>>,
    ) -> String {
        let bundle = match self.bundles.get(language) {
            Some(bundle) => bundle,
            None => match self.bundles.get("en") {
                Some(bundle) => bundle,
                None => return format!("Missing translation: {}", key),
            },
        };

        let msg = match bundle.get_message(key) {
            Some(msg) => msg,
            None => return format!("Missing translation: {}", key),
        };

        let pattern = match msg.value() {
            Some(pattern) => pattern,
            None => return format!("Missing value for key: {}", key),
        };

        let fluent_args = args.map(|args| {
            FluentArgs::from_iter(args.iter().map(|(k, v)| (*k, FluentValue::from(*v))))
        });

        let mut errors = vec![];
        let value = bundle.format_pattern(pattern, fluent_args.as_ref(), &mut errors);
        if !errors.is_empty() {
            tracing::debug!(
                key = %key,
                language = %language,
                errors = ?errors,
                "Fluent formatting errors"
            );
        }
        value.into_owned()
    }

    /// Get a localized message with arguments in a specific language
    pub fn get_message_with_args_in_language(
        &self,
        key: &str,
        language: &str,
        args: &[(&str, &str)],
    ) -> String {
        let args_map: HashMap<&str, &str> = args.iter().cloned().collect();
        self.get_message_in_language(key, language, Some(&args_map))
    }

    /// Whether a message exists for the language, without English fallback
    pub fn has_message(&self, key: &str, language: &str) -> bool {
        self.bundles
            .get(language)
            .is_some_and(|bundle| bundle.has_message(key))
    }

    /// Check if a language is supported
    pub fn is_language_supported(&self, language: &str) -> bool {
        self.bundles.contains_key(language)
    }
}

fn embedded_resource(locale: &str) -> &'static str {
    match locale {
        "fr" => EMBEDDED_FR,
        _ => EMBEDDED_EN,
    }
}

/// Create a shared localization manager
pub fn create_localization_manager() -> Result<Arc<LocalizationManager>> {
    Ok(Arc::new(LocalizationManager::new()?))
}

/// Reduce a language tag to a supported language code
///
/// ```
/// use dishcovery::localization::detect_language;
///
/// assert_eq!(detect_language(Some("fr-CA")), "fr");
/// assert_eq!(detect_language(Some("de")), "en");
/// assert_eq!(detect_language(None), "en");
/// ```
pub fn detect_language(language_code: Option<&str>) -> String {
    if let Some(code) = language_code {
        // "fr-FR" -> "fr", "en_US" -> "en"
        let lang = code
            .split(['-', '_'])
            .next()
            .unwrap_or("en")
            .trim()
            .to_lowercase();

        if SUPPORTED_LANGUAGES.contains(&lang.as_str()) {
            return lang;
        }
    }

    "en".to_string()
}
