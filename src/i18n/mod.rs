//! Internationalization (i18n) support for stratum
//!
//! Provides translated error descriptions and the headings of the CLI text
//! summary. Supported languages: English (en), Korean (ko).
//!
//! # Environment Variables
//!
//! - `STRATUM_LANG`: Set the preferred language (en, ko). Defaults to English.
//!
//! # Usage
//!
//! ```rust,ignore
//! use stratum::i18n::{t, set_locale};
//!
//! set_locale("ko");
//! let heading = t!("summary.forecasts");
//! ```

// Note: rust_i18n::i18n! macro is declared in lib.rs (crate root)

/// Set the current locale for translations
///
/// Accepts loose forms such as `ko-KR` or `english`.
pub fn set_locale(locale: &str) {
    let normalized = normalize_locale(locale);
    rust_i18n::set_locale(normalized);
}

/// Get the currently active locale
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// Initialize i18n from the `STRATUM_LANG` environment variable
///
/// Falls back to English if not set or unsupported.
pub fn init_from_env() {
    let locale = std::env::var("STRATUM_LANG").unwrap_or_else(|_| "en".to_string());
    set_locale(&locale);
}

/// Normalize locale code to a supported one
///
/// - ko-KR, ko_KR, korean -> ko
/// - anything else -> en
fn normalize_locale(locale: &str) -> &'static str {
    let lower = locale.to_lowercase();

    if lower.starts_with("ko") || lower == "korean" {
        "ko"
    } else {
        "en"
    }
}

/// Translate a key with optional parameters
///
/// This is a re-export of rust_i18n::t! for convenience.
#[doc(inline)]
pub use rust_i18n::t;
