//! Messaging deep links built from lead phone numbers.

use crate::domain::types::MessageTemplate;

/// Placeholder substituted with the business name.
pub const NAME_PLACEHOLDER: &str = "{name}";
pub const DEFAULT_MESSAGE_TEMPLATE: &str = "Halo {name}, saya menemukan bisnis Anda di Google Maps dan ingin menawarkan kerja sama. Apakah ada waktu untuk berdiskusi?";
/// Indonesian country calling code.
pub const COUNTRY_PREFIX: &str = "62";
pub const MESSAGING_BASE_URL: &str = "https://wa.me";
/// Link rendered when a lead has no usable phone number.
pub const NULL_LINK: &str = "#";

/// Strips separators and rewrites local Indonesian numbers to the `62` form.
///
/// `0812...` and `812...` both become `62812...`. Anything else, including
/// numbers already carrying `62`, is kept as is after stripping.
pub fn normalize_phone(raw: &str) -> String {
    let digits: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '+'))
        .collect();

    if let Some(rest) = digits.strip_prefix('0') {
        format!("{COUNTRY_PREFIX}{rest}")
    } else if digits.starts_with('8') {
        format!("{COUNTRY_PREFIX}{digits}")
    } else {
        digits
    }
}

/// Builds a chat link pre-filled with the rendered template.
pub fn messaging_link(phone: Option<&str>, name: &str, template: &MessageTemplate) -> String {
    let phone = match phone.map(normalize_phone) {
        Some(phone) if !phone.is_empty() => phone,
        _ => return NULL_LINK.to_string(),
    };
    let text = template.render(name);
    format!(
        "{MESSAGING_BASE_URL}/{phone}?text={}",
        urlencoding::encode(&text)
    )
}
