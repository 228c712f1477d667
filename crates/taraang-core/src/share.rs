//! # Share Links
//!
//! WhatsApp deep links carrying a summary text.

use url::form_urlencoded;

const WHATSAPP_BASE: &str = "https://wa.me/";

/// Normalizes a phone number for a deep link.
///
/// Keeps digits only; a bare 10-digit number gets the `91` country code.
/// Returns `None` when no digits remain.
pub fn normalize_phone(phone: &str) -> Option<String> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.len() {
        0 => None,
        10 => Some(format!("91{}", digits)),
        _ => Some(digits),
    }
}

/// Percent-encodes text for a query value, spaces as `%20`.
pub fn encode_text(text: &str) -> String {
    // byte_serialize writes a literal '+' as %2B, so every remaining '+' is a space
    form_urlencoded::byte_serialize(text.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Builds `https://wa.me/{phone}?text={text}`.
///
/// Without a usable phone number the link is unaddressed and the sender
/// picks the chat.
///
/// ## Example
/// ```rust
/// use taraang_core::share::whatsapp_link;
///
/// assert_eq!(
///     whatsapp_link("98765 43210", "Hi there"),
///     "https://wa.me/919876543210?text=Hi%20there"
/// );
/// assert_eq!(whatsapp_link("", "Hi"), "https://wa.me/?text=Hi");
/// ```
pub fn whatsapp_link(phone: &str, text: &str) -> String {
    let phone = normalize_phone(phone).unwrap_or_default();
    format!("{}{}?text={}", WHATSAPP_BASE, phone, encode_text(text))
}
