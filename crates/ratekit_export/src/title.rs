//! Sheet title formatting.

use crate::conf::TUP_SHIPPING_SPEED_DISPLAY_OVERRIDES;
use crate::spec::EnumLocale;

/// `"{Locale} {ShippingSpeed} Rates"`, e.g. `Domestic Next Day Rates`.
pub fn format_sheet_title(shipping_speed: &str, locale: &EnumLocale) -> String {
    format!(
        "{} {} Rates",
        capitalize_first(locale.as_str()),
        derive_shipping_speed_display(shipping_speed)
    )
}

/// Display text of a shipping speed.
///
/// [`TUP_SHIPPING_SPEED_DISPLAY_OVERRIDES`] wins; anything else gets its first
/// letter capitalized.
pub fn derive_shipping_speed_display(shipping_speed: &str) -> String {
    TUP_SHIPPING_SPEED_DISPLAY_OVERRIDES
        .iter()
        .find(|(c_speed, _)| *c_speed == shipping_speed)
        .map(|(_, c_display)| c_display.to_string())
        .unwrap_or_else(|| capitalize_first(shipping_speed))
}

fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(chr) => chr.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rule_capitalizes_both_parts() {
        assert_eq!(
            format_sheet_title("standard", &EnumLocale::Domestic),
            "Domestic Standard Rates"
        );
        assert_eq!(
            format_sheet_title("expedited", &EnumLocale::Domestic),
            "Domestic Expedited Rates"
        );
    }

    #[test]
    fn test_irregular_speeds_use_lookup_table() {
        assert_eq!(
            format_sheet_title("nextDay", &EnumLocale::Domestic),
            "Domestic Next Day Rates"
        );
        assert_eq!(
            format_sheet_title("intlEconomy", &EnumLocale::International),
            "International Economy Rates"
        );
        assert_eq!(
            format_sheet_title("intlExpedited", &EnumLocale::International),
            "International Expedited Rates"
        );
    }

    #[test]
    fn test_unlisted_camel_case_speed_only_capitalizes_first_letter() {
        assert_eq!(derive_shipping_speed_display("sameDay"), "SameDay");
        assert_eq!(derive_shipping_speed_display(""), "");
        assert_eq!(
            format_sheet_title("freight", &EnumLocale::Unknown("lunar".to_string())),
            "Lunar Freight Rates"
        );
    }
}
