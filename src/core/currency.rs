//! Static catalog of popular currencies for selection prompts.

/// A selectable currency: ISO 4217 code plus a display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyInfo {
    pub code: &'static str,
    pub name: &'static str,
}

/// Ordered catalog used to populate selection surfaces. Never mutated at
/// runtime.
pub const CATALOG: &[CurrencyInfo] = &[
    CurrencyInfo { code: "USD", name: "US Dollar" },
    CurrencyInfo { code: "EUR", name: "Euro" },
    CurrencyInfo { code: "GBP", name: "British Pound" },
    CurrencyInfo { code: "JPY", name: "Japanese Yen" },
    CurrencyInfo { code: "INR", name: "Indian Rupee" },
    CurrencyInfo { code: "CAD", name: "Canadian Dollar" },
    CurrencyInfo { code: "AUD", name: "Australian Dollar" },
    CurrencyInfo { code: "CHF", name: "Swiss Franc" },
    CurrencyInfo { code: "CNY", name: "Chinese Yuan" },
    CurrencyInfo { code: "HKD", name: "Hong Kong Dollar" },
    CurrencyInfo { code: "SGD", name: "Singapore Dollar" },
    CurrencyInfo { code: "NZD", name: "New Zealand Dollar" },
];

pub fn is_known(code: &str) -> bool {
    CATALOG.iter().any(|currency| currency.code == code)
}

pub fn display_name(code: &str) -> Option<&'static str> {
    CATALOG
        .iter()
        .find(|currency| currency.code == code)
        .map(|currency| currency.name)
}
