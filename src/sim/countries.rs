use serde::Serialize;

/// One entry of the static country directory handed to the phone-entry
/// collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Country {
    /// ISO-2 country code.
    pub code: &'static str,
    pub name: &'static str,
    /// "+"-prefixed dial code.
    pub dial_code: &'static str,
}

pub const COUNTRIES: [Country; 20] = [
    Country { code: "US", name: "United States", dial_code: "+1" },
    Country { code: "CA", name: "Canada", dial_code: "+1" },
    Country { code: "GB", name: "United Kingdom", dial_code: "+44" },
    Country { code: "IN", name: "India", dial_code: "+91" },
    Country { code: "AU", name: "Australia", dial_code: "+61" },
    Country { code: "DE", name: "Germany", dial_code: "+49" },
    Country { code: "FR", name: "France", dial_code: "+33" },
    Country { code: "JP", name: "Japan", dial_code: "+81" },
    Country { code: "BR", name: "Brazil", dial_code: "+55" },
    Country { code: "MX", name: "Mexico", dial_code: "+52" },
    Country { code: "IT", name: "Italy", dial_code: "+39" },
    Country { code: "ES", name: "Spain", dial_code: "+34" },
    Country { code: "NL", name: "Netherlands", dial_code: "+31" },
    Country { code: "SE", name: "Sweden", dial_code: "+46" },
    Country { code: "NO", name: "Norway", dial_code: "+47" },
    Country { code: "DK", name: "Denmark", dial_code: "+45" },
    Country { code: "FI", name: "Finland", dial_code: "+358" },
    Country { code: "CH", name: "Switzerland", dial_code: "+41" },
    Country { code: "AT", name: "Austria", dial_code: "+43" },
    Country { code: "BE", name: "Belgium", dial_code: "+32" },
];

/// Default selection when none is chosen: the first "+1" entry, falling back
/// to the head of the list.
pub fn default_country(countries: &[Country]) -> Option<&Country> {
    countries
        .iter()
        .find(|country| country.dial_code == "+1")
        .or_else(|| countries.first())
}
