//! Fixed list of regions offered by the selector.

/// States and union territories, in selector order.
const REGIONS: &[&str] = &[
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jammu and Kashmir",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
    "Andaman and Nicobar Islands",
    "Chandigarh",
    "Dadra and Nagar Haveli",
    "Daman and Diu",
    "Lakshadweep",
    "National Capital Territory of Delhi",
    "Puducherry",
];

pub fn all() -> &'static [&'static str] {
    REGIONS
}

/// Look up a region by name, ignoring case and surrounding whitespace.
/// Returns the canonical spelling.
pub fn find(name: &str) -> Option<&'static str> {
    let needle = name.trim();
    REGIONS.iter().copied().find(|r| r.eq_ignore_ascii_case(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_has_all_states_and_territories() {
        assert_eq!(all().len(), 36);
        assert_eq!(all().first(), Some(&"Andhra Pradesh"));
        assert_eq!(all().last(), Some(&"Puducherry"));
    }

    #[test]
    fn find_is_case_insensitive_and_trims() {
        assert_eq!(find("  tamil nadu "), Some("Tamil Nadu"));
        assert_eq!(find("GOA"), Some("Goa"));
    }

    #[test]
    fn find_unknown_region() {
        assert_eq!(find("Atlantis"), None);
        assert_eq!(find(""), None);
    }
}
