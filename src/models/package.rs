use super::event::PackageType;

/// Fixed package catalog shown on the packages page and in the wizard
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    pub kind: PackageType,
    pub name: &'static str,
    pub price_usd: u32,
    pub popular: bool,
    pub description: &'static str,
    pub ideal_for: &'static [&'static str],
    pub features: &'static [&'static str],
}

pub const STANDARD: Package = Package {
    kind: PackageType::Standard,
    name: "Standard",
    price_usd: 50,
    popular: false,
    description: "Perfect for small gatherings and intimate events",
    ideal_for: &[
        "Birthday parties",
        "Small gatherings",
        "Family events",
        "Casual meetups",
    ],
    features: &[
        "Up to 100 photos",
        "Basic filters",
        "AI content moderation",
        "7-day storage",
        "QR code access",
    ],
};

pub const PREMIUM: Package = Package {
    kind: PackageType::Premium,
    name: "Premium",
    price_usd: 75,
    popular: true,
    description: "Ideal for weddings, corporate events, and large celebrations",
    ideal_for: &[
        "Weddings",
        "Corporate events",
        "Conferences",
        "Large celebrations",
    ],
    features: &[
        "Unlimited photos",
        "Advanced filters & effects",
        "AI content moderation",
        "30-day storage",
        "QR code + custom link",
        "Download ZIP archive",
    ],
};

pub const CATALOG: [Package; 2] = [STANDARD, PREMIUM];

impl Package {
    pub fn for_type(kind: PackageType) -> &'static Package {
        match kind {
            PackageType::Standard => &STANDARD,
            PackageType::Premium => &PREMIUM,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_premium_is_popular() {
        assert!(Package::for_type(PackageType::Premium).popular);
        assert_eq!(Package::for_type(PackageType::Standard).price_usd, 50);
    }
}
