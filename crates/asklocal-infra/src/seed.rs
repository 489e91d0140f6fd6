//! Reference data seeded by the operator: categories, countries and the
//! curated home-country locations.

/// Question categories as `(name, description)`.
pub const CATEGORIES: &[(&str, &str)] = &[
    ("Accommodation", "hotels and short-term rentals"),
    ("Housing", "renting or buying properties"),
    ("Venues", "cultural, entertainment, and sports venues"),
    ("Food & Drink", "grocery stores, restaurants, cafés, and bars"),
    ("Shopping", "retail stores and shopping centres"),
    ("Transport", "public transport, taxis, and ride-sharing"),
    ("Money", "ATMs, banks, insurance, and financial services"),
    (
        "Health & Medicine",
        "pharmacies, doctors, health practitioners, and hospitals",
    ),
    ("Services", "post, vehicle, laundromat, and other services"),
    (
        "Trades",
        "plumbing, electrical, carpentry, and other trade services",
    ),
    ("Miscellaneous", "miscellaneous topics"),
];

/// Countries as `(code, name)`.
pub const COUNTRIES: &[(&str, &str)] = &[
    ("AU", "Australia"),
    ("NZ", "New Zealand"),
    ("GB", "United Kingdom"),
    ("US", "United States"),
    ("CA", "Canada"),
    ("IE", "Ireland"),
    ("SG", "Singapore"),
    ("JP", "Japan"),
];

/// Home-country locations as `(country_code, state, postcode, suburb)`,
/// already title-cased.
pub const HOME_LOCATIONS: &[(&str, &str, &str, &str)] = &[
    ("AU", "Nsw", "2007", "Ultimo"),
    ("AU", "Nsw", "2010", "Surry Hills"),
    ("AU", "Nsw", "2026", "Bondi"),
    ("AU", "Vic", "3000", "Melbourne"),
    ("AU", "Vic", "3065", "Fitzroy"),
    ("AU", "Qld", "4000", "Brisbane"),
    ("AU", "Wa", "6000", "Perth"),
    ("AU", "Sa", "5000", "Adelaide"),
    ("AU", "Tas", "7000", "Hobart"),
    ("AU", "Act", "2600", "Canberra"),
];

/// Demo users as `(username, email)`. Their password hash is unusable; real
/// credentials live with the identity provider.
pub const USERS: &[(&str, &str)] = &[
    ("user1", "user1@example.com"),
    ("user2", "user2@example.com"),
];

/// Password hash stored for seeded users.
pub const UNUSABLE_PASSWORD_HASH: &str = "!";
