//! # Catalog
//!
//! Fixed vocabularies: the venue list and the dish lists offered by the
//! constrained-select menu variant.

/// Function halls the business works with.
///
/// Entries are kept exactly as the operators maintain them (including the
/// odd trailing space); lookups trim.
pub const VENUES: [&str; 19] = [
    "A1 Convention",
    "Kaveri Grand",
    "Mourya Grand",
    "Mourya Inn",
    "P.A.G Convention Center",
    "Golden venue Function Hall Guntur Road ",
    "V Grand Vedika",
    "M H R Function Hall",
    "Dr. B.R. Ambedkar Function Hall",
    "SVS Functionalhall A/C",
    "Padmavathi Function Hall",
    "Ramanuja kutam",
    "Sai ITA Convention",
    "Mahalakshmi Function Hall",
    "SGVS Convention",
    "Sri Balaji Tirupathirao Function Hall",
    "VISHNUPRIYA CONVENTION CENTRE",
    "S convention",
    "Arya Vysya Kalyana Mandapam",
];

pub const VEG_SWEETS: &[&str] = &[
    "Gulab Jamun",
    "Rasgulla",
    "Jalebi",
    "Kaju Katli",
    "Bread Halwa",
    "Motichoor Laddu",
    "Mysore Pak",
    "Badam Burfi",
    "Double Ka Meetha",
    "Kheer",
];

pub const VEG_HOT_ITEMS: &[&str] = &[
    "Samosa",
    "Cutlet",
    "Mirchi Bajji",
    "Pakodi",
    "Onion Bhaji",
    "Aloo Tikki",
    "Paneer Pakora",
    "Spring Roll",
    "Bread Pakora",
];

pub const VEG_PAPPU: &[&str] = &[
    "Dosakay Pappu",
    "Akukura Pappu",
    "Tomato Pappu",
    "Palakura Pappu",
    "Mixed Dal",
];

pub const VEG_CURRY: &[&str] = &[
    "Tomato",
    "Munakay",
    "Guthu Vankay",
    "vakay tomato",
    "Paneer Butter Masala",
    "Aloo Gobi",
    "Mixed Veg",
    "Malai Kofta",
    "Palak Paneer",
    "Kadai Paneer",
    "Mushroom Masala",
    "Bhindi Masala",
    "Bagara Baingan",
];

pub const VEG_FRY: &[&str] = &[
    "Aloo Fry",
    "Cabbage Fry",
    "Beans Fry",
    "Bhindi Fry",
    "Capsicum Fry",
    "Karela Fry",
    "Potato Chips",
    "Brinjal Fry",
];

pub const VEG_PICKLES: &[&str] = &[
    "Mango Avakaya",
    "Lemon",
    "Tomato",
    "Gongura",
    "Ginger",
    "Mixed Veg",
];

pub const ICE_CREAM_FLAVORS: &[&str] = &[
    "Vanilla",
    "Chocolate",
    "Strawberry",
    "Butterscotch",
    "Mango",
    "Kesar Pista",
    "Black Currant",
    "Mix Fruit",
];

pub const NON_VEG_STARTERS: &[&str] = &[
    "Chicken 65",
    "Chicken Lollipop",
    "Chicken Manchurian",
    "Fish Fry",
    "Prawns Fry",
    "Mutton Fry",
    "Pepper Chicken",
    "Crispy Chicken",
    "Apollo Fish",
];

pub const NON_VEG_GRAVY: &[&str] = &[
    "Chicken Curry",
    "Mutton Curry",
    "Butter Chicken",
    "Chicken Masala",
    "Mutton Roganjosh",
    "Fish Curry",
    "Prawns Curry",
    "Hyderabadi Chicken",
    "Kadai Chicken",
];

pub const NON_VEG_FRY: &[&str] = &[
    "Chicken Fry",
    "Mutton Fry",
    "Fish Fry",
    "Prawns Fry",
    "Liver Fry",
    "Gongura Chicken",
    "Chilli Chicken",
];

pub const NON_VEG_BIRYANI: &[&str] = &[
    "Chicken Dum Biryani",
    "Mutton Dum Biryani",
    "Egg Biryani",
    "Prawns Biryani",
    "Special Mixed Biryani",
];

/// Returns true when `value` is in `vocabulary` (trimmed, case-insensitive).
pub fn contains(vocabulary: &[&str], value: &str) -> bool {
    let value = value.trim();
    vocabulary
        .iter()
        .any(|entry| entry.trim().eq_ignore_ascii_case(value))
}
