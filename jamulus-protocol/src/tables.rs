//! Display-only lookup tables for the `country_id`, `instrument`, `skill`,
//! and `os` enumerations carried in several message schemas.
//!
//! These ids are never validated on decode — an unrecognized id is simply a
//! country, instrument, or OS this table doesn't know the name of yet, not
//! a malformed message.

/// Index-addressable name, one slot per id starting at 0.
pub fn country_name(id: u16) -> &'static str {
    COUNTRY_NAMES.get(id as usize).copied().unwrap_or("?")
}

pub fn instrument_name(id: u32) -> &'static str {
    INSTRUMENT_NAMES.get(id as usize).copied().unwrap_or("?")
}

pub fn skill_name(id: u8) -> &'static str {
    SKILL_NAMES.get(id as usize).copied().unwrap_or("?")
}

pub fn os_name(id: u8) -> &'static str {
    OS_NAMES.get(id as usize).copied().unwrap_or("?")
}

pub const SKILL_NAMES: &[&str] = &["-", "Beginner", "Intermediate", "Expert"];

pub const OS_NAMES: &[&str] = &["Windows", "MacOS", "Linux", "Android", "iOS", "Unix"];

pub const INSTRUMENT_NAMES: &[&str] = &[
    "-",
    "Drums",
    "Djembe",
    "Electric Guitar",
    "Acoustic Guitar",
    "Bass Guitar",
    "Keyboard",
    "Synthesizer",
    "Grand Piano",
    "Accordion",
    "Vocal",
    "Microphone",
    "Harmonica",
    "Trumpet",
    "Trombone",
    "French Horn",
    "Tuba",
    "Saxophone",
    "Clarinet",
    "Flute",
    "Violin",
    "Cello",
    "Double Bass",
    "Recorder",
    "Streamer",
    "Listener",
    "Guitar Vocal",
    "Keyboard Vocal",
    "Bodhran",
    "Bassoon",
    "Oboe",
    "Harp",
    "Viola",
    "Congas",
    "Bongo",
    "Vocal Bass",
    "Vocal Tenor",
    "Vocal Alto",
    "Vocal Soprano",
    "Banjo",
    "Mandolin",
    "Ukulele",
    "Bass Ukulele",
    "Vocal Baritone",
    "Vocal Lead",
    "Mountain Dulcimer",
    "Scratching",
    "Rapping",
];

pub const COUNTRY_NAMES: &[&str] = &[
    "-",
    "Afghanistan",
    "Albania",
    "Algeria",
    "American Samoa",
    "Andorra",
    "Angola",
    "Anguilla",
    "Antarctica",
    "Antigua And Barbuda",
    "Argentina",
    "Armenia",
    "Aruba",
    "Australia",
    "Austria",
    "Azerbaijan",
    "Bahamas",
    "Bahrain",
    "Bangladesh",
    "Barbados",
    "Belarus",
    "Belgium",
    "Belize",
    "Benin",
    "Bermuda",
    "Bhutan",
    "Bolivia",
    "Bosnia And Herzegowina",
    "Botswana",
    "Bouvet Island",
    "Brazil",
    "British Indian Ocean Territory",
    "Brunei",
    "Bulgaria",
    "Burkina Faso",
    "Burundi",
    "Cambodia",
    "Cameroon",
    "Canada",
    "Cape Verde",
    "Cayman Islands",
    "Central African Republic",
    "Chad",
    "Chile",
    "China",
    "Christmas Island",
    "Cocos Islands",
    "Colombia",
    "Comoros",
    "Congo Kinshasa",
    "Congo Brazzaville",
    "Cook Islands",
    "Costa Rica",
    "Ivory Coast",
    "Croatia",
    "Cuba",
    "Cyprus",
    "Czech Republic",
    "Denmark",
    "Djibouti",
    "Dominica",
    "Dominican Republic",
    "East Timor",
    "Ecuador",
    "Egypt",
    "El Salvador",
    "Equatorial Guinea",
    "Eritrea",
    "Estonia",
    "Ethiopia",
    "Falkland Islands",
    "Faroe Islands",
    "Fiji",
    "Finland",
    "France",
    "Guernsey",
    "French Guiana",
    "French Polynesia",
    "French Southern Territories",
    "Gabon",
    "Gambia",
    "Georgia",
    "Germany",
    "Ghana",
    "Gibraltar",
    "Greece",
    "Greenland",
    "Grenada",
    "Guadeloupe",
    "Guam",
    "Guatemala",
    "Guinea",
    "Guinea Bissau",
    "Guyana",
    "Haiti",
    "Heard And McDonald Islands",
    "Honduras",
    "Hong Kong",
    "Hungary",
    "Iceland",
    "India",
    "Indonesia",
    "Iran",
    "Iraq",
    "Ireland",
    "Israel",
    "Italy",
    "Jamaica",
    "Japan",
    "Jordan",
    "Kazakhstan",
    "Kenya",
    "Kiribati",
    "North Korea",
    "South Korea",
    "Kuwait",
    "Kyrgyzstan",
    "Laos",
    "Latvia",
    "Lebanon",
    "Lesotho",
    "Liberia",
    "Libya",
    "Liechtenstein",
    "Lithuania",
    "Luxembourg",
    "Macau",
    "Macedonia",
    "Madagascar",
    "Malawi",
    "Malaysia",
    "Maldives",
    "Mali",
    "Malta",
    "Marshall Islands",
    "Martinique",
    "Mauritania",
    "Mauritius",
    "Mayotte",
    "Mexico",
    "Micronesia",
    "Moldova",
    "Monaco",
    "Mongolia",
    "Montserrat",
    "Morocco",
    "Mozambique",
    "Myanmar",
    "Namibia",
    "Nauru Country",
    "Nepal",
    "Netherlands",
    "Cura Sao",
    "New Caledonia",
    "New Zealand",
    "Nicaragua",
    "Niger",
    "Nigeria",
    "Niue",
    "Norfolk Island",
    "Northern Mariana Islands",
    "Norway",
    "Oman",
    "Pakistan",
    "Palau",
    "Palestinian Territories",
    "Panama",
    "Papua New Guinea",
    "Paraguay",
    "Peru",
    "Philippines",
    "Pitcairn",
    "Poland",
    "Portugal",
    "Puerto Rico",
    "Qatar",
    "Reunion",
    "Romania",
    "Russia",
    "Rwanda",
    "Saint Kitts And Nevis",
    "Saint Lucia",
    "Saint Vincent And The Grenadines",
    "Samoa",
    "San Marino",
    "Sao Tome And Principe",
    "Saudi Arabia",
    "Senegal",
    "Seychelles",
    "Sierra Leone",
    "Singapore",
    "Slovakia",
    "Slovenia",
    "Solomon Islands",
    "Somalia",
    "South Africa",
    "South Georgia And The South Sandwich Islands",
    "Spain",
    "Sri Lanka",
    "Saint Helena",
    "Saint Pierre And Miquelon",
    "Sudan",
    "Suriname",
    "Svalbard And Jan Mayen Islands",
    "Swaziland",
    "Sweden",
    "Switzerland",
    "Syria",
    "Taiwan",
    "Tajikistan",
    "Tanzania",
    "Thailand",
    "Togo",
    "Tokelau Country",
    "Tonga",
    "Trinidad And Tobago",
    "Tunisia",
    "Turkey",
    "Turkmenistan",
    "Turks And Caicos Islands",
    "Tuvalu Country",
    "Uganda",
    "Ukraine",
    "United Arab Emirates",
    "United Kingdom",
    "United States",
    "United States Minor Outlying Islands",
    "Uruguay",
    "Uzbekistan",
    "Vanuatu",
    "Vatican City State",
    "Venezuela",
    "Vietnam",
    "British Virgin Islands",
    "United States Virgin Islands",
    "Wallis And Futuna Islands",
    "Western Sahara",
    "Yemen",
    "Canary Islands",
    "Zambia",
    "Zimbabwe",
    "Clipperton Island",
    "Montenegro",
    "Serbia",
    "Saint Barthelemy",
    "Saint Martin",
    "Latin America",
    "Ascension Island",
    "Aland Islands",
    "Diego Garcia",
    "Ceuta And Melilla",
    "Isle Of Man",
    "Jersey",
    "Tristan Da Cunha",
    "South Sudan",
    "Bonaire",
    "Sint Maarten",
    "Kosovo",
    "European Union",
    "Outlying Oceania",
    "World",
    "Europe",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_match_known_entries() {
        assert_eq!(country_name(0), "-");
        assert_eq!(country_name(82), "Germany");
        assert_eq!(country_name(261), "Europe");
        assert_eq!(instrument_name(1), "Drums");
        assert_eq!(skill_name(3), "Expert");
        assert_eq!(os_name(2), "Linux");
    }

    #[test]
    fn out_of_range_ids_fall_back() {
        assert_eq!(country_name(9999), "?");
        assert_eq!(instrument_name(9999), "?");
        assert_eq!(skill_name(200), "?");
        assert_eq!(os_name(200), "?");
    }
}
