//! Static country-capital coordinate table.
//!
//! Connection metrics deliberately replace per-IP coordinates with the
//! capital of the resolved country, which bounds the coordinate label pair
//! by the number of countries. Codes absent from the table resolve to
//! `(0.0, 0.0)` rather than failing.

use once_cell::sync::Lazy;
use std::collections::HashMap;

static CAPITALS: Lazy<HashMap<&'static str, (f64, f64)>> = Lazy::new(|| {
    HashMap::from([
        // Americas
        ("US", (38.9072, -77.0369)),
        ("CA", (45.4215, -75.6972)),
        ("MX", (19.4326, -99.1332)),
        ("BR", (-15.7939, -47.8828)),
        ("AR", (-34.6037, -58.3816)),
        ("CL", (-33.4489, -70.6693)),
        ("CO", (4.7110, -74.0721)),
        ("PE", (-12.0464, -77.0428)),
        ("VE", (10.4806, -66.9036)),
        ("EC", (-0.1807, -78.4678)),
        ("BO", (-16.4897, -68.1193)),
        ("UY", (-34.9011, -56.1645)),
        ("PY", (-25.2637, -57.5759)),
        ("CU", (23.1136, -82.3666)),
        ("DO", (18.4861, -69.9312)),
        ("HT", (18.5944, -72.3074)),
        ("JM", (17.9714, -76.7920)),
        ("PA", (8.9824, -79.5199)),
        ("CR", (9.9281, -84.0907)),
        ("GT", (14.6349, -90.5069)),
        ("HN", (14.0723, -87.1921)),
        ("NI", (12.1150, -86.2362)),
        ("SV", (13.6929, -89.2182)),
        ("TT", (10.6918, -61.2225)),
        // Europe
        ("GB", (51.5074, -0.1278)),
        ("IE", (53.3498, -6.2603)),
        ("FR", (48.8566, 2.3522)),
        ("DE", (52.5200, 13.4050)),
        ("NL", (52.3676, 4.9041)),
        ("BE", (50.8503, 4.3517)),
        ("LU", (49.6116, 6.1319)),
        ("CH", (46.9480, 7.4474)),
        ("AT", (48.2082, 16.3738)),
        ("ES", (40.4168, -3.7038)),
        ("PT", (38.7223, -9.1393)),
        ("IT", (41.9028, 12.4964)),
        ("GR", (37.9838, 23.7275)),
        ("SE", (59.3293, 18.0686)),
        ("NO", (59.9139, 10.7522)),
        ("DK", (55.6761, 12.5683)),
        ("FI", (60.1699, 24.9384)),
        ("IS", (64.1466, -21.9426)),
        ("PL", (52.2297, 21.0122)),
        ("CZ", (50.0755, 14.4378)),
        ("SK", (48.1486, 17.1077)),
        ("HU", (47.4979, 19.0402)),
        ("RO", (44.4268, 26.1025)),
        ("BG", (42.6977, 23.3219)),
        ("RS", (44.7866, 20.4489)),
        ("HR", (45.8150, 15.9819)),
        ("SI", (46.0569, 14.5058)),
        ("BA", (43.8563, 18.4131)),
        ("MK", (41.9973, 21.4280)),
        ("AL", (41.3275, 19.8187)),
        ("ME", (42.4304, 19.2594)),
        ("UA", (50.4501, 30.5234)),
        ("BY", (53.9006, 27.5590)),
        ("RU", (55.7558, 37.6173)),
        ("EE", (59.4370, 24.7536)),
        ("LV", (56.9496, 24.1052)),
        ("LT", (54.6872, 25.2797)),
        ("MD", (47.0105, 28.8638)),
        // Asia & Oceania
        ("TR", (39.9334, 32.8597)),
        ("GE", (41.7151, 44.8271)),
        ("AM", (40.1792, 44.4991)),
        ("AZ", (40.4093, 49.8671)),
        ("KZ", (51.1694, 71.4491)),
        ("UZ", (41.2995, 69.2401)),
        ("TM", (37.9601, 58.3261)),
        ("KG", (42.8746, 74.5698)),
        ("TJ", (38.5598, 68.7870)),
        ("CN", (39.9042, 116.4074)),
        ("JP", (35.6762, 139.6503)),
        ("KR", (37.5665, 126.9780)),
        ("KP", (39.0392, 125.7625)),
        ("TW", (25.0330, 121.5654)),
        ("HK", (22.3193, 114.1694)),
        ("MN", (47.8864, 106.9057)),
        ("IN", (28.6139, 77.2090)),
        ("PK", (33.6844, 73.0479)),
        ("BD", (23.8103, 90.4125)),
        ("LK", (6.9271, 79.8612)),
        ("NP", (27.7172, 85.3240)),
        ("MM", (19.7633, 96.0785)),
        ("TH", (13.7563, 100.5018)),
        ("VN", (21.0278, 105.8342)),
        ("LA", (17.9757, 102.6331)),
        ("KH", (11.5564, 104.9282)),
        ("MY", (3.1390, 101.6869)),
        ("SG", (1.3521, 103.8198)),
        ("ID", (-6.2088, 106.8456)),
        ("PH", (14.5995, 120.9842)),
        ("AU", (-35.2809, 149.1300)),
        ("NZ", (-41.2866, 174.7756)),
        // Middle East
        ("IR", (35.6892, 51.3890)),
        ("IQ", (33.3152, 44.3661)),
        ("SA", (24.7136, 46.6753)),
        ("AE", (24.4539, 54.3773)),
        ("QA", (25.2854, 51.5310)),
        ("KW", (29.3759, 47.9774)),
        ("BH", (26.2285, 50.5860)),
        ("OM", (23.5880, 58.3829)),
        ("YE", (15.3694, 44.1910)),
        ("JO", (31.9454, 35.9284)),
        ("LB", (33.8938, 35.5018)),
        ("SY", (33.5138, 36.2765)),
        ("IL", (31.7683, 35.2137)),
        // Africa
        ("EG", (30.0444, 31.2357)),
        ("LY", (32.8872, 13.1913)),
        ("TN", (36.8065, 10.1815)),
        ("DZ", (36.7538, 3.0588)),
        ("MA", (34.0209, -6.8416)),
        ("SN", (14.7167, -17.4677)),
        ("CI", (6.8276, -5.2893)),
        ("GH", (5.6037, -0.1870)),
        ("NG", (9.0765, 7.3986)),
        ("CM", (3.8480, 11.5021)),
        ("CD", (-4.4419, 15.2663)),
        ("AO", (-8.8390, 13.2894)),
        ("ET", (9.0250, 38.7469)),
        ("KE", (-1.2921, 36.8219)),
        ("TZ", (-6.1630, 35.7516)),
        ("UG", (0.3476, 32.5825)),
        ("RW", (-1.9441, 30.0619)),
        ("ZM", (-15.3875, 28.3228)),
        ("ZW", (-17.8252, 31.0335)),
        ("MZ", (-25.9692, 32.5732)),
        ("BW", (-24.6282, 25.9231)),
        ("NA", (-22.5609, 17.0658)),
        ("ZA", (-25.7479, 28.2293)),
        ("MG", (-18.8792, 47.5079)),
    ])
});

/// Capital `(latitude, longitude)` for an ISO country code, `(0.0, 0.0)` if
/// the code is unknown.
pub fn capital_coordinates(country: &str) -> (f64, f64) {
    CAPITALS.get(country).copied().unwrap_or((0.0, 0.0))
}
