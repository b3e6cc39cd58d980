//! Geofencing for event submissions.
//!
//! The service region is the Scottish Highlands and Islands, described by
//! postcode-area rules plus a coarse polygon fallback for locations that
//! carry coordinates but no postcode (e.g. a landmark picked from a map).
//!
//! Both checks are pure and fail closed: anything unparseable is outside
//! the region.

use serde::Deserialize;

/// Inclusive range of postcode district numbers within an area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DistrictRange {
    pub from: u16,
    pub to: u16,
}

/// A postcode area that is only partly inside the region, qualified by the
/// district ranges that are in.
#[derive(Debug, Clone, Deserialize)]
pub struct PartialArea {
    pub prefix: String,
    pub districts: Vec<DistrictRange>,
}

/// Static region boundary, loaded once and immutable at runtime.
///
/// `Default` carries the Highlands & Islands ruleset; deployments can
/// override it from TOML if the service region ever changes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegionRules {
    /// Postcode areas entirely inside the region.
    pub full_areas: Vec<String>,
    /// Postcode areas partly inside, with qualifying district ranges.
    pub partial_areas: Vec<PartialArea>,
    /// Polygon approximating the region, as (lat, lng) vertices.
    pub boundary: Vec<(f64, f64)>,
}

impl Default for RegionRules {
    fn default() -> Self {
        RegionRules {
            full_areas: vec!["IV", "HS", "KW", "ZE"]
                .into_iter()
                .map(String::from)
                .collect(),
            partial_areas: vec![
                // Highland Perthshire, Badenoch, Lochaber
                partial("PH", &[(19, 26), (30, 44), (49, 50)]),
                // Argyll and the southern Hebrides
                partial("PA", &[(20, 38), (41, 49), (60, 78)]),
                // Strathspey side of the AB area
                partial("AB", &[(37, 38)]),
                // Arran
                partial("KA", &[(27, 28)]),
            ],
            boundary: vec![
                (57.0, -8.2),  // Atlantic, west of the Uists
                (58.8, -8.0),  // northwest of Lewis
                (59.6, -4.0),  // north of the Pentland Firth
                (61.1, -1.5),  // north of Unst
                (60.3, -0.5),  // east of Shetland
                (58.9, -2.2),  // east of Orkney
                (57.7, -2.9),  // Moray coast east of Elgin
                (56.9, -3.1),  // eastern Cairngorms
                (56.3, -3.9),  // south of Rannoch
                (55.9, -4.6),  // north of the Clyde
                (55.2, -5.0),  // south of Arran
                (55.1, -6.1),  // south of Kintyre and Islay
                (55.8, -7.4),  // Atlantic, southwest of Tiree
            ],
        }
    }
}

fn partial(prefix: &str, ranges: &[(u16, u16)]) -> PartialArea {
    PartialArea {
        prefix: prefix.to_string(),
        districts: ranges
            .iter()
            .map(|&(from, to)| DistrictRange { from, to })
            .collect(),
    }
}

impl RegionRules {
    /// Whether a postcode lies inside the service region.
    ///
    /// Accepts full postcodes ("IV1 1AA", with or without the space) and
    /// bare outward codes ("PH22"). Malformed input returns false.
    pub fn is_in_region(&self, postcode: &str) -> bool {
        let Some((prefix, district)) = parse_outward_code(postcode) else {
            return false;
        };

        if self.full_areas.iter().any(|a| *a == prefix) {
            return true;
        }

        self.partial_areas
            .iter()
            .filter(|area| area.prefix == prefix)
            .flat_map(|area| &area.districts)
            .any(|r| district >= r.from && district <= r.to)
    }

    /// Whether a coordinate pair lies inside the region polygon.
    ///
    /// Fallback for locations without a postcode; the polygon is a coarse
    /// approximation, so postcode rules win whenever a postcode exists.
    pub fn is_point_in_region(&self, lat: f64, lng: f64) -> bool {
        point_in_polygon(lat, lng, &self.boundary)
    }
}

/// Extract (area prefix, district number) from a postcode.
///
/// The outward code is everything before the inward code (always one digit
/// plus two letters). Without a space the split is positional, so "IV11AA"
/// parses the same as "IV1 1AA".
fn parse_outward_code(postcode: &str) -> Option<(String, u16)> {
    let normalized: String = postcode
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if !normalized.is_ascii() {
        return None;
    }

    let had_space = postcode.trim().chars().any(|c| c.is_whitespace());
    let outward = if had_space {
        postcode
            .trim()
            .split_whitespace()
            .next()?
            .to_ascii_uppercase()
    } else if normalized.len() > 4 {
        normalized[..normalized.len() - 3].to_string()
    } else {
        normalized
    };

    let prefix: String = outward
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    if prefix.is_empty() || prefix.len() > 2 {
        return None;
    }

    let digits: String = outward
        .chars()
        .skip(prefix.len())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }

    let district: u16 = digits.parse().ok()?;
    Some((prefix, district))
}

/// Standard ray-casting point-in-polygon test over (lat, lng) vertices.
fn point_in_polygon(lat: f64, lng: f64, polygon: &[(f64, f64)]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (lat_i, lng_i) = polygon[i];
        let (lat_j, lng_j) = polygon[j];
        if (lat_i > lat) != (lat_j > lat)
            && lng < (lng_j - lng_i) * (lat - lat_i) / (lat_j - lat_i) + lng_i
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}
