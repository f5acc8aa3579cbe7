use serde::{Deserialize, Serialize};

use crate::domain::types::LocationName;

/// Names of the administrative regions a search was scoped to.
///
/// City is the only mandatory level; the rest narrow or widen the scope.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Location {
    pub province: Option<LocationName>,
    pub city: LocationName,
    pub district: Option<LocationName>,
    pub village: Option<LocationName>,
}

impl Location {
    pub fn new(city: LocationName) -> Self {
        Self {
            province: None,
            city,
            district: None,
            village: None,
        }
    }

    pub fn province(mut self, province: LocationName) -> Self {
        self.province = Some(province);
        self
    }

    pub fn district(mut self, district: LocationName) -> Self {
        self.district = Some(district);
        self
    }

    pub fn village(mut self, village: LocationName) -> Self {
        self.village = Some(village);
        self
    }

    /// Region names from the most specific to the widest one.
    pub fn describe(&self) -> String {
        [
            self.village.as_ref(),
            self.district.as_ref(),
            Some(&self.city),
            self.province.as_ref(),
        ]
        .into_iter()
        .flatten()
        .map(LocationName::as_str)
        .collect::<Vec<_>>()
        .join(", ")
    }

    /// Parts used when naming exported files: city, then district and village.
    pub fn file_parts(&self) -> Vec<&str> {
        [Some(&self.city), self.district.as_ref(), self.village.as_ref()]
            .into_iter()
            .flatten()
            .map(LocationName::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(value: &str) -> LocationName {
        LocationName::new(value).unwrap()
    }

    #[test]
    fn describe_lists_regions_from_narrowest() {
        let location = Location::new(name("Kota Jakarta Selatan"))
            .province(name("DKI Jakarta"))
            .district(name("Kebayoran Baru"));

        assert_eq!(
            location.describe(),
            "Kebayoran Baru, Kota Jakarta Selatan, DKI Jakarta"
        );
    }

    #[test]
    fn file_parts_skip_province() {
        let location = Location::new(name("Bandung"))
            .province(name("Jawa Barat"))
            .village(name("Dago"));

        assert_eq!(location.file_parts(), vec!["Bandung", "Dago"]);
    }
}
