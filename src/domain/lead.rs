use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serialize};

/// One business entry returned by the places search.
///
/// Records are never edited after they are fetched; a lead set is only ever
/// replaced or cleared as a whole.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Lead {
    #[serde(default, deserialize_with = "text_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub reviews: Option<u64>,
}

impl Lead {
    /// Returns `true` when the lead carries a non-empty website.
    pub fn has_website(&self) -> bool {
        self.website.as_deref().is_some_and(|w| !w.is_empty())
    }

    /// Returns `true` when the lead carries a non-empty phone number.
    pub fn has_phone(&self) -> bool {
        self.phone.as_deref().is_some_and(|p| !p.is_empty())
    }

    /// Review count used for ordering; missing counts rank as zero.
    pub fn review_count(&self) -> u64 {
        self.reviews.unwrap_or(0)
    }

    /// Rating used for ordering; missing ratings rank as zero.
    pub fn rating_value(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    fn into_f64(self) -> Option<f64> {
        let value = match self {
            NumberOrText::Number(n) => n,
            NumberOrText::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `4.5`, `"4.5"` or `null`; anything non-numeric becomes `None`.
fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrText>::deserialize(deserializer).unwrap_or(None);
    Ok(raw.and_then(NumberOrText::into_f64))
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrText>::deserialize(deserializer).unwrap_or(None);
    Ok(raw
        .and_then(NumberOrText::into_f64)
        .filter(|n| *n >= 0.0)
        .map(|n| n as u64))
}

/// Fields a lead table can be ordered by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadField {
    Name,
    Address,
    Phone,
    Website,
    Rating,
    Reviews,
}

impl LeadField {
    pub const ALL: [LeadField; 6] = [
        LeadField::Name,
        LeadField::Address,
        LeadField::Phone,
        LeadField::Website,
        LeadField::Rating,
        LeadField::Reviews,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LeadField::Name => "name",
            LeadField::Address => "address",
            LeadField::Phone => "phone",
            LeadField::Website => "website",
            LeadField::Rating => "rating",
            LeadField::Reviews => "reviews",
        }
    }
}

impl Lead {
    /// Text representation of a field; missing values render as "".
    pub fn field_text(&self, field: LeadField) -> Cow<'_, str> {
        match field {
            LeadField::Name => Cow::Borrowed(&self.name),
            LeadField::Address => Cow::Borrowed(&self.address),
            LeadField::Phone => Cow::Borrowed(self.phone.as_deref().unwrap_or_default()),
            LeadField::Website => Cow::Borrowed(self.website.as_deref().unwrap_or_default()),
            LeadField::Rating => self
                .rating
                .map(|r| Cow::Owned(r.to_string()))
                .unwrap_or_default(),
            LeadField::Reviews => self
                .reviews
                .map(|r| Cow::Owned(r.to_string()))
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_numeric_strings_and_nulls() {
        let leads: Vec<Lead> = serde_json::from_value(json!([
            {"name": "A", "website": "w", "phone": null, "rating": "4.5", "reviews": "10"},
            {"name": "B", "website": null, "phone": "0811", "rating": 3.0, "reviews": 50},
        ]))
        .unwrap();

        assert_eq!(leads[0].rating, Some(4.5));
        assert_eq!(leads[0].reviews, Some(10));
        assert_eq!(leads[0].phone, None);
        assert_eq!(leads[1].rating, Some(3.0));
        assert_eq!(leads[1].reviews, Some(50));
        assert_eq!(leads[1].address, "");
    }

    #[test]
    fn non_numeric_values_are_treated_as_missing() {
        let lead: Lead = serde_json::from_value(json!({
            "name": null,
            "rating": "n/a",
            "reviews": -3,
        }))
        .unwrap();

        assert_eq!(lead.name, "");
        assert_eq!(lead.rating, None);
        assert_eq!(lead.reviews, None);
        assert_eq!(lead.review_count(), 0);
        assert_eq!(lead.rating_value(), 0.0);
    }

    #[test]
    fn empty_contact_fields_do_not_count_as_present() {
        let lead = Lead {
            phone: Some(String::new()),
            website: Some("https://example.com".into()),
            ..Lead::default()
        };
        assert!(!lead.has_phone());
        assert!(lead.has_website());
    }

    #[test]
    fn field_text_renders_missing_values_as_empty() {
        let lead = Lead {
            rating: Some(4.0),
            ..Lead::default()
        };
        assert_eq!(lead.field_text(LeadField::Phone), "");
        assert_eq!(lead.field_text(LeadField::Rating), "4");
        assert_eq!(lead.field_text(LeadField::Reviews), "");
    }
}
