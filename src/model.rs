use serde::{Deserialize, Serialize};

/// One conference row from a year section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceRecord {
    pub year: i32,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub is_hybrid: bool,
    pub cfp_status: Option<String>,
    pub cfp_link: Option<String>,
    pub link: Option<String>,
    pub country: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case_with_nulls() {
        let record = ConferenceRecord {
            year: 2025,
            name: "JavaZone".into(),
            location: "Oslo, Norway".into(),
            is_hybrid: false,
            cfp_status: None,
            cfp_link: None,
            link: Some("https://javazone.no".into()),
            country: Some("Norway".into()),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["isHybrid"], false);
        assert_eq!(json["cfpStatus"], serde_json::Value::Null);
        assert_eq!(json["link"], "https://javazone.no");
        assert_eq!(json["country"], "Norway");
    }
}
