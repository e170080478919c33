use serde::{Deserialize, Serialize};

/// A stored popup configuration.
///
/// Wire field names follow the original JSON contract (camelCase). `uuid` is
/// the canonical external handle; `id` is the store-assigned rowid and is
/// only surfaced read-only in GET payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopupConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub uuid: String,
    pub heading: String,
    #[serde(rename = "bodyText")]
    pub body_text: String,
    #[serde(rename = "footerText")]
    pub footer_text: String,
    /// Raw base64 PNG, without a `data:` URL prefix.
    #[serde(rename = "previewImage")]
    pub preview_image: String,
    pub frequency: Frequency,
    /// Interval in minutes. Only meaningful when `frequency` is `repeatedly`.
    #[serde(
        rename = "timeFrequency",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub time_frequency: Option<u32>,
    /// Only meaningful when `frequency` is `onday`.
    #[serde(rename = "onDay", default, skip_serializing_if = "Option::is_none")]
    pub on_day: Option<Weekday>,
    /// Partitions records into "active" (shown) and "recent" (retained).
    #[serde(rename = "isActive")]
    pub is_active: bool,
}

/// Display frequency policy. Captured and stored; never interpreted here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Once,
    OnReload,
    UntilClicked,
    OnDay,
    Repeatedly,
}

impl Frequency {
    pub const ALL: [Frequency; 5] = [
        Frequency::Once,
        Frequency::OnReload,
        Frequency::UntilClicked,
        Frequency::OnDay,
        Frequency::Repeatedly,
    ];

    /// Wire/database representation, identical to the serde name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Once => "once",
            Frequency::OnReload => "onreload",
            Frequency::UntilClicked => "untilclicked",
            Frequency::OnDay => "onday",
            Frequency::Repeatedly => "repeatedly",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == raw)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Once => "Once",
            Frequency::OnReload => "On Reload",
            Frequency::UntilClicked => "Until Clicked",
            Frequency::OnDay => "On Day",
            Frequency::Repeatedly => "Repeatedly",
        }
    }
}

impl Default for Frequency {
    fn default() -> Self {
        Frequency::Once
    }
}

/// Day of week for the `onday` frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Sunday => "sunday",
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == raw)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Weekday::Sunday => "Sunday",
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }
}

impl Default for Weekday {
    fn default() -> Self {
        Weekday::Sunday
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_wire_names_match_contract() {
        for freq in Frequency::ALL {
            let json = serde_json::to_string(&freq).unwrap();
            assert_eq!(json, format!("\"{}\"", freq.as_str()));
            let back: Frequency = serde_json::from_str(&json).unwrap();
            assert_eq!(back, freq);
            assert_eq!(Frequency::parse(freq.as_str()), Some(freq));
        }
        assert_eq!(Frequency::parse("onreload"), Some(Frequency::OnReload));
        assert_eq!(Frequency::parse("weekly"), None);
    }

    #[test]
    fn weekday_wire_names_match_contract() {
        for day in Weekday::ALL {
            let json = serde_json::to_string(&day).unwrap();
            assert_eq!(json, format!("\"{}\"", day.as_str()));
            assert_eq!(Weekday::parse(day.as_str()), Some(day));
        }
    }

    #[test]
    fn popup_config_uses_camel_case_field_names() {
        let popup = PopupConfig {
            id: Some(7),
            uuid: "abc".into(),
            heading: "h".into(),
            body_text: "b".into(),
            footer_text: "f".into(),
            preview_image: "aGk=".into(),
            frequency: Frequency::Repeatedly,
            time_frequency: Some(15),
            on_day: None,
            is_active: true,
        };
        let json: serde_json::Value = serde_json::to_value(&popup).unwrap();
        assert_eq!(json["bodyText"], "b");
        assert_eq!(json["footerText"], "f");
        assert_eq!(json["previewImage"], "aGk=");
        assert_eq!(json["timeFrequency"], 15);
        assert_eq!(json["isActive"], true);
        assert_eq!(json["frequency"], "repeatedly");
        assert!(json.get("onDay").is_none());
    }

    #[test]
    fn popup_config_accepts_payload_without_id() {
        let raw = r#"{
            "uuid": "u-1",
            "heading": "Sale",
            "bodyText": "Half off",
            "footerText": "Today only",
            "previewImage": "xyz",
            "frequency": "onday",
            "onDay": "friday",
            "isActive": false
        }"#;
        let popup: PopupConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(popup.id, None);
        assert_eq!(popup.frequency, Frequency::OnDay);
        assert_eq!(popup.on_day, Some(Weekday::Friday));
        assert_eq!(popup.time_frequency, None);
        assert!(!popup.is_active);
    }
}
