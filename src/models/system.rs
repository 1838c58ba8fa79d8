use serde::{Deserialize, Serialize};

use crate::utils::format_count;

/// A public water system from the SDWIS inventory.
///
/// Everything beyond the PWSID is optional; the source data has plenty of
/// gaps, especially in the contact columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterSystem {
    pub pwsid: String,
    pub pws_name: Option<String>,
    pub population_served_count: Option<i64>,
    pub city_name: Option<String>,
    pub state_code: Option<String>,
    pub zip_code: Option<String>,
    pub admin_name: Option<String>,
    pub email_addr: Option<String>,
    pub phone_number: Option<String>,
    pub org_name: Option<String>,
    pub alt_phone_number: Option<String>,
    pub fax_number: Option<String>,
}

impl WaterSystem {
    /// System name, falling back to the PWSID when unnamed
    pub fn display_name(&self) -> &str {
        self.pws_name.as_deref().unwrap_or(&self.pwsid)
    }

    /// One-line "City, ST zip" built from whichever parts are present
    pub fn location_line(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(ref city) = self.city_name {
            parts.push(city.clone());
        }
        let state_zip = match (self.state_code.as_deref(), self.zip_code.as_deref()) {
            (Some(state), Some(zip)) => format!("{} {}", state, zip),
            (Some(state), None) => state.to_string(),
            (None, Some(zip)) => zip.to_string(),
            (None, None) => String::new(),
        };
        if !state_zip.is_empty() {
            parts.push(state_zip);
        }
        if parts.is_empty() {
            "Unknown".to_string()
        } else {
            parts.join(", ")
        }
    }

    pub fn display_population(&self) -> String {
        match self.population_served_count {
            Some(count) => format!("{} people served", format_count(count)),
            None => "Unknown".to_string(),
        }
    }
}

/// Advisory drinking water status for a system.
///
/// The API reports "not safe" while any health-based violation has an open
/// compliance period, "safe" otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SafetyStatus {
    #[serde(rename = "safe")]
    Safe,
    #[serde(rename = "not safe")]
    NotSafe,
}

impl SafetyStatus {
    /// Headline text for report output
    pub fn banner(&self) -> &'static str {
        match self {
            SafetyStatus::Safe => "Safe to Drink",
            SafetyStatus::NotSafe => "Not Safe to Drink",
        }
    }

    /// Short marker for listing rows
    pub fn marker(&self) -> &'static str {
        match self {
            SafetyStatus::Safe => "ok",
            SafetyStatus::NotSafe => "VIOLATION",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system(pwsid: &str) -> WaterSystem {
        WaterSystem {
            pwsid: pwsid.to_string(),
            pws_name: None,
            population_served_count: None,
            city_name: None,
            state_code: None,
            zip_code: None,
            admin_name: None,
            email_addr: None,
            phone_number: None,
            org_name: None,
            alt_phone_number: None,
            fax_number: None,
        }
    }

    #[test]
    fn test_parse_system_response() {
        let json = r#"{"pwsid": "GA0670000", "pws_name": "ATLANTA", "population_served_count": 1216900, "city_name": "ATLANTA", "state_code": "GA", "zip_code": "30335", "admin_name": null, "email_addr": null, "phone_number": "4045461032", "org_name": "CITY OF ATLANTA", "alt_phone_number": null, "fax_number": null}"#;

        let system: WaterSystem = serde_json::from_str(json)
            .expect("Failed to parse water system test JSON");
        assert_eq!(system.pwsid, "GA0670000");
        assert_eq!(system.display_name(), "ATLANTA");
        assert_eq!(system.location_line(), "ATLANTA, GA 30335");
        assert_eq!(system.display_population(), "1,216,900 people served");
    }

    #[test]
    fn test_display_name_falls_back_to_pwsid() {
        let system = system("GA1234567");
        assert_eq!(system.display_name(), "GA1234567");
    }

    #[test]
    fn test_location_line_with_partial_fields() {
        let mut s = system("GA1234567");
        assert_eq!(s.location_line(), "Unknown");

        s.city_name = Some("MACON".to_string());
        assert_eq!(s.location_line(), "MACON");

        s.zip_code = Some("31201".to_string());
        assert_eq!(s.location_line(), "MACON, 31201");

        s.state_code = Some("GA".to_string());
        assert_eq!(s.location_line(), "MACON, GA 31201");
    }

    #[test]
    fn test_safety_status_wire_format() {
        let safe: SafetyStatus = serde_json::from_str(r#""safe""#).unwrap();
        assert_eq!(safe, SafetyStatus::Safe);
        assert_eq!(safe.banner(), "Safe to Drink");

        let not_safe: SafetyStatus = serde_json::from_str(r#""not safe""#).unwrap();
        assert_eq!(not_safe, SafetyStatus::NotSafe);
        assert_eq!(not_safe.banner(), "Not Safe to Drink");
    }
}
