use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A drinking water violation record.
///
/// Compliance period dates arrive as ISO `YYYY-MM-DD`; a missing end date
/// means the violation is still open.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    pub violation_id: String,
    pub pwsid: String,
    pub violation_code: Option<String>,
    pub is_health_based_ind: Option<String>,
    pub contaminant_code: Option<String>,
    pub non_compl_per_begin_date: Option<NaiveDate>,
    pub non_compl_per_end_date: Option<NaiveDate>,
    pub violation_status: Option<String>,
}

impl Violation {
    /// "Y" marks a health-based violation in the SDWIS export
    pub fn is_health_based(&self) -> bool {
        self.is_health_based_ind.as_deref() == Some("Y")
    }

    /// Open compliance period, no recorded end date
    pub fn is_active(&self) -> bool {
        self.non_compl_per_end_date.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_violation_response() {
        let json = r#"{"violation_id": "9000341", "pwsid": "GA0670000", "violation_code": "03", "is_health_based_ind": "Y", "contaminant_code": "5000", "non_compl_per_begin_date": "2019-05-01", "non_compl_per_end_date": null, "violation_status": "Unaddressed"}"#;

        let violation: Violation = serde_json::from_str(json)
            .expect("Failed to parse violation test JSON");
        assert_eq!(violation.violation_id, "9000341");
        assert!(violation.is_health_based());
        assert!(violation.is_active());
        assert_eq!(
            violation.non_compl_per_begin_date,
            NaiveDate::from_ymd_opt(2019, 5, 1)
        );
    }

    #[test]
    fn test_resolved_violation_is_not_active() {
        let json = r#"{"violation_id": "9000342", "pwsid": "GA0670000", "violation_code": "27", "is_health_based_ind": "N", "contaminant_code": null, "non_compl_per_begin_date": "2018-01-01", "non_compl_per_end_date": "2018-06-30", "violation_status": "Resolved"}"#;

        let violation: Violation = serde_json::from_str(json).unwrap();
        assert!(!violation.is_health_based());
        assert!(!violation.is_active());
    }

    #[test]
    fn test_health_based_requires_exact_flag() {
        let mut violation: Violation =
            serde_json::from_str(r#"{"violation_id": "1", "pwsid": "GA1"}"#).unwrap();
        assert!(!violation.is_health_based());

        violation.is_health_based_ind = Some("N".to_string());
        assert!(!violation.is_health_based());

        violation.is_health_based_ind = Some("Y".to_string());
        assert!(violation.is_health_based());
    }
}
