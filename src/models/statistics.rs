use serde::{Deserialize, Serialize};

/// Statewide rollup from the `/statistics` endpoint.
///
/// Violation counts cover health-based violations only; "active" means the
/// compliance period has no end date.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SystemStatistics {
    pub total_systems: i64,
    pub total_systems_with_violations: i64,
    pub active_systems_with_violations: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_statistics_response() {
        let json = r#"{"total_systems": 5421, "total_systems_with_violations": 812, "active_systems_with_violations": 97}"#;

        let stats: SystemStatistics = serde_json::from_str(json)
            .expect("Failed to parse statistics test JSON");
        assert_eq!(stats.total_systems, 5421);
        assert_eq!(stats.total_systems_with_violations, 812);
        assert_eq!(stats.active_systems_with_violations, 97);
    }
}
