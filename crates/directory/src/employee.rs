use serde::{Deserialize, Deserializer, Serialize};

use roster_core::{EmployeeId, Entity};

/// Shallow reference to a direct report: only the id is stored.
///
/// Inputs may carry a fully populated employee here (e.g. a record posted
/// back from a reporting-structure response); everything except the id is
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectReportRef {
    pub employee_id: EmployeeId,
}

impl DirectReportRef {
    pub fn new(employee_id: impl Into<EmployeeId>) -> Self {
        Self {
            employee_id: employee_id.into(),
        }
    }
}

/// Editable attributes of an employee (everything but the id).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDetails {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub department: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub direct_reports: Vec<DirectReportRef>,
}

/// Stored employee record.
///
/// `direct_reports` is always the raw (shallow) list as persisted; hydrated
/// views live in [`crate::reporting::ReportingTree`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub employee_id: EmployeeId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub department: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub direct_reports: Vec<DirectReportRef>,
}

impl Employee {
    pub fn new(employee_id: EmployeeId, details: EmployeeDetails) -> Self {
        Self {
            employee_id,
            first_name: details.first_name,
            last_name: details.last_name,
            position: details.position,
            department: details.department,
            direct_reports: details.direct_reports,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    /// Ids of the direct reports, in stored order (duplicates preserved).
    pub fn direct_report_ids(&self) -> impl Iterator<Item = &EmployeeId> {
        self.direct_reports.iter().map(|r| &r.employee_id)
    }
}

impl Entity for Employee {
    type Id = EmployeeId;

    fn id(&self) -> &Self::Id {
        &self.employee_id
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<DirectReportRef>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<DirectReportRef>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(first: &str, last: &str) -> EmployeeDetails {
        EmployeeDetails {
            first_name: first.to_string(),
            last_name: last.to_string(),
            position: "Developer I".to_string(),
            department: "Engineering".to_string(),
            direct_reports: vec![],
        }
    }

    #[test]
    fn serializes_with_camel_case_field_names() {
        let mut e = Employee::new(EmployeeId::from("e-1"), details("Paul", "McCartney"));
        e.direct_reports.push(DirectReportRef::new("e-2"));

        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["employeeId"], "e-1");
        assert_eq!(json["firstName"], "Paul");
        assert_eq!(json["directReports"][0]["employeeId"], "e-2");
    }

    #[test]
    fn null_or_missing_direct_reports_become_empty() {
        let with_null: Employee =
            serde_json::from_str(r#"{"employeeId":"a","directReports":null}"#).unwrap();
        let missing: Employee = serde_json::from_str(r#"{"employeeId":"a"}"#).unwrap();

        assert!(with_null.direct_reports.is_empty());
        assert!(missing.direct_reports.is_empty());
    }

    #[test]
    fn hydrated_direct_reports_are_read_back_as_shallow_refs() {
        let json = r#"{
            "employeeId": "boss",
            "firstName": "John",
            "directReports": [
                { "employeeId": "r-1", "firstName": "Ringo", "directReports": [ { "employeeId": "r-2" } ] }
            ]
        }"#;
        let e: Employee = serde_json::from_str(json).unwrap();

        assert_eq!(e.direct_reports, vec![DirectReportRef::new("r-1")]);
    }

    #[test]
    fn direct_report_ids_keep_duplicates_in_order() {
        let mut e = Employee::new(EmployeeId::from("root"), EmployeeDetails::default());
        e.direct_reports = vec![
            DirectReportRef::new("b"),
            DirectReportRef::new("a"),
            DirectReportRef::new("b"),
        ];

        let ids: Vec<&str> = e.direct_report_ids().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "b"]);
    }

    #[test]
    fn full_name_joins_first_and_last() {
        let e = Employee::new(EmployeeId::from("x"), details("John", "Lennon"));
        assert_eq!(e.full_name(), "John Lennon");
    }
}
