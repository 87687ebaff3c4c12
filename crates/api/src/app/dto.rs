use serde::Deserialize;
use serde_json::Value;

/// Body of `POST /compensation/{id}`.
///
/// Fields are kept as raw JSON so that the employee lookup happens before
/// any field is judged; the compensation service reports absent or
/// malformed values in order (salary, then effective date).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompensationRequest {
    #[serde(default)]
    pub salary: Option<Value>,
    #[serde(default)]
    pub effective_date: Option<Value>,
}

impl CreateCompensationRequest {
    /// Salary text: a JSON string as-is, or a JSON number's literal.
    pub fn salary_text(&self) -> Option<String> {
        field_text(self.salary.as_ref())
    }

    pub fn effective_date_text(&self) -> Option<String> {
        match &self.effective_date {
            Some(Value::String(s)) => Some(s.clone()),
            _ => None,
        }
    }
}

fn field_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
