use core::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use roster_core::{DomainError, DomainResult, EmployeeId, Entity, ValueObject};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Largest accepted decimal exponent, in either direction. Bounds the
/// length of the plain rendering (`1e50000000` would be 50 MB of zeros).
pub const MAX_SALARY_EXPONENT: i64 = 64;

/// Salary amount, arbitrary precision.
///
/// Rendered as a plain decimal string: no exponent, scale as given
/// (`"200000.50"` stays `"200000.50"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Salary(BigDecimal);

impl ValueObject for Salary {}

impl FromStr for Salary {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = BigDecimal::from_str(s)
            .map_err(|_| DomainError::validation(format!("invalid salary format: {s}")))?;

        let (_, scale) = value.as_bigint_and_exponent();
        if scale.abs() > MAX_SALARY_EXPONENT {
            return Err(DomainError::validation(format!(
                "salary out of range (exponent beyond {MAX_SALARY_EXPONENT}): {s}"
            )));
        }
        Ok(Self(value))
    }
}

impl core::fmt::Display for Salary {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0.to_plain_string())
    }
}

impl Serialize for Salary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Salary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Calendar date a compensation takes effect (ISO 8601, no time component).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct EffectiveDate(NaiveDate);

impl ValueObject for EffectiveDate {}

impl From<NaiveDate> for EffectiveDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl FromStr for EffectiveDate {
    type Err = DomainError;

    /// Accepts exactly `YYYY-MM-DD`; anything that does not format back to
    /// the same text (extra digits, missing zero padding) is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid =
            || DomainError::validation(format!("invalid effective date format (YYYY-MM-DD): {s}"));

        let date = NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| invalid())?;
        if date.format(DATE_FORMAT).to_string() != s {
            return Err(invalid());
        }
        Ok(Self(date))
    }
}

impl core::fmt::Display for EffectiveDate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl Serialize for EffectiveDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EffectiveDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Persisted compensation document, one per employee id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompensationRecord {
    pub employee_id: EmployeeId,
    pub salary: Salary,
    pub effective_date: EffectiveDate,
}

impl CompensationRecord {
    /// Validate raw input. Fields are checked in order (salary, then
    /// effective date) and the first absent or malformed one is reported.
    pub fn parse(
        employee_id: EmployeeId,
        salary: Option<&str>,
        effective_date: Option<&str>,
    ) -> DomainResult<Self> {
        let salary = salary
            .ok_or_else(|| DomainError::validation("salary is required"))?
            .parse::<Salary>()?;
        let effective_date = effective_date
            .ok_or_else(|| DomainError::validation("effective date is required"))?
            .parse::<EffectiveDate>()?;
        Ok(Self {
            employee_id,
            salary,
            effective_date,
        })
    }
}

impl Entity for CompensationRecord {
    type Id = EmployeeId;

    fn id(&self) -> &Self::Id {
        &self.employee_id
    }
}

/// Compensation as returned to callers: salary and date as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Compensation {
    pub employee_id: EmployeeId,
    pub salary: String,
    pub effective_date: String,
}

impl From<&CompensationRecord> for Compensation {
    fn from(record: &CompensationRecord) -> Self {
        Self {
            employee_id: record.employee_id.clone(),
            salary: record.salary.to_string(),
            effective_date: record.effective_date.to_string(),
        }
    }
}
