//! Employee directory domain module (employees, compensation, reporting lines).
//!
//! This crate contains the records and business rules of the directory,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod compensation;
pub mod employee;
pub mod reporting;

pub use compensation::{Compensation, CompensationRecord, EffectiveDate, Salary};
pub use employee::{DirectReportRef, Employee, EmployeeDetails};
pub use reporting::{
    HydratedEmployee, NodeIndex, RecordingObserver, ReportingStructure, ReportingTree,
    ReportingTreeBuilder, ResolveEvent, ResolveObserver, Visit,
};
