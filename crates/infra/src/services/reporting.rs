//! Reporting structure resolution.
//!
//! Iterative depth-first walk over the direct-report edges starting at the
//! requested employee. Each distinct subordinate is fetched once and becomes
//! one arena node; the count of distinct reports falls out of the arena size.
//! Dangling references, failed lookups and cycle-closing edges are reported
//! to the injected observer and skipped.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use roster_core::EmployeeId;
use roster_directory::{
    Employee, NodeIndex, ReportingStructure, ReportingTreeBuilder, ResolveEvent, ResolveObserver,
    Visit,
};

use super::require_employee;
use crate::document_store::DocumentStore;
use crate::error::ServiceError;

/// One level of the depth-first walk: a node and its not-yet-visited
/// direct-report ids.
struct Frame {
    node: NodeIndex,
    pending: std::vec::IntoIter<EmployeeId>,
}

impl Frame {
    fn new(node: NodeIndex, employee: &Employee) -> Self {
        Self {
            node,
            pending: employee
                .direct_report_ids()
                .cloned()
                .collect::<Vec<_>>()
                .into_iter(),
        }
    }
}

/// Builds [`ReportingStructure`]s from an employee store. Read-only.
pub struct ReportingStructureResolver<S> {
    employees: S,
    observer: Arc<dyn ResolveObserver>,
}

impl<S> ReportingStructureResolver<S>
where
    S: DocumentStore<EmployeeId, Employee>,
{
    pub fn new(employees: S, observer: Arc<dyn ResolveObserver>) -> Self {
        Self {
            employees,
            observer,
        }
    }

    /// Resolve the full reporting subtree of `id`.
    ///
    /// Only the root lookup can fail the call (`NotFound` or a store error);
    /// problems below the root degrade to a smaller tree.
    pub async fn resolve(&self, id: &EmployeeId) -> Result<ReportingStructure, ServiceError> {
        debug!(employee_id = %id, "resolving reporting structure");

        let root = require_employee(&self.employees, id).await?;
        let mut stack = vec![Frame::new(NodeIndex::ROOT, &root)];
        let mut builder = ReportingTreeBuilder::new(root);
        let mut missing: HashSet<EmployeeId> = HashSet::new();

        while let Some(frame) = stack.last_mut() {
            let parent = frame.node;
            let Some(child_id) = frame.pending.next() else {
                stack.pop();
                builder.finish(parent);
                continue;
            };

            match builder.visit(&child_id) {
                Visit::Finished(existing) => builder.link(parent, existing),
                Visit::OnPath(_) => self.observer.observe(ResolveEvent::CycleBroken {
                    parent: builder.employee(parent).employee_id.clone(),
                    child: child_id,
                }),
                Visit::Unseen if missing.contains(&child_id) => {
                    self.observer.observe(ResolveEvent::DanglingReference {
                        parent: builder.employee(parent).employee_id.clone(),
                        missing: child_id,
                    })
                }
                Visit::Unseen => match self.employees.get(&child_id).await {
                    Ok(Some(mut employee)) => {
                        // The arena is keyed by the id we followed.
                        employee.employee_id = child_id;
                        let mut frame = Frame::new(parent, &employee);
                        frame.node = builder.attach(parent, employee);
                        stack.push(frame);
                    }
                    Ok(None) => {
                        missing.insert(child_id.clone());
                        self.observer.observe(ResolveEvent::DanglingReference {
                            parent: builder.employee(parent).employee_id.clone(),
                            missing: child_id,
                        });
                    }
                    Err(err) => self.observer.observe(ResolveEvent::LookupFailed {
                        parent: builder.employee(parent).employee_id.clone(),
                        child: child_id,
                        reason: err.to_string(),
                    }),
                },
            }
        }

        let structure = ReportingStructure::new(builder.build());
        debug!(
            employee_id = %id,
            name = %structure.employee().full_name(),
            number_of_reports = structure.number_of_reports(),
            "resolved reporting structure"
        );
        Ok(structure)
    }
}
