//! Reporting structure: hydrated organisation subtree + unique report count.
//!
//! The subtree is held in an arena ([`ReportingTree`]): one node per distinct
//! employee id, children referenced by index. A subordinate reachable through
//! several managers is stored once and linked from each of them, so the
//! count of distinct reports is simply the number of non-root nodes.
//!
//! Building is driven from outside (the traversal needs store lookups) via
//! [`ReportingTreeBuilder`], which tracks which nodes are still on the
//! current depth-first path so that edges closing a cycle can be dropped.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use roster_core::EmployeeId;

use crate::employee::Employee;

/// Index of a node inside a [`ReportingTree`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct NodeIndex(usize);

impl NodeIndex {
    pub const ROOT: NodeIndex = NodeIndex(0);
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ReportNode {
    employee: Employee,
    children: Vec<NodeIndex>,
}

/// Immutable, fully hydrated reporting subtree rooted at index 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportingTree {
    nodes: Vec<ReportNode>,
    index: HashMap<EmployeeId, NodeIndex>,
}

impl ReportingTree {
    pub fn root(&self) -> &Employee {
        &self.nodes[0].employee
    }

    pub fn employee(&self, node: NodeIndex) -> &Employee {
        &self.nodes[node.0].employee
    }

    /// Hydrated direct reports of `node`, in stored order. Dangling
    /// references and cycle-closing edges are not present.
    pub fn children(&self, node: NodeIndex) -> &[NodeIndex] {
        &self.nodes[node.0].children
    }

    pub fn find(&self, id: &EmployeeId) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    /// Distinct subordinates (direct and transitive) of the root.
    pub fn distinct_reports(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Serializable view of `node` with `directReports` replaced by the
    /// hydrated children, recursively.
    pub fn hydrated(&self, node: NodeIndex) -> HydratedEmployee<'_> {
        HydratedEmployee { tree: self, node }
    }
}

/// Outcome of looking up a child id against the partially built tree.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Visit {
    /// Not seen yet: the record must be fetched.
    Unseen,
    /// Already fully expanded (diamond / repeated reference): link only.
    Finished(NodeIndex),
    /// On the current depth-first path: linking would close a cycle.
    OnPath(NodeIndex),
}

/// Incremental builder for a [`ReportingTree`].
#[derive(Debug)]
pub struct ReportingTreeBuilder {
    nodes: Vec<ReportNode>,
    index: HashMap<EmployeeId, NodeIndex>,
    on_path: Vec<bool>,
}

impl ReportingTreeBuilder {
    /// Start a tree at `root`; the root is on the path until finished.
    pub fn new(root: Employee) -> Self {
        let mut index = HashMap::new();
        index.insert(root.employee_id.clone(), NodeIndex::ROOT);
        Self {
            nodes: vec![ReportNode {
                employee: root,
                children: Vec::new(),
            }],
            index,
            on_path: vec![true],
        }
    }

    pub fn employee(&self, node: NodeIndex) -> &Employee {
        &self.nodes[node.0].employee
    }

    pub fn visit(&self, id: &EmployeeId) -> Visit {
        match self.index.get(id) {
            None => Visit::Unseen,
            Some(&idx) if self.on_path[idx.0] => Visit::OnPath(idx),
            Some(&idx) => Visit::Finished(idx),
        }
    }

    /// Add a freshly fetched employee as a child of `parent`. The new node
    /// is on the path until [`Self::finish`] is called for it.
    ///
    /// Inserting an id that is already present only links the existing node.
    pub fn attach(&mut self, parent: NodeIndex, employee: Employee) -> NodeIndex {
        if let Some(&existing) = self.index.get(&employee.employee_id) {
            self.link(parent, existing);
            return existing;
        }

        let idx = NodeIndex(self.nodes.len());
        self.index.insert(employee.employee_id.clone(), idx);
        self.nodes.push(ReportNode {
            employee,
            children: Vec::new(),
        });
        self.on_path.push(true);
        self.link(parent, idx);
        idx
    }

    /// Link an existing node under `parent`.
    pub fn link(&mut self, parent: NodeIndex, child: NodeIndex) {
        self.nodes[parent.0].children.push(child);
    }

    /// Mark `node` as fully expanded (off the depth-first path).
    pub fn finish(&mut self, node: NodeIndex) {
        self.on_path[node.0] = false;
    }

    pub fn build(self) -> ReportingTree {
        ReportingTree {
            nodes: self.nodes,
            index: self.index,
        }
    }
}

/// Computed view: root employee with hydrated reports and the unique count.
///
/// Serialization walks the tree per parent, so an employee reachable through
/// several managers is rendered once under each of them. Stacked diamonds
/// therefore grow the JSON exponentially in their depth, while
/// `numberOfReports` and the number of store lookups stay linear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportingStructure {
    tree: ReportingTree,
}

impl ReportingStructure {
    pub fn new(tree: ReportingTree) -> Self {
        Self { tree }
    }

    pub fn employee(&self) -> &Employee {
        self.tree.root()
    }

    pub fn number_of_reports(&self) -> usize {
        self.tree.distinct_reports()
    }

    pub fn tree(&self) -> &ReportingTree {
        &self.tree
    }
}

impl Serialize for ReportingStructure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ReportingStructure", 2)?;
        s.serialize_field("employee", &self.tree.hydrated(NodeIndex::ROOT))?;
        s.serialize_field("numberOfReports", &self.number_of_reports())?;
        s.end()
    }
}

/// Borrowed employee node that serializes with hydrated `directReports`.
#[derive(Debug, Copy, Clone)]
pub struct HydratedEmployee<'a> {
    tree: &'a ReportingTree,
    node: NodeIndex,
}

struct HydratedReports<'a> {
    tree: &'a ReportingTree,
    children: &'a [NodeIndex],
}

impl Serialize for HydratedEmployee<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let e = self.tree.employee(self.node);
        let mut s = serializer.serialize_struct("Employee", 6)?;
        s.serialize_field("employeeId", &e.employee_id)?;
        s.serialize_field("firstName", &e.first_name)?;
        s.serialize_field("lastName", &e.last_name)?;
        s.serialize_field("position", &e.position)?;
        s.serialize_field("department", &e.department)?;
        s.serialize_field(
            "directReports",
            &HydratedReports {
                tree: self.tree,
                children: self.tree.children(self.node),
            },
        )?;
        s.end()
    }
}

impl Serialize for HydratedReports<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.children.iter().map(|&c| self.tree.hydrated(c)))
    }
}

/// Non-fatal things that happen while resolving a reporting structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveEvent {
    /// `parent` lists `missing` as a direct report but no such employee exists.
    DanglingReference {
        parent: EmployeeId,
        missing: EmployeeId,
    },
    /// Fetching `child` failed; the branch is left out.
    LookupFailed {
        parent: EmployeeId,
        child: EmployeeId,
        reason: String,
    },
    /// `parent -> child` would close a cycle; the edge is left out.
    CycleBroken {
        parent: EmployeeId,
        child: EmployeeId,
    },
}

/// Sink for [`ResolveEvent`]s (logging, metrics, test capture).
pub trait ResolveObserver: Send + Sync {
    fn observe(&self, event: ResolveEvent);
}

/// In-memory observer for tests/dev.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    inner: Mutex<Vec<ResolveEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ResolveEvent> {
        self.inner.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

impl ResolveObserver for RecordingObserver {
    fn observe(&self, event: ResolveEvent) {
        if let Ok(mut v) = self.inner.lock() {
            v.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::{DirectReportRef, EmployeeDetails};

    fn emp(id: &str, reports: &[&str]) -> Employee {
        let mut e = Employee::new(
            EmployeeId::from(id),
            EmployeeDetails {
                first_name: id.to_uppercase(),
                ..Default::default()
            },
        );
        e.direct_reports = reports.iter().map(|r| DirectReportRef::new(*r)).collect();
        e
    }

    fn id(s: &str) -> EmployeeId {
        EmployeeId::from(s)
    }

    #[test]
    fn lone_root_has_no_reports() {
        let tree = ReportingTreeBuilder::new(emp("j", &[])).build();
        let rs = ReportingStructure::new(tree);
        assert_eq!(rs.number_of_reports(), 0);
        assert_eq!(rs.employee().employee_id, id("j"));
    }

    #[test]
    fn diamond_is_one_node_linked_twice() {
        // j -> [k, l], k -> m, l -> m
        let mut b = ReportingTreeBuilder::new(emp("j", &["k", "l"]));
        let k = b.attach(NodeIndex::ROOT, emp("k", &["m"]));
        let m = b.attach(k, emp("m", &[]));
        b.finish(m);
        b.finish(k);
        let l = b.attach(NodeIndex::ROOT, emp("l", &["m"]));
        assert_eq!(b.visit(&id("m")), Visit::Finished(m));
        b.link(l, m);
        b.finish(l);
        b.finish(NodeIndex::ROOT);

        let tree = b.build();
        assert_eq!(tree.distinct_reports(), 3);
        assert_eq!(tree.children(k), &[m]);
        assert_eq!(tree.children(l), &[m]);
        assert_eq!(tree.find(&id("m")), Some(m));
        assert_eq!(tree.find(&id("l")), Some(l));
    }

    #[test]
    fn ancestors_are_reported_as_on_path() {
        let mut b = ReportingTreeBuilder::new(emp("a", &["b"]));
        let bi = b.attach(NodeIndex::ROOT, emp("b", &["a"]));
        assert_eq!(b.visit(&id("a")), Visit::OnPath(NodeIndex::ROOT));
        assert_eq!(b.visit(&id("b")), Visit::OnPath(bi));
        b.finish(bi);
        assert_eq!(b.visit(&id("b")), Visit::Finished(bi));
        assert_eq!(b.visit(&id("zzz")), Visit::Unseen);
    }

    #[test]
    fn attaching_a_known_id_only_links() {
        let mut b = ReportingTreeBuilder::new(emp("r", &["x", "x"]));
        let first = b.attach(NodeIndex::ROOT, emp("x", &[]));
        let second = b.attach(NodeIndex::ROOT, emp("x", &[]));
        assert_eq!(first, second);

        let tree = b.build();
        assert_eq!(tree.distinct_reports(), 1);
        assert_eq!(tree.children(NodeIndex::ROOT), &[first, first]);
    }

    #[test]
    fn serializes_nested_hydrated_reports() {
        let mut b = ReportingTreeBuilder::new(emp("j", &["k", "gone"]));
        let k = b.attach(NodeIndex::ROOT, emp("k", &["m"]));
        let m = b.attach(k, emp("m", &[]));
        b.finish(m);
        b.finish(k);
        b.finish(NodeIndex::ROOT);
        let rs = ReportingStructure::new(b.build());

        let json = serde_json::to_value(&rs).unwrap();
        assert_eq!(json["numberOfReports"], 2);
        assert_eq!(json["employee"]["employeeId"], "j");
        let reports = json["employee"]["directReports"].as_array().unwrap();
        assert_eq!(reports.len(), 1, "dangling id must not be rendered");
        assert_eq!(reports[0]["firstName"], "K");
        assert_eq!(reports[0]["directReports"][0]["employeeId"], "m");
        assert_eq!(
            reports[0]["directReports"][0]["directReports"],
            serde_json::json!([])
        );
    }

    #[test]
    fn shared_report_is_rendered_under_each_manager() {
        let mut b = ReportingTreeBuilder::new(emp("j", &["k", "l"]));
        let k = b.attach(NodeIndex::ROOT, emp("k", &["m"]));
        let m = b.attach(k, emp("m", &["n"]));
        let n = b.attach(m, emp("n", &[]));
        b.finish(n);
        b.finish(m);
        b.finish(k);
        let l = b.attach(NodeIndex::ROOT, emp("l", &["m"]));
        b.link(l, m);
        b.finish(l);
        b.finish(NodeIndex::ROOT);
        let rs = ReportingStructure::new(b.build());

        let json = serde_json::to_value(&rs).unwrap();
        assert_eq!(json["numberOfReports"], 4);
        let reports = &json["employee"]["directReports"];
        assert_eq!(reports[0]["directReports"], reports[1]["directReports"]);
        assert_eq!(reports[1]["directReports"][0]["directReports"][0]["employeeId"], "n");
    }

    #[test]
    fn stored_records_keep_their_shallow_lists() {
        let mut b = ReportingTreeBuilder::new(emp("j", &["k", "gone"]));
        let k = b.attach(NodeIndex::ROOT, emp("k", &[]));
        b.finish(k);
        let tree = b.build();

        assert_eq!(tree.root().direct_reports.len(), 2);
        assert_eq!(tree.children(NodeIndex::ROOT).len(), 1);
    }

    #[test]
    fn recording_observer_keeps_order() {
        let obs = RecordingObserver::new();
        obs.observe(ResolveEvent::DanglingReference {
            parent: id("a"),
            missing: id("x"),
        });
        obs.observe(ResolveEvent::CycleBroken {
            parent: id("b"),
            child: id("a"),
        });

        let events = obs.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], ResolveEvent::DanglingReference { .. }));
        assert!(matches!(events[1], ResolveEvent::CycleBroken { .. }));
    }
}
