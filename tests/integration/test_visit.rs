// Copyright © 2024 Pathway

use report_filter_engine::engine::visit::{
    walk_machine, walk_name_domain, walk_type, walk_type_domain,
};
use report_filter_engine::engine::visit_mut::walk_type_mut;
use report_filter_engine::engine::{
    Bu, Machine, NameDomain, TransactionName, TransactionType, TypeDomain, Visit,
    VisitMut,
};

use super::helpers::two_machine_report;

#[derive(Default)]
struct NodeCounter {
    machines: usize,
    types: usize,
    names: usize,
    type_domains: usize,
    name_domains: usize,
    bus: Vec<String>,
}

impl<'ast> Visit<'ast> for NodeCounter {
    fn visit_machine(&mut self, machine: &'ast Machine) {
        self.machines += 1;
        walk_machine(self, machine);
    }

    fn visit_type(&mut self, ty: &'ast TransactionType) {
        self.types += 1;
        walk_type(self, ty);
    }

    fn visit_name(&mut self, _name: &'ast TransactionName) {
        self.names += 1;
    }

    fn visit_type_domain(&mut self, type_domain: &'ast TypeDomain) {
        self.type_domains += 1;
        walk_type_domain(self, type_domain);
    }

    fn visit_name_domain(&mut self, name_domain: &'ast NameDomain) {
        self.name_domains += 1;
        walk_name_domain(self, name_domain);
    }

    fn visit_bu(&mut self, bu: &'ast Bu) {
        self.bus.push(bu.id.to_string());
    }
}

#[test]
fn test_default_walk_reaches_every_node() {
    let report = two_machine_report();
    let mut counter = NodeCounter::default();
    counter.visit_report(&report);

    assert_eq!(counter.machines, 2);
    assert_eq!(counter.types, 2);
    assert_eq!(counter.names, 2);
    assert_eq!(counter.type_domains, 2);
    assert_eq!(counter.name_domains, 2);
    assert_eq!(counter.bus, ["m1", "m1", "m2"]);
}

/// Stops at machines, never descending into types.
#[derive(Default)]
struct MachineOnly {
    seen: Vec<String>,
    types: usize,
}

impl<'ast> Visit<'ast> for MachineOnly {
    fn visit_machine(&mut self, machine: &'ast Machine) {
        self.seen.push(machine.id.to_string());
    }

    fn visit_type(&mut self, _ty: &'ast TransactionType) {
        self.types += 1;
    }
}

#[test]
fn test_override_without_walk_prunes() {
    let report = two_machine_report();
    let mut visitor = MachineOnly::default();
    visitor.visit_report(&report);

    assert_eq!(visitor.seen, ["m1", "m2"]);
    assert_eq!(visitor.types, 0);
}

/// Keeps the first name of every type and strips its links.
struct FirstNameOnly;

impl VisitMut for FirstNameOnly {
    fn visit_type_mut(&mut self, ty: &mut TransactionType) {
        let first = ty.names.shift_remove_index(0);
        ty.names.clear();
        if let Some((_id, name)) = first {
            ty.add_name(name);
        }
        walk_type_mut(self, ty);
    }

    fn visit_name_mut(&mut self, name: &mut TransactionName) {
        name.links.clear();
    }
}

#[test]
fn test_mutating_walk_rewrites_children() {
    let mut report = two_machine_report();
    report
        .find_machine_mut("m1")
        .unwrap()
        .find_type_mut("T")
        .unwrap()
        .add_name(TransactionName::new("N2"));

    FirstNameOnly.visit_report_mut(&mut report);

    let ty = report.find_machine("m1").unwrap().find_type("T").unwrap();
    assert_eq!(ty.names.len(), 1);
    let name = ty.find_name("N").unwrap();
    assert!(name.links.is_empty());
    assert!(!ty.links.is_empty());
    assert_eq!(report.type_domains.len(), 2);
}
