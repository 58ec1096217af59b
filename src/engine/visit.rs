// Copyright © 2024 Pathway

//! Read-only walk over a report.
//!
//! Each method of [`Visit`] defaults to the matching `walk_*` function, which
//! visits every child. Overriding a method without calling `walk_*` stops the
//! walk at that node.

use super::model::{
    Bu, Machine, NameDomain, Report, TransactionName, TransactionType, TypeDomain,
};

pub trait Visit<'ast> {
    fn visit_report(&mut self, report: &'ast Report) {
        walk_report(self, report);
    }

    fn visit_machine(&mut self, machine: &'ast Machine) {
        walk_machine(self, machine);
    }

    fn visit_type(&mut self, ty: &'ast TransactionType) {
        walk_type(self, ty);
    }

    fn visit_name(&mut self, _name: &'ast TransactionName) {}

    fn visit_type_domain(&mut self, type_domain: &'ast TypeDomain) {
        walk_type_domain(self, type_domain);
    }

    fn visit_name_domain(&mut self, name_domain: &'ast NameDomain) {
        walk_name_domain(self, name_domain);
    }

    fn visit_bu(&mut self, _bu: &'ast Bu) {}
}

pub fn walk_report<'ast, V>(v: &mut V, report: &'ast Report)
where
    V: Visit<'ast> + ?Sized,
{
    for machine in report.machines.values() {
        v.visit_machine(machine);
    }
    for type_domain in report.type_domains.values() {
        v.visit_type_domain(type_domain);
    }
}

pub fn walk_machine<'ast, V>(v: &mut V, machine: &'ast Machine)
where
    V: Visit<'ast> + ?Sized,
{
    for ty in machine.types.values() {
        v.visit_type(ty);
    }
}

pub fn walk_type<'ast, V>(v: &mut V, ty: &'ast TransactionType)
where
    V: Visit<'ast> + ?Sized,
{
    for name in ty.names.values() {
        v.visit_name(name);
    }
}

pub fn walk_type_domain<'ast, V>(v: &mut V, type_domain: &'ast TypeDomain)
where
    V: Visit<'ast> + ?Sized,
{
    for bu in type_domain.bus.values() {
        v.visit_bu(bu);
    }
    for name_domain in type_domain.name_domains.values() {
        v.visit_name_domain(name_domain);
    }
}

pub fn walk_name_domain<'ast, V>(v: &mut V, name_domain: &'ast NameDomain)
where
    V: Visit<'ast> + ?Sized,
{
    for bu in name_domain.bus.values() {
        v.visit_bu(bu);
    }
}
