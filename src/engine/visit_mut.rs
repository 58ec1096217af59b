// Copyright © 2024 Pathway

//! Mutating walk over a report.
//!
//! Same shape as [`super::visit`], but an override may also rewrite the node's
//! child collections before or after delegating to `walk_*`.

use super::model::{
    Bu, Machine, NameDomain, Report, TransactionName, TransactionType, TypeDomain,
};

pub trait VisitMut {
    fn visit_report_mut(&mut self, report: &mut Report) {
        walk_report_mut(self, report);
    }

    fn visit_machine_mut(&mut self, machine: &mut Machine) {
        walk_machine_mut(self, machine);
    }

    fn visit_type_mut(&mut self, ty: &mut TransactionType) {
        walk_type_mut(self, ty);
    }

    fn visit_name_mut(&mut self, _name: &mut TransactionName) {}

    fn visit_type_domain_mut(&mut self, type_domain: &mut TypeDomain) {
        walk_type_domain_mut(self, type_domain);
    }

    fn visit_name_domain_mut(&mut self, name_domain: &mut NameDomain) {
        walk_name_domain_mut(self, name_domain);
    }

    fn visit_bu_mut(&mut self, _bu: &mut Bu) {}
}

pub fn walk_report_mut<V>(v: &mut V, report: &mut Report)
where
    V: VisitMut + ?Sized,
{
    for machine in report.machines.values_mut() {
        v.visit_machine_mut(machine);
    }
    for type_domain in report.type_domains.values_mut() {
        v.visit_type_domain_mut(type_domain);
    }
}

pub fn walk_machine_mut<V>(v: &mut V, machine: &mut Machine)
where
    V: VisitMut + ?Sized,
{
    for ty in machine.types.values_mut() {
        v.visit_type_mut(ty);
    }
}

pub fn walk_type_mut<V>(v: &mut V, ty: &mut TransactionType)
where
    V: VisitMut + ?Sized,
{
    for name in ty.names.values_mut() {
        v.visit_name_mut(name);
    }
}

pub fn walk_type_domain_mut<V>(v: &mut V, type_domain: &mut TypeDomain)
where
    V: VisitMut + ?Sized,
{
    for bu in type_domain.bus.values_mut() {
        v.visit_bu_mut(bu);
    }
    for name_domain in type_domain.name_domains.values_mut() {
        v.visit_name_domain_mut(name_domain);
    }
}

pub fn walk_name_domain_mut<V>(v: &mut V, name_domain: &mut NameDomain)
where
    V: VisitMut + ?Sized,
{
    for bu in name_domain.bus.values_mut() {
        v.visit_bu_mut(bu);
    }
}
