// Copyright © 2024 Pathway

//! Destructive name-graph tailoring.
//!
//! Prunes a report in place down to one machine (or the `ALL` aggregate), one
//! transaction type and one transaction name. Every level is rebuilt by taking
//! the matching child out, clearing the collection and inserting the retained
//! node back, so a missed lookup leaves an empty level behind rather than stale
//! children.

use std::mem;

use arcstr::ArcStr;
use log::debug;

use super::merge::{merge_name, merge_type};
use super::model::{Machine, NameDomain, Report, TransactionName, TransactionType, TypeDomain};
use super::screen::accumulate_machines;
use super::selector::{MachineSelector, NameGraphQuery};
use super::visit_mut::VisitMut;

/// Tailors the machine tree and the business-dimension tree for one concrete
/// machine.
struct SingleMachineTailor<'q> {
    machine_id: &'q ArcStr,
    type_id: Option<&'q ArcStr>,
    name_id: Option<&'q ArcStr>,
}

impl VisitMut for SingleMachineTailor<'_> {
    fn visit_report_mut(&mut self, report: &mut Report) {
        let machine = report.machines.swap_remove(self.machine_id.as_str());
        report.machines.clear();
        match machine {
            Some(mut machine) => {
                self.visit_machine_mut(&mut machine);
                report.add_machine(machine);
            }
            None => debug!(
                "Machine {} is absent from report {}, no machine is kept",
                self.machine_id, report.domain
            ),
        }

        let type_domain = self.type_id.map(|type_id| {
            report
                .type_domains
                .swap_remove(type_id.as_str())
                .unwrap_or_else(|| TypeDomain::new(type_id.clone()))
        });
        report.type_domains.clear();
        if let Some(mut type_domain) = type_domain {
            self.visit_type_domain_mut(&mut type_domain);
            report.add_type_domain(type_domain);
        }
    }

    fn visit_machine_mut(&mut self, machine: &mut Machine) {
        let ty = self
            .type_id
            .and_then(|type_id| machine.types.swap_remove(type_id.as_str()));
        machine.types.clear();

        if let Some(mut ty) = ty {
            let mut retained = TransactionType {
                names: mem::take(&mut ty.names),
                ..TransactionType::new(ty.id.clone())
            };
            merge_type(&mut retained, &ty);
            self.visit_type_mut(&mut retained);
            machine.add_type(retained);
        }
    }

    fn visit_type_mut(&mut self, ty: &mut TransactionType) {
        ty.links.clear();
        let name = self
            .name_id
            .and_then(|name_id| ty.names.swap_remove(name_id.as_str()));
        ty.names.clear();

        if let Some(name) = name {
            // histograms stay behind: only counters are carried to the kept leaf
            let mut retained = TransactionName::new(name.id.clone());
            merge_name(&mut retained, &name);
            ty.add_name(retained);
        }
    }

    fn visit_type_domain_mut(&mut self, type_domain: &mut TypeDomain) {
        type_domain.bus.clear();
        let name_domain = self
            .name_id
            .and_then(|name_id| type_domain.name_domains.swap_remove(name_id.as_str()));
        type_domain.name_domains.clear();

        if let Some(mut name_domain) = name_domain {
            self.visit_name_domain_mut(&mut name_domain);
            type_domain.add_name_domain(name_domain);
        }
    }

    fn visit_name_domain_mut(&mut self, name_domain: &mut NameDomain) {
        let bu = name_domain.bus.swap_remove(self.machine_id.as_str());
        name_domain.bus.clear();
        if let Some(bu) = bu {
            name_domain.add_bu(bu);
        }
    }
}

/// Folds every machine into one synthetic `ALL` machine and drops the
/// business-dimension tree, which has no per-machine meaning once aggregated.
struct AllMachinesTailor<'q> {
    query: &'q NameGraphQuery,
}

impl VisitMut for AllMachinesTailor<'_> {
    fn visit_report_mut(&mut self, report: &mut Report) {
        report.type_domains.clear();
        let machines = mem::take(&mut report.machines);
        let all = accumulate_machines(machines.values(), self.query);
        if let Some(type_id) = self.query.type_id() {
            if all.find_type(type_id).is_none() {
                debug!("Type {type_id} is absent from every machine of {}", report.domain);
            }
        }
        report.add_machine(all);
    }
}

/// Prunes `report` in place to the slice selected by `query`.
///
/// With [`MachineSelector::All`] the report ends up with a single `ALL` machine
/// whose type and name carry the merged counters and histograms, and no type
/// domains. With a concrete machine the report keeps only that machine, its
/// requested type and name (the name without histograms), and the matching
/// business-dimension entries.
pub fn tailor(report: &mut Report, query: &NameGraphQuery) {
    debug!("Tailoring report {} to {query}", report.domain);

    match &query.machine {
        MachineSelector::All => AllMachinesTailor { query }.visit_report_mut(report),
        MachineSelector::Machine(machine_id) => SingleMachineTailor {
            machine_id,
            type_id: query.type_id.as_ref(),
            name_id: query.name_id.as_ref(),
        }
        .visit_report_mut(report),
    }
}
