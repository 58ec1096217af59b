// Copyright © 2024 Pathway

//! Non-destructive name-graph screening.
//!
//! Builds a new report holding a single `ALL` machine. The machine counters are
//! the sum over every source machine; below it only the requested type and name
//! survive, merged from the machines that actually have them.

use arcstr::ArcStr;
use log::debug;

use super::merge::{merge_machine, merge_name_with_histograms, merge_report, merge_type};
use super::model::{Machine, Report, TransactionName, TransactionType, ALL};
use super::selector::NameGraphQuery;
use super::visit::Visit;

pub(crate) struct NameGraphScreener<'q> {
    type_id: Option<&'q ArcStr>,
    name_id: Option<&'q ArcStr>,
    report: Report,
    all: Machine,
}

impl<'q> NameGraphScreener<'q> {
    pub(crate) fn new(domain: ArcStr, query: &'q NameGraphQuery) -> Self {
        Self {
            type_id: query.type_id.as_ref(),
            name_id: query.name_id.as_ref(),
            report: Report::new(domain),
            all: Machine::new(ALL),
        }
    }

    /// The accumulated `ALL` machine, without the enclosing report.
    pub(crate) fn into_machine(self) -> Machine {
        self.all
    }

    pub(crate) fn into_report(self) -> Report {
        let mut report = self.report;
        report.add_machine(self.all);
        report
    }
}

impl<'ast> Visit<'ast> for NameGraphScreener<'_> {
    fn visit_report(&mut self, report: &'ast Report) {
        merge_report(&mut self.report, report);
        for machine in report.machines.values() {
            self.visit_machine(machine);
        }
    }

    fn visit_machine(&mut self, machine: &'ast Machine) {
        merge_machine(&mut self.all, machine);
        if let Some(ty) = self.type_id.and_then(|id| machine.find_type(id)) {
            self.visit_type(ty);
        }
    }

    fn visit_type(&mut self, ty: &'ast TransactionType) {
        merge_type(self.all.find_or_create_type(&ty.id), ty);
        if let Some(name) = self.name_id.and_then(|id| ty.find_name(id)) {
            self.visit_name(name);
        }
    }

    fn visit_name(&mut self, name: &'ast TransactionName) {
        // visit_type created the accumulator type before descending here
        if let Some(ty) = self.type_id.and_then(|id| self.all.find_type_mut(id)) {
            merge_name_with_histograms(ty.find_or_create_name(&name.id), name);
        }
    }
}

/// Folds `machines` into one `ALL` machine restricted to the query's type and name.
pub(crate) fn accumulate_machines<'a>(
    machines: impl IntoIterator<Item = &'a Machine>,
    query: &NameGraphQuery,
) -> Machine {
    let mut screener = NameGraphScreener::new(ArcStr::new(), query);
    for machine in machines {
        screener.visit_machine(machine);
    }
    screener.into_machine()
}

/// Returns a new report restricted to the query's type and name, merged across all
/// machines. The machine selector of `query` is ignored; `report` is left as is.
pub fn screen(report: &Report, query: &NameGraphQuery) -> Report {
    debug!("Screening report {} for {query}", report.domain);

    let mut screener = NameGraphScreener::new(report.domain.clone(), query);
    screener.visit_report(report);
    let screened = screener.into_report();

    if let Some(type_id) = query.type_id() {
        let matched = screened
            .find_machine(ALL)
            .is_some_and(|all| all.find_type(type_id).is_some());
        if !matched {
            debug!("Type {type_id} is absent from every machine of {}", report.domain);
        }
    }
    screened
}
