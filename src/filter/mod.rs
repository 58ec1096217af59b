// Copyright © 2024 Pathway

//! Request-facing filters over transaction reports.

use std::collections::{BTreeMap, HashMap};

use log::debug;

use crate::engine::{screen, tailor, MachineSelector, NameGraphQuery, Report};

pub mod config;
pub use config::FilterConfig;

pub const TRANSACTION_REPORT: &str = "transaction";

/// Supplies string-valued request parameters.
pub trait ParameterSource {
    fn property(&self, key: &str) -> Option<String>;

    fn property_or(&self, key: &str, default: &str) -> String {
        self.property(key).unwrap_or_else(|| default.to_owned())
    }
}

impl ParameterSource for HashMap<String, String> {
    fn property(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl ParameterSource for BTreeMap<String, String> {
    fn property(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

pub trait ReportFilter {
    /// The report this filter applies to.
    fn report_name(&self) -> &str;

    /// Distinguishes this filter from the other filters of the same report.
    fn id(&self) -> &str;

    /// `<report name>:<id>`, the name the filter is registered under.
    fn registry_key(&self) -> String {
        format!("{}:{}", self.report_name(), self.id())
    }

    /// Builds a new filtered report; `report` is left untouched.
    fn screen(&self, params: &dyn ParameterSource, report: &Report) -> Report;

    /// Prunes `report` in place.
    fn tailor(&self, params: &dyn ParameterSource, report: &mut Report);
}

/// Serves the name graph: one transaction name of one type, either on a single
/// machine or merged across all of them.
#[derive(Clone, Debug, Default)]
pub struct AllNameGraphFilter {
    config: FilterConfig,
}

impl AllNameGraphFilter {
    pub const ID: &'static str = "all-name-graph";

    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    pub fn query(&self, params: &dyn ParameterSource) -> NameGraphQuery {
        let machine = params.property(&self.config.machine_key);
        NameGraphQuery::new(
            params.property(&self.config.type_key),
            params.property(&self.config.name_key),
            MachineSelector::from_param(machine.as_deref()),
        )
    }
}

impl ReportFilter for AllNameGraphFilter {
    fn report_name(&self) -> &str {
        TRANSACTION_REPORT
    }

    fn id(&self) -> &str {
        Self::ID
    }

    fn screen(&self, params: &dyn ParameterSource, report: &Report) -> Report {
        let query = NameGraphQuery {
            machine: MachineSelector::All,
            ..self.query(params)
        };
        debug!("{} screening with {query}", self.registry_key());
        screen(report, &query)
    }

    fn tailor(&self, params: &dyn ParameterSource, report: &mut Report) {
        let query = self.query(params);
        debug!("{} tailoring with {query}", self.registry_key());
        tailor(report, &query);
    }
}
