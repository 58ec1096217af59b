pub mod model;
pub use self::model::{
    Bu, Histogram, Machine, NameDomain, RangeStat, Report, SampleLinks, Stats, TransactionName,
    TransactionType, TypeDomain, ALL,
};

pub mod merge;
pub use merge::Semigroup;

pub mod visit;
pub use visit::Visit;

pub mod visit_mut;
pub use visit_mut::VisitMut;

pub mod selector;
pub use selector::{MachineSelector, NameGraphQuery};

pub mod screen;
pub use screen::screen;

pub mod tailor;
pub use tailor::tailor;
