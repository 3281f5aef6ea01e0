mod budget;
mod records;

pub(crate) use budget::BudgetStore;
pub(crate) use records::RecordStore;
