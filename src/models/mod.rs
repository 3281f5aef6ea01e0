mod category;
mod expense;

pub(crate) use category::Category;
pub(crate) use expense::{parse_decimal, Expense, DATE_FORMAT, HEADER};
