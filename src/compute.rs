use crate::data::{Error, Expense};
use indexmap::IndexMap;
use rust_decimal::Decimal;

/// Group key to summed amount, iterated in order of first appearance.
pub(crate) type Totals = IndexMap<String, Decimal>;

/// Number of leading characters of a `YYYY-MM-DD` date that form its month.
const MONTH_KEY_LEN: usize = 7;

/// Sums stop at `Decimal::MAX`; going past it is an `Overflow` for that group.
fn group_by<'a, I, F>(expenses: I, key: F) -> Result<Totals, Error>
where
    I: IntoIterator<Item = &'a Expense>,
    F: Fn(&'a Expense) -> &'a str,
{
    let mut totals = Totals::new();
    for expense in expenses {
        let group = key(expense);
        let total = totals.entry(group.to_owned()).or_default();
        *total = total
            .checked_add(expense.amount)
            .ok_or_else(|| Error::Overflow {
                group: group.to_owned(),
            })?;
    }
    Ok(totals)
}

pub(crate) fn by_category<'a>(
    expenses: impl IntoIterator<Item = &'a Expense>,
) -> Result<Totals, Error> {
    group_by(expenses, |e| e.category.as_str())
}

/// Groups by the first seven characters of the date. Shorter dates are not
/// rejected, they simply end up under a shorter key.
pub(crate) fn by_month<'a>(
    expenses: impl IntoIterator<Item = &'a Expense>,
) -> Result<Totals, Error> {
    group_by(expenses, |e| month_key(&e.date))
}

pub(crate) fn month_key(date: &str) -> &str {
    match date.char_indices().nth(MONTH_KEY_LEN) {
        Some((idx, _)) => &date[..idx],
        None => date,
    }
}

/// Keeps the expenses whose date starts with `month`, compared literally.
pub(crate) fn filter_by_month_prefix<'a>(
    expenses: &'a [Expense],
    month: &'a str,
) -> impl Iterator<Item = &'a Expense> + 'a {
    expenses.iter().filter(move |e| e.date.starts_with(month))
}

pub(crate) fn total<'a>(
    expenses: impl IntoIterator<Item = &'a Expense>,
) -> Result<Decimal, Error> {
    expenses
        .into_iter()
        .try_fold(Decimal::ZERO, |sum, e| sum.checked_add(e.amount))
        .ok_or_else(|| Error::Overflow {
            group: "total".into(),
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BudgetStatus {
    Within,
    Exceeded,
}

/// Spending exactly the budget is still within it.
pub(crate) fn check_budget(spent: Decimal, budget: Decimal) -> BudgetStatus {
    if spent > budget {
        BudgetStatus::Exceeded
    } else {
        BudgetStatus::Within
    }
}
