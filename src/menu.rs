use crate::{
    chart,
    compute::{self, BudgetStatus},
    config::Config,
    data::{parse_amount, Error, Expense},
    store::ExpenseStore,
    write,
};
use log::{error, warn};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Choice {
    AddExpense,
    CategorySummary,
    CategoryPieChart,
    MonthlyBarChart,
    CheckBudget,
    ExportReport,
    Exit,
}

impl Choice {
    /// Menu order; an entry's number is its position plus one.
    pub const ALL: [Choice; 7] = [
        Choice::AddExpense,
        Choice::CategorySummary,
        Choice::CategoryPieChart,
        Choice::MonthlyBarChart,
        Choice::CheckBudget,
        Choice::ExportReport,
        Choice::Exit,
    ];

    fn label(self) -> &'static str {
        match self {
            Choice::AddExpense => "Add Expense",
            Choice::CategorySummary => "View Category-wise Summary",
            Choice::CategoryPieChart => "View Category Pie Chart",
            Choice::MonthlyBarChart => "View Monthly Bar Chart",
            Choice::CheckBudget => "Check Budget Limit",
            Choice::ExportReport => "Export Monthly Report",
            Choice::Exit => "Exit",
        }
    }
}

impl FromStr for Choice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|idx| Choice::ALL.get(idx).copied())
            .ok_or_else(|| Error::InvalidChoice(s.to_owned()))
    }
}

/// The interactive front end: reads menu choices and answers from `input`,
/// writes everything meant for the user to `output`.
pub(crate) struct Session<R, W> {
    store: ExpenseStore,
    output_dir: PathBuf,
    currency: String,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(store: ExpenseStore, config: &Config, input: R, output: W) -> Self {
        Self {
            store,
            output_dir: config.output_dir.clone(),
            currency: config.currency.clone(),
            input,
            output,
        }
    }

    /// Runs until the user exits or input ends. A failing operation is reported
    /// and the menu comes back.
    pub fn run(&mut self) -> Result<(), Error> {
        loop {
            self.print_menu()?;
            let answer = match self.prompt("Choose an option (1-7): ") {
                Err(Error::EndOfInput) => return Ok(()),
                answer => answer?,
            };
            let choice = match answer.parse::<Choice>() {
                Ok(choice) => choice,
                Err(_) => {
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                    continue;
                }
            };
            if choice == Choice::Exit {
                writeln!(self.output, "Thank you for using the Expense Tracker.")?;
                return Ok(());
            }
            match self.dispatch(choice) {
                Ok(()) => {}
                Err(Error::EndOfInput) => return Ok(()),
                Err(e @ (Error::NonNumericInput { .. } | Error::OutOfRange { .. })) => {
                    warn!("{e}");
                    writeln!(self.output, "Error: {e}")?;
                }
                Err(e) => {
                    error!("{choice:?} failed: {e}");
                    writeln!(self.output, "Error: {e}")?;
                }
            }
        }
    }

    fn print_menu(&mut self) -> Result<(), Error> {
        writeln!(self.output, "\n====== Personal Expense Tracker ======")?;
        for (idx, choice) in Choice::ALL.iter().enumerate() {
            writeln!(self.output, "{}. {}", idx + 1, choice.label())?;
        }
        Ok(())
    }

    fn prompt(&mut self, message: &str) -> Result<String, Error> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::EndOfInput);
        }
        let len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(len);
        Ok(line)
    }

    fn dispatch(&mut self, choice: Choice) -> Result<(), Error> {
        match choice {
            Choice::AddExpense => self.add_expense(),
            Choice::CategorySummary => self.category_summary(),
            Choice::CategoryPieChart => self.category_pie_chart(),
            Choice::MonthlyBarChart => self.monthly_bar_chart(),
            Choice::CheckBudget => self.check_budget(),
            Choice::ExportReport => self.export_report(),
            Choice::Exit => Ok(()),
        }
    }

    fn add_expense(&mut self) -> Result<(), Error> {
        writeln!(self.output, "\n--- Add New Expense ---")?;
        let date = self.prompt("Enter date (YYYY-MM-DD): ")?;
        let category = self.prompt("Enter category (Food / Travel / Bills etc): ")?;
        let amount = parse_amount("Amount", &self.prompt("Enter amount spent: ")?)?;
        let description = self.prompt("Enter short description: ")?;
        self.store.append(&Expense {
            date,
            category,
            amount,
            description,
        })?;
        writeln!(self.output, "Expense added successfully.")?;
        Ok(())
    }

    fn category_summary(&mut self) -> Result<(), Error> {
        writeln!(self.output, "\n--- Category-wise Expense Summary ---")?;
        let totals = compute::by_category(&self.store.read_all()?)?;
        write::write_summary(&mut self.output, &totals, &self.currency)?;
        Ok(())
    }

    fn category_pie_chart(&mut self) -> Result<(), Error> {
        let totals = compute::by_category(&self.store.read_all()?)?;
        match chart::render_category_pie(&self.output_dir, &totals)? {
            Some(path) => writeln!(self.output, "Chart saved as '{}'", path.display())?,
            None => writeln!(self.output, "No data available for chart.")?,
        }
        Ok(())
    }

    fn monthly_bar_chart(&mut self) -> Result<(), Error> {
        let totals = compute::by_month(&self.store.read_all()?)?;
        match chart::render_monthly_bar(&self.output_dir, &totals, &self.currency)? {
            Some(path) => writeln!(self.output, "Chart saved as '{}'", path.display())?,
            None => writeln!(self.output, "No monthly data found.")?,
        }
        Ok(())
    }

    fn check_budget(&mut self) -> Result<(), Error> {
        writeln!(self.output, "\n--- Budget Check ---")?;
        let month = self.prompt("Enter month (YYYY-MM): ")?;
        let budget = parse_amount("Budget", &self.prompt("Enter monthly budget amount: ")?)?;
        let expenses = self.store.read_all()?;
        let spent = compute::total(compute::filter_by_month_prefix(&expenses, &month))?;
        writeln!(
            self.output,
            "Total spent in {month}: {}{spent}",
            self.currency
        )?;
        match compute::check_budget(spent, budget) {
            BudgetStatus::Exceeded => writeln!(self.output, "Warning: Budget limit exceeded.")?,
            BudgetStatus::Within => writeln!(self.output, "You are within the budget.")?,
        }
        Ok(())
    }

    fn export_report(&mut self) -> Result<(), Error> {
        let month = self.prompt("Enter month (YYYY-MM): ")?;
        let expenses = self.store.read_all()?;
        let totals =
            compute::by_category(compute::filter_by_month_prefix(&expenses, &month))?;
        match write::export_report(&self.output_dir, &month, &totals, &self.currency)? {
            Some(path) => writeln!(
                self.output,
                "Report saved successfully as '{}'",
                path.display()
            )?,
            None => writeln!(self.output, "No data available for this month.")?,
        }
        Ok(())
    }
}
