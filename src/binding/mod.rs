//! Input → output bindings for the dashboard.
//!
//! The dashboard has two inputs (report type, year) and two bound outputs
//! (the year control's disabled flag, the four figures). Bindings are an
//! explicit dispatch table: every entry names the inputs it listens to and a
//! pure compute function over the shared dataset. A change to an input
//! synchronously re-runs every entry that lists it.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::data::Dataset;
use crate::domain::{ReportKind, DEFAULT_YEAR};
use crate::report::{display_graphs, Figures, ReportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputId {
    Report,
    Year,
}

impl fmt::Display for InputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputId::Report => f.write_str("input-report"),
            InputId::Year => f.write_str("input-year"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputValue {
    Report(ReportKind),
    Year(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputId {
    YearDisabled,
    Figures,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    YearDisabled(bool),
    Figures(Box<Figures>),
}

impl Output {
    pub fn id(&self) -> OutputId {
        match self {
            Output::YearDisabled(_) => OutputId::YearDisabled,
            Output::Figures(_) => OutputId::Figures,
        }
    }
}

/// Current values of every input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inputs {
    pub report: ReportKind,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BindingError {
    #[error("{0} is disabled for the current report")]
    InputDisabled(InputId),
    #[error("{input} does not accept {value:?}")]
    ValueKind { input: InputId, value: InputValue },
    #[error(transparent)]
    Report(#[from] ReportError),
}

type Compute = fn(&Dataset, &Inputs) -> Result<Output, ReportError>;

/// One row of the dispatch table.
pub struct Binding {
    pub output: OutputId,
    pub inputs: &'static [InputId],
    compute: Compute,
}

impl Binding {
    pub fn listens_to(&self, input: InputId) -> bool {
        self.inputs.contains(&input)
    }

    pub fn evaluate(&self, dataset: &Dataset, inputs: &Inputs) -> Result<Output, ReportError> {
        (self.compute)(dataset, inputs)
    }
}

/// The dashboard's bindings, in evaluation order.
pub static BINDINGS: [Binding; 2] = [
    Binding {
        output: OutputId::YearDisabled,
        inputs: &[InputId::Report],
        compute: year_disabled_output,
    },
    Binding {
        output: OutputId::Figures,
        inputs: &[InputId::Report, InputId::Year],
        compute: figures_output,
    },
];

/// Year control is disabled for the recession report.
pub fn year_disabled(report: ReportKind) -> bool {
    report == ReportKind::Recession
}

fn year_disabled_output(_: &Dataset, inputs: &Inputs) -> Result<Output, ReportError> {
    Ok(Output::YearDisabled(year_disabled(inputs.report)))
}

fn figures_output(dataset: &Dataset, inputs: &Inputs) -> Result<Output, ReportError> {
    display_graphs(dataset, inputs.report, inputs.year).map(|f| Output::Figures(Box::new(f)))
}

/// Input state plus the dataset the bindings read from.
pub struct Dashboard {
    dataset: Arc<Dataset>,
    inputs: Inputs,
    table: &'static [Binding],
}

impl Dashboard {
    /// `year = None`, or a year the dataset does not contain, selects the
    /// default year if present, else the earliest.
    pub fn new(dataset: Arc<Dataset>, report: ReportKind, year: Option<i32>) -> Self {
        let year = match year {
            Some(year) if dataset.contains_year(year) => year,
            _ => dataset.resolve_year(DEFAULT_YEAR),
        };
        Self {
            dataset,
            inputs: Inputs { report, year },
            table: &BINDINGS,
        }
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn inputs(&self) -> Inputs {
        self.inputs
    }

    pub fn year_disabled(&self) -> bool {
        year_disabled(self.inputs.report)
    }

    /// Evaluate every binding once (first render).
    pub fn initial(&self) -> Result<Vec<Output>, BindingError> {
        evaluate(self.table, &self.dataset, &self.inputs, |_| true)
    }

    /// Apply a new input value and re-run the bindings that listen to it.
    ///
    /// On failure the previous input state is kept.
    pub fn dispatch(&mut self, input: InputId, value: InputValue) -> Result<Vec<Output>, BindingError> {
        let previous = self.inputs;
        match (input, value) {
            (InputId::Report, InputValue::Report(report)) => self.inputs.report = report,
            (InputId::Year, InputValue::Year(year)) => {
                if self.year_disabled() {
                    return Err(BindingError::InputDisabled(InputId::Year));
                }
                self.inputs.year = year;
            }
            _ => return Err(BindingError::ValueKind { input, value }),
        }

        let result = evaluate(self.table, &self.dataset, &self.inputs, |b| b.listens_to(input));
        if result.is_err() {
            self.inputs = previous;
        }
        result
    }

    /// Swap in a freshly loaded dataset and re-evaluate everything.
    ///
    /// A selected year missing from the new data falls back to the default.
    /// Nothing is swapped unless every binding evaluates against the new data.
    pub fn replace_dataset(&mut self, dataset: Arc<Dataset>) -> Result<Vec<Output>, BindingError> {
        let mut inputs = self.inputs;
        if !dataset.contains_year(inputs.year) {
            inputs.year = dataset.resolve_year(DEFAULT_YEAR);
        }
        let outputs = evaluate(self.table, &dataset, &inputs, |_| true)?;
        self.dataset = dataset;
        self.inputs = inputs;
        Ok(outputs)
    }
}

fn evaluate(
    table: &[Binding],
    dataset: &Dataset,
    inputs: &Inputs,
    filter: impl Fn(&Binding) -> bool,
) -> Result<Vec<Output>, BindingError> {
    table
        .iter()
        .filter(|b| filter(b))
        .map(|b| b.evaluate(dataset, inputs).map_err(BindingError::from))
        .collect()
}
