//! Dialogs - modal messages and the help menu.
//!
//! Every failure that reaches the application shell is turned into a
//! [`Dialog`] by [`Dialog::from_error`], based on the error's category.

pub mod ui;

use crate::error::{ErrorCategory, GenevizError};
use crate::request::PlotKind;
use std::error::Error as _;

/// Severity of a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    /// Informational message.
    Info,
    /// Something the user must do first.
    Warning,
    /// An operation failed.
    Error,
}

impl DialogKind {
    /// Default dialog title.
    pub fn title(self) -> &'static str {
        match self {
            DialogKind::Info => "Info",
            DialogKind::Warning => "Warning",
            DialogKind::Error => "Error",
        }
    }
}

/// A modal message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    /// Severity.
    pub kind: DialogKind,
    /// Title bar text.
    pub title: String,
    /// Body text.
    pub message: String,
}

impl Dialog {
    /// Create a new dialog with the kind's default title.
    pub fn new(kind: DialogKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: kind.title().to_string(),
            message: message.into(),
        }
    }

    /// Informational dialog with its own title.
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Dialog shown when drawing needs a data file and none is loaded.
    pub fn missing_file() -> Self {
        Self::new(DialogKind::Warning, "Please select a data file first!")
    }

    /// Present an error raised while loading a file or drawing a `kind` chart.
    pub fn from_error(kind: PlotKind, err: &GenevizError) -> Self {
        match err.category() {
            ErrorCategory::Load => Self::new(
                DialogKind::Error,
                format!("Error loading file:\n{}", error_chain(err)),
            ),
            ErrorCategory::MissingSelection => Self::missing_file(),
            ErrorCategory::Parameter => Self::new(
                DialogKind::Error,
                "Please enter valid numbers for the threshold values.",
            ),
            ErrorCategory::Validation => match err {
                GenevizError::TooFewGeneSets => {
                    Self::new(DialogKind::Warning, "Please enter genes for at least two gene sets.")
                },
                _ if kind == PlotKind::Venn => Self::new(
                    DialogKind::Error,
                    format!("An error occurred while drawing the Venn diagram:\n{}", err),
                ),
                _ => Self::new(
                    DialogKind::Error,
                    format!("{}\n\n{}", err, column_reminder(kind)),
                ),
            },
            ErrorCategory::Render => Self::new(
                DialogKind::Error,
                format!(
                    "An error occurred while drawing the chart:\n{}\n\nPlease make sure your data contains the columns required for the '{}' chart.",
                    error_chain(err),
                    kind.name()
                ),
            ),
        }
    }
}

fn column_reminder(kind: PlotKind) -> String {
    format!(
        "The {} needs the columns: {}.",
        kind.name(),
        kind.required_columns().join(", ")
    )
}

/// The error message followed by the messages of its sources.
fn error_chain(err: &GenevizError) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

/// An entry of the help menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    /// Help for one plot type.
    Plot(PlotKind),
    /// General usage.
    General,
}

impl HelpTopic {
    /// Menu entries in display order.
    pub fn all() -> Vec<HelpTopic> {
        PlotKind::ALL
            .iter()
            .map(|k| HelpTopic::Plot(*k))
            .chain(std::iter::once(HelpTopic::General))
            .collect()
    }

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            HelpTopic::Plot(kind) => kind.name(),
            HelpTopic::General => "General Information",
        }
    }

    /// The dialog shown for this topic.
    pub fn dialog(self) -> Dialog {
        match self {
            HelpTopic::Plot(kind) => Dialog::info(format!("{} Help", kind.name()), plot_help(kind)),
            HelpTopic::General => Dialog::info("General Information", GENERAL_HELP),
        }
    }
}

const GENERAL_HELP: &str = "GeneViz visualizes genomic data with several bioinformatics chart types.\n\n\
1. Open a CSV file with 'o' (or pass it on the command line).\n\
2. Choose a plot type with 1-4 or Tab.\n\
3. Adjust the settings, if the plot has any.\n\
4. Press 'd' to draw the chart.";

fn plot_help(kind: PlotKind) -> &'static str {
    match kind {
        PlotKind::Manhattan => {
            "A Manhattan plot visualizes the results of genome-wide association studies (GWAS).\n\n\
Required CSV columns:\n\
- 'chromosome': chromosome number\n\
- 'position': position on the chromosome\n\
- 'p_value': statistical significance"
        },
        PlotKind::Venn => {
            "A Venn diagram shows the intersections and differences between gene sets. \
Enter the gene sets in the dedicated fields, separated by commas."
        },
        PlotKind::Heatmap => {
            "A heatmap visualizes gene expression data as colour intensity.\n\n\
Required CSV columns:\n\
- 'Gene': gene name\n\
- 'Condition': sample condition\n\
- 'Expression': expression level"
        },
        PlotKind::Volcano => {
            "A volcano plot shows gene expression changes between two conditions. \
'Significant' genes are highlighted in red.\n\n\
Required CSV columns:\n\
- 'log2_fold_change': log2 of the fold change between the two conditions\n\
- 'p_value': statistical significance"
        },
    }
}

/// Help menu state.
#[derive(Debug, Clone, Default)]
pub struct HelpMenuState {
    /// Is the menu visible.
    pub visible: bool,
    /// Selected entry.
    pub cursor: usize,
}

impl HelpMenuState {
    /// Open the menu at the first entry.
    pub fn open(&mut self) {
        self.visible = true;
        self.cursor = 0;
    }

    /// Close the menu.
    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Move cursor up.
    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor down.
    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < HelpTopic::all().len() {
            self.cursor += 1;
        }
    }

    /// The selected topic.
    pub fn selected(&self) -> HelpTopic {
        HelpTopic::all()
            .get(self.cursor)
            .copied()
            .unwrap_or(HelpTopic::General)
    }
}
