//! Application state and logic.

use std::path::{Path, PathBuf};

use crate::chart_view::ChartViewState;
use crate::clipboard::copy_figure_data;
use crate::data::{DataReader, Dataset};
use crate::dialog::{Dialog, HelpMenuState, HelpTopic};
use crate::error::Result;
use crate::export::export_figure;
use crate::file_browser::FileBrowserState;
use crate::form::PlotForm;
use crate::plots::{self, Figure};
use crate::request::{PlotKind, PlotRequest};
use crate::util::LayoutConfig;

/// Label shown while no file is loaded.
pub const NO_FILE_LABEL: &str = "No file selected";

/// Application theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Gruvbox dark theme.
    GruvboxDark,
    /// Gruvbox light theme.
    GruvboxLight,
}

impl Theme {
    /// Get the next theme in the cycle.
    pub fn next(self) -> Self {
        match self {
            Theme::GruvboxDark => Theme::GruvboxLight,
            Theme::GruvboxLight => Theme::GruvboxDark,
        }
    }

    /// Get the theme name.
    pub fn name(self) -> &'static str {
        match self {
            Theme::GruvboxDark => "Gruvbox Dark",
            Theme::GruvboxLight => "Gruvbox Light",
        }
    }
}

/// Which surface receives key presses, topmost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// A modal dialog is open.
    Dialog,
    /// The help menu is open.
    Help,
    /// The chart view is open.
    Chart,
    /// A form field is being edited.
    Editing,
    /// The file browser is open.
    FileBrowser,
    /// The plot form.
    Form,
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Loaded dataset.
    pub dataset: Option<Dataset>,
    /// File label shown in the header.
    pub file_label: String,
    /// Plot type and parameter fields.
    pub form: PlotForm,
    /// File browser state.
    pub file_browser: FileBrowserState,
    /// File browser mode.
    pub file_browser_mode: bool,
    /// Open dialog, if any.
    pub dialog: Option<Dialog>,
    /// Help menu state.
    pub help_menu: HelpMenuState,
    /// Chart view state.
    pub chart_view: ChartViewState,
    /// Status message.
    pub status: String,
    /// Current theme.
    pub theme: Theme,
    /// Directory PNG exports are written to.
    pub export_dir: PathBuf,
    /// Layout and export sizes.
    pub layout: LayoutConfig,
}

impl App {
    /// Create a new application instance.
    pub fn new(file_path: Option<PathBuf>, export_dir: PathBuf) -> Self {
        let mut app = Self {
            dataset: None,
            file_label: NO_FILE_LABEL.to_string(),
            form: PlotForm::new(),
            file_browser: FileBrowserState::new(),
            file_browser_mode: false,
            dialog: None,
            help_menu: HelpMenuState::default(),
            chart_view: ChartViewState::new(),
            status: "Ready".to_string(),
            theme: Theme::GruvboxDark,
            export_dir,
            layout: LayoutConfig::default(),
        };

        match file_path {
            Some(path) if path.is_dir() => {
                app.file_browser.current_dir = path;
                app.file_browser.load_directory();
                app.file_browser_mode = true;
            },
            Some(path) => app.load_file(&path),
            None => {},
        }

        app
    }

    /// Which surface currently receives key presses.
    pub fn mode(&self) -> Mode {
        if self.dialog.is_some() {
            Mode::Dialog
        } else if self.help_menu.visible {
            Mode::Help
        } else if self.chart_view.visible {
            Mode::Chart
        } else if self.file_browser_mode {
            Mode::FileBrowser
        } else if self.form.editing {
            Mode::Editing
        } else {
            Mode::Form
        }
    }

    /// Load a data file, replacing the current dataset.
    ///
    /// On failure the session is left with no dataset.
    pub fn load_file(&mut self, path: &Path) {
        match DataReader::read_file(path) {
            Ok(dataset) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string());
                tracing::info!("Loaded {} ({} rows)", path.display(), dataset.len());

                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    self.file_browser.current_dir = parent.to_path_buf();
                }
                self.dataset = Some(dataset);
                self.file_label = format!("File: {}", name);
                self.status = "File loaded successfully".to_string();
            },
            Err(e) => {
                tracing::error!("Error loading file: {}", e);
                self.dataset = None;
                self.file_label = NO_FILE_LABEL.to_string();
                self.status = "Error loading file".to_string();
                self.dialog = Some(Dialog::from_error(self.form.kind, &e));
            },
        }
    }

    /// Select a plot type. Only the visible fields change.
    pub fn select_plot(&mut self, kind: PlotKind) {
        self.form.select_kind(kind);
        self.status = format!("Plot type: {}", kind.name());
    }

    /// Select the next plot type.
    pub fn cycle_plot(&mut self) {
        self.select_plot(self.form.kind.next());
    }

    /// Draw the selected chart with the current parameters.
    pub fn draw(&mut self) {
        self.draw_with(plots::render);
    }

    /// Draw with a given renderer.
    ///
    /// The renderer is only called once the data check and parameter parsing
    /// have passed.
    pub fn draw_with<F>(&mut self, render: F)
    where
        F: FnOnce(&PlotRequest, Option<&Dataset>) -> Result<Figure>,
    {
        let kind = self.form.kind;

        if self.dataset.is_none() && kind.needs_dataset() {
            tracing::warn!("Draw requested for {} without a data file", kind);
            self.dialog = Some(Dialog::missing_file());
            return;
        }

        let figure = self
            .form
            .to_request()
            .and_then(|request| render(&request, self.dataset.as_ref()));

        match figure {
            Ok(figure) => {
                tracing::info!("Drew {} '{}'", kind, figure.title());
                self.status = format!("{} drawn", kind.name());
                self.chart_view.show(figure);
            },
            Err(e) => {
                tracing::error!("Failed to draw {}: {}", kind, e);
                self.status = format!("Could not draw {}", kind.name());
                self.dialog = Some(Dialog::from_error(kind, &e));
            },
        }
    }

    /// Open the help menu.
    pub fn open_help(&mut self) {
        self.help_menu.open();
    }

    /// Show the help dialog for a topic.
    pub fn show_help(&mut self, topic: HelpTopic) {
        self.help_menu.close();
        self.dialog = Some(topic.dialog());
    }

    /// Close the open dialog.
    pub fn dismiss_dialog(&mut self) {
        self.dialog = None;
    }

    /// Save the displayed chart as a PNG into the export directory.
    pub fn export_chart(&mut self) {
        let Some(figure) = &self.chart_view.figure else {
            return;
        };

        let message = match export_figure(
            figure,
            &self.export_dir,
            self.chart_view.color_palette,
            &self.layout.export,
        ) {
            Ok(path) => {
                tracing::info!("Saved chart to {}", path.display());
                format!("Saved {}", path.display())
            },
            Err(e) => format!("Save failed: {}", e),
        };
        self.status = message.clone();
        self.chart_view.message = Some(message);
    }

    /// Copy the displayed chart's data to the clipboard.
    pub fn copy_chart_data(&mut self) {
        let Some(figure) = &self.chart_view.figure else {
            return;
        };

        let message = match copy_figure_data(figure) {
            Ok(()) => "Chart data copied!".to_string(),
            Err(e) => format!("Copy failed: {}", e),
        };
        self.status = message.clone();
        self.chart_view.message = Some(message);
    }

    /// Close the chart view.
    pub fn close_chart(&mut self) {
        self.chart_view.close();
        self.status = "Chart closed".to_string();
    }

    /// Cycle the heatmap colour palette.
    pub fn cycle_palette(&mut self) {
        self.chart_view.cycle_color_palette();
        self.chart_view.message = Some(format!(
            "Palette: {}",
            self.chart_view.color_palette.name()
        ));
    }

    /// Cycle to the next theme.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.status = format!("Theme: {}", self.theme.name());
    }

    /// One-line summary of the loaded dataset.
    pub fn dataset_summary(&self) -> Option<String> {
        self.dataset.as_ref().map(|d| {
            format!(
                "{} rows x {} columns",
                crate::shared::format_number(d.len()),
                d.columns.len()
            )
        })
    }

    /// Toggle show hidden files.
    pub fn toggle_hidden(&mut self) {
        self.file_browser.toggle_hidden();
        self.status = format!(
            "Show hidden: {}",
            if self.file_browser.show_hidden {
                "ON"
            } else {
                "OFF"
            }
        );
    }

    /// Open the selected directory, or load the selected file.
    pub fn browser_select(&mut self) {
        if let Some(path) = self.file_browser.select_current() {
            self.file_browser_mode = false;
            self.load_file(&path);
            if self.dataset.is_none() {
                self.file_browser_mode = true;
            }
        }
    }

    /// Navigate to parent directory in file browser.
    pub fn browser_parent(&mut self) {
        self.file_browser.go_to_parent();
        self.status = format!("Browsing: {}", self.file_browser.current_dir.display());
    }

    /// Move cursor up in file browser.
    pub fn browser_up(&mut self) {
        self.file_browser.cursor_up();
    }

    /// Move cursor down in file browser.
    pub fn browser_down(&mut self) {
        self.file_browser.cursor_down();
    }

    /// Open file browser.
    pub fn open_file_browser(&mut self) {
        self.file_browser.load_directory();
        self.file_browser_mode = true;
        self.status = format!("File browser: {}", self.file_browser.current_dir.display());
    }

    /// Close file browser without loading anything.
    pub fn close_file_browser(&mut self) {
        self.file_browser_mode = false;
        self.status = "Ready".to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::DialogKind;
    use crate::error::GenevizError;
    use std::cell::Cell;
    use std::io::Write;

    fn csv_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn app() -> App {
        App::new(None, std::env::temp_dir())
    }

    #[test]
    fn starts_without_dataset() {
        let app = app();
        assert!(app.dataset.is_none());
        assert_eq!(app.file_label, "No file selected");
        assert_eq!(app.mode(), Mode::Form);
    }

    #[test]
    fn load_success_and_failure() {
        let file = csv_file("chromosome,position,p_value\n1,100,0.01\n");
        let mut app = app();
        app.load_file(file.path());
        assert!(app.dataset.is_some());
        assert!(app.file_label.starts_with("File: "));
        assert_eq!(app.status, "File loaded successfully");

        app.load_file(Path::new("/definitely/not/here.csv"));
        assert!(app.dataset.is_none());
        assert_eq!(app.file_label, "No file selected");
        let dialog = app.dialog.as_ref().unwrap();
        assert!(dialog.message.starts_with("Error loading file:"));
        assert_eq!(app.mode(), Mode::Dialog);
    }

    #[test]
    fn draw_without_file_warns() {
        let mut app = app();
        app.select_plot(PlotKind::Heatmap);
        app.draw();
        assert_eq!(app.dialog, Some(Dialog::missing_file()));
        assert!(!app.chart_view.visible);
    }

    #[test]
    fn venn_draws_without_file() {
        let mut app = app();
        app.select_plot(PlotKind::Venn);
        app.form.venn_genes[0] = "A,B,C".into();
        app.form.venn_genes[1] = "B,C,D".into();
        app.draw();
        assert!(app.dialog.is_none());
        assert!(app.chart_view.visible);
        assert_eq!(app.mode(), Mode::Chart);
    }

    #[test]
    fn bad_threshold_never_reaches_renderer() {
        let file = csv_file("log2_fold_change,p_value\n2.0,0.01\n");
        let mut app = app();
        app.load_file(file.path());
        app.select_plot(PlotKind::Volcano);
        app.form.fold_change = "abc".into();

        let called = Cell::new(false);
        app.draw_with(|_, _| {
            called.set(true);
            Err(GenevizError::NoDataset)
        });

        assert!(!called.get());
        let dialog = app.dialog.unwrap();
        assert_eq!(dialog.kind, DialogKind::Error);
        assert_eq!(
            dialog.message,
            "Please enter valid numbers for the threshold values."
        );
    }

    #[test]
    fn missing_columns_open_validation_dialog() {
        let file = csv_file("Gene,Expression\nA,1.0\n");
        let mut app = app();
        app.load_file(file.path());
        app.select_plot(PlotKind::Heatmap);
        app.draw();
        let dialog = app.dialog.unwrap();
        assert!(dialog.message.contains("Condition"));
        assert!(!app.chart_view.visible);
    }

    #[test]
    fn switching_plot_keeps_dataset() {
        let file = csv_file("log2_fold_change,p_value\n2.0,0.01\n");
        let mut app = app();
        app.load_file(file.path());
        let before = app.dataset.clone();
        app.cycle_plot();
        app.select_plot(PlotKind::Volcano);
        assert_eq!(app.dataset, before);
    }

    #[test]
    fn help_topics_open_info_dialogs() {
        let mut app = app();
        app.open_help();
        assert_eq!(app.mode(), Mode::Help);
        app.show_help(HelpTopic::General);
        assert_eq!(app.mode(), Mode::Dialog);
        assert_eq!(app.dialog.as_ref().unwrap().kind, DialogKind::Info);
        app.dismiss_dialog();
        assert_eq!(app.mode(), Mode::Form);
    }
}
