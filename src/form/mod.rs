//! Plot form - the parameter fields shown for the selected plot type.
//!
//! The form holds raw text exactly as typed. Nothing is parsed until
//! [`PlotForm::to_request`] builds a [`PlotRequest`] at draw time.

pub mod ui;

use crate::error::{GenevizError, Result};
use crate::request::{
    GeneSet, PlotKind, PlotRequest, DEFAULT_FOLD_CHANGE_THRESHOLD, DEFAULT_P_VALUE_THRESHOLD,
    DEFAULT_TITLE,
};

/// Number of Venn set slots.
pub const VENN_SLOTS: usize = 3;

/// An editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Chart title.
    Title,
    /// Volcano log2 fold-change threshold.
    FoldChange,
    /// Volcano p-value threshold.
    PValue,
    /// Label of a Venn set (0-based slot).
    SetLabel(usize),
    /// Comma-separated genes of a Venn set (0-based slot).
    SetGenes(usize),
}

impl Field {
    /// Display label.
    pub fn label(self) -> String {
        match self {
            Field::Title => "Title".to_string(),
            Field::FoldChange => "log2 FC threshold".to_string(),
            Field::PValue => "p-value threshold".to_string(),
            Field::SetLabel(i) => format!("Set {} label", i + 1),
            Field::SetGenes(i) => format!("Set {} genes", i + 1),
        }
    }
}

/// Form state.
#[derive(Debug, Clone)]
pub struct PlotForm {
    /// Selected plot type.
    pub kind: PlotKind,
    /// Title text.
    pub title: String,
    /// Fold-change threshold text.
    pub fold_change: String,
    /// p-value threshold text.
    pub p_value: String,
    /// Venn set labels.
    pub venn_labels: [String; VENN_SLOTS],
    /// Venn gene lists.
    pub venn_genes: [String; VENN_SLOTS],
    /// Index into [`PlotForm::visible_fields`].
    pub focus: usize,
    /// Whether keystrokes go into the focused field.
    pub editing: bool,
}

impl Default for PlotForm {
    fn default() -> Self {
        Self::new()
    }
}

impl PlotForm {
    /// Create a new form with default values.
    pub fn new() -> Self {
        Self {
            kind: PlotKind::default(),
            title: DEFAULT_TITLE.to_string(),
            fold_change: format!("{:.1}", DEFAULT_FOLD_CHANGE_THRESHOLD),
            p_value: DEFAULT_P_VALUE_THRESHOLD.to_string(),
            venn_labels: ["Set 1".to_string(), "Set 2".to_string(), "Set 3".to_string()],
            venn_genes: Default::default(),
            focus: 0,
            editing: false,
        }
    }

    /// Fields shown for the selected plot type, in display order.
    pub fn visible_fields(&self) -> Vec<Field> {
        let mut fields = vec![Field::Title];
        match self.kind {
            PlotKind::Manhattan | PlotKind::Heatmap => {},
            PlotKind::Volcano => fields.extend([Field::FoldChange, Field::PValue]),
            PlotKind::Venn => {
                for i in 0..VENN_SLOTS {
                    fields.extend([Field::SetLabel(i), Field::SetGenes(i)]);
                }
            },
        }
        fields
    }

    /// The focused field.
    pub fn focused_field(&self) -> Field {
        self.visible_fields()
            .get(self.focus)
            .copied()
            .unwrap_or(Field::Title)
    }

    /// Current text of a field.
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::FoldChange => &self.fold_change,
            Field::PValue => &self.p_value,
            Field::SetLabel(i) => &self.venn_labels[i],
            Field::SetGenes(i) => &self.venn_genes[i],
        }
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Title => &mut self.title,
            Field::FoldChange => &mut self.fold_change,
            Field::PValue => &mut self.p_value,
            Field::SetLabel(i) => &mut self.venn_labels[i],
            Field::SetGenes(i) => &mut self.venn_genes[i],
        }
    }

    /// Select a plot type. Field contents are kept.
    pub fn select_kind(&mut self, kind: PlotKind) {
        self.kind = kind;
        self.editing = false;
        self.focus = self.focus.min(self.visible_fields().len() - 1);
    }

    /// Select the next plot type.
    pub fn cycle_kind(&mut self) {
        self.select_kind(self.kind.next());
    }

    /// Move focus to the next field.
    pub fn focus_next(&mut self) {
        let count = self.visible_fields().len();
        self.focus = (self.focus + 1) % count;
    }

    /// Move focus to the previous field.
    pub fn focus_prev(&mut self) {
        let count = self.visible_fields().len();
        self.focus = (self.focus + count - 1) % count;
    }

    /// Start editing the focused field.
    pub fn start_editing(&mut self) {
        self.editing = true;
    }

    /// Stop editing.
    pub fn stop_editing(&mut self) {
        self.editing = false;
    }

    /// Append a character to the focused field.
    pub fn input(&mut self, c: char) {
        let field = self.focused_field();
        self.value_mut(field).push(c);
    }

    /// Delete the last character of the focused field.
    pub fn backspace(&mut self) {
        let field = self.focused_field();
        self.value_mut(field).pop();
    }

    /// Build a plot request from the current field contents.
    pub fn to_request(&self) -> Result<PlotRequest> {
        let title = match self.title.trim() {
            "" => DEFAULT_TITLE.to_string(),
            t => t.to_string(),
        };

        let request = match self.kind {
            PlotKind::Manhattan => PlotRequest::Manhattan { title },
            PlotKind::Heatmap => PlotRequest::Heatmap { title },
            PlotKind::Volcano => PlotRequest::Volcano {
                title,
                fc_threshold: parse_threshold(Field::FoldChange, &self.fold_change, |v| v >= 0.0)?,
                p_threshold: parse_threshold(Field::PValue, &self.p_value, |v| v > 0.0)?,
            },
            PlotKind::Venn => {
                let (sets, labels) = self.venn_sets()?;
                PlotRequest::Venn {
                    title,
                    sets,
                    labels,
                }
            },
        };

        Ok(request)
    }

    /// Collect the Venn sets that have genes, with their labels.
    fn venn_sets(&self) -> Result<(Vec<GeneSet>, Vec<String>)> {
        let parsed: Vec<GeneSet> = self.venn_genes.iter().map(|t| GeneSet::parse(t)).collect();

        if parsed[0].is_empty() || parsed[1].is_empty() {
            return Err(GenevizError::TooFewGeneSets);
        }

        let mut sets = Vec::with_capacity(VENN_SLOTS);
        let mut labels = Vec::with_capacity(VENN_SLOTS);
        for (i, set) in parsed.into_iter().enumerate() {
            if set.is_empty() {
                continue;
            }
            let label = self.venn_labels[i].trim();
            if label.is_empty() {
                return Err(GenevizError::MissingSetLabel { set: i + 1 });
            }
            sets.push(set);
            labels.push(label.to_string());
        }

        Ok((sets, labels))
    }
}

fn parse_threshold(field: Field, text: &str, in_range: impl Fn(f64) -> bool) -> Result<f64> {
    let invalid = || GenevizError::InvalidThreshold {
        field: match field {
            Field::PValue => "p-value threshold",
            _ => "log2 FC threshold",
        },
        value: text.to_string(),
    };

    let value: f64 = text.trim().parse().map_err(|_| invalid())?;
    if value.is_finite() && in_range(value) {
        Ok(value)
    } else {
        Err(invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn venn_form(genes: [&str; 3]) -> PlotForm {
        let mut form = PlotForm::new();
        form.select_kind(PlotKind::Venn);
        for (slot, text) in form.venn_genes.iter_mut().zip(genes) {
            *slot = text.to_string();
        }
        form
    }

    #[test]
    fn defaults() {
        let form = PlotForm::new();
        assert_eq!(form.kind, PlotKind::Manhattan);
        assert_eq!(form.title, "Plot Title");
        assert_eq!(form.fold_change, "1.0");
        assert_eq!(form.p_value, "0.05");
    }

    #[test]
    fn blank_title_falls_back() {
        let mut form = PlotForm::new();
        form.title = "   ".into();
        assert_eq!(form.to_request().unwrap().title(), "Plot Title");
    }

    #[test]
    fn visible_fields_follow_kind() {
        let mut form = PlotForm::new();
        assert_eq!(form.visible_fields(), vec![Field::Title]);
        form.select_kind(PlotKind::Volcano);
        assert_eq!(
            form.visible_fields(),
            vec![Field::Title, Field::FoldChange, Field::PValue]
        );
        form.select_kind(PlotKind::Venn);
        assert_eq!(form.visible_fields().len(), 7);
    }

    #[test]
    fn focus_is_clamped_on_kind_change() {
        let mut form = PlotForm::new();
        form.select_kind(PlotKind::Venn);
        form.focus = 6;
        form.select_kind(PlotKind::Heatmap);
        assert_eq!(form.focus, 0);
        assert_eq!(form.focused_field(), Field::Title);
    }

    #[test]
    fn editing_appends_and_deletes() {
        let mut form = PlotForm::new();
        form.select_kind(PlotKind::Volcano);
        form.focus_next();
        form.start_editing();
        form.backspace();
        form.backspace();
        form.input('2');
        assert_eq!(form.fold_change, "12");
        form.focus_prev();
        assert_eq!(form.focused_field(), Field::Title);
        form.focus_prev();
        assert_eq!(form.focused_field(), Field::PValue);
    }

    #[test]
    fn volcano_thresholds_parse() {
        let mut form = PlotForm::new();
        form.select_kind(PlotKind::Volcano);
        form.fold_change = " 1.5 ".into();
        form.p_value = "1e-3".into();
        match form.to_request().unwrap() {
            PlotRequest::Volcano {
                fc_threshold,
                p_threshold,
                ..
            } => {
                assert_eq!(fc_threshold, 1.5);
                assert_eq!(p_threshold, 0.001);
            },
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn non_numeric_threshold_is_rejected() {
        let mut form = PlotForm::new();
        form.select_kind(PlotKind::Volcano);
        form.fold_change = "abc".into();
        match form.to_request().unwrap_err() {
            GenevizError::InvalidThreshold { field, value } => {
                assert_eq!(field, "log2 FC threshold");
                assert_eq!(value, "abc");
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn out_of_range_thresholds_are_rejected() {
        let mut form = PlotForm::new();
        form.select_kind(PlotKind::Volcano);
        form.p_value = "0".into();
        assert!(matches!(
            form.to_request(),
            Err(GenevizError::InvalidThreshold { field: "p-value threshold", .. })
        ));
        form.p_value = "0.05".into();
        form.fold_change = "-1".into();
        assert!(form.to_request().is_err());
        form.fold_change = "inf".into();
        assert!(form.to_request().is_err());
        form.fold_change = "0".into();
        assert!(form.to_request().is_ok());
    }

    #[test]
    fn thresholds_ignored_for_other_kinds() {
        let mut form = PlotForm::new();
        form.fold_change = "abc".into();
        assert!(form.to_request().is_ok());
    }

    #[test]
    fn venn_two_sets() {
        let form = venn_form(["A, B, C", "B,C,D", "  "]);
        match form.to_request().unwrap() {
            PlotRequest::Venn { sets, labels, .. } => {
                assert_eq!(sets.len(), 2);
                assert_eq!(labels, vec!["Set 1", "Set 2"]);
                assert!(sets[1].contains("D"));
            },
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn venn_third_set_included_when_present() {
        let form = venn_form(["A", "B", "C"]);
        match form.to_request().unwrap() {
            PlotRequest::Venn { sets, labels, .. } => {
                assert_eq!(sets.len(), 3);
                assert_eq!(labels[2], "Set 3");
            },
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn venn_needs_two_sets() {
        let form = venn_form(["A", " , ", "C"]);
        assert!(matches!(form.to_request(), Err(GenevizError::TooFewGeneSets)));
    }

    #[test]
    fn venn_needs_labels_for_used_sets() {
        let mut form = venn_form(["A", "B", "C"]);
        form.venn_labels[2] = " ".into();
        assert!(matches!(
            form.to_request(),
            Err(GenevizError::MissingSetLabel { set: 3 })
        ));

        // an unused third slot needs no label
        form.venn_genes[2].clear();
        assert!(form.to_request().is_ok());
    }
}
