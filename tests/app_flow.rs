use geneviz::app::{App, Mode};
use geneviz::dialog::DialogKind;
use geneviz::plots::Figure;
use geneviz::request::PlotKind;
use std::fs;
use tempfile::TempDir;

fn write_csv(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn app_in(dir: &TempDir) -> App {
    App::new(None, dir.path().to_path_buf())
}

#[test]
fn manhattan_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "gwas.csv",
        "chromosome,position,p_value\n1,100,0.01\n1,200,1e-6\n2,50,0.5\n",
    );
    let mut app = App::new(Some(path), dir.path().to_path_buf());
    assert_eq!(app.file_label, "File: gwas.csv");

    app.draw();
    assert_eq!(app.mode(), Mode::Chart);
    match app.chart_view.figure.as_ref().unwrap() {
        Figure::Manhattan(fig) => {
            assert_eq!(fig.title, "Plot Title");
            assert_eq!(fig.ticks.len(), 2);
            assert!((fig.points[1].neg_log_p - 6.0).abs() < 1e-9);
        },
        other => panic!("unexpected figure: {:?}", other.kind()),
    }
}

#[test]
fn heatmap_three_by_two() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "expr.csv",
        "Gene,Condition,Expression\n\
         TP53,ctrl,1.0\nTP53,treat,2.0\n\
         BRCA1,ctrl,3.0\nBRCA1,treat,4.0\n\
         EGFR,ctrl,5.0\nEGFR,treat,6.0\n",
    );
    let mut app = app_in(&dir);
    app.load_file(&path);
    app.select_plot(PlotKind::Heatmap);
    app.form.title = "Expression".into();
    app.draw();

    match app.chart_view.figure.as_ref().unwrap() {
        Figure::Heatmap(fig) => {
            assert_eq!(fig.values.dim(), (3, 2));
            assert_eq!(fig.get("EGFR", "treat"), Some(6.0));
            assert_eq!(fig.title, "Expression");
        },
        other => panic!("unexpected figure: {:?}", other.kind()),
    }
}

#[test]
fn volcano_with_custom_thresholds() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "de.csv",
        "Gene,log2_fold_change,p_value\nA,2.5,0.001\nB,0.3,0.0001\nC,-3,0.2\nD,-1.8,0.01\n",
    );
    let mut app = app_in(&dir);
    app.load_file(&path);
    app.select_plot(PlotKind::Volcano);
    app.form.fold_change = "2".into();
    app.form.p_value = "0.05".into();
    app.draw();

    match app.chart_view.figure.as_ref().unwrap() {
        Figure::Volcano(fig) => assert_eq!(fig.significant_count(), 1),
        other => panic!("unexpected figure: {:?}", other.kind()),
    }
}

#[test]
fn load_failure_resets_session() {
    let dir = TempDir::new().unwrap();
    let good = write_csv(&dir, "ok.csv", "log2_fold_change,p_value\n1,0.5\n");
    let ragged = write_csv(&dir, "bad.csv", "a,b\n1,2,3\n");

    let mut app = app_in(&dir);
    app.load_file(&good);
    assert!(app.dataset.is_some());

    app.load_file(&ragged);
    assert!(app.dataset.is_none());
    assert_eq!(app.file_label, "No file selected");
    assert_eq!(app.dialog.as_ref().unwrap().kind, DialogKind::Error);
}

#[test]
fn invalid_p_values_are_reported() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "de.csv", "log2_fold_change,p_value\n1,0.5\n2,abc\n");
    let mut app = app_in(&dir);
    app.load_file(&path);
    app.select_plot(PlotKind::Volcano);
    app.draw();

    let dialog = app.dialog.as_ref().unwrap();
    assert!(dialog.message.contains("'abc'"));
    assert!(!app.chart_view.visible);
}

#[test]
fn venn_requires_two_sets() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    app.select_plot(PlotKind::Venn);
    app.form.venn_genes[0] = "A,B".into();
    app.draw();

    let dialog = app.dialog.as_ref().unwrap();
    assert_eq!(dialog.kind, DialogKind::Warning);
    assert!(!app.chart_view.visible);
}

#[test]
fn directory_argument_opens_browser() {
    let dir = TempDir::new().unwrap();
    write_csv(&dir, "x.csv", "a\n1\n");
    let app = App::new(Some(dir.path().to_path_buf()), dir.path().to_path_buf());
    assert_eq!(app.mode(), Mode::FileBrowser);
    assert!(app.file_browser.entries.iter().any(|e| e.name == "x.csv"));
}
