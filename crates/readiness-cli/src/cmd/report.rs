use crate::output::{print_json, print_table};
use readiness_core::{
    assessment::AssessmentForm, report::ReadinessReport, storage::FileStore,
};
use std::path::Path;
use std::sync::Arc;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = super::load_config(root)?;
    let form = AssessmentForm::restore(
        Arc::new(FileStore::new(root)),
        config.assessment.autosave_debounce(),
    );

    let mut report = ReadinessReport::from_answers(form.answers());
    if !report.has_data() {
        report = ReadinessReport::sample();
    }

    if json {
        return print_json(&report);
    }

    if report.sample {
        println!("No answers yet; showing a sample report.\n");
    }
    println!(
        "Overall readiness: {:.1} / 5  ({})\n",
        report.overall, report.maturity
    );

    let rows = report
        .pillars
        .iter()
        .map(|p| {
            vec![
                p.pillar.label().to_string(),
                if p.has_data() {
                    format!("{:.1}", p.score)
                } else {
                    "-".to_string()
                },
                p.answered.to_string(),
            ]
        })
        .collect();
    print_table(&["PILLAR", "SCORE", "ANSWERS"], rows);

    if !report.recommendations.is_empty() {
        println!("\nRecommendations:");
        for r in &report.recommendations {
            println!("  - {}: {}", r.title, r.detail);
        }
    }
    Ok(())
}
