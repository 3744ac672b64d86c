use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use readiness_core::{
    assessment::{
        self, AssessmentForm, LocalSubmissionService, Question, QuestionKind, Section,
    },
    error::ReadinessError,
    report::ReadinessReport,
    storage::FileStore,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

#[derive(Subcommand)]
pub enum AssessSubcommand {
    /// List the questionnaire sections and their questions
    Sections,
    /// Answer one question (no values clears it)
    Answer {
        section: String,
        question: String,
        /// Option value(s) or free text; multi-choice takes several values
        values: Vec<String>,
    },
    /// Check the required questions of one section (index or id)
    Validate { section: String },
    /// Show answered/total per section
    Progress,
    /// Submit the assessment once every required question is answered
    Submit,
    /// Discard the saved draft and start over
    ClearDraft,
}

pub fn run(root: &Path, subcmd: AssessSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        AssessSubcommand::Sections => sections(json),
        AssessSubcommand::Answer {
            section,
            question,
            values,
        } => answer(root, &section, &question, &values, json),
        AssessSubcommand::Validate { section } => validate(root, &section, json),
        AssessSubcommand::Progress => progress(root, json),
        AssessSubcommand::Submit => submit(root, json),
        AssessSubcommand::ClearDraft => clear_draft(root, json),
    }
}

/// The form as the last invocation left it. Each command restores from the
/// draft and writes it back immediately, so the debounce does not apply.
fn open_form(root: &Path) -> anyhow::Result<AssessmentForm> {
    let config = super::load_config(root)?;
    let storage = Arc::new(FileStore::new(root));
    Ok(AssessmentForm::restore(
        storage,
        config.assessment.autosave_debounce(),
    ))
}

fn kind_label(q: &Question) -> &'static str {
    match q.kind {
        QuestionKind::SingleChoice => "choice",
        QuestionKind::MultiChoice => "multi",
        QuestionKind::Text => "text",
        QuestionKind::Scale => "scale 1-5",
    }
}

fn sections(json: bool) -> anyhow::Result<()> {
    let all = assessment::sections();
    if json {
        return print_json(&all);
    }
    for (i, section) in all.iter().enumerate() {
        println!("{i}. {} [{}]", section.title, section.id);
        for q in &section.questions {
            let required = if q.required { "*" } else { " " };
            println!("   {required} {:<24} {:<10} {}", q.id, kind_label(q), q.prompt);
            if q.kind != QuestionKind::Scale && !q.options.is_empty() {
                let values: Vec<&str> = q.options.iter().map(|o| o.value.as_str()).collect();
                println!("     {:<24} {}", "", values.join(" | "));
            }
        }
    }
    println!("\n* required");
    Ok(())
}

fn answer(
    root: &Path,
    section_id: &str,
    question_id: &str,
    values: &[String],
    json: bool,
) -> anyhow::Result<()> {
    let (_, section) = assessment::find_section(section_id)
        .ok_or_else(|| ReadinessError::SectionNotFound(section_id.to_string()))?;
    let question = section
        .question(question_id)
        .ok_or_else(|| ReadinessError::QuestionNotFound {
            section: section_id.to_string(),
            question: question_id.to_string(),
        })?;

    let mut form = open_form(root)?;
    let parsed = question.parse_answer(values);
    let cleared = parsed.is_empty();
    form.update_answer(section_id, question_id, parsed, Instant::now())?;
    form.flush_draft();

    let progress = form.progress();
    if json {
        return print_json(&serde_json::json!({
            "section_id": section_id,
            "question_id": question_id,
            "answer": form.answer(section_id, question_id),
            "progress": progress,
        }));
    }
    if cleared {
        println!("Cleared {section_id}/{question_id}");
    } else if let Some(a) = form.answer(section_id, question_id) {
        println!("{section_id}/{question_id} = {a}");
    }
    println!(
        "Progress: {}/{} ({}%)",
        progress.answered, progress.total, progress.percentage
    );
    Ok(())
}

fn resolve_section(key: &str) -> anyhow::Result<(usize, &'static Section)> {
    if let Ok(index) = key.parse::<usize>() {
        let section = assessment::section(index)
            .ok_or_else(|| ReadinessError::SectionNotFound(key.to_string()))?;
        return Ok((index, section));
    }
    Ok(assessment::find_section(key)
        .ok_or_else(|| ReadinessError::SectionNotFound(key.to_string()))?)
}

fn validate(root: &Path, key: &str, json: bool) -> anyhow::Result<()> {
    let (index, section) = resolve_section(key)?;
    let mut form = open_form(root)?;
    let valid = form.validate_section(index)?;
    let errors: Vec<(&str, &str)> = section
        .questions
        .iter()
        .filter_map(|q| {
            form.errors()
                .get(&q.id)
                .map(|msg| (q.id.as_str(), msg.as_str()))
        })
        .collect();

    if json {
        print_json(&serde_json::json!({
            "index": index,
            "section_id": section.id,
            "valid": valid,
            "errors": errors.iter().copied().collect::<std::collections::BTreeMap<_, _>>(),
        }))?;
    } else if valid {
        println!("{}: all required questions answered", section.title);
    } else {
        for (question, msg) in &errors {
            println!("{}/{question}: {msg}", section.id);
        }
    }

    if !valid {
        anyhow::bail!("section '{}' has unanswered required questions", section.id);
    }
    Ok(())
}

fn progress(root: &Path, json: bool) -> anyhow::Result<()> {
    let form = open_form(root)?;
    let per_section = assessment::sections()
        .iter()
        .enumerate()
        .map(|(i, s)| form.section_progress(i).map(|p| (s, p)))
        .collect::<Result<Vec<_>, _>>()?;
    let overall = form.progress();

    if json {
        let sections: Vec<serde_json::Value> = per_section
            .iter()
            .map(|(s, p)| serde_json::json!({ "id": s.id, "title": s.title, "progress": p }))
            .collect();
        return print_json(&serde_json::json!({
            "progress": overall,
            "complete": form.is_complete(),
            "sections": sections,
        }));
    }

    let rows = per_section
        .iter()
        .map(|(s, p)| {
            vec![
                s.id.clone(),
                format!("{}/{}", p.answered, p.total),
                format!("{}%", p.percentage),
            ]
        })
        .collect();
    print_table(&["SECTION", "ANSWERED", "PERCENT"], rows);
    println!(
        "\nOverall: {}/{} ({}%){}",
        overall.answered,
        overall.total,
        overall.percentage,
        if form.is_complete() {
            "  ready to submit"
        } else {
            ""
        }
    );
    Ok(())
}

fn submit(root: &Path, json: bool) -> anyhow::Result<()> {
    let mut form = open_form(root)?;
    let missing = form.missing_required();
    let report = ReadinessReport::from_answers(form.answers());
    let service = LocalSubmissionService::new(root);

    let result = match form.submit(&service) {
        Ok(result) => result,
        Err(e) => {
            for (section, question) in &missing {
                eprintln!("  missing: {section}/{question}");
            }
            return Err(e.into());
        }
    };
    if !result.success {
        anyhow::bail!(
            "submission rejected: {}",
            result.error.as_deref().unwrap_or("unknown error")
        );
    }

    if json {
        return print_json(&serde_json::json!({
            "result": result,
            "report": report,
        }));
    }
    println!(
        "Submitted {}",
        result.submission_id.as_deref().unwrap_or("-")
    );
    println!(
        "Overall readiness: {:.1} ({})",
        report.overall,
        report.maturity.label()
    );
    Ok(())
}

fn clear_draft(root: &Path, json: bool) -> anyhow::Result<()> {
    let mut form = open_form(root).context("cannot open assessment")?;
    form.clear_draft();
    if json {
        return print_json(&serde_json::json!({ "cleared": true }));
    }
    println!("Assessment draft cleared.");
    Ok(())
}
