//! Analyze command - report on one file or stdin

use anyhow::{Context, Result};
use console::style;
use std::io::Read;
use std::path::Path;

use crate::models::{AnalysisReport, MetricsRecord, Rating};
use crate::pipeline::Analyzer;

pub fn run(analyzer: &Analyzer, file: &Path, format: &str) -> Result<()> {
    let report = if file == Path::new("-") {
        let mut code = String::new();
        std::io::stdin()
            .read_to_string(&mut code)
            .context("Failed to read stdin")?;
        analyzer.analyze_text(&code)?
    } else {
        let content =
            std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string());
        analyzer.analyze_upload(&name, &content)?
    };

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print!("{}", render_text(&report)),
    }
    Ok(())
}

fn styled_rating(rating: Rating) -> String {
    let text = format!("{}", rating);
    match rating {
        Rating::A | Rating::B => style(text).green().bold().to_string(),
        Rating::C => style(text).yellow().bold().to_string(),
        Rating::D | Rating::F => style(text).red().bold().to_string(),
    }
}

fn render_text(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let title = report.filename.as_deref().unwrap_or("<stdin>");
    out.push_str(&format!("\n{}\n\n", style(title).bold()));

    let prediction = &report.ml_prediction;
    out.push_str(&format!(
        "  Score      {:.2} ({})\n  Verdict    {} ({:.2}% confidence)\n",
        report.overall_score,
        styled_rating(prediction.rating()),
        prediction.label(),
        prediction.confidence()
    ));

    match &report.metrics {
        MetricsRecord::Analyzed(m) => {
            out.push_str(&format!(
                "  Lines      {} total, {} source, {} comment, {} blank\n",
                m.lines_of_code, m.source_lines, m.comments, m.blank_lines
            ));
            out.push_str(&format!(
                "  Complexity {:.2} avg, {} max\n  MI         {:.2}\n",
                m.avg_complexity, m.max_complexity, m.maintainability_index
            ));
            out.push_str(&format!(
                "  Structure  {} functions, {} classes, {} imports\n",
                m.num_functions, m.num_classes, m.num_imports
            ));
        }
        MetricsRecord::Failed { error, message, .. } => {
            out.push_str(&format!("  {} {}\n", style(error).red(), message));
        }
    }

    if !report.suggestions.is_empty() {
        out.push_str(&format!("\n{}\n", style("Suggestions").bold()));
        for suggestion in &report.suggestions {
            out.push_str(&format!("  {}\n", suggestion));
        }
    }
    out
}
