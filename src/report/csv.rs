use serde::{Deserialize, Serialize};

use crate::{
    models::{ModuleReport, rating::Criterion},
    report::format_export,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

/// Renders a module report as CSV: the summary block, a blank line, then
/// every individual rating.
pub fn export_csv(report: &ModuleReport) -> CsvExport {
    let labels = Criterion::ALL.iter().map(|c| c.label().to_string());

    let mut summary_header = vec![
        "Module".to_string(),
        "Lecturer".to_string(),
        "Total Ratings".to_string(),
    ];
    summary_header.extend(labels.clone());
    summary_header.push("Overall Average".to_string());

    let mut summary = vec![
        report.module.module_name.clone(),
        report.module.lecturer_name.clone(),
        report.total_ratings.to_string(),
    ];
    summary.extend(report.averages.criteria.iter().map(|avg| format_export(*avg)));
    summary.push(format_export(report.averages.overall));

    let mut detail_header = vec!["Date".to_string()];
    detail_header.extend(labels);
    detail_header.push("Remarks".to_string());

    let mut rows = vec![
        summary_header,
        summary,
        Vec::new(),
        vec!["Individual Ratings:".to_string()],
        detail_header,
    ];

    for rating in &report.ratings {
        let mut row = vec![rating.created_at.format("%Y-%m-%d").to_string()];
        row.extend(rating.scores().iter().map(|s| s.to_string()));
        row.push(rating.remarks.clone().unwrap_or_default());
        rows.push(row);
    }

    let content = rows
        .iter()
        .map(|row| row.iter().map(|f| escape_field(f)).collect::<Vec<_>>().join(","))
        .collect::<Vec<_>>()
        .join("\n");

    CsvExport {
        filename: format!("{}_report.csv", sanitize_filename(&report.module.module_name)),
        content,
    }
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "module".to_string()
    } else {
        cleaned
    }
}
