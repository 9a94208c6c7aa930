//! Plain-text preview of a report.
//!
//! Same sections and field order as the PDF, drawn as simple text tables.
//! No pagination: the whole report is one block of text.

use crate::model::MentoringReport;
use crate::sections::{report_sections, ReportSection};

/// Cells wider than this wrap onto extra lines.
const MAX_COLUMN_CHARS: usize = 40;

pub fn render_preview(report: &MentoringReport, institution: &str, report_title: &str) -> String {
    let mut out = format!(
        "{}\n{}\nDepartment: {}\n",
        institution, report_title, report.student_details.mentor_department
    );

    for section in report_sections(report) {
        out.push_str(&format!("\n{}\n", section.kind.preview_title()));
        out.push_str(&render_table(&section));
    }
    out
}

fn render_table(section: &ReportSection) -> String {
    let columns = section.head.len();
    let mut widths: Vec<usize> = section.head.iter().map(|h| h.chars().count()).collect();
    for row in &section.rows {
        for (i, cell) in row.iter().enumerate().take(columns) {
            let longest = cell.lines().map(|l| l.chars().count()).max().unwrap_or(0);
            widths[i] = widths[i].max(longest);
        }
    }
    for width in widths.iter_mut() {
        *width = (*width).clamp(1, MAX_COLUMN_CHARS);
    }

    let rule = {
        let mut s = String::from("+");
        for width in &widths {
            s.push_str(&"-".repeat(width + 2));
            s.push('+');
        }
        s.push('\n');
        s
    };

    let mut out = rule.clone();
    out.push_str(&render_row(&section.head, &widths));
    out.push_str(&rule.replace('-', "="));
    for row in &section.rows {
        out.push_str(&render_row(row, &widths));
        out.push_str(&rule);
    }
    if section.rows.is_empty() {
        out.push_str(&rule);
    }
    out
}

fn render_row(cells: &[String], widths: &[usize]) -> String {
    let wrapped: Vec<Vec<String>> = widths
        .iter()
        .enumerate()
        .map(|(i, width)| wrap_chars(cells.get(i).map(String::as_str).unwrap_or(""), *width))
        .collect();
    let height = wrapped.iter().map(Vec::len).max().unwrap_or(1);

    let mut out = String::new();
    for line in 0..height {
        out.push('|');
        for (cell, width) in wrapped.iter().zip(widths) {
            let text = cell.get(line).map(String::as_str).unwrap_or("");
            let pad = width.saturating_sub(text.chars().count());
            out.push_str(&format!(" {}{} |", text, " ".repeat(pad)));
        }
        out.push('\n');
    }
    out
}

/// Word-wrap to `width` characters, splitting words that do not fit.
fn wrap_chars(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if line.is_empty() { 0 } else { line.chars().count() + 1 };
            if needed + word.chars().count() <= width {
                if !line.is_empty() {
                    line.push(' ');
                }
                line.push_str(word);
                continue;
            }
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            for c in word.chars() {
                if line.chars().count() == width {
                    lines.push(std::mem::take(&mut line));
                }
                line.push(c);
            }
        }
        lines.push(line);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{DEFAULT_INSTITUTION, DEFAULT_REPORT_TITLE};
    use crate::model::{BacklogInformation, OtherParameters, StudentDetails, SubjectPerformance};

    fn report() -> MentoringReport {
        MentoringReport {
            student_details: StudentDetails {
                student_name: "Asha Rao".to_string(),
                class: "B.Tech CSE".to_string(),
                mentor_department: "CSE".to_string(),
                ..Default::default()
            },
            subject_performance: vec![SubjectPerformance {
                subject_name: "Data Structures".to_string(),
                subject_code: "CS201".to_string(),
                teaching_faculty: "Dr. X".to_string(),
                ..SubjectPerformance::blank()
            }],
            backlog_information: Vec::new(),
            other_parameters: OtherParameters::default(),
        }
    }

    fn position(haystack: &str, needle: &str) -> usize {
        haystack.find(needle).unwrap_or_else(|| panic!("{:?} not in preview", needle))
    }

    #[test]
    fn test_sections_in_layout_order() {
        let text = render_preview(&report(), DEFAULT_INSTITUTION, DEFAULT_REPORT_TITLE);
        let order = [
            "Student Details",
            "Mentor Details",
            "IA Subject-wise Performance",
            "Other Parameters",
        ];
        let positions: Vec<usize> = order.iter().map(|s| position(&text, s)).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(!text.contains("Backlog Information"));
        assert!(text.contains("Department: CSE"));
        assert!(text.contains("| Data Structures"));
    }

    #[test]
    fn test_backlog_shown_when_present() {
        let mut report = report();
        report.backlog_information = vec![
            BacklogInformation {
                subject_name_with_code: "Maths MA101".to_string(),
                action_proposed: "Remedial classes".to_string(),
                ..BacklogInformation::blank()
            },
            BacklogInformation {
                subject_name_with_code: "Physics PH101".to_string(),
                action_proposed: "Extra lab hours".to_string(),
                ..BacklogInformation::blank()
            },
        ];
        let text = render_preview(&report, DEFAULT_INSTITUTION, DEFAULT_REPORT_TITLE);
        let backlog = position(&text, "Backlog Information");
        assert!(backlog > position(&text, "IA Subject-wise Performance"));
        assert!(backlog < position(&text, "Other Parameters"));
        assert!(text.contains("| 1 "));
        assert!(text.contains("| 2 "));
        assert!(position(&text, "Maths MA101") < position(&text, "Physics PH101"));
    }

    #[test]
    fn test_long_cell_wraps() {
        let lines = wrap_chars("Attend remedial sessions every Saturday and submit pending records", 20);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.chars().count() <= 20));
    }

    #[test]
    fn test_rows_are_aligned() {
        let text = render_preview(&report(), DEFAULT_INSTITUTION, DEFAULT_REPORT_TITLE);
        let table_lines: Vec<&str> = text
            .lines()
            .skip_while(|l| *l != "Student Details")
            .skip(1)
            .take_while(|l| l.starts_with('+') || l.starts_with('|'))
            .collect();
        assert!(!table_lines.is_empty());
        let width = table_lines[0].chars().count();
        assert!(table_lines.iter().all(|l| l.chars().count() == width));
    }
}
