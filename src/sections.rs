//! Report sections in display order.
//!
//! The PDF layout and the on-screen preview both walk this list, so the
//! section grouping and field order can only be defined once.

use crate::model::{MentoringReport, OtherParameters, StudentDetails};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    StudentDetails,
    MentorDetails,
    SubjectPerformance,
    Backlog,
    OtherParameters,
}

impl SectionKind {
    pub fn title(self) -> &'static str {
        match self {
            SectionKind::StudentDetails => "Student Details",
            SectionKind::MentorDetails => "Mentor Details",
            SectionKind::SubjectPerformance => "Subject-wise Performance",
            SectionKind::Backlog => "Backlog Information",
            SectionKind::OtherParameters => "Other Parameters",
        }
    }

    /// Heading on screen. The subject table is labelled by its IA column
    /// there; the printed report keeps the shorter title.
    pub fn preview_title(self) -> &'static str {
        match self {
            SectionKind::SubjectPerformance => "IA Subject-wise Performance",
            other => other.title(),
        }
    }

    /// Two-column label/value table rather than a row-per-record grid.
    pub fn is_key_value(self) -> bool {
        matches!(
            self,
            SectionKind::StudentDetails | SectionKind::MentorDetails | SectionKind::OtherParameters
        )
    }
}

pub const SUBJECT_COLUMNS: [&str; 9] = [
    "Subject",
    "Code",
    "Teaching Faculty",
    "Weakness, if any",
    "Class Work & Assignments",
    "IA Performance",
    "Expected Outcome",
    "Mentor Remarks with Action Plan",
    "Status of Outcome",
];

pub const BACKLOG_COLUMNS: [&str; 3] = [
    "S.No",
    "Name of the Subject with Code",
    "Action Proposed to Clear",
];

/// One section's table: header cells plus body rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    pub kind: SectionKind,
    pub head: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReportSection {
    pub fn title(&self) -> &'static str {
        self.kind.title()
    }
}

/// Sections of a report, in order. Backlog is left out when there are no
/// backlog rows.
pub fn report_sections(report: &MentoringReport) -> Vec<ReportSection> {
    let details = &report.student_details;
    let mut sections = vec![
        key_value(SectionKind::StudentDetails, ["Field", "Value"], student_rows(details)),
        key_value(SectionKind::MentorDetails, ["Field", "Value"], mentor_rows(details)),
        ReportSection {
            kind: SectionKind::SubjectPerformance,
            head: owned(&SUBJECT_COLUMNS),
            rows: report
                .subject_performance
                .iter()
                .map(|s| {
                    owned(&[
                        &s.subject_name,
                        &s.subject_code,
                        &s.teaching_faculty,
                        &s.weaknesses,
                        &s.classwork_marks,
                        &s.internal_marks,
                        &s.expected_outcome,
                        &s.mentor_remarks,
                        &s.current_status,
                    ])
                })
                .collect(),
        },
    ];

    if !report.backlog_information.is_empty() {
        sections.push(ReportSection {
            kind: SectionKind::Backlog,
            head: owned(&BACKLOG_COLUMNS),
            // Numbered from array position, not the stored id.
            rows: report
                .backlog_information
                .iter()
                .enumerate()
                .map(|(i, b)| {
                    vec![
                        (i + 1).to_string(),
                        b.subject_name_with_code.clone(),
                        b.action_proposed.clone(),
                    ]
                })
                .collect(),
        });
    }

    sections.push(key_value(
        SectionKind::OtherParameters,
        ["Parameter", "Details"],
        other_rows(&report.other_parameters),
    ));
    sections
}

fn student_rows(d: &StudentDetails) -> Vec<(&'static str, &str)> {
    vec![
        ("Student Name", d.student_name.as_str()),
        ("Class", d.class.as_str()),
        ("Section", d.section.as_str()),
        ("Attendance as on Date", d.attendance_as_on_date.as_str()),
        ("Current CGPA", d.current_cgpa.as_str()),
        ("Mentoring Period", d.mentoring_period.as_str()),
    ]
}

fn mentor_rows(d: &StudentDetails) -> Vec<(&'static str, &str)> {
    vec![
        ("Mentor Name", d.mentor_name.as_str()),
        ("Designation", d.mentor_designation.as_str()),
        ("Department", d.mentor_department.as_str()),
    ]
}

fn other_rows(p: &OtherParameters) -> Vec<(&'static str, &str)> {
    vec![
        ("Academic Track (SGPA-Semester-wise)", p.academic_track_sgpa.as_str()),
        ("Attendance and Alerts Issued (to Parents/Guardians)", p.attendance_alerts.as_str()),
        ("Skill Possession - Technical / Programming Skills", p.technical_programming_skills.as_str()),
        ("Skill Possession - Aptitude Skills", p.aptitude_skills.as_str()),
        ("Participation in NIT Clubs or Certification Done", p.clubs_trainings.as_str()),
        (
            "Participation in Co-Curricular Activities (Workshops, Seminars, Guest Lectures, etc.)",
            p.co_curricular_activities.as_str(),
        ),
        (
            "Participation in Extra-Curricular Activities (Sports, Cultural, NSS, etc.)",
            p.extra_curricular_activities.as_str(),
        ),
        (
            "Ranks / Awards / Recognitions at College or University Level",
            p.ranks_awards_recognitions.as_str(),
        ),
        ("Internship/Training Undertaken", p.internship_training_undertaken.as_str()),
        ("Internship/Training Duration", p.internship_duration.as_str()),
        ("Internship/Training Skills Gained", p.internship_skills_gained.as_str()),
        ("Project/Research Title", p.project_title.as_str()),
        ("Project/Research Description", p.project_description.as_str()),
        ("Project/Research Outcome", p.project_outcome.as_str()),
        ("Involvement in Any In-disciplinary Activities", p.indisciplinary_activities.as_str()),
        ("Current Health Status", p.current_health_status.as_str()),
        ("Number of Parent Visits to the College", p.parent_visits.as_str()),
        ("Other Identified & Resolved Academic/Non-Academic Issues", p.other_issues_resolved.as_str()),
        ("Student Grievances (if any)", p.student_grievances.as_str()),
    ]
}

fn key_value(kind: SectionKind, head: [&str; 2], rows: Vec<(&'static str, &str)>) -> ReportSection {
    ReportSection {
        kind,
        head: owned(&head),
        rows: rows
            .into_iter()
            .map(|(label, value)| vec![label.to_string(), value.to_string()])
            .collect(),
    }
}

fn owned<S: AsRef<str>>(cells: &[S]) -> Vec<String> {
    cells.iter().map(|c| c.as_ref().to_string()).collect()
}
