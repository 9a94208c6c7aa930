//! Per-step validation.
//!
//! Each step's slice is checked by a plain function returning either `Ok(())`
//! or the full set of field-level messages for that step.

use std::fmt;

use crate::model::{BacklogInformation, OtherParameters, StudentDetails, SubjectPerformance};

/// Shown when any subject row is missing a required column.
pub const SUBJECT_ROWS_MESSAGE: &str =
    "Please fill in required fields (Subject Name, Code, and Teaching Faculty) for all subjects";

/// Shown when any backlog row is missing a required column.
pub const BACKLOG_ROWS_MESSAGE: &str =
    "Please fill in required fields (Subject Name with Code and Action Proposed) for all backlog entries";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Validation outcome for one step: inline field messages and/or a single
/// aggregate notice for row-based steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub fields: Vec<FieldError>,
    pub aggregate: Option<String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.aggregate.is_none()
    }

    pub fn field(&self, name: &str) -> Option<&FieldError> {
        self.fields.iter().find(|e| e.field == name)
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if let Some(ref aggregate) = self.aggregate {
            parts.push(aggregate.clone());
        }
        for error in &self.fields {
            parts.push(format!("{}: {}", error.field, error.message));
        }
        write!(f, "{}", parts.join("; "))
    }
}

pub fn validate_student_details(details: &StudentDetails) -> Result<(), ValidationErrors> {
    let required: [(&'static str, &str, &str); 9] = [
        ("studentName", &details.student_name, "Student name is required"),
        ("class", &details.class, "Class is required"),
        ("section", &details.section, "Section is required"),
        (
            "attendanceAsOnDate",
            &details.attendance_as_on_date,
            "Attendance as on date is required",
        ),
        ("currentCGPA", &details.current_cgpa, "Current CGPA is required"),
        ("mentoringPeriod", &details.mentoring_period, "Mentoring period is required"),
        ("mentorName", &details.mentor_name, "Mentor name is required"),
        ("mentorDesignation", &details.mentor_designation, "Designation is required"),
        ("mentorDepartment", &details.mentor_department, "Department is required"),
    ];

    let fields = required
        .into_iter()
        .filter(|(_, value, _)| value.is_empty())
        .map(|(field, _, message)| FieldError {
            field,
            message: message.to_string(),
        })
        .collect();

    ValidationErrors {
        fields,
        aggregate: None,
    }
    .into_result()
}

/// Every row needs a name, code and faculty. Failures are reported as one
/// aggregate notice, not per row.
pub fn validate_subjects(rows: &[SubjectPerformance]) -> Result<(), ValidationErrors> {
    let aggregate = if rows.is_empty() {
        Some("At least one subject is required".to_string())
    } else if !rows.iter().all(SubjectPerformance::has_required_fields) {
        Some(SUBJECT_ROWS_MESSAGE.to_string())
    } else {
        None
    };

    ValidationErrors {
        fields: Vec::new(),
        aggregate,
    }
    .into_result()
}

/// An empty backlog is valid.
pub fn validate_backlog(rows: &[BacklogInformation]) -> Result<(), ValidationErrors> {
    let aggregate = if rows.iter().all(BacklogInformation::has_required_fields) {
        None
    } else {
        Some(BACKLOG_ROWS_MESSAGE.to_string())
    };

    ValidationErrors {
        fields: Vec::new(),
        aggregate,
    }
    .into_result()
}

/// Other parameters have no required fields.
pub fn validate_other_parameters(_params: &OtherParameters) -> Result<(), ValidationErrors> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_details() -> StudentDetails {
        StudentDetails {
            student_name: "Asha Rao".to_string(),
            class: "B.Tech CSE".to_string(),
            section: "A".to_string(),
            attendance_as_on_date: "85% (15/11/2025)".to_string(),
            current_cgpa: "8.5".to_string(),
            mentoring_period: "Jul-Nov 2025".to_string(),
            mentor_name: "Dr. K. Rao".to_string(),
            mentor_designation: "Assistant Professor".to_string(),
            mentor_department: "CSE".to_string(),
        }
    }

    #[test]
    fn test_complete_student_details_pass() {
        assert!(validate_student_details(&complete_details()).is_ok());
    }

    #[test]
    fn test_each_missing_student_field_is_reported() {
        let mut details = complete_details();
        details.section.clear();
        details.current_cgpa.clear();

        let errors = validate_student_details(&details).unwrap_err();
        assert_eq!(errors.fields.len(), 2);
        assert_eq!(errors.field("section").unwrap().message, "Section is required");
        assert_eq!(errors.field("currentCGPA").unwrap().message, "Current CGPA is required");
        assert!(errors.aggregate.is_none());
    }

    #[test]
    fn test_empty_student_details_report_all_nine() {
        let errors = validate_student_details(&StudentDetails::default()).unwrap_err();
        assert_eq!(errors.fields.len(), 9);
    }

    #[test]
    fn test_subject_row_missing_code_is_aggregate() {
        let row = SubjectPerformance {
            subject_name: "Data Structures".to_string(),
            teaching_faculty: "Dr. X".to_string(),
            ..SubjectPerformance::blank()
        };
        let errors = validate_subjects(&[row]).unwrap_err();
        assert_eq!(errors.aggregate.as_deref(), Some(SUBJECT_ROWS_MESSAGE));
        assert!(errors.fields.is_empty());
    }

    #[test]
    fn test_no_subject_rows_is_rejected() {
        assert!(validate_subjects(&[]).is_err());
    }

    #[test]
    fn test_backlog_rules() {
        assert!(validate_backlog(&[]).is_ok());
        let incomplete = BacklogInformation {
            subject_name_with_code: "Maths CS101".to_string(),
            ..BacklogInformation::blank()
        };
        let errors = validate_backlog(&[incomplete]).unwrap_err();
        assert_eq!(errors.aggregate.as_deref(), Some(BACKLOG_ROWS_MESSAGE));
    }

    #[test]
    fn test_other_parameters_always_pass() {
        assert!(validate_other_parameters(&OtherParameters::default()).is_ok());
    }

    #[test]
    fn test_display_joins_messages() {
        let errors = ValidationErrors {
            fields: vec![FieldError {
                field: "class",
                message: "Class is required".to_string(),
            }],
            aggregate: Some("Fix the rows".to_string()),
        };
        assert_eq!(errors.to_string(), "Fix the rows; class: Class is required");
    }
}
