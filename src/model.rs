//! Report data model.
//!
//! A mentoring report is made of four independently edited slices: student
//! details, subject performance rows, backlog rows, and other parameters.
//! Field names serialize in camelCase so a saved draft keeps the layout
//! `{studentDetails, subjectPerformance, backlogInformation, otherParameters, currentStep}`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generate an opaque identity key for a new row.
pub fn new_row_id() -> String {
    Uuid::new_v4().to_string()
}

// ============================================================================
// Student Details
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentDetails {
    pub student_name: String,
    pub class: String,
    pub section: String,
    pub attendance_as_on_date: String,
    #[serde(rename = "currentCGPA")]
    pub current_cgpa: String,
    pub mentoring_period: String,
    pub mentor_name: String,
    pub mentor_designation: String,
    pub mentor_department: String,
}

// ============================================================================
// Subject Performance
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubjectPerformance {
    pub id: String,
    pub subject_name: String,
    pub subject_code: String,
    pub teaching_faculty: String,
    pub weaknesses: String,
    pub classwork_marks: String,
    pub internal_marks: String,
    pub expected_outcome: String,
    pub mentor_remarks: String,
    pub current_status: String,
}

impl SubjectPerformance {
    /// An empty row with a fresh identity key.
    pub fn blank() -> Self {
        Self {
            id: new_row_id(),
            ..Default::default()
        }
    }

    pub fn set(&mut self, field: SubjectField, value: String) {
        let slot = match field {
            SubjectField::SubjectName => &mut self.subject_name,
            SubjectField::SubjectCode => &mut self.subject_code,
            SubjectField::TeachingFaculty => &mut self.teaching_faculty,
            SubjectField::Weaknesses => &mut self.weaknesses,
            SubjectField::ClassworkMarks => &mut self.classwork_marks,
            SubjectField::InternalMarks => &mut self.internal_marks,
            SubjectField::ExpectedOutcome => &mut self.expected_outcome,
            SubjectField::MentorRemarks => &mut self.mentor_remarks,
            SubjectField::CurrentStatus => &mut self.current_status,
        };
        *slot = value;
    }

    /// Row has every field required to pass the subject step.
    pub fn has_required_fields(&self) -> bool {
        !self.subject_name.is_empty()
            && !self.subject_code.is_empty()
            && !self.teaching_faculty.is_empty()
    }
}

/// Editable columns of a subject row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectField {
    SubjectName,
    SubjectCode,
    TeachingFaculty,
    Weaknesses,
    ClassworkMarks,
    InternalMarks,
    ExpectedOutcome,
    MentorRemarks,
    CurrentStatus,
}

impl FromStr for SubjectField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "subject-name" | "subjectName" => Ok(Self::SubjectName),
            "subject-code" | "subjectCode" => Ok(Self::SubjectCode),
            "teaching-faculty" | "teachingFaculty" => Ok(Self::TeachingFaculty),
            "weaknesses" => Ok(Self::Weaknesses),
            "classwork-marks" | "classworkMarks" => Ok(Self::ClassworkMarks),
            "internal-marks" | "internalMarks" => Ok(Self::InternalMarks),
            "expected-outcome" | "expectedOutcome" => Ok(Self::ExpectedOutcome),
            "mentor-remarks" | "mentorRemarks" => Ok(Self::MentorRemarks),
            "current-status" | "currentStatus" => Ok(Self::CurrentStatus),
            other => Err(format!("unknown subject field: {}", other)),
        }
    }
}

// ============================================================================
// Backlog Information
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BacklogInformation {
    pub id: String,
    pub subject_name_with_code: String,
    pub action_proposed: String,
}

impl BacklogInformation {
    pub fn blank() -> Self {
        Self {
            id: new_row_id(),
            ..Default::default()
        }
    }

    pub fn set(&mut self, field: BacklogField, value: String) {
        match field {
            BacklogField::SubjectNameWithCode => self.subject_name_with_code = value,
            BacklogField::ActionProposed => self.action_proposed = value,
        }
    }

    pub fn has_required_fields(&self) -> bool {
        !self.subject_name_with_code.is_empty() && !self.action_proposed.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BacklogField {
    SubjectNameWithCode,
    ActionProposed,
}

impl FromStr for BacklogField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "subject-name-with-code" | "subjectNameWithCode" => Ok(Self::SubjectNameWithCode),
            "action-proposed" | "actionProposed" => Ok(Self::ActionProposed),
            other => Err(format!("unknown backlog field: {}", other)),
        }
    }
}

// ============================================================================
// Other Parameters
// ============================================================================

/// Free-text tracking fields. All optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OtherParameters {
    #[serde(rename = "academicTrackSGPA")]
    pub academic_track_sgpa: String,
    pub attendance_alerts: String,
    pub technical_programming_skills: String,
    pub aptitude_skills: String,
    pub clubs_trainings: String,
    pub co_curricular_activities: String,
    pub extra_curricular_activities: String,
    pub ranks_awards_recognitions: String,
    pub internship_training_undertaken: String,
    pub internship_duration: String,
    pub internship_skills_gained: String,
    pub project_title: String,
    pub project_description: String,
    pub project_outcome: String,
    pub indisciplinary_activities: String,
    pub current_health_status: String,
    pub parent_visits: String,
    pub other_issues_resolved: String,
    pub student_grievances: String,
}

// ============================================================================
// Mentoring Report
// ============================================================================

/// A completed report, assembled from the four slices when it is previewed
/// or exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentoringReport {
    pub student_details: StudentDetails,
    pub subject_performance: Vec<SubjectPerformance>,
    #[serde(default)]
    pub backlog_information: Vec<BacklogInformation>,
    pub other_parameters: OtherParameters,
}

impl MentoringReport {
    /// Download name: `Mentoring_Report_<student name>.pdf`, whitespace runs
    /// replaced by a single underscore.
    pub fn file_name(&self) -> String {
        format!(
            "Mentoring_Report_{}.pdf",
            underscore_whitespace(&self.student_details.student_name)
        )
    }
}

fn underscore_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_space = false;
    for c in s.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

impl fmt::Display for MentoringReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {}), {} subject(s), {} backlog(s)",
            self.student_details.student_name,
            self.student_details.class,
            self.student_details.section,
            self.subject_performance.len(),
            self.backlog_information.len()
        )
    }
}
