//! Document layout engine.
//!
//! Turns a `MentoringReport` into a `DocumentPlan`: a list of pages, each a
//! list of positioned drawing elements. Layout works top-down in millimetres
//! from the top-left corner of an A4 page; the PDF renderer flips the axis.
//!
//! A single cursor `y` moves down the page. Before a section title is drawn
//! the cursor is checked against `PAGE_BREAK_THRESHOLD_MM` and against the
//! room the title, the table header and its first row need together. The
//! subject table always starts on a fresh page, and so does whatever follows
//! it. Decorators registered on the
//! `DocumentBuilder` run for every page it creates, including pages added
//! by the table primitive, which is how the footer banner reaches every page.

pub mod table;
pub mod text;

use tracing::debug;

use crate::model::MentoringReport;
use crate::sections::{report_sections, ReportSection, SectionKind};

use self::table::{draw_table, leading_height, TableSpec, TableStyle};
use self::text::text_width_mm;

// ============================================================================
// Constants
// ============================================================================

/// A4 dimensions in mm
pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;

/// Margins
pub const TOP_MARGIN_MM: f32 = 20.0;
pub const SIDE_MARGIN_MM: f32 = 14.0;
pub const BOTTOM_MARGIN_MM: f32 = 15.0;

/// Cursor position past which a new section starts on a new page
pub const PAGE_BREAK_THRESHOLD_MM: f32 = 250.0;

/// Space after a table and between a section title and its table
const SECTION_GAP_MM: f32 = 10.0;
const TITLE_GAP_MM: f32 = 5.0;

/// Header block
const LOGO_SIZE_MM: f32 = 30.0;
const LOGO_ADVANCE_MM: f32 = 35.0;

/// Footer banner, full width, flush with the bottom edge
const FOOTER_HEIGHT_MM: f32 = 8.0;

/// Student photo beside the student details table
const PHOTO_WIDTH_MM: f32 = 35.0;
const PHOTO_HEIGHT_MM: f32 = 45.0;
const PHOTO_GAP_MM: f32 = 4.0;

/// Signature grid
const SIGNATURE_BLOCK_HEIGHT_MM: f32 = 60.0;
const SIGNATURE_ROW_SPACING_MM: f32 = 25.0;
const SIGNATURE_RULE_WIDTH_MM: f32 = 60.0;
const SIGNATURE_RIGHT_COLUMN_X: f32 = 115.0;

/// Font sizes in points
const INSTITUTION_FONT_SIZE: f32 = 16.0;
const REPORT_TITLE_FONT_SIZE: f32 = 12.0;
const DEPARTMENT_FONT_SIZE: f32 = 10.0;
const SECTION_TITLE_FONT_SIZE: f32 = 11.0;
const SIGNATURE_FONT_SIZE: f32 = 10.0;

pub const DEFAULT_INSTITUTION: &str = "Navodaya Institute of Technology (Autonomous)";
pub const DEFAULT_REPORT_TITLE: &str = "Students Mentoring Report";

/// Subject table column widths, in declaration order of the subject fields
const SUBJECT_COLUMN_WIDTHS: [f32; 9] = [20.0, 15.0, 20.0, 22.0, 18.0, 15.0, 22.0, 30.0, 20.0];
const BACKLOG_COLUMN_WIDTHS: [f32; 3] = [20.0, 70.0, 90.0];
const OTHER_PARAMETER_COLUMN_WIDTHS: [f32; 2] = [60.0, 120.0];

// ============================================================================
// Plan Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// RGB colour, components in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shade {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Shade {
    pub const BLACK: Shade = Shade { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Shade = Shade { r: 1.0, g: 1.0, b: 1.0 };
    /// Table header fill, RGB(33, 91, 145)
    pub const HEADER: Shade = Shade {
        r: 33.0 / 255.0,
        g: 91.0 / 255.0,
        b: 145.0 / 255.0,
    };
    pub const GRID: Shade = Shade { r: 0.78, g: 0.78, b: 0.78 };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlot {
    Logo,
    Footer,
    Photo,
}

/// A drawing instruction. Coordinates are mm from the top-left corner;
/// text `y` is the baseline, box `y` is the top edge.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        weight: FontWeight,
        color: Shade,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Shade>,
        /// Outline colour and thickness in points
        stroke: Option<(Shade, f32)>,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        thickness: f32,
    },
    Image {
        slot: ImageSlot,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PagePlan {
    pub elements: Vec<Element>,
}

impl PagePlan {
    pub fn has_image(&self, slot: ImageSlot) -> bool {
        self.elements
            .iter()
            .any(|e| matches!(e, Element::Image { slot: s, .. } if *s == slot))
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.elements
            .iter()
            .any(|e| matches!(e, Element::Text { text, .. } if text == needle))
    }
}

/// Where a section landed and how many body rows its table has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionRecord {
    pub kind: SectionKind,
    /// Zero-based page the section title is on.
    pub page: usize,
    pub rows: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentPlan {
    pub pages: Vec<PagePlan>,
    pub sections: Vec<SectionRecord>,
}

impl DocumentPlan {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn section(&self, kind: SectionKind) -> Option<&SectionRecord> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}

// ============================================================================
// Document Builder
// ============================================================================

/// Runs on every page as soon as the page exists.
pub trait PageDecorator {
    fn decorate(&self, page: &mut PagePlan);
}

/// Footer image stamped across the bottom edge of a page.
pub struct FooterBanner;

impl PageDecorator for FooterBanner {
    fn decorate(&self, page: &mut PagePlan) {
        page.elements.push(Element::Image {
            slot: ImageSlot::Footer,
            x: 0.0,
            y: PAGE_HEIGHT_MM - FOOTER_HEIGHT_MM,
            width: PAGE_WIDTH_MM,
            height: FOOTER_HEIGHT_MM,
        });
    }
}

/// Accumulates pages. Elements go onto the most recent page.
pub struct DocumentBuilder {
    pages: Vec<PagePlan>,
    decorators: Vec<Box<dyn PageDecorator>>,
}

impl DocumentBuilder {
    /// Start a document with one page, decorated.
    pub fn new(decorators: Vec<Box<dyn PageDecorator>>) -> Self {
        let mut builder = Self {
            pages: Vec::new(),
            decorators,
        };
        builder.add_page();
        builder
    }

    /// Append a page, run the decorators on it, and return its index.
    pub fn add_page(&mut self) -> usize {
        let mut page = PagePlan::default();
        for decorator in &self.decorators {
            decorator.decorate(&mut page);
        }
        self.pages.push(page);
        self.pages.len() - 1
    }

    pub fn push(&mut self, element: Element) {
        if let Some(page) = self.pages.last_mut() {
            page.elements.push(element);
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn current_page(&self) -> usize {
        self.pages.len().saturating_sub(1)
    }

    pub fn page(&self, index: usize) -> &PagePlan {
        &self.pages[index]
    }

    pub fn finish(self, sections: Vec<SectionRecord>) -> DocumentPlan {
        DocumentPlan {
            pages: self.pages,
            sections,
        }
    }
}

// ============================================================================
// Layout
// ============================================================================

/// Everything besides the report that affects layout. Image flags say
/// whether the payload is available; missing images are simply not placed.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    pub institution: String,
    pub report_title: String,
    pub logo: bool,
    pub footer: bool,
    pub photo: bool,
    pub signatures: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            institution: DEFAULT_INSTITUTION.to_string(),
            report_title: DEFAULT_REPORT_TITLE.to_string(),
            logo: false,
            footer: false,
            photo: false,
            signatures: false,
        }
    }
}

pub fn layout_report(report: &MentoringReport, options: &LayoutOptions) -> DocumentPlan {
    let mut decorators: Vec<Box<dyn PageDecorator>> = Vec::new();
    if options.footer {
        decorators.push(Box::new(FooterBanner));
    }
    let mut doc = DocumentBuilder::new(decorators);
    let mut records = Vec::new();

    let mut y = draw_header(&mut doc, report, options);

    let page_bottom = PAGE_HEIGHT_MM - BOTTOM_MARGIN_MM;
    let mut after_subjects = false;

    for section in report_sections(report) {
        let with_photo = section.kind == SectionKind::StudentDetails && options.photo;
        let right_margin = if with_photo {
            SIDE_MARGIN_MM + PHOTO_WIDTH_MM + PHOTO_GAP_MM
        } else {
            SIDE_MARGIN_MM
        };
        let spec = table_spec(&section, right_margin);

        if section.kind == SectionKind::SubjectPerformance || after_subjects {
            // The wide table never shares a page with the sections around it.
            doc.add_page();
            y = TOP_MARGIN_MM;
        } else if y > PAGE_BREAK_THRESHOLD_MM || y + TITLE_GAP_MM + leading_height(&spec) > page_bottom {
            doc.add_page();
            y = TOP_MARGIN_MM;
            debug!("Page break before {}", section.title());
        }
        after_subjects = section.kind == SectionKind::SubjectPerformance;

        let page = doc.current_page();
        draw_section_title(&mut doc, section.title(), y);
        y += TITLE_GAP_MM;

        let mut photo_bottom = None;
        if with_photo {
            doc.push(Element::Image {
                slot: ImageSlot::Photo,
                x: PAGE_WIDTH_MM - SIDE_MARGIN_MM - PHOTO_WIDTH_MM,
                y,
                width: PHOTO_WIDTH_MM,
                height: PHOTO_HEIGHT_MM,
            });
            photo_bottom = Some(y + PHOTO_HEIGHT_MM);
        }

        let outcome = draw_table(&mut doc, y, &spec);
        records.push(SectionRecord {
            kind: section.kind,
            page,
            rows: outcome.rows,
        });

        y = match photo_bottom {
            Some(bottom) if outcome.pages == 1 => outcome.final_y.max(bottom),
            _ => outcome.final_y,
        } + SECTION_GAP_MM;
    }

    if options.signatures {
        draw_signatures(&mut doc, y);
    }

    let plan = doc.finish(records);
    debug!("Laid out {} page(s)", plan.page_count());
    plan
}

fn draw_header(doc: &mut DocumentBuilder, report: &MentoringReport, options: &LayoutOptions) -> f32 {
    let mut y = TOP_MARGIN_MM;

    if options.logo {
        doc.push(Element::Image {
            slot: ImageSlot::Logo,
            x: PAGE_WIDTH_MM / 2.0 - LOGO_SIZE_MM / 2.0,
            y,
            width: LOGO_SIZE_MM,
            height: LOGO_SIZE_MM,
        });
        y += LOGO_ADVANCE_MM;
    }

    doc.push(centered(&options.institution, INSTITUTION_FONT_SIZE, FontWeight::Bold, y));
    y += 7.0;

    doc.push(centered(&options.report_title, REPORT_TITLE_FONT_SIZE, FontWeight::Bold, y));
    y += 10.0;

    let department = format!("Department: {}", report.student_details.mentor_department);
    doc.push(centered(&department, DEPARTMENT_FONT_SIZE, FontWeight::Regular, y));
    y + 12.0
}

fn centered(text: &str, size: f32, weight: FontWeight, y: f32) -> Element {
    let width = text_width_mm(text, size, weight);
    Element::Text {
        text: text.to_string(),
        x: ((PAGE_WIDTH_MM - width) / 2.0).max(0.0),
        y,
        size,
        weight,
        color: Shade::BLACK,
    }
}

fn draw_section_title(doc: &mut DocumentBuilder, title: &str, y: f32) {
    doc.push(Element::Text {
        text: title.to_string(),
        x: SIDE_MARGIN_MM,
        y,
        size: SECTION_TITLE_FONT_SIZE,
        weight: FontWeight::Bold,
        color: Shade::BLACK,
    });
}

fn table_spec(section: &ReportSection, right_margin: f32) -> TableSpec {
    let (column_widths, style) = match section.kind {
        SectionKind::StudentDetails | SectionKind::MentorDetails => {
            let available = PAGE_WIDTH_MM - SIDE_MARGIN_MM - right_margin;
            (
                vec![available / 3.0, available * 2.0 / 3.0],
                TableStyle {
                    font_size: 9.0,
                    head_font_size: 10.0,
                    cell_padding: 1.76,
                },
            )
        }
        SectionKind::SubjectPerformance => (
            SUBJECT_COLUMN_WIDTHS.to_vec(),
            TableStyle {
                font_size: 7.0,
                head_font_size: 7.0,
                cell_padding: 2.0,
            },
        ),
        SectionKind::Backlog => (
            BACKLOG_COLUMN_WIDTHS.to_vec(),
            TableStyle {
                font_size: 9.0,
                head_font_size: 10.0,
                cell_padding: 3.0,
            },
        ),
        SectionKind::OtherParameters => (
            OTHER_PARAMETER_COLUMN_WIDTHS.to_vec(),
            TableStyle {
                font_size: 9.0,
                head_font_size: 10.0,
                cell_padding: 3.0,
            },
        ),
    };

    TableSpec {
        head: section.head.clone(),
        body: section.rows.clone(),
        column_widths,
        left: SIDE_MARGIN_MM,
        style,
    }
}

/// Mentor and HOD on the first row, Dean and Principal on the second.
fn draw_signatures(doc: &mut DocumentBuilder, start_y: f32) {
    let mut y = start_y;
    if y + SIGNATURE_BLOCK_HEIGHT_MM > PAGE_HEIGHT_MM - BOTTOM_MARGIN_MM {
        doc.add_page();
        y = TOP_MARGIN_MM;
        debug!("Page break before signatures");
    }

    let grid = [["Mentor", "HOD"], ["Dean", "Principal"]];
    for (row, labels) in grid.iter().enumerate() {
        let rule_y = y + 15.0 + row as f32 * SIGNATURE_ROW_SPACING_MM;
        for (label, x) in labels.iter().zip([SIDE_MARGIN_MM, SIGNATURE_RIGHT_COLUMN_X]) {
            doc.push(Element::Line {
                x1: x,
                y1: rule_y,
                x2: x + SIGNATURE_RULE_WIDTH_MM,
                y2: rule_y,
                thickness: 0.5,
            });
            doc.push(Element::Text {
                text: format!("Signature of {}", label),
                x,
                y: rule_y + 5.0,
                size: SIGNATURE_FONT_SIZE,
                weight: FontWeight::Regular,
                color: Shade::BLACK,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BacklogInformation, OtherParameters, StudentDetails, SubjectPerformance};

    fn scenario_report() -> MentoringReport {
        MentoringReport {
            student_details: StudentDetails {
                student_name: "Asha Rao".to_string(),
                class: "B.Tech CSE".to_string(),
                section: "A".to_string(),
                attendance_as_on_date: "85% (15/11/2025)".to_string(),
                current_cgpa: "8.5".to_string(),
                mentoring_period: "Jul–Nov 2025".to_string(),
                mentor_name: "Dr. K. Rao".to_string(),
                mentor_designation: "Assistant Professor".to_string(),
                mentor_department: "CSE".to_string(),
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

    fn backlog(n: usize) -> Vec<BacklogInformation> {
        (0..n)
            .map(|i| BacklogInformation {
                subject_name_with_code: format!("Subject {} SC{}", i, i),
                action_proposed: "Remedial classes".to_string(),
                ..BacklogInformation::blank()
            })
            .collect()
    }

    #[test]
    fn test_scenario_layout() {
        let plan = layout_report(&scenario_report(), &LayoutOptions::default());

        assert_eq!(plan.section(SectionKind::StudentDetails).unwrap().rows, 6);
        assert_eq!(plan.section(SectionKind::MentorDetails).unwrap().rows, 3);
        assert_eq!(plan.section(SectionKind::SubjectPerformance).unwrap().rows, 1);
        assert_eq!(plan.section(SectionKind::OtherParameters).unwrap().rows, 19);
        assert!(plan.section(SectionKind::Backlog).is_none());
        assert!(!plan.pages.iter().any(|p| p.contains_text("Backlog Information")));
    }

    #[test]
    fn test_header_on_first_page() {
        let plan = layout_report(&scenario_report(), &LayoutOptions::default());
        let first = &plan.pages[0];
        assert!(first.contains_text(DEFAULT_INSTITUTION));
        assert!(first.contains_text(DEFAULT_REPORT_TITLE));
        assert!(first.contains_text("Department: CSE"));
        assert!(!first.has_image(ImageSlot::Logo));
    }

    #[test]
    fn test_subject_table_starts_fresh_page() {
        let plan = layout_report(&scenario_report(), &LayoutOptions::default());
        let subjects = plan.section(SectionKind::SubjectPerformance).unwrap();
        let student = plan.section(SectionKind::StudentDetails).unwrap();
        assert_eq!(student.page, 0);
        assert_eq!(subjects.page, 1);
        assert!(!plan.pages[subjects.page].contains_text(DEFAULT_INSTITUTION));
        assert!(plan.pages[subjects.page].contains_text("Subject-wise Performance"));
        assert!(!plan.pages.iter().any(|p| p.contains_text("IA Subject-wise Performance")));
    }

    #[test]
    fn test_backlog_rows_numbered_in_order() {
        let mut report = scenario_report();
        report.backlog_information = backlog(4);
        let plan = layout_report(&report, &LayoutOptions::default());

        let record = plan.section(SectionKind::Backlog).unwrap();
        assert_eq!(record.rows, 4);
        let page = &plan.pages[record.page];
        for n in 1..=4 {
            assert!(page.contains_text(&n.to_string()), "missing row number {}", n);
        }
        assert!(!page.contains_text("5"));
    }

    #[test]
    fn test_footer_on_every_page() {
        let mut report = scenario_report();
        report.subject_performance = (0..40)
            .map(|i| SubjectPerformance {
                subject_name: format!("Subject {}", i),
                subject_code: format!("SC{}", i),
                teaching_faculty: "Dr. X".to_string(),
                mentor_remarks: "Regular follow-up with weekly assignments and lab review".to_string(),
                ..SubjectPerformance::blank()
            })
            .collect();
        let options = LayoutOptions {
            footer: true,
            ..LayoutOptions::default()
        };
        let plan = layout_report(&report, &options);

        assert!(plan.page_count() >= 3, "got {} pages", plan.page_count());
        for (i, page) in plan.pages.iter().enumerate() {
            assert!(page.has_image(ImageSlot::Footer), "page {} has no footer", i);
        }
    }

    #[test]
    fn test_no_footer_when_image_missing() {
        let plan = layout_report(&scenario_report(), &LayoutOptions::default());
        assert!(plan.pages.iter().all(|p| !p.has_image(ImageSlot::Footer)));
    }

    #[test]
    fn test_logo_pushes_header_down() {
        let with_logo = LayoutOptions {
            logo: true,
            ..LayoutOptions::default()
        };
        let plan = layout_report(&scenario_report(), &with_logo);
        assert!(plan.pages[0].has_image(ImageSlot::Logo));

        let title_y = |plan: &DocumentPlan| {
            plan.pages[0]
                .elements
                .iter()
                .find_map(|e| match e {
                    Element::Text { text, y, .. } if text == DEFAULT_INSTITUTION => Some(*y),
                    _ => None,
                })
                .unwrap()
        };
        let plain = layout_report(&scenario_report(), &LayoutOptions::default());
        assert!((title_y(&plan) - title_y(&plain) - LOGO_ADVANCE_MM).abs() < 0.001);
    }

    #[test]
    fn test_photo_narrows_student_table() {
        let options = LayoutOptions {
            photo: true,
            ..LayoutOptions::default()
        };
        let plan = layout_report(&scenario_report(), &options);
        let page = &plan.pages[0];
        assert!(page.has_image(ImageSlot::Photo));

        let (photo_x, photo_bottom) = page
            .elements
            .iter()
            .find_map(|e| match e {
                Element::Image { slot: ImageSlot::Photo, x, y, height, .. } => Some((*x, y + height)),
                _ => None,
            })
            .unwrap();
        // Student details rows start beside the photo; mentor rows start below it.
        let beside_photo: Vec<(f32, f32)> = page
            .elements
            .iter()
            .filter_map(|e| match e {
                Element::Rect { x, y, width, .. } if *y < photo_bottom => Some((*x, *width)),
                _ => None,
            })
            .collect();
        assert!(!beside_photo.is_empty());
        for (x, width) in beside_photo {
            assert!(x + width <= photo_x + 0.001);
        }
    }

    #[test]
    fn test_long_other_parameters_break_before_title() {
        let mut report = scenario_report();
        report.backlog_information = backlog(24);
        let plan = layout_report(&report, &LayoutOptions::default());

        let backlog = plan.section(SectionKind::Backlog).unwrap();
        let other = plan.section(SectionKind::OtherParameters).unwrap();
        assert!(other.page > backlog.page);
    }

    #[test]
    fn test_signature_grid() {
        let options = LayoutOptions {
            signatures: true,
            ..LayoutOptions::default()
        };
        let plan = layout_report(&scenario_report(), &options);
        let last = plan.pages.last().unwrap();
        for label in ["Mentor", "HOD", "Dean", "Principal"] {
            assert!(last.contains_text(&format!("Signature of {}", label)));
        }
        let rules = last
            .elements
            .iter()
            .filter(|e| matches!(e, Element::Line { .. }))
            .count();
        assert_eq!(rules, 4);
    }

    #[test]
    fn test_signatures_move_to_new_page_when_short_of_room() {
        let mut doc = DocumentBuilder::new(Vec::new());
        draw_signatures(&mut doc, PAGE_HEIGHT_MM - BOTTOM_MARGIN_MM - 20.0);
        assert_eq!(doc.page_count(), 2);
        assert!(doc.page(0).elements.is_empty());
    }

    fn head_cell(kind: SectionKind) -> &'static str {
        match kind {
            SectionKind::StudentDetails | SectionKind::MentorDetails => "Field",
            SectionKind::SubjectPerformance => "Subject",
            SectionKind::Backlog => "S.No",
            SectionKind::OtherParameters => "Parameter",
        }
    }

    #[test]
    fn test_section_title_shares_page_with_table_header() {
        // Backlog lengths walk the cursor through the region just above the
        // page-break threshold, where a tall first row no longer fits.
        for n in 1..=25 {
            let mut report = scenario_report();
            report.backlog_information = backlog(n);
            report.other_parameters.academic_track_sgpa = (1..=8)
                .map(|sem| format!("Semester {}: 8.{}", sem, sem))
                .collect::<Vec<_>>()
                .join("\n");
            let plan = layout_report(&report, &LayoutOptions::default());

            for record in &plan.sections {
                let page = &plan.pages[record.page];
                assert!(page.contains_text(record.kind.title()), "{} backlog rows", n);
                assert!(
                    page.contains_text(head_cell(record.kind)),
                    "{} header not on the title page with {} backlog rows",
                    record.kind.title(),
                    n
                );
            }
        }
    }

    #[test]
    fn test_section_after_subjects_starts_fresh_page() {
        let mut report = scenario_report();
        let plan = layout_report(&report, &LayoutOptions::default());
        let subjects = plan.section(SectionKind::SubjectPerformance).unwrap();
        let other = plan.section(SectionKind::OtherParameters).unwrap();
        assert_eq!(other.page, subjects.page + 1);

        report.backlog_information = backlog(2);
        let plan = layout_report(&report, &LayoutOptions::default());
        let subjects = plan.section(SectionKind::SubjectPerformance).unwrap();
        let backlog = plan.section(SectionKind::Backlog).unwrap();
        let other = plan.section(SectionKind::OtherParameters).unwrap();
        assert_eq!(backlog.page, subjects.page + 1);
        assert_eq!(other.page, backlog.page);
    }

    #[test]
    fn test_very_long_remarks_stay_inside_margins() {
        let mut report = scenario_report();
        report.subject_performance[0].mentor_remarks = "Regular follow-up ".repeat(110).trim().to_string();
        let options = LayoutOptions {
            footer: true,
            ..LayoutOptions::default()
        };
        let plan = layout_report(&report, &options);

        let page_bottom = PAGE_HEIGHT_MM - BOTTOM_MARGIN_MM + 0.001;
        let mut follow_ups = 0;
        for (i, page) in plan.pages.iter().enumerate() {
            assert!(page.has_image(ImageSlot::Footer), "page {} has no footer", i);
            for element in &page.elements {
                match element {
                    Element::Rect { y, height, .. } => {
                        assert!(y + height <= page_bottom, "page {} rect ends at {}", i, y + height)
                    }
                    Element::Text { text, y, .. } => {
                        assert!(*y <= page_bottom, "page {} text at {}", i, y);
                        follow_ups += text.matches("follow-up").count();
                    }
                    _ => {}
                }
            }
        }
        assert_eq!(follow_ups, 110);
    }
}
