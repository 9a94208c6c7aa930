// mentoring-report: Step-by-step student mentoring report with PDF export

use std::fs;
use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mentoring_report::assets::AssetSources;
use mentoring_report::layout::{DEFAULT_INSTITUTION, DEFAULT_REPORT_TITLE};
use mentoring_report::model::{BacklogField, SubjectField};
use mentoring_report::preview::render_preview;
use mentoring_report::{
    export_report, AppError, ExportOptions, FileDraftStore, Step, StepData, Wizard, WizardError,
};

// ============================================================================
// CLI
// ============================================================================

#[derive(Parser, Debug)]
#[command(author, version, about = "Collect a student mentoring report and export it as a PDF")]
struct Args {
    /// Directory holding the saved draft
    #[arg(long, global = true, env = "MENTORING_REPORT_DRAFT_DIR")]
    draft_dir: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the current step and what has been collected so far
    Status,
    /// Submit the current step's data from a JSON file and advance
    Submit {
        /// JSON object (or array, for the subject and backlog steps)
        file: PathBuf,
    },
    /// Go back one step without validating
    Back,
    /// From review, return to the first step keeping all data
    Edit,
    /// Discard the draft and start a new report
    New,
    /// Append a blank subject row
    AddSubject,
    /// Remove a subject row (the last row is kept)
    RemoveSubject { id: String },
    /// Set one field of a subject row
    SetSubject {
        id: String,
        field: SubjectField,
        value: String,
    },
    /// Append a blank backlog row
    AddBacklog,
    /// Remove a backlog row
    RemoveBacklog { id: String },
    /// Set one field of a backlog row
    SetBacklog {
        id: String,
        field: BacklogField,
        value: String,
    },
    /// Print the report as text tables
    Preview {
        #[command(flatten)]
        heading: Heading,
    },
    /// Write the report as a PDF
    Export {
        /// Output filename (defaults to Mentoring_Report_<student name>.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Institution logo (file path or URL), centred above the heading
        #[arg(long)]
        logo: Option<String>,

        /// Footer banner (file path or URL), stamped on every page
        #[arg(long)]
        footer: Option<String>,

        /// Student photo (file path or URL), beside the student details
        #[arg(long)]
        photo: Option<String>,

        /// Add the Mentor/HOD/Dean/Principal signature grid
        #[arg(long)]
        signatures: bool,

        #[command(flatten)]
        heading: Heading,
    },
}

#[derive(ClapArgs, Debug)]
struct Heading {
    /// Institution name on the first line of the heading
    #[arg(long, default_value = DEFAULT_INSTITUTION)]
    institution: String,

    /// Report title under the institution name
    #[arg(long, default_value = DEFAULT_REPORT_TITLE)]
    title: String,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() {
    let args = Args::parse();
    init_logging(args.quiet);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<(), AppError> {
    let dir = args.draft_dir.unwrap_or_else(FileDraftStore::default_dir);
    let mut wizard = Wizard::open(FileDraftStore::new(dir));

    match args.command {
        Command::Status => print_status(&wizard),
        Command::Submit { file } => {
            let json = fs::read_to_string(&file)?;
            let step = wizard.current_step();
            let data = StepData::from_json(step, &json)?;
            let next = wizard.submit(data).map_err(report_validation)?;
            println!("✓ {} saved", step.label());
            println!("  Now on: {}", next);
        }
        Command::Back => {
            let step = wizard.back();
            println!("✓ Now on: {}", step);
        }
        Command::Edit => {
            let step = wizard.edit()?;
            println!("✓ Editing from: {}", step);
        }
        Command::New => {
            wizard.new_entry()?;
            println!("✓ Started a new report");
        }
        Command::AddSubject => {
            let id = wizard.add_subject();
            println!("✓ Added subject row {}", id);
        }
        Command::RemoveSubject { id } => {
            if wizard.remove_subject(&id) {
                println!("✓ Removed subject row {}", id);
            } else if wizard.state().subject_performance.len() <= 1 {
                println!("  At least one subject row is kept");
            } else {
                return Err(WizardError::UnknownRow(id).into());
            }
        }
        Command::SetSubject { id, field, value } => {
            wizard.update_subject(&id, field, value)?;
            println!("✓ Updated subject row {}", id);
        }
        Command::AddBacklog => {
            let id = wizard.add_backlog();
            println!("✓ Added backlog row {}", id);
        }
        Command::RemoveBacklog { id } => {
            if !wizard.remove_backlog(&id) {
                return Err(WizardError::UnknownRow(id).into());
            }
            println!("✓ Removed backlog row {}", id);
        }
        Command::SetBacklog { id, field, value } => {
            wizard.update_backlog(&id, field, value)?;
            println!("✓ Updated backlog row {}", id);
        }
        Command::Preview { heading } => {
            require_review(wizard.current_step())?;
            let report = wizard.report()?;
            print!("{}", render_preview(&report, &heading.institution, &heading.title));
        }
        Command::Export {
            output,
            logo,
            footer,
            photo,
            signatures,
            heading,
        } => {
            require_review(wizard.current_step())?;
            let report = wizard.report()?;
            let options = ExportOptions {
                output,
                sources: AssetSources { logo, footer, photo },
                signatures,
                institution: heading.institution,
                report_title: heading.title,
            };
            let summary = export_report(&report, &options)?;

            println!("✓ Generated: {}", summary.path.display());
            println!("  Student: {}", report.student_details.student_name);
            println!("  Pages: {}", summary.pages);
        }
    }

    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

fn require_review(step: Step) -> Result<(), WizardError> {
    if step == Step::Review {
        Ok(())
    } else {
        Err(WizardError::NotOnReview(step))
    }
}

/// Print each field message on its own line before failing.
fn report_validation(error: WizardError) -> WizardError {
    if let WizardError::Validation(ref errors) = error {
        if let Some(ref aggregate) = errors.aggregate {
            eprintln!("  {}", aggregate);
        }
        for field in &errors.fields {
            eprintln!("  {}: {}", field.field, field.message);
        }
    }
    error
}

fn print_status<S: mentoring_report::DraftStore>(wizard: &Wizard<S>) {
    let current = wizard.current_step();
    for step in Step::ALL {
        let marker = if step == current {
            "→"
        } else if step < current {
            "✓"
        } else {
            " "
        };
        println!("{} {}", marker, step);
    }

    let state = wizard.state();
    if let Some(ref details) = state.student_details {
        println!("  Student: {} ({} {})", details.student_name, details.class, details.section);
    }
    println!("  Subjects: {}", state.subject_performance.len());
    for row in &state.subject_performance {
        println!("    {} {} {}", row.id, row.subject_code, row.subject_name);
    }
    println!("  Backlogs: {}", state.backlog_information.len());
    for row in &state.backlog_information {
        println!("    {} {}", row.id, row.subject_name_with_code);
    }
}
