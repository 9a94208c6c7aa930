//! Report export: load assets, lay out, render, write the file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use tracing::info;

use crate::assets::{AssetSources, ReportAssets};
use crate::error::AppError;
use crate::layout::{layout_report, LayoutOptions, DEFAULT_INSTITUTION, DEFAULT_REPORT_TITLE};
use crate::model::MentoringReport;
use crate::render::render_pdf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Defaults to `Mentoring_Report_<name>.pdf` in the working directory.
    pub output: Option<PathBuf>,
    pub sources: AssetSources,
    pub signatures: bool,
    pub institution: String,
    pub report_title: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            output: None,
            sources: AssetSources::default(),
            signatures: false,
            institution: DEFAULT_INSTITUTION.to_string(),
            report_title: DEFAULT_REPORT_TITLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub pages: usize,
}

pub fn export_report(report: &MentoringReport, options: &ExportOptions) -> Result<ExportSummary, AppError> {
    let assets = ReportAssets::load(&options.sources);

    // Only place images that actually loaded.
    let layout_options = LayoutOptions {
        institution: options.institution.clone(),
        report_title: options.report_title.clone(),
        logo: assets.logo.is_some(),
        footer: assets.footer.is_some(),
        photo: assets.photo.is_some(),
        signatures: options.signatures,
    };

    let plan = layout_report(report, &layout_options);
    let bytes = render_pdf(&plan, &assets, &options.report_title)?;

    let path = options
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(report.file_name()));
    let file = File::create(&path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&bytes)?;
    writer.flush()?;

    info!("Exported {} ({} page(s)) to {}", report, plan.page_count(), path.display());
    Ok(ExportSummary {
        path,
        pages: plan.page_count(),
    })
}
