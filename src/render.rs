//! PDF output for a laid-out document.
//!
//! Walks a `DocumentPlan` page by page and issues printpdf drawing calls.
//! Plan coordinates are top-down; PDF coordinates are bottom-up, so every
//! `y` is flipped against the page height here.

use std::io::BufWriter;

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::*;

use crate::assets::{EmbeddableImage, ReportAssets};
use crate::error::AppError;
use crate::layout::{DocumentPlan, Element, FontWeight, Shade, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};

/// Render the plan and return the PDF bytes.
pub fn render_pdf(plan: &DocumentPlan, assets: &ReportAssets, title: &str) -> Result<Vec<u8>, AppError> {
    let (doc, page1, layer1) = PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");

    let font_regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::PdfError(e.to_string()))?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| AppError::PdfError(e.to_string()))?;

    for (index, page) in plan.pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(page1).get_layer(layer1)
        } else {
            let (new_page, new_layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            doc.get_page(new_page).get_layer(new_layer)
        };

        for element in &page.elements {
            match element {
                Element::Text {
                    text,
                    x,
                    y,
                    size,
                    weight,
                    color,
                } => {
                    let font = match weight {
                        FontWeight::Regular => &font_regular,
                        FontWeight::Bold => &font_bold,
                    };
                    layer.set_fill_color(pdf_color(*color));
                    layer.use_text(text.as_str(), *size, Mm(*x), Mm(flip(*y)), font);
                }
                Element::Rect {
                    x,
                    y,
                    width,
                    height,
                    fill,
                    stroke,
                } => draw_rect(&layer, *x, *y, *width, *height, *fill, *stroke),
                Element::Line {
                    x1,
                    y1,
                    x2,
                    y2,
                    thickness,
                } => {
                    layer.set_outline_color(pdf_color(Shade::BLACK));
                    layer.set_outline_thickness(*thickness);
                    draw_line(&layer, *x1, flip(*y1), *x2, flip(*y2));
                }
                Element::Image {
                    slot,
                    x,
                    y,
                    width,
                    height,
                } => {
                    // Layout only places images the caller said were available.
                    if let Some(image) = assets.get(*slot) {
                        embed_image(&layer, image, *x, flip(*y + *height), *width, *height);
                    }
                }
            }
        }
    }

    let mut writer = BufWriter::new(Vec::new());
    doc.save(&mut writer)
        .map_err(|e| AppError::PdfError(e.to_string()))?;
    writer
        .into_inner()
        .map_err(|e| AppError::PdfError(e.to_string()))
}

fn flip(y: f32) -> f32 {
    PAGE_HEIGHT_MM - y
}

fn pdf_color(shade: Shade) -> Color {
    Color::Rgb(Rgb::new(shade.r, shade.g, shade.b, None))
}

fn draw_rect(
    layer: &PdfLayerReference,
    x: f32,
    top: f32,
    width: f32,
    height: f32,
    fill: Option<Shade>,
    stroke: Option<(Shade, f32)>,
) {
    let mode = match (fill, stroke) {
        (Some(_), Some(_)) => PaintMode::FillStroke,
        (Some(_), None) => PaintMode::Fill,
        (None, Some(_)) => PaintMode::Stroke,
        (None, None) => return,
    };
    if let Some(shade) = fill {
        layer.set_fill_color(pdf_color(shade));
    }
    if let Some((shade, thickness)) = stroke {
        layer.set_outline_color(pdf_color(shade));
        layer.set_outline_thickness(thickness);
    }

    let upper = flip(top);
    let lower = flip(top + height);
    let ring = vec![
        (Point::new(Mm(x), Mm(upper)), false),
        (Point::new(Mm(x + width), Mm(upper)), false),
        (Point::new(Mm(x + width), Mm(lower)), false),
        (Point::new(Mm(x), Mm(lower)), false),
    ];
    layer.add_polygon(Polygon {
        rings: vec![ring],
        mode,
        winding_order: WindingOrder::NonZero,
    });
}

fn draw_line(layer: &PdfLayerReference, x1: f32, y1: f32, x2: f32, y2: f32) {
    let points = vec![
        (Point::new(Mm(x1), Mm(y1)), false),
        (Point::new(Mm(x2), Mm(y2)), false),
    ];
    let line = Line {
        points,
        is_closed: false,
    };
    layer.add_line(line);
}

/// Place `image` with its lower-left corner at (`x`, `bottom`) stretched to
/// `width` × `height` mm.
fn embed_image(layer: &PdfLayerReference, image: &EmbeddableImage, x: f32, bottom: f32, width: f32, height: f32) {
    let pdf_image = Image::from(ImageXObject {
        width: Px(image.width_px as usize),
        height: Px(image.height_px as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: true,
        image_data: image.rgb.clone(),
        image_filter: None,
        clipping_bbox: None,
        smask: None,
    });

    // DPI = pixels / (mm / 25.4) fixes the width; scale the height to fit.
    let dpi = image.width_px as f32 / (width / 25.4);
    let natural_height = image.height_px as f32 / dpi * 25.4;
    let scale_y = if natural_height > 0.0 { height / natural_height } else { 1.0 };

    pdf_image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(x)),
            translate_y: Some(Mm(bottom)),
            dpi: Some(dpi),
            scale_y: Some(scale_y),
            ..Default::default()
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{layout_report, LayoutOptions};
    use crate::model::{MentoringReport, OtherParameters, StudentDetails, SubjectPerformance};

    fn report() -> MentoringReport {
        MentoringReport {
            student_details: StudentDetails {
                student_name: "Asha Rao".to_string(),
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

    fn image(w: u32, h: u32) -> EmbeddableImage {
        EmbeddableImage {
            width_px: w,
            height_px: h,
            rgb: vec![128; (w * h * 3) as usize],
        }
    }

    #[test]
    fn test_renders_pdf_bytes() {
        let plan = layout_report(&report(), &LayoutOptions::default());
        let bytes = render_pdf(&plan, &ReportAssets::default(), "Mentoring Report").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 1000);
    }

    #[test]
    fn test_renders_with_images() {
        let options = LayoutOptions {
            logo: true,
            footer: true,
            photo: true,
            signatures: true,
            ..LayoutOptions::default()
        };
        let assets = ReportAssets {
            logo: Some(image(16, 16)),
            footer: Some(image(200, 8)),
            photo: Some(image(35, 45)),
        };
        let plan = layout_report(&report(), &options);
        let with_images = render_pdf(&plan, &assets, "Mentoring Report").unwrap();
        let without = render_pdf(&plan, &ReportAssets::default(), "Mentoring Report").unwrap();
        assert!(with_images.len() > without.len());
    }
}
