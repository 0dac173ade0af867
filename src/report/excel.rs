//! Excel rendering of the spreadsheet view
//!
//! Pure presentation: paints an already-assembled [`SheetView`] into an
//! in-memory `.xlsx` workbook. Row fills follow the row's [`Tone`], the
//! classic Excel good/bad/neutral palette.

use chrono::NaiveDate;
use rust_xlsxwriter::{Color, Format, Workbook};

use crate::error::RenderError;

use super::{SheetView, Tone};

const SHEET_NAME: &str = "Analyse";

/// Green fill / dark green text, for rising keywords
const FILL_POSITIVE: (Color, Color) = (Color::RGB(0xC6EFCE), Color::RGB(0x00_6100));

/// Red fill / dark red text, for falling keywords
const FILL_NEGATIVE: (Color, Color) = (Color::RGB(0xFFC7CE), Color::RGB(0x9C_0006));

/// Light gray fill, for stable keywords
const FILL_NEUTRAL: (Color, Color) = (Color::RGB(0xF2F2F2), Color::RGB(0x3F_3F3F));

/// Export filename for a given run date
#[must_use]
pub fn filename(date: NaiveDate) -> String {
    format!(
        "Analyse_Secteurs_Comportement_{}.xlsx",
        date.format("%Y%m%d")
    )
}

/// Render the sheet view into xlsx bytes.
///
/// # Errors
///
/// Returns [`RenderError::Workbook`] when workbook assembly fails. This is
/// a run-level error distinct from fetch and aggregation failures.
pub fn render(view: &SheetView) -> Result<Vec<u8>, RenderError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let header_format = Format::new().set_bold();

    for (col, title) in view.header.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &header_format)?;
    }

    for (idx, row) in view.rows.iter().enumerate() {
        let (fill, font) = match row.tone {
            Tone::Positive => FILL_POSITIVE,
            Tone::Negative => FILL_NEGATIVE,
            Tone::Neutral => FILL_NEUTRAL,
        };
        let text_format = Format::new().set_background_color(fill).set_font_color(font);
        let number_format = Format::new()
            .set_background_color(fill)
            .set_font_color(font)
            .set_num_format("0.0");

        let r = (idx + 1) as u32;
        worksheet.write_string_with_format(r, 0, &row.sector, &text_format)?;
        worksheet.write_string_with_format(r, 1, &row.keyword, &text_format)?;
        worksheet.write_number_with_format(r, 2, row.average, &number_format)?;
        worksheet.write_number_with_format(r, 3, row.variation_pct, &number_format)?;
        worksheet.write_string_with_format(r, 4, row.interpretation.as_str(), &text_format)?;
    }

    // One blank row, then the sector lines and the global line
    let mut r = view.rows.len() as u32 + 2;
    for footer in &view.footers {
        worksheet.write_string(r, 0, footer)?;
        r += 1;
    }

    worksheet.set_column_width(0, 26)?;
    worksheet.set_column_width(1, 22)?;
    worksheet.set_column_width(3, 12)?;
    worksheet.set_column_width(4, 14)?;

    Ok(workbook.save_to_buffer()?)
}
