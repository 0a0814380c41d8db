//! CSV conversion for face descriptors and sliders.
//!
//! Fields are comma separated. A field wrapped in `"` may contain commas,
//! line breaks and doubled `""` quotes; unquoted fields are trimmed. The
//! writer quotes only fields that need it, so everything it writes reads
//! back unchanged.
//!
//! Two row layouts are supported:
//! - descriptor rows: `filename, SS x 50, SA x 30, TS x 50` (a row with 100
//!   values is read as `SS x 50, TS x 50`)
//! - slider rows: `label, GS x 50, TS x 50`

use fgbin_fg::{quantize_coefficients, DescriptorLayout, FaceDescriptor};

use crate::{Error, Result};

const SS: usize = DescriptorLayout::SYMMETRIC_SHAPE;
const SA: usize = DescriptorLayout::ASYMMETRIC_SHAPE;
const TS: usize = DescriptorLayout::SYMMETRIC_TEXTURE;

/// Join fields into one CSV line (without the line terminator).
pub fn format_row<S: AsRef<str>>(fields: &[S]) -> String {
    let mut line = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            line.push(',');
        }
        let field = field.as_ref();
        if field.contains([',', '"', '\n', '\r']) || field.trim() != field {
            line.push('"');
            line.push_str(&field.replace('"', "\"\""));
            line.push('"');
        } else {
            line.push_str(field);
        }
    }
    line
}

/// Whether a row is a column header rather than data.
pub fn is_header(fields: &[String]) -> bool {
    matches!(fields.first().map(String::as_str), Some("filename" | "label"))
}

/// Parse CSV text into data rows, each paired with the 1-based line number
/// it starts on.
///
/// Blank lines and header rows are skipped.
pub fn read_rows(text: &str) -> Vec<(usize, Vec<String>)> {
    let mut records = Records::default();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if records.in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    records.field.push('"');
                }
                '"' => records.in_quotes = false,
                _ => {
                    if c == '\n' {
                        records.line += 1;
                    }
                    records.field.push(c);
                }
            }
            continue;
        }

        match c {
            '"' if !records.quoted && records.field.trim().is_empty() => {
                records.field.clear();
                records.in_quotes = true;
                records.quoted = true;
            }
            ',' => records.end_field(),
            '\n' => {
                records.end_record();
                records.line += 1;
                records.start = records.line;
            }
            '\r' => {}
            _ => records.field.push(c),
        }
    }
    records.end_record();
    records.rows
}

/// Parser state for [`read_rows`].
struct Records {
    rows: Vec<(usize, Vec<String>)>,
    fields: Vec<String>,
    field: String,
    /// The current field opened with a quote.
    quoted: bool,
    in_quotes: bool,
    line: usize,
    start: usize,
}

impl Default for Records {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            fields: Vec::new(),
            field: String::new(),
            quoted: false,
            in_quotes: false,
            line: 1,
            start: 1,
        }
    }
}

impl Records {
    fn end_field(&mut self) {
        let field = std::mem::take(&mut self.field);
        let field = if self.quoted {
            field
        } else {
            field.trim().to_string()
        };
        self.fields.push(field);
        self.quoted = false;
    }

    fn end_record(&mut self) {
        if self.fields.is_empty() && !self.quoted && self.field.trim().is_empty() {
            self.field.clear();
            return;
        }
        self.end_field();
        let fields = std::mem::take(&mut self.fields);
        if !is_header(&fields) {
            self.rows.push((self.start, fields));
        }
    }
}

/// One face descriptor in CSV form.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptorRow {
    /// Output file name, taken from the first cell.
    pub name: String,
    pub symmetric_shape: Vec<i16>,
    pub asymmetric_shape: Vec<i16>,
    pub symmetric_texture: Vec<i16>,
}

impl DescriptorRow {
    /// Convert to a descriptor with the default layout.
    pub fn to_descriptor(&self) -> FaceDescriptor {
        FaceDescriptor::new(
            self.symmetric_shape.clone(),
            self.asymmetric_shape.clone(),
            self.symmetric_texture.clone(),
        )
    }
}

/// Build a descriptor row: `name`, then SS, SA and TS coefficients.
pub fn descriptor_row(name: &str, face: &FaceDescriptor) -> Vec<String> {
    std::iter::once(name.to_string())
        .chain(
            face.symmetric_shape
                .iter()
                .chain(&face.asymmetric_shape)
                .chain(&face.symmetric_texture)
                .map(i16::to_string),
        )
        .collect()
}

/// Parse a descriptor row.
///
/// Cells may hold floats; they are rounded and saturated to i16.
pub fn parse_descriptor_row(fields: &[String]) -> Result<DescriptorRow> {
    let (name, values) = split_row(fields)?;
    let values = quantize_coefficients(&values);

    let (ss, sa, ts) = match values.len() {
        n if n == SS + SA + TS => (
            &values[..SS],
            &values[SS..SS + SA],
            &values[SS + SA..],
        ),
        n if n == SS + TS => (&values[..SS], &values[..0], &values[SS..]),
        actual => {
            return Err(Error::RowLength {
                expected: "130 or 100",
                actual,
            })
        }
    };

    Ok(DescriptorRow {
        name,
        symmetric_shape: ss.to_vec(),
        asymmetric_shape: sa.to_vec(),
        symmetric_texture: ts.to_vec(),
    })
}

/// One shape-and-texture slider pair in CSV form.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderRow {
    pub label: String,
    pub geometry: Vec<f64>,
    pub texture: Vec<f64>,
}

/// Build a slider row: `label`, then GS and TS weights.
pub fn slider_row(label: &str, geometry: &[f32], texture: &[f32]) -> Vec<String> {
    std::iter::once(label.to_string())
        .chain(geometry.iter().chain(texture).map(f32::to_string))
        .collect()
}

/// Parse a slider row of exactly 50 GS and 50 TS weights.
pub fn parse_slider_row(fields: &[String]) -> Result<SliderRow> {
    let (label, values) = split_row(fields)?;
    if values.len() != SS + TS {
        return Err(Error::RowLength {
            expected: "100",
            actual: values.len(),
        });
    }
    let texture = values[SS..].to_vec();
    let mut geometry = values;
    geometry.truncate(SS);

    Ok(SliderRow {
        label,
        geometry,
        texture,
    })
}

fn split_row(fields: &[String]) -> Result<(String, Vec<f64>)> {
    let (name, cells) = fields.split_first().ok_or(Error::EmptyRow)?;
    let values = cells
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            cell.trim().parse::<f64>().map_err(|_| Error::InvalidNumber {
                column: i + 2,
                value: cell.clone(),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok((name.clone(), values))
}
