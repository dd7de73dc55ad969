//! First-sheet grid extraction for class lists exported by the digitization
//! platform (xlsx) or saved as csv.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use thiserror::Error;

pub type Grid = Vec<Vec<String>>;

const FALLBACK_SHEET: &str = "xl/worksheets/sheet1.xml";
/// Worksheet limits of the OOXML format: column XFD, row 1048576.
const MAX_COLUMNS: usize = 16_384;
const MAX_ROWS: usize = 1_048_576;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing workbook part: {0}")]
    MissingPart(String),

    #[error("cell reference out of range: {0}")]
    BadCellRef(String),

    #[error("unsupported file type: {0}")]
    UnsupportedFormat(String),
}

impl SheetError {
    pub fn code(&self) -> &'static str {
        match self {
            SheetError::Io(_) => "io_failed",
            SheetError::Zip(_)
            | SheetError::Xml(_)
            | SheetError::MissingPart(_)
            | SheetError::BadCellRef(_) => "bad_workbook",
            SheetError::Csv(_) => "bad_csv",
            SheetError::UnsupportedFormat(_) => "unsupported_format",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Xlsx,
    Csv,
    Text,
}

impl SourceKind {
    pub fn from_path(path: &Path) -> Result<Self, SheetError> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "xlsx" => Ok(SourceKind::Xlsx),
            "csv" => Ok(SourceKind::Csv),
            "txt" => Ok(SourceKind::Text),
            _ => Err(SheetError::UnsupportedFormat(if ext.is_empty() {
                path.to_string_lossy().to_string()
            } else {
                ext
            })),
        }
    }
}

pub fn read_xlsx_file(path: &Path) -> Result<Grid, SheetError> {
    read_xlsx(File::open(path)?)
}

pub fn read_csv_file(path: &Path) -> Result<Grid, SheetError> {
    read_csv(File::open(path)?)
}

pub fn read_csv<R: Read>(reader: R) -> Result<Grid, SheetError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut grid = Grid::new();
    for record in rdr.records() {
        let record = record?;
        grid.push(record.iter().map(|c| c.to_string()).collect());
    }
    Ok(grid)
}

/// Reads the first worksheet of an OOXML workbook into a grid of display
/// strings. Cells absent from the sheet come back as empty strings.
pub fn read_xlsx<R: Read + Seek>(reader: R) -> Result<Grid, SheetError> {
    let mut archive = zip::ZipArchive::new(reader)?;
    let shared = read_shared_strings(&mut archive)?;
    let sheet_path = first_sheet_path(&mut archive)?;
    let file = archive
        .by_name(&sheet_path)
        .map_err(|_| SheetError::MissingPart(sheet_path.clone()))?;

    let mut xml = Reader::from_reader(BufReader::new(file));
    xml.trim_text(false);

    let mut buf = Vec::new();
    let mut grid = Grid::new();
    let mut row_idx: usize = 0;
    let mut next_col: usize = 0;
    let mut cell: Option<PendingCell> = None;
    let mut in_value = false;
    let mut in_inline = false;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"row" => {
                    row_idx = row_number(&e)?.unwrap_or(row_idx + 1).saturating_sub(1);
                    next_col = 0;
                }
                b"c" => {
                    let pending = PendingCell::from_start(&e, next_col)?;
                    next_col = pending.col + 1;
                    cell = Some(pending);
                }
                b"v" => in_value = true,
                b"t" if cell.is_some() => in_inline = true,
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"row" => {
                    row_idx = row_number(&e)?.unwrap_or(row_idx + 1);
                }
                b"c" => {
                    next_col = PendingCell::from_start(&e, next_col)?.col + 1;
                }
                _ => {}
            },
            Event::Text(e) if in_value || in_inline => {
                if let Some(c) = cell.as_mut() {
                    c.raw.push_str(&e.unescape()?);
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"v" => in_value = false,
                b"t" => in_inline = false,
                b"c" => {
                    if let Some(c) = cell.take() {
                        let value = c.resolve(&shared);
                        place(&mut grid, row_idx, c.col, value)?;
                    }
                }
                b"row" => row_idx += 1,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(grid)
}

struct PendingCell {
    col: usize,
    kind: Option<String>,
    raw: String,
}

impl PendingCell {
    fn from_start(e: &BytesStart, fallback_col: usize) -> Result<Self, SheetError> {
        let mut col = fallback_col;
        let mut kind = None;
        for attr in e.attributes().flatten() {
            let Ok(value) = attr.unescape_value() else {
                continue;
            };
            match attr.key.as_ref() {
                b"r" => {
                    if let Some(c) = column_index(&value)? {
                        col = c;
                    }
                }
                b"t" => kind = Some(value.to_string()),
                _ => {}
            }
        }
        Ok(Self {
            col,
            kind,
            raw: String::new(),
        })
    }

    fn resolve(&self, shared: &[String]) -> String {
        match self.kind.as_deref() {
            Some("s") => self
                .raw
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|i| shared.get(i).cloned())
                .unwrap_or_default(),
            Some("b") => match self.raw.trim() {
                "1" => "TRUE".to_string(),
                _ => "FALSE".to_string(),
            },
            Some("str") | Some("inlineStr") | Some("e") => self.raw.clone(),
            _ => format_number(&self.raw),
        }
    }
}

fn place(grid: &mut Grid, row: usize, col: usize, value: String) -> Result<(), SheetError> {
    if row >= MAX_ROWS || col >= MAX_COLUMNS {
        return Err(SheetError::BadCellRef(format!("row {} column {}", row + 1, col + 1)));
    }
    if grid.len() <= row {
        grid.resize_with(row + 1, Vec::new);
    }
    let cells = &mut grid[row];
    if cells.len() <= col {
        cells.resize(col + 1, String::new());
    }
    cells[col] = value;
    Ok(())
}

fn row_number(e: &BytesStart) -> Result<Option<usize>, SheetError> {
    let Some(raw) = e
        .attributes()
        .flatten()
        .find(|a| a.key.as_ref() == b"r")
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
    else {
        return Ok(None);
    };
    match raw.parse::<usize>() {
        Ok(n) if n > MAX_ROWS => Err(SheetError::BadCellRef(raw)),
        Ok(n) => Ok(Some(n)),
        Err(_) => Ok(None),
    }
}

/// "B9" -> 1, "AA3" -> 26. References past column XFD are rejected.
fn column_index(cell_ref: &str) -> Result<Option<usize>, SheetError> {
    let letters = cell_ref
        .bytes()
        .take_while(|b| b.is_ascii_alphabetic())
        .map(|b| b.to_ascii_uppercase());
    let mut n: usize = 0;
    for b in letters {
        n = n
            .checked_mul(26)
            .and_then(|v| v.checked_add(usize::from(b - b'A' + 1)))
            .filter(|v| *v <= MAX_COLUMNS)
            .ok_or_else(|| SheetError::BadCellRef(cell_ref.to_string()))?;
    }
    Ok(n.checked_sub(1))
}

/// Integral numbers lose their fractional part, like the spreadsheet UI shows them.
fn format_number(raw: &str) -> String {
    let t = raw.trim();
    match t.parse::<f64>() {
        Ok(v) if v.fract() == 0.0 && v.abs() < 1e15 => format!("{}", v as i64),
        _ => t.to_string(),
    }
}

fn read_shared_strings<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
) -> Result<Vec<String>, SheetError> {
    let mut strings = Vec::new();
    let Ok(file) = archive.by_name("xl/sharedStrings.xml") else {
        return Ok(strings);
    };

    let mut xml = Reader::from_reader(BufReader::new(file));
    xml.trim_text(false);
    let mut buf = Vec::new();
    let mut current = String::new();
    let mut in_si = false;
    let mut in_t = false;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"si" => {
                    in_si = true;
                    current.clear();
                }
                b"t" if in_si => in_t = true,
                _ => {}
            },
            Event::Empty(e) if e.name().as_ref() == b"si" => strings.push(String::new()),
            Event::Text(e) if in_t => current.push_str(&e.unescape()?),
            Event::End(e) => match e.name().as_ref() {
                b"si" => {
                    strings.push(std::mem::take(&mut current));
                    in_si = false;
                }
                b"t" => in_t = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(strings)
}

/// Resolves the first `<sheet>` of `xl/workbook.xml` through the workbook
/// relationships, falling back to the conventional sheet1 path.
fn first_sheet_path<R: Read + Seek>(archive: &mut zip::ZipArchive<R>) -> Result<String, SheetError> {
    let Some(rel_id) = first_sheet_rel_id(archive)? else {
        return Ok(FALLBACK_SHEET.to_string());
    };
    let targets = workbook_rels(archive)?;
    Ok(targets
        .get(&rel_id)
        .map(|t| normalize_target(t))
        .unwrap_or_else(|| FALLBACK_SHEET.to_string()))
}

fn first_sheet_rel_id<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
) -> Result<Option<String>, SheetError> {
    let Ok(file) = archive.by_name("xl/workbook.xml") else {
        return Ok(None);
    };
    let mut xml = Reader::from_reader(BufReader::new(file));
    let mut buf = Vec::new();
    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sheet" => {
                let id = e
                    .attributes()
                    .flatten()
                    .find(|a| a.key.as_ref() == b"r:id")
                    .and_then(|a| a.unescape_value().ok())
                    .map(|v| v.to_string());
                return Ok(id);
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
        buf.clear();
    }
}

fn workbook_rels<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
) -> Result<HashMap<String, String>, SheetError> {
    let mut out = HashMap::new();
    let Ok(file) = archive.by_name("xl/_rels/workbook.xml.rels") else {
        return Ok(out);
    };
    let mut xml = Reader::from_reader(BufReader::new(file));
    let mut buf = Vec::new();
    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let mut id = None;
                let mut target = None;
                for attr in e.attributes().flatten() {
                    let Ok(value) = attr.unescape_value() else {
                        continue;
                    };
                    match attr.key.as_ref() {
                        b"Id" => id = Some(value.to_string()),
                        b"Target" => target = Some(value.to_string()),
                        _ => {}
                    }
                }
                if let (Some(id), Some(target)) = (id, target) {
                    out.insert(id, target);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(out)
}

fn normalize_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{}", target),
    }
}
