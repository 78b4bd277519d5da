use crate::error::{PipelineError, Result};
use crate::structs::{EtlConfig, Record, SourceFormat, Table};
use csv::{ReaderBuilder, Trim};
use log::debug;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

const REQUIRED_COLUMNS: [&str; 3] = ["name", "height", "weight"];

/// Parses a single input file into rows.
pub type FormatReader = fn(&Path) -> Result<Table>;

/// Maps each source format to the reader that understands it.
pub fn reader_for(format: SourceFormat) -> FormatReader {
    match format {
        SourceFormat::DelimitedText => read_csv,
        SourceFormat::LineRecords => read_json_lines,
        SourceFormat::MarkupTree => read_xml,
    }
}

/// Reads every supported input file under `config.input_directory` into one table.
///
/// Files are read format by format (CSV, then JSON lines, then XML) and, within a
/// format, in file name order. The configured output file is never read back as
/// input, unlike a plain `*.csv` glob which would pick up a previous run's table.
/// The first file that fails to parse aborts the whole extraction.
///
/// # Errors
/// Returns the first I/O, parse, or malformed document error encountered.
pub fn extract(config: &EtlConfig) -> Result<Table> {
    let skip = fs::canonicalize(&config.output_path).ok();
    let mut table = Table::new();

    for format in SourceFormat::ALL {
        let read = reader_for(format);
        for path in discover_files(&config.input_directory, format, skip.as_deref())? {
            let rows = read(&path)?;
            debug!("Read {} rows from {}", rows.len(), path.display());
            table.extend(rows);
        }
    }

    Ok(table)
}

/// Lists the regular, non-hidden files in `dir` carrying the format's extension,
/// sorted by file name. `skip` is a canonical path to leave out.
pub fn discover_files(
    dir: &Path,
    format: SourceFormat,
    skip: Option<&Path>,
) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if file_name.starts_with('.') || !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(format.extension()) {
            continue;
        }
        if let Some(skip) = skip {
            if fs::canonicalize(&path).ok().as_deref() == Some(skip) {
                debug!("Skipping output file {}", path.display());
                continue;
            }
        }
        files.push(path);
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!(
        "Found {} .{} file(s) in {}",
        files.len(),
        format.extension(),
        dir.display()
    );
    Ok(files)
}

/// Reads a CSV file whose header names the `name`, `height` and `weight` columns
/// in any order. Additional columns are ignored.
pub fn read_csv(path: &Path) -> Result<Table> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| PipelineError::parse(path, e))?
        .clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(PipelineError::parse(
                path,
                format!("missing required column `{column}`"),
            ));
        }
    }

    let mut table = Table::new();
    for (i, row) in reader.deserialize::<Record>().enumerate() {
        let record = row.map_err(|e| PipelineError::parse(path, format!("row {}: {e}", i + 1)))?;
        table.push(record);
    }
    Ok(table)
}

/// Reads a file holding one JSON object per line. Blank lines are skipped.
pub fn read_json_lines(path: &Path) -> Result<Table> {
    let reader = BufReader::new(File::open(path)?);
    let mut table = Table::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| match e.kind() {
            std::io::ErrorKind::InvalidData => {
                PipelineError::parse(path, format!("line {}: {e}", i + 1))
            }
            _ => PipelineError::Io(e),
        })?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record: Record = serde_json::from_str(line)
            .map_err(|e| PipelineError::parse(path, format!("line {}: {e}", i + 1)))?;
        table.push(record);
    }
    Ok(table)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PersonField {
    Name,
    Height,
    Weight,
}

impl PersonField {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"name" => Some(PersonField::Name),
            b"height" => Some(PersonField::Height),
            b"weight" => Some(PersonField::Weight),
            _ => None,
        }
    }

    fn tag(self) -> &'static str {
        match self {
            PersonField::Name => "name",
            PersonField::Height => "height",
            PersonField::Weight => "weight",
        }
    }
}

/// Collects the sub-element text of one person element.
#[derive(Debug, Default)]
struct PersonBuilder {
    name: Option<String>,
    height: Option<String>,
    weight: Option<String>,
    current: Option<PersonField>,
    text: String,
}

impl PersonBuilder {
    fn slot(&mut self, field: PersonField) -> &mut Option<String> {
        match field {
            PersonField::Name => &mut self.name,
            PersonField::Height => &mut self.height,
            PersonField::Weight => &mut self.weight,
        }
    }

    // First occurrence wins; repeated sub-elements are ignored.
    fn start_field(&mut self, field: PersonField) {
        if self.slot(field).is_none() {
            self.current = Some(field);
            self.text.clear();
        }
    }

    fn push_text(&mut self, text: &str) {
        if self.current.is_some() {
            self.text.push_str(text);
        }
    }

    fn end_field(&mut self) {
        if let Some(field) = self.current.take() {
            let text = self.text.trim().to_string();
            *self.slot(field) = Some(text);
        }
    }

    fn build(self, path: &Path, index: usize) -> Result<Record> {
        let name = self
            .name
            .ok_or_else(|| PipelineError::parse(path, format!("person {index}: missing <name>")))?;
        let height = parse_number(path, index, PersonField::Height, self.height)?;
        let weight = parse_number(path, index, PersonField::Weight, self.weight)?;
        Ok(Record::new(name, height, weight))
    }
}

fn parse_number(
    path: &Path,
    index: usize,
    field: PersonField,
    value: Option<String>,
) -> Result<f64> {
    let tag = field.tag();
    let text = value
        .ok_or_else(|| PipelineError::parse(path, format!("person {index}: missing <{tag}>")))?;
    text.parse::<f64>().map_err(|e| {
        PipelineError::parse(
            path,
            format!("person {index}: <{tag}> value {text:?} is not a number: {e}"),
        )
    })
}

/// Reads an XML document whose root element holds one child element per person,
/// each with `name`, `height` and `weight` sub-elements. Rows follow document order.
///
/// # Errors
/// `MalformedDocument` when the markup is not well formed, `Parse` when a person
/// lacks a sub-element or a measurement is not numeric.
pub fn read_xml(path: &Path) -> Result<Table> {
    let content = fs::read(path)?;
    let mut reader = Reader::from_reader(content.as_slice());
    let mut buf = Vec::with_capacity(1024);

    let mut table = Table::new();
    let mut person: Option<PersonBuilder> = None;
    let mut depth = 0usize;
    let mut root_seen = false;

    loop {
        let event = reader.read_event_into(&mut buf).map_err(|e| {
            PipelineError::malformed(path, format!("at byte {}: {e}", reader.buffer_position()))
        })?;

        match event {
            Event::Start(e) => {
                match depth {
                    0 if root_seen => {
                        return Err(PipelineError::malformed(path, "content after root element"));
                    }
                    0 => root_seen = true,
                    1 => person = Some(PersonBuilder::default()),
                    2 => {
                        if let (Some(p), Some(field)) =
                            (person.as_mut(), PersonField::from_tag(e.name().as_ref()))
                        {
                            p.start_field(field);
                        }
                    }
                    _ => {}
                }
                depth += 1;
            }
            Event::Empty(e) => match depth {
                0 if root_seen => {
                    return Err(PipelineError::malformed(path, "content after root element"));
                }
                0 => root_seen = true,
                1 => {
                    let index = table.len() + 1;
                    table.push(PersonBuilder::default().build(path, index)?);
                }
                2 => {
                    if let (Some(p), Some(field)) =
                        (person.as_mut(), PersonField::from_tag(e.name().as_ref()))
                    {
                        p.start_field(field);
                        p.end_field();
                    }
                }
                _ => {}
            },
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                match depth {
                    2 => {
                        if let Some(p) = person.as_mut() {
                            p.end_field();
                        }
                    }
                    1 => {
                        if let Some(p) = person.take() {
                            let index = table.len() + 1;
                            table.push(p.build(path, index)?);
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(e) => {
                let text = e
                    .decode()
                    .map_err(|e| PipelineError::malformed(path, format!("undecodable text: {e}")))?;
                if depth == 0 && !text.trim().is_empty() {
                    return Err(PipelineError::malformed(path, "text outside root element"));
                }
                if depth == 3 {
                    if let Some(p) = person.as_mut() {
                        p.push_text(&text);
                    }
                }
            }
            Event::CData(e) if depth == 3 => {
                let text = std::str::from_utf8(&e)
                    .map_err(|e| PipelineError::malformed(path, format!("undecodable CDATA: {e}")))?;
                if let Some(p) = person.as_mut() {
                    p.push_text(text);
                }
            }
            Event::GeneralRef(e) if depth == 3 => {
                let resolved = match e
                    .resolve_char_ref()
                    .map_err(|err| PipelineError::malformed(path, err))?
                {
                    Some(ch) => ch.to_string(),
                    None => {
                        let entity = e
                            .decode()
                            .map_err(|err| PipelineError::malformed(path, err))?;
                        resolve_predefined_entity(&entity)
                            .ok_or_else(|| {
                                PipelineError::malformed(path, format!("unknown entity &{entity};"))
                            })?
                            .to_string()
                    }
                };
                if let Some(p) = person.as_mut() {
                    p.push_text(&resolved);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if depth != 0 {
        return Err(PipelineError::malformed(path, "unexpected end of document"));
    }
    if !root_seen {
        return Err(PipelineError::malformed(path, "no root element found"));
    }
    Ok(table)
}
