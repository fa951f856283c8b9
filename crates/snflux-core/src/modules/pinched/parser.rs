use crate::domain::{FluxError, ParserResult, SpeciesParameterRecord};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;
use tracing::warn;

pub(crate) const RECORD_FIELDS: [&str; 10] = [
    "id",
    "alpha_nue",
    "alpha_nuebar",
    "alpha_nux",
    "e0_nue",
    "e0_nuebar",
    "e0_nux",
    "lum_nue",
    "lum_nuebar",
    "lum_nux",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordParseError {
    #[error("expected {expected} fields, found {actual}")]
    FieldCount { expected: usize, actual: usize },
    #[error("field '{field}' has unparsable value '{token}'")]
    InvalidField { field: &'static str, token: String },
}

/// A parsed record and the 1-based line it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedRecord {
    pub line: usize,
    pub record: SpeciesParameterRecord,
}

/// Parses `id a_e a_ebar a_x E0_e E0_ebar E0_x L_e L_ebar L_x` with E0 in MeV
/// and L in erg/s (or erg).
pub fn parse_record_line(line: &str) -> Result<SpeciesParameterRecord, RecordParseError> {
    let tokens = line.split_whitespace().collect::<Vec<_>>();
    if tokens.len() != RECORD_FIELDS.len() {
        return Err(RecordParseError::FieldCount {
            expected: RECORD_FIELDS.len(),
            actual: tokens.len(),
        });
    }

    let id = tokens[0]
        .parse::<i64>()
        .map_err(|_| invalid_field(0, tokens[0]))?;

    let mut values = [0.0_f64; 9];
    for (offset, value) in values.iter_mut().enumerate() {
        let index = offset + 1;
        *value = tokens[index]
            .parse::<f64>()
            .map_err(|_| invalid_field(index, tokens[index]))?;
    }

    Ok(SpeciesParameterRecord::from_input_units(
        id,
        [values[0], values[1], values[2]],
        [values[3], values[4], values[5]],
        [values[6], values[7], values[8]],
    ))
}

fn invalid_field(index: usize, token: &str) -> RecordParseError {
    RecordParseError::InvalidField {
        field: RECORD_FIELDS[index],
        token: token.to_string(),
    }
}

pub fn open_parameter_source(path: &Path) -> ParserResult<RecordReader<BufReader<File>>> {
    let file = File::open(path).map_err(|source| {
        FluxError::io_system(
            "IO.PINCHED_INPUT_READ",
            format!("can't open parameter file '{}': {}", path.display(), source),
        )
    })?;
    Ok(RecordReader::new(BufReader::new(file)))
}

/// Streams records until EOF or the first short or malformed line.
///
/// Blank lines are skipped. A bad line ends the stream without an error so
/// the records before it are still processed; only read failures surface.
pub struct RecordReader<R: BufRead> {
    lines: Lines<R>,
    line_number: usize,
    finished: bool,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
            finished: false,
        }
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = ParserResult<ParsedRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let Some(line) = self.lines.next() else {
                self.finished = true;
                return None;
            };
            self.line_number += 1;

            let line = match line {
                Ok(line) => line,
                Err(source) => {
                    self.finished = true;
                    return Some(Err(FluxError::io_system(
                        "IO.PINCHED_INPUT_READ",
                        format!(
                            "failed to read parameter line {}: {}",
                            self.line_number, source
                        ),
                    )));
                }
            };

            if line.trim().is_empty() {
                continue;
            }

            return match parse_record_line(&line) {
                Ok(record) => Some(Ok(ParsedRecord {
                    line: self.line_number,
                    record,
                })),
                Err(reason) => {
                    warn!(
                        line = self.line_number,
                        %reason,
                        "stopping at malformed parameter record"
                    );
                    self.finished = true;
                    None
                }
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RecordParseError, RecordReader, parse_record_line};
    use crate::domain::Species;
    use std::io::Cursor;

    #[test]
    fn parses_full_record_and_converts_units() {
        let record = parse_record_line("1  2.0  2.0  2.0  12  15  18  5e52  5e52  5e52")
            .expect("record should parse");

        assert_eq!(record.id, 1);
        assert_eq!(record.alpha(), [2.0, 2.0, 2.0]);
        let energies = record.mean_energy_gev();
        assert!((energies[0] - 0.012).abs() <= 1.0e-15);
        assert!((energies[1] - 0.015).abs() <= 1.0e-15);
        assert!((energies[2] - 0.018).abs() <= 1.0e-15);
        assert_eq!(
            record.species(Species::Nux).luminosity,
            5.0e52 * 624.15
        );
    }

    #[test]
    fn short_and_malformed_lines_are_rejected() {
        assert_eq!(
            parse_record_line("1 2.0 2.0 2.0 12 15"),
            Err(RecordParseError::FieldCount {
                expected: 10,
                actual: 6
            })
        );
        assert_eq!(
            parse_record_line("1.5 2.0 2.0 2.0 12 15 18 1 1 1"),
            Err(RecordParseError::InvalidField {
                field: "id",
                token: "1.5".to_string()
            })
        );
        assert_eq!(
            parse_record_line("1 2.0 2.0 2.0 12 abc 18 1 1 1"),
            Err(RecordParseError::InvalidField {
                field: "e0_nuebar",
                token: "abc".to_string()
            })
        );
    }

    #[test]
    fn reader_skips_blank_lines_and_tracks_line_numbers() {
        let source = "\n1 2 2 2 12 15 18 1e52 1e52 1e52\n   \n2 3 3 3 10 14 16 2e52 2e52 2e52\n";
        let records = RecordReader::new(Cursor::new(source))
            .collect::<Result<Vec<_>, _>>()
            .expect("records should parse");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line, 2);
        assert_eq!(records[1].line, 4);
        assert_eq!(records[1].record.id, 2);
    }

    #[test]
    fn reader_stops_at_truncated_final_record() {
        let source = "1 2 2 2 12 15 18 1e52 1e52 1e52\n2 3 3 3 10 14\n3 2 2 2 12 15 18 1e52 1e52 1e52\n";
        let mut reader = RecordReader::new(Cursor::new(source));

        let first = reader.next().expect("first record").expect("parse ok");
        assert_eq!(first.record.id, 1);
        assert!(reader.next().is_none());
        assert!(reader.next().is_none());
    }

    #[test]
    fn reader_on_empty_source_yields_nothing() {
        assert_eq!(RecordReader::new(Cursor::new("")).count(), 0);
    }
}
