use crate::domain::{FlavorFluxes, FluxError, FluxResult, FluxTriple, OutputLayout, RunConfig};
use crate::modules::report::RunSummary;
use crate::modules::serialization::render_flux_row;
use std::io::Write;

pub trait ModuleExecutor {
    fn execute(&self, config: &RunConfig) -> FluxResult<RunSummary>;
}

/// One emitted table row: energy in GeV plus both flux views.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluxRow {
    pub energy: f64,
    pub triple: FluxTriple,
    pub flavors: FlavorFluxes,
}

impl FluxRow {
    pub const fn unmixed(energy: f64, triple: FluxTriple) -> Self {
        Self {
            energy,
            triple,
            flavors: FlavorFluxes::unmixed(triple),
        }
    }

    pub fn mixed(energy: f64, flavors: FlavorFluxes) -> Self {
        Self {
            energy,
            triple: flavors.to_triple(),
            flavors,
        }
    }
}

/// Consumer of flux rows in grid order.
pub trait FluxSink {
    fn write_row(&mut self, row: &FluxRow) -> FluxResult<()>;

    fn finish(&mut self) -> FluxResult<()>;
}

/// Whitespace-separated text table over any writer.
pub struct TableWriter<W: Write> {
    writer: W,
    layout: OutputLayout,
    label: String,
    rows: usize,
}

impl<W: Write> TableWriter<W> {
    pub fn new(writer: W, layout: OutputLayout, label: impl Into<String>) -> Self {
        Self {
            writer,
            layout,
            label: label.into(),
            rows: 0,
        }
    }

    pub const fn rows_written(&self) -> usize {
        self.rows
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_error(&self, source: std::io::Error) -> FluxError {
        FluxError::io_system(
            "IO.PINCHED_OUTPUT_WRITE",
            format!("failed to write flux table '{}': {}", self.label, source),
        )
    }
}

impl<W: Write> FluxSink for TableWriter<W> {
    fn write_row(&mut self, row: &FluxRow) -> FluxResult<()> {
        let line = render_flux_row(row, self.layout);
        writeln!(self.writer, "{line}").map_err(|source| self.write_error(source))?;
        self.rows += 1;
        Ok(())
    }

    fn finish(&mut self) -> FluxResult<()> {
        self.writer.flush().map_err(|source| self.write_error(source))
    }
}

#[cfg(test)]
mod tests {
    use super::{FluxRow, FluxSink, TableWriter};
    use crate::domain::{FluxErrorCategory, FluxTriple, OutputLayout};
    use std::io::{self, Write};

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn table_writer_emits_one_line_per_row() {
        let mut sink = TableWriter::new(Vec::new(), OutputLayout::Triple, "memory");
        sink.write_row(&FluxRow::unmixed(0.0, FluxTriple::ZERO))
            .expect("row should be written");
        sink.write_row(&FluxRow::unmixed(0.0002, FluxTriple::new(1.0, 2.0, 3.0)))
            .expect("row should be written");
        sink.finish().expect("flush should succeed");

        assert_eq!(sink.rows_written(), 2);
        let text = String::from_utf8(sink.into_inner()).expect("utf8");
        assert_eq!(
            text,
            "0.0000 0.000000e0 0.000000e0 0.000000e0\n0.0002 1.000000e0 2.000000e0 3.000000e0\n"
        );
    }

    #[test]
    fn write_failures_map_to_io_errors() {
        let mut sink = TableWriter::new(BrokenWriter, OutputLayout::Triple, "broken.dat");
        let error = sink
            .write_row(&FluxRow::unmixed(0.0, FluxTriple::ZERO))
            .expect_err("write should fail");

        assert_eq!(error.category(), FluxErrorCategory::IoSystemError);
        assert_eq!(error.placeholder(), "IO.PINCHED_OUTPUT_WRITE");
        assert!(error.message().contains("broken.dat"));
    }
}
