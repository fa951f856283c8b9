use crate::domain::{FluxError, FluxResult, Hierarchy, OutputLayout};
use crate::modules::report::{OutputKind, OutputSummary};
use crate::modules::{FluxRow, FluxSink, TableWriter};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub(crate) const OUTPUT_FILE_PREFIX: &str = "pinched_";
pub(crate) const OUTPUT_FILE_EXTENSION: &str = "dat";

pub(crate) fn output_file_name(id: i64) -> String {
    format!("{OUTPUT_FILE_PREFIX}{id}.{OUTPUT_FILE_EXTENSION}")
}

pub(crate) fn output_path(root: &Path, kind: OutputKind, id: i64) -> PathBuf {
    let directory = match kind {
        OutputKind::Base => root.to_path_buf(),
        OutputKind::Normal => root.join(Hierarchy::Normal.directory_name()),
        OutputKind::Inverted => root.join(Hierarchy::Inverted.directory_name()),
    };
    directory.join(output_file_name(id))
}

/// Checks the output root and creates the hierarchy subdirectories when
/// mixed tables will be written.
pub(crate) fn prepare_output_root(root: &Path, mixing: bool) -> FluxResult<()> {
    if !root.is_dir() {
        return Err(FluxError::io_system(
            "IO.PINCHED_OUTPUT_DIRECTORY",
            format!(
                "output directory '{}' does not exist or is not a directory; check OUTFLUXDIR",
                root.display()
            ),
        ));
    }

    if mixing {
        for hierarchy in Hierarchy::BOTH {
            let directory = root.join(hierarchy.directory_name());
            fs::create_dir_all(&directory).map_err(|source| {
                FluxError::io_system(
                    "IO.PINCHED_OUTPUT_DIRECTORY",
                    format!(
                        "failed to create {} output directory '{}': {}",
                        hierarchy,
                        directory.display(),
                        source
                    ),
                )
            })?;
        }
    }

    Ok(())
}

struct OutputTarget {
    kind: OutputKind,
    path: PathBuf,
    sink: TableWriter<BufWriter<File>>,
}

/// All files of one record, open for the lifetime of that record.
///
/// Dropping the set before `commit` removes every file it created, so an
/// abort never leaves a partial table behind.
pub(crate) struct RecordOutputs {
    targets: Vec<OutputTarget>,
    committed: bool,
}

impl RecordOutputs {
    pub(crate) fn open(
        root: &Path,
        id: i64,
        kinds: &[OutputKind],
        layout: OutputLayout,
    ) -> FluxResult<Self> {
        let mut outputs = Self {
            targets: Vec::with_capacity(kinds.len()),
            committed: false,
        };

        for &kind in kinds {
            let path = output_path(root, kind, id);
            let file = File::create(&path).map_err(|source| {
                FluxError::io_system(
                    "IO.PINCHED_OUTPUT_OPEN",
                    format!(
                        "output file '{}' not opened: {}; check that the directory pointed to by OUTFLUXDIR exists",
                        path.display(),
                        source
                    ),
                )
            })?;
            info!(record = id, path = %path.display(), "output file");

            let label = path.display().to_string();
            outputs.targets.push(OutputTarget {
                kind,
                path,
                sink: TableWriter::new(BufWriter::new(file), layout, label),
            });
        }

        Ok(outputs)
    }

    pub(crate) fn sink(&mut self, kind: OutputKind) -> FluxResult<&mut TableWriter<BufWriter<File>>> {
        self.targets
            .iter_mut()
            .find(|target| target.kind == kind)
            .map(|target| &mut target.sink)
            .ok_or_else(|| {
                FluxError::internal(
                    "SYS.PINCHED_OUTPUT_CONTRACT",
                    format!("no {:?} output opened for this record", kind),
                )
            })
    }

    pub(crate) fn write_rows(
        &mut self,
        kind: OutputKind,
        rows: impl Iterator<Item = FluxRow>,
    ) -> FluxResult<()> {
        let sink = self.sink(kind)?;
        for row in rows {
            sink.write_row(&row)?;
        }
        Ok(())
    }

    /// Flushes and closes every file, keeping them on disk.
    pub(crate) fn commit(mut self) -> FluxResult<Vec<OutputSummary>> {
        let mut summaries = Vec::with_capacity(self.targets.len());
        for target in &mut self.targets {
            target.sink.finish()?;
            summaries.push(OutputSummary {
                kind: target.kind,
                path: target.path.clone(),
                rows: target.sink.rows_written(),
            });
        }

        self.committed = true;
        Ok(summaries)
    }
}

impl Drop for RecordOutputs {
    fn drop(&mut self) {
        if self.committed {
            return;
        }

        for target in self.targets.drain(..) {
            let OutputTarget { path, sink, .. } = target;
            drop(sink);
            if fs::remove_file(&path).is_ok() {
                debug!(path = %path.display(), "removed partial output file");
            }
        }
    }
}
