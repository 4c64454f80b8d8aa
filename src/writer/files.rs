use log::{debug, info};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::emit::{Artifact, EmitContext, Emitter};
use crate::error::{Error, Result};
use crate::schema::SchemaCollection;

/// Writes rendered artifacts below an output directory
pub struct ArtifactWriter {
    root: PathBuf,
}

impl ArtifactWriter {
    pub fn new(root: &Path) -> Result<Self> {
        fs::create_dir_all(root).map_err(|source| Error::OutputWrite {
            path: root.to_path_buf(),
            source,
        })?;

        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write one artifact, creating parent directories as needed.
    /// Existing files are truncated.
    pub fn write(&self, artifact: &Artifact) -> Result<PathBuf> {
        let path = self.root.join(&artifact.path);
        let to_error = |source| Error::OutputWrite {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(to_error)?;
        }

        let mut file = File::create(&path).map_err(to_error)?;
        file.write_all(artifact.contents.as_bytes())
            .map_err(to_error)?;

        debug!("Wrote {} bytes to {:?}", artifact.contents.len(), path);
        Ok(path)
    }

    /// Write artifacts in order, stopping at the first failure
    pub fn write_all(&self, artifacts: &[Artifact]) -> Result<Vec<PathBuf>> {
        artifacts.iter().map(|a| self.write(a)).collect()
    }
}

/// Render every table with the emitter and write the results below `output_dir`.
///
/// Tables are written one after another, followed by the shared files. A failure
/// leaves the files of earlier tables in place.
pub fn generate(
    emitter: &dyn Emitter,
    tables: &SchemaCollection,
    output_dir: &Path,
    ctx: &EmitContext,
) -> Result<Vec<PathBuf>> {
    let writer = ArtifactWriter::new(output_dir)?;
    let mut written = Vec::new();

    info!(
        "Generating {} models for {} tables into {:?}",
        emitter.profile().name,
        tables.len(),
        writer.root()
    );

    for table in tables {
        let paths = writer.write_all(&emitter.emit_table(table, ctx))?;
        info!("{}: {} files", table.entity_name, paths.len());
        written.extend(paths);
    }

    written.extend(writer.write_all(&emitter.emit_shared(tables, ctx))?);

    Ok(written)
}
