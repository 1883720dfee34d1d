//! Materializes a template into the output directory.
//!
//! A file template is copied line by line with every placeholder substituted.
//! A folder template is walked depth-first; directory and file names are
//! substituted as well as file contents. Inside a folder run, entries that
//! already exist are skipped with a warning so a scaffold can be re-run over
//! its own output. Any other failure stops the run and leaves what was
//! already written in place.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::core::error::{Error, Result};
use crate::core::templates::{TemplateDescriptor, TemplateKind};
use crate::core::variables::{
    Builtins, NAME_VARIABLE, Variables, resolve, substitute, substitute_bytes,
};

/// Paths touched by a generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Files and directories written by this run
    pub created: Vec<PathBuf>,
    /// Entries left untouched because they already existed
    pub skipped: Vec<PathBuf>,
}

/// Builds the resolved variable table for one run.
///
/// Layers, later overriding earlier: built-ins, the template's defaults,
/// the `name` argument, then each `key[=value]` definition in order.
pub fn collect_variables(
    template: &TemplateDescriptor,
    builtins: &Builtins,
    name: Option<&str>,
    defines: &[String],
) -> Result<Variables> {
    let mut vars = builtins.variables();
    vars.merge(template.default_variables());

    match name {
        Some(name) => vars.insert(NAME_VARIABLE, name),
        None if template.name_param_optional() => {}
        None => {
            return Err(Error::MissingName {
                template: template.name().to_string(),
            });
        }
    }

    for raw in defines {
        vars.define(raw)?;
    }

    resolve(vars)
}

/// Runs one template against one resolved variable table
#[derive(Debug, Clone)]
pub struct Generator {
    template: TemplateDescriptor,
    vars: Variables,
    output_dir: PathBuf,
}

impl Generator {
    /// `vars` is expected to be resolved already, see [`collect_variables`]
    pub fn new(
        template: TemplateDescriptor,
        vars: Variables,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            template,
            vars,
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn run(&self) -> Result<GenerationReport> {
        debug!(
            template = %self.template.name(),
            kind = %self.template.kind(),
            output_dir = %self.output_dir.display(),
            "Starting generation"
        );

        match self.template.kind() {
            TemplateKind::File => self.generate_file(),
            TemplateKind::Folder => self.generate_folder(),
            TemplateKind::Unknown(raw) => Err(Error::InvalidTemplateKind(raw.clone())),
        }
    }

    fn generate_file(&self) -> Result<GenerationReport> {
        let source = self.template.source_path();
        if !source.exists() {
            return Err(Error::SourceNotFound(source));
        }

        let destination = self
            .output_dir
            .join(substitute(self.template.root_name(), &self.vars));
        if destination.exists() {
            return Err(Error::DestinationExists(destination));
        }

        render_file(&source, &destination, &self.vars)?;
        info!(path = %destination.display(), "Created file");

        Ok(GenerationReport {
            created: vec![destination],
            skipped: Vec::new(),
        })
    }

    fn generate_folder(&self) -> Result<GenerationReport> {
        let source = self.template.source_path();
        if !source.exists() {
            return Err(Error::SourceNotFound(source));
        }
        if !source.is_dir() {
            return Err(Error::UnsupportedEntryType { path: source });
        }

        let mut report = GenerationReport::default();
        let destination_root = self.destination_root(&mut report)?;

        for entry in WalkDir::new(&source).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(source.as_path()).to_path_buf();
                Error::io(path, io::Error::from(e))
            })?;

            let relative = entry.path().strip_prefix(&source).map_err(|_| {
                Error::config(format!(
                    "'{}' is outside the template root",
                    entry.path().display()
                ))
            })?;
            let destination =
                destination_root.join(substitute(&relative.to_string_lossy(), &self.vars));
            let file_type = entry.file_type();

            if file_type.is_dir() {
                if destination.exists() {
                    warn!(
                        "The directory '{}' already exists, omitting its creation",
                        destination.display()
                    );
                    report.skipped.push(destination);
                    continue;
                }

                fs::create_dir(&destination).map_err(|e| Error::io(&destination, e))?;
                debug!(path = %destination.display(), "Created directory");
                report.created.push(destination);
            } else if file_type.is_file() {
                match render_file(entry.path(), &destination, &self.vars) {
                    Ok(()) => {
                        info!(path = %destination.display(), "Created file");
                        report.created.push(destination);
                    }
                    Err(Error::DestinationExists(path)) => {
                        warn!(
                            "The file '{}' already exists, omitting its creation",
                            path.display()
                        );
                        report.skipped.push(path);
                    }
                    Err(e) => return Err(e),
                }
            } else {
                return Err(Error::UnsupportedEntryType {
                    path: entry.into_path(),
                });
            }
        }

        info!(
            created = report.created.len(),
            skipped = report.skipped.len(),
            "Generated folder template"
        );
        Ok(report)
    }

    /// Creates the top-level output directory.
    ///
    /// A root of `.` (or empty) spreads the template's contents straight into
    /// the output directory instead, with no top-level existence check.
    fn destination_root(&self, report: &mut GenerationReport) -> Result<PathBuf> {
        let root_name = self.template.root_name().trim();
        if root_name.is_empty() || root_name == "." {
            return Ok(self.output_dir.clone());
        }

        let destination = self.output_dir.join(substitute(root_name, &self.vars));
        if destination.exists() {
            return Err(Error::DestinationExists(destination));
        }

        fs::create_dir(&destination).map_err(|e| Error::io(&destination, e))?;
        debug!(path = %destination.display(), "Created directory");
        report.created.push(destination.clone());
        Ok(destination)
    }
}

/// Copies `source` to a new file at `destination`, substituting each line.
///
/// Lines are raw bytes, so content that isn't UTF-8 is copied through.
///
/// Never overwrites: an existing destination yields [`Error::DestinationExists`].
fn render_file(source: &Path, destination: &Path, vars: &Variables) -> Result<()> {
    let input = File::open(source).map_err(|e| Error::io(source, e))?;

    let output = match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(destination)
    {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(Error::DestinationExists(destination.to_path_buf()));
        }
        Err(e) => return Err(Error::io(destination, e)),
    };

    let mut reader = BufReader::new(input);
    let mut writer = BufWriter::new(output);
    let mut line = Vec::new();
    loop {
        line.clear();
        let read = reader
            .read_until(b'\n', &mut line)
            .map_err(|e| Error::io(source, e))?;
        if read == 0 {
            break;
        }
        if line.last() == Some(&b'\n') {
            line.pop();
        }

        writer
            .write_all(&substitute_bytes(&line, vars))
            .and_then(|()| writer.write_all(b"\n"))
            .map_err(|e| Error::io(destination, e))?;
    }
    writer.flush().map_err(|e| Error::io(destination, e))?;

    Ok(())
}
