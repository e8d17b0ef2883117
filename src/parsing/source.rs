//! Opening call-set and site-panel inputs as plain sorted VCF text.
//!
//! Two readers are supported:
//!
//! - **bcftools** (default): the file is streamed through `bcftools view`, which
//!   handles VCF/BCF and compression and keeps only biallelic SNPs. Site panels
//!   additionally drop their genotypes (`-G`).
//! - **native**: the file is read directly, decompressing `.gz`/`.bgz` input, and
//!   the biallelic-SNP restriction is applied in-process.
//!
//! Either way the records are expected to be sorted by chromosome rank and
//! position; that is never checked.

use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};

use flate2::read::MultiGzDecoder;
use tracing::debug;

use crate::core::header::VcfHeader;
use crate::core::record::VariantRecord;
use crate::parsing::vcf::{ParseError, VcfReader};
use crate::utils::validation::is_stdio;

/// How input files are turned into VCF text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReaderKind {
    /// Stream through `bcftools view`
    #[default]
    Bcftools,
    /// Read VCF text directly (plain, gzip or bgzip)
    Native,
}

/// Which side of the merge an input plays
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputRole {
    /// The sample call set
    Calls,
    /// The reference site panel
    Sites,
}

impl InputRole {
    fn label(self) -> &'static str {
        match self {
            Self::Calls => "call set",
            Self::Sites => "site panel",
        }
    }
}

#[derive(Clone, Debug)]
pub struct SourceOptions {
    pub reader: ReaderKind,
    /// `bcftools` executable to run
    pub bcftools: PathBuf,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            reader: ReaderKind::default(),
            bcftools: PathBuf::from("bcftools"),
        }
    }
}

/// An open input: a streaming VCF reader plus the process feeding it, if any.
pub struct VcfSource {
    reader: VcfReader<Box<dyn BufRead>>,
    child: Option<Child>,
}

impl VcfSource {
    /// Open `path` for merging, restricted to biallelic SNPs.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Process` if `bcftools` cannot be started,
    /// `ParseError::Io` if the file cannot be opened, or any header error.
    pub fn open(path: &Path, role: InputRole, options: &SourceOptions) -> Result<Self, ParseError> {
        let stream = format!("{} {}", role.label(), path.display());
        match options.reader {
            ReaderKind::Bcftools => {
                let mut command = Command::new(&options.bcftools);
                command.arg("view");
                if role == InputRole::Sites {
                    command.arg("-G");
                }
                command
                    .args(["-m2", "-M2", "-v", "snps"])
                    .arg(path)
                    .stdin(Stdio::null())
                    .stdout(Stdio::piped())
                    .stderr(Stdio::inherit());

                debug!(command = ?command, "Starting external reader");
                let mut child = command.spawn().map_err(|e| ParseError::Process {
                    stream: stream.clone(),
                    reason: format!("could not run {}: {e}", options.bcftools.display()),
                })?;
                let stdout: ChildStdout = child.stdout.take().ok_or_else(|| ParseError::Process {
                    stream: stream.clone(),
                    reason: "no stdout pipe".to_string(),
                })?;

                let inner: Box<dyn BufRead> = Box::new(BufReader::new(stdout));
                match VcfReader::new(inner, stream) {
                    Ok(reader) => Ok(Self {
                        reader,
                        child: Some(child),
                    }),
                    Err(e) => {
                        let _ = child.kill();
                        let _ = child.wait();
                        Err(e)
                    }
                }
            }
            ReaderKind::Native => {
                let reader = VcfReader::new(open_text(path)?, stream)?.snps_only(true);
                Ok(Self {
                    reader,
                    child: None,
                })
            }
        }
    }

    /// Open `path` (or `-` for stdin) as VCF text without filtering records.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if the file cannot be opened, or any header error.
    pub fn open_unfiltered(path: &Path) -> Result<Self, ParseError> {
        let stream = if is_stdio(path) {
            "stdin".to_string()
        } else {
            path.display().to_string()
        };
        Ok(Self {
            reader: VcfReader::new(open_text(path)?, stream)?,
            child: None,
        })
    }

    #[must_use]
    pub fn header(&self) -> &VcfHeader {
        self.reader.header()
    }

    /// Records of this input, pulled lazily.
    pub fn records(&mut self) -> &mut VcfReader<Box<dyn BufRead>> {
        &mut self.reader
    }

    /// Wait for the feeding process, if any, and check it succeeded.
    ///
    /// Call after the records have been exhausted.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Process` if the process exited unsuccessfully.
    pub fn finish(self) -> Result<(), ParseError> {
        let Self { reader, child } = self;
        let stream = reader.stream().to_string();
        drop(reader);

        if let Some(mut child) = child {
            let status = child.wait()?;
            if !status.success() {
                return Err(ParseError::Process {
                    stream,
                    reason: format!("exited with {status}"),
                });
            }
        }
        Ok(())
    }
}

impl Iterator for VcfSource {
    type Item = Result<VariantRecord, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.next()
    }
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

fn open_text(path: &Path) -> Result<Box<dyn BufRead>, ParseError> {
    if is_stdio(path) {
        return Ok(Box::new(BufReader::new(std::io::stdin())));
    }

    let file = File::open(path)?;
    if is_gzipped(path) {
        // bgzip output is a series of gzip members
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else if path.extension().and_then(OsStr::to_str) == Some("bcf") {
        Err(ParseError::InvalidHeader {
            stream: path.display().to_string(),
            reason: "BCF input requires the bcftools reader".to_string(),
        })
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}
