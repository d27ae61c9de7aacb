//! Runnable-program descriptors derived from build artifacts.

use serde::{Deserialize, Serialize};

use crate::ComposeResult;
use crate::convert::to_record;
use crate::value::Record;

/// Kind tag of a [`ProgramDescriptor`].
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ProgramKind {
    /// A program started by executing `path`.
    #[default]
    Executable,
}

/// Two-field description of something runnable.
#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
pub struct ProgramDescriptor {
    /// Always [`ProgramKind::Executable`].
    pub kind: ProgramKind,
    /// Absolute path of the executable.
    pub path: String,
}

impl ProgramDescriptor {
    /// Descriptor for the executable at `path`.
    #[must_use]
    pub fn executable(path: impl Into<String>) -> Self {
        Self {
            kind: ProgramKind::Executable,
            path: path.into(),
        }
    }

    /// Serialise into `{ "kind": "executable", "path": … }`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ComposeError::Json`] if serialisation fails.
    pub fn to_record(&self) -> ComposeResult<Record> {
        to_record(self)
    }
}

/// Reference to a built artifact.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BuildArtifact {
    /// Output directory of the artifact.
    pub out_path: String,
    /// Full artifact name, usually including a version.
    pub name: String,
    /// Package name without version, preferred over `name` for the binary.
    #[serde(default)]
    pub pname: Option<String>,
    /// Executable path relative to `out_path`, starting with `/`.
    #[serde(default)]
    pub exe_path: Option<String>,
}

impl BuildArtifact {
    /// Artifact with the given output directory and name.
    #[must_use]
    pub fn new(out_path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            out_path: out_path.into(),
            name: name.into(),
            pname: None,
            exe_path: None,
        }
    }

    /// Set the unversioned package name.
    #[must_use]
    pub fn with_pname(mut self, pname: impl Into<String>) -> Self {
        self.pname = Some(pname.into());
        self
    }

    /// Set an explicit executable path.
    #[must_use]
    pub fn with_exe_path(mut self, exe_path: impl Into<String>) -> Self {
        self.exe_path = Some(exe_path.into());
        self
    }
}

/// Describe the program inside `artifact`.
///
/// The executable defaults to `/bin/<pname>`, falling back to `/bin/<name>`.
///
/// # Examples
///
/// ```rust
/// use target_compose::program::{BuildArtifact, program_descriptor};
///
/// let artifact = BuildArtifact::new("/store/abc-hello-2.12", "hello-2.12").with_pname("hello");
/// let program = program_descriptor(&artifact);
/// assert_eq!(program.path, "/store/abc-hello-2.12/bin/hello");
/// ```
#[must_use]
pub fn program_descriptor(artifact: &BuildArtifact) -> ProgramDescriptor {
    let exe_path = artifact.exe_path.clone().unwrap_or_else(|| {
        let binary = artifact.pname.as_deref().unwrap_or(&artifact.name);
        format!("/bin/{binary}")
    });
    ProgramDescriptor::executable(format!("{}{exe_path}", artifact.out_path))
}
