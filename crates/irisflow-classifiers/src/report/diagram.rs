use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::DiagramError;

/// Turns a Graphviz DOT description into an image file.
pub trait DiagramRenderer {
    /// Render `dot`. `Ok(None)` means the renderer is disabled and produced nothing.
    fn render(&self, dot: &str) -> Result<Option<PathBuf>, DiagramError>;
}

/// Renderer that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRenderer;

impl DiagramRenderer for NoopRenderer {
    fn render(&self, _dot: &str) -> Result<Option<PathBuf>, DiagramError> {
        Ok(None)
    }
}

/// Rasterizes DOT to PNG with the Graphviz `dot` executable.
///
/// Writes `pipeline_dot.dot` into `work_dir` and expects `pipeline_dot.png`
/// next to it. Blocks until the child process exits.
#[derive(Debug, Clone)]
pub struct GraphvizRenderer {
    work_dir: PathBuf,
    program: String,
}

impl GraphvizRenderer {
    pub const DOT_FILE: &'static str = "pipeline_dot.dot";
    pub const PNG_FILE: &'static str = "pipeline_dot.png";

    #[cfg(windows)]
    const WINDOWS_INSTALL_DIR: &'static str = r"C:\Program Files (x86)\Graphviz2.38\bin";

    pub fn new<P: AsRef<Path>>(work_dir: P) -> Self {
        Self {
            work_dir: work_dir.as_ref().to_path_buf(),
            program: "dot".to_string(),
        }
    }

    /// Use a different layout executable than `dot`.
    pub fn with_program(mut self, program: &str) -> Self {
        self.program = program.to_string();
        self
    }

    pub fn dot_path(&self) -> PathBuf {
        self.work_dir.join(Self::DOT_FILE)
    }

    pub fn png_path(&self) -> PathBuf {
        self.work_dir.join(Self::PNG_FILE)
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.current_dir(&self.work_dir)
            .arg("-Tpng")
            .arg(Self::DOT_FILE)
            .arg("-o")
            .arg(Self::PNG_FILE);

        #[cfg(windows)]
        {
            if let Some(path) = Self::windows_search_path() {
                cmd.env("PATH", path);
            }
        }

        cmd
    }

    /// The current `PATH` with the default Graphviz install directory appended.
    #[cfg(windows)]
    fn windows_search_path() -> Option<std::ffi::OsString> {
        let install_dir = PathBuf::from(Self::WINDOWS_INSTALL_DIR);
        let mut paths: Vec<PathBuf> = std::env::var_os("PATH")
            .map(|p| std::env::split_paths(&p).collect())
            .unwrap_or_default();
        if paths.iter().any(|p| p == &install_dir) {
            return None;
        }
        paths.push(install_dir);
        std::env::join_paths(paths).ok()
    }
}

impl DiagramRenderer for GraphvizRenderer {
    fn render(&self, dot: &str) -> Result<Option<PathBuf>, DiagramError> {
        fs::create_dir_all(&self.work_dir)?;
        fs::write(self.dot_path(), dot)?;

        let png = self.png_path();
        if png.exists() {
            fs::remove_file(&png)?;
        }

        log::debug!("Rendering pipeline diagram with `{}`", self.program);
        let output = self.command().output().map_err(|source| DiagramError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(DiagramError::ToolFailed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        if !png.exists() {
            return Err(DiagramError::MissingOutput(png));
        }
        Ok(Some(png))
    }
}
