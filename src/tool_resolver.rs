//! # Tool Path Resolver
//!
//! This module finds the external command-line optimizers in the places they
//! can live:
//! - A directory named by the `SVG_MINIFIER_TOOLS_DIR` environment variable
//! - A `tools/` directory shipped next to the executable
//! - The system `PATH`

use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the bundled tools directory.
pub const TOOLS_DIR_ENV: &str = "SVG_MINIFIER_TOOLS_DIR";

/// Tool path resolver for bundled and system-installed tools
#[derive(Debug, Clone)]
pub struct ToolPathResolver {
    /// Directories searched before `PATH`, in order
    tools_dirs: Vec<PathBuf>,
}

impl ToolPathResolver {
    /// Create a resolver from the current environment
    pub fn new() -> Self {
        Self {
            tools_dirs: Self::detect_tools_dirs(),
        }
    }

    /// Create a resolver that searches the given directories before `PATH`
    pub fn with_dirs(tools_dirs: Vec<PathBuf>) -> Self {
        Self { tools_dirs }
    }

    fn detect_tools_dirs() -> Vec<PathBuf> {
        let mut dirs = Vec::new();

        // Strategy 1: explicit override
        if let Ok(tools_dir) = env::var(TOOLS_DIR_ENV) {
            let tools_path = PathBuf::from(tools_dir);
            debug!("Checking {}: {:?}", TOOLS_DIR_ENV, tools_path);
            if tools_path.is_dir() {
                dirs.push(tools_path);
            }
        }

        // Strategy 2: tools bundled next to the executable
        if let Some(app_dir) = env::current_exe().ok().as_deref().and_then(Path::parent) {
            let tools_path = app_dir.join("tools");
            debug!("Checking bundled tools path: {:?}", tools_path);
            if tools_path.is_dir() {
                dirs.push(tools_path);
            }
        }

        dirs
    }

    /// Resolve the path to a specific tool
    pub fn resolve_tool(&self, tool_name: &str) -> Option<PathBuf> {
        let file_name = executable_name(tool_name);

        for dir in &self.tools_dirs {
            let candidate = dir.join(&file_name);
            if candidate.is_file() {
                debug!("Using bundled tool: {} -> {:?}", tool_name, candidate);
                return Some(candidate);
            }
        }

        let system_path = self.find_in_system_path(&file_name);
        match &system_path {
            Some(path) => debug!("Using system tool: {} -> {:?}", tool_name, path),
            None => debug!("Tool not found: {}", tool_name),
        }
        system_path
    }

    /// Find tool in system PATH
    fn find_in_system_path(&self, file_name: &str) -> Option<PathBuf> {
        let path_var = env::var_os("PATH")?;
        env::split_paths(&path_var)
            .map(|dir| dir.join(file_name))
            .find(|path| path.is_file())
    }

    /// Check if a tool is available and provide installation instructions if not
    pub fn check_tool_with_instructions(&self, tool_name: &str) -> Result<PathBuf, String> {
        self.resolve_tool(tool_name).ok_or_else(|| {
            format!(
                "Tool '{}' not found. Install it with:\n  {}\nor set {} to a directory containing it.",
                tool_name,
                install_instructions(tool_name),
                TOOLS_DIR_ENV
            )
        })
    }
}

impl Default for ToolPathResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn executable_name(tool_name: &str) -> String {
    if cfg!(windows) {
        format!("{}.exe", tool_name)
    } else {
        tool_name.to_string()
    }
}

fn install_instructions(tool_name: &str) -> String {
    match tool_name {
        "scour" => "pip install scour".to_string(),
        _ => format!("your package manager ({})", tool_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolves_from_tools_dir() {
        let temp_dir = TempDir::new().unwrap();
        let tool = temp_dir.path().join(executable_name("svg-minifier-test-tool"));
        std::fs::write(&tool, "").unwrap();

        let resolver = ToolPathResolver::with_dirs(vec![temp_dir.path().to_path_buf()]);
        assert_eq!(resolver.resolve_tool("svg-minifier-test-tool"), Some(tool));
    }

    #[test]
    fn test_missing_tool() {
        let resolver = ToolPathResolver::with_dirs(Vec::new());
        assert!(resolver.resolve_tool("svg-minifier-no-such-tool").is_none());

        let message = resolver
            .check_tool_with_instructions("svg-minifier-no-such-tool")
            .unwrap_err();
        assert!(message.contains(TOOLS_DIR_ENV));
    }

    #[test]
    fn test_scour_install_hint() {
        assert_eq!(install_instructions("scour"), "pip install scour");
    }
}
