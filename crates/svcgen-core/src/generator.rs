//! The generation orchestrator.
//!
//! [`Generator::generate`] runs one scaffolding pass:
//!
//! 1. create the output directory
//! 2. create every directory from [`layout::plan_directories`]
//! 3. build the rule catalog and reject duplicate output paths
//! 4. project the [`TemplateData`] once
//! 5. for each applicable rule, render and write its files in declared order
//!
//! The first error aborts the run. Files written before the failure stay on
//! disk; re-running overwrites every declared file.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::{ApiType, ProjectConfig};
use crate::context::TemplateData;
use crate::error::{GeneratorError, Result};
use crate::fs::{FileSystem, OsFileSystem};
use crate::layout;
use crate::rules::{self, FileMapping, GenerationRule};
use crate::templates::loader::{EmbeddedTemplateLoader, TemplateLoader};
use crate::templates::renderer::TemplateRenderer;
use crate::templates::TemplateError;

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    pub output_dir: PathBuf,
    /// Planned directories, relative to `output_dir`.
    pub directories: Vec<PathBuf>,
    /// Written files, relative to `output_dir`, in write order.
    pub files: Vec<String>,
}

/// Scaffolds a project described by a [`ProjectConfig`].
///
/// The filesystem and template loader are injected; [`Generator::new`] uses the
/// real disk and the embedded templates.
pub struct Generator<F = OsFileSystem, L = EmbeddedTemplateLoader> {
    config: ProjectConfig,
    fs: F,
    loader: L,
    renderer: TemplateRenderer,
}

impl Generator {
    pub fn new(config: ProjectConfig) -> Self {
        Self::with_deps(config, OsFileSystem, EmbeddedTemplateLoader)
    }
}

impl<F: FileSystem, L: TemplateLoader> Generator<F, L> {
    pub fn with_deps(config: ProjectConfig, fs: F, loader: L) -> Self {
        Self {
            config,
            fs,
            loader,
            renderer: TemplateRenderer::new(),
        }
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn filesystem(&self) -> &F {
        &self.fs
    }

    pub fn generate(&self) -> Result<GenerationSummary> {
        let output_dir = &self.config.output_dir;
        tracing::info!("generating {} into {}", self.config.project_name, output_dir.display());

        self.fs
            .create_dir_all(output_dir)
            .map_err(|e| GeneratorError::Directory {
                path: output_dir.clone(),
                source: e,
            })?;
        let directories = self.create_directory_structure()?;

        let rules = rules::build_rules(&self.config);
        rules::validate_unique(&rules)?;
        let data = TemplateData::from_config(&self.config)
            .to_value()
            .map_err(|e| GeneratorError::TemplateData { source: e })?;

        if self.config.has_api(ApiType::Huma) {
            tracing::warn!("huma has no templates yet; it contributes no files");
        }

        let mut files = Vec::new();
        for rule in &rules {
            if !rule.applies(&self.config) {
                tracing::debug!("skipping rule '{}'", rule.name);
                continue;
            }
            files.extend(self.generate_rule(rule, &data)?);
        }

        tracing::info!("wrote {} files", files.len());
        Ok(GenerationSummary {
            output_dir: output_dir.clone(),
            directories,
            files,
        })
    }

    fn create_directory_structure(&self) -> Result<Vec<PathBuf>> {
        let dirs = layout::plan_directories(&self.config);
        for dir in &dirs {
            let path = self.config.output_dir.join(dir);
            tracing::debug!("creating {}", path.display());
            self.fs
                .create_dir_all(&path)
                .map_err(|e| GeneratorError::Directory { path, source: e })?;
        }
        Ok(dirs)
    }

    fn generate_rule(&self, rule: &GenerationRule, data: &Value) -> Result<Vec<String>> {
        tracing::info!("rule '{}': {} file(s)", rule.name, rule.files.len());
        let mut written = Vec::with_capacity(rule.files.len());
        for file in &rule.files {
            self.generate_file(file, data)?;
            written.push(file.output_path.clone());
        }
        Ok(written)
    }

    /// Render one mapping against `data` and write it below the output directory.
    ///
    /// Returns the absolute (joined) path written.
    pub fn generate_file(&self, file: &FileMapping, data: &Value) -> Result<PathBuf> {
        let render_error = |err: TemplateError| match err {
            TemplateError::NotFound(template) => GeneratorError::TemplateNotFound {
                template,
                path: file.output_path.clone(),
            },
            TemplateError::Parse { name, reason } | TemplateError::Render { name, reason } => {
                GeneratorError::Render {
                    template: name,
                    path: file.output_path.clone(),
                    reason,
                }
            }
        };

        let template = self.loader.load(file.template).map_err(render_error)?;
        let contents = self.renderer.render(&template, data).map_err(render_error)?;

        let full_path = self.config.output_dir.join(&file.output_path);
        if let Some(parent) = full_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.fs
                .create_dir_all(parent)
                .map_err(|e| GeneratorError::Directory {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        self.fs
            .write_file(&full_path, contents.as_bytes())
            .map_err(|e| GeneratorError::Io {
                path: full_path.clone(),
                source: e,
            })?;
        tracing::debug!("wrote {}", full_path.display());
        Ok(full_path)
    }
}

/// Whether `dir` already holds a generated project (it has a `go.mod`).
pub fn contains_project(fs: &impl FileSystem, dir: &Path) -> bool {
    fs.stat(dir).map(|stat| stat.is_dir).unwrap_or(false)
        && fs.stat(&dir.join("go.mod")).is_ok()
}
