use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::all_instruments;
use crate::error::InstrumentError;
use crate::template::QuestionnaireTemplate;

/// Registry of validated, read-only templates keyed by code.
#[derive(Debug, Default)]
pub struct TemplateStore {
    templates: Vec<Arc<QuestionnaireTemplate>>,
    by_code: HashMap<String, usize>,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store preloaded with every built-in instrument.
    pub fn with_builtin() -> Result<Self, InstrumentError> {
        let mut store = Self::new();
        for instrument in all_instruments() {
            store.register(instrument.template().clone())?;
        }
        Ok(store)
    }

    /// Validate and register a template. Codes are unique; a registered
    /// template is never replaced.
    pub fn register(
        &mut self,
        template: QuestionnaireTemplate,
    ) -> Result<Arc<QuestionnaireTemplate>, InstrumentError> {
        template.validate()?;
        if self.by_code.contains_key(&template.code) {
            return Err(InstrumentError::DuplicateTemplate(template.code));
        }

        for (first, second) in template.overlapping_bands() {
            warn!(
                template = %template.code,
                first,
                second,
                "interpretation bands overlap; the earlier band wins"
            );
        }

        let template = Arc::new(template);
        self.by_code
            .insert(template.code.clone(), self.templates.len());
        self.templates.push(Arc::clone(&template));
        info!(
            template = %template.code,
            questions = template.question_count(),
            max_score = template.max_score,
            "template registered"
        );
        Ok(template)
    }

    pub fn get(&self, code: &str) -> Result<Arc<QuestionnaireTemplate>, InstrumentError> {
        self.by_code
            .get(code)
            .map(|&index| Arc::clone(&self.templates[index]))
            .ok_or_else(|| InstrumentError::UnknownTemplate(code.to_string()))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.by_code.contains_key(code)
    }

    /// Template codes in registration order.
    pub fn codes(&self) -> Vec<&str> {
        self.templates.iter().map(|t| t.code.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<QuestionnaireTemplate>> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Read one JSON template file and register it.
    pub fn load_file(
        &mut self,
        path: &Path,
    ) -> Result<Arc<QuestionnaireTemplate>, InstrumentError> {
        let contents = std::fs::read_to_string(path).map_err(|source| InstrumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let template: QuestionnaireTemplate =
            serde_json::from_str(&contents).map_err(|source| InstrumentError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        self.register(template)
    }

    /// Register every `*.json` file in `dir`, in file-name order. Stops at the
    /// first file that fails to load.
    pub fn load_dir(
        &mut self,
        dir: &Path,
    ) -> Result<Vec<Arc<QuestionnaireTemplate>>, InstrumentError> {
        let io_err = |source| InstrumentError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
            .map_err(io_err)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<_, _>>()
            .map_err(io_err)?;
        paths.retain(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"));
        paths.sort();

        let mut loaded = Vec::with_capacity(paths.len());
        for path in &paths {
            loaded.push(self.load_file(path)?);
        }
        info!(dir = %dir.display(), count = loaded.len(), "templates loaded from directory");
        Ok(loaded)
    }
}
