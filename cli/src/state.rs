use anyhow::{Context, Result};
use resource_data::ResourceData;
use std::fs;
use std::path::{Path, PathBuf};

/// A resource state document on disk.
#[derive(Debug)]
pub(crate) struct StateFile {
    path: PathBuf,
    data: ResourceData,
}

impl StateFile {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .context(format!("Unable to read state file '{}'", path.display()))?;
        let data = serde_json::from_str(&contents)
            .context(format!("Unable to parse state file '{}'", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            data,
        })
    }

    pub(crate) fn data(&self) -> &ResourceData {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut ResourceData {
        &mut self.data
    }

    /// Print the state as JSON and, if `write` is set, replace the state file with it.
    pub(crate) fn finish(&self, write: bool) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)
            .context("Could not create string from state.")?;
        if write {
            fs::write(&self.path, &json)
                .context(format!("Unable to write state file '{}'", self.path.display()))?;
        }
        println!("{}", json);
        Ok(())
    }
}
