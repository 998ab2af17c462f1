use shared::CsvqlError;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

//User variables persisted as a JSON object. Every change is written to disk before returning
pub struct VariableStore {
    path: String,
    variables: BTreeMap<String, String>,
}

impl VariableStore {
    //Starts empty when the file doesn't exist yet
    pub fn load(path: &str) -> Result<VariableStore, CsvqlError> {
        let variables = if Path::new(path).exists() {
            let bytes = fs::read(path)
                .map_err(|e| CsvqlError::CannotReadVariables(path.to_string(), e))?;
            serde_json::from_slice(&bytes)
                .map_err(|e| CsvqlError::CannotDecodeVariables(path.to_string(), e))?
        } else {
            BTreeMap::new()
        };

        Ok(VariableStore {
            path: path.to_string(),
            variables,
        })
    }

    pub fn get(&self, name: &str) -> Option<&String> {
        self.variables.get(name)
    }

    pub fn set(&mut self, name: &str, value: &str) -> Result<(), CsvqlError> {
        self.variables.insert(name.to_string(), value.to_string());
        self.persist()
    }

    //Returns false if the variable didn't exist
    pub fn unset(&mut self, name: &str) -> Result<bool, CsvqlError> {
        if self.variables.remove(name).is_none() {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    //Sorted by name
    pub fn list(&self) -> Vec<(&String, &String)> {
        self.variables.iter().collect()
    }

    fn persist(&self) -> Result<(), CsvqlError> {
        let serialized = serde_json::to_vec_pretty(&self.variables)
            .map_err(|e| CsvqlError::CannotWriteVariables(self.path.clone(), e.into()))?;
        fs::write(&self.path, serialized)
            .map_err(|e| CsvqlError::CannotWriteVariables(self.path.clone(), e))
    }
}
