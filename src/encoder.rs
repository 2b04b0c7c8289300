use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

use crate::error::PredictError;

#[derive(Deserialize)]
struct EncoderJson {
    classes: Vec<String>,
}

/// Fitted label encoder: the ordered category table assigned at training
/// time. A label's code is its index in the table. Immutable at serving time.
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn load(path: &str) -> Result<Self> {
        let txt = fs::read_to_string(Path::new(path))
            .with_context(|| format!("failed to read encoder at {}", path))?;
        Self::from_json(&txt)
    }

    pub fn from_json(txt: &str) -> Result<Self> {
        let parsed: EncoderJson =
            serde_json::from_str(txt).with_context(|| "failed to parse encoder json")?;
        Self::new(parsed.classes)
    }

    pub fn new(classes: Vec<String>) -> Result<Self> {
        if classes.is_empty() {
            bail!("encoder category table is empty");
        }
        Ok(Self { classes })
    }

    /// Integer code for a weather label. Labels never seen at training time
    /// are rejected; a made-up code would mean something else to the model.
    pub fn encode(&self, label: &str) -> Result<i64, PredictError> {
        let wanted = label.trim();
        match self.classes.iter().position(|c| c == wanted) {
            Some(idx) => Ok(idx as i64),
            None => Err(PredictError::UnknownWeather {
                label: wanted.to_string(),
                known: self.classes.clone(),
            }),
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}
