use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::commands::TransformRequest;

#[derive(Debug, Deserialize)]
pub struct BatchPlan {
    pub steps: Vec<PlanStep>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PlanStep {
    Slashes(StepCommon),
    Quote(StepCommon),
    Suffix(SuffixStep),
    Tail(TailStep),
    Group(TailStep),
    Inout(StepCommon),
}

#[derive(Debug, Deserialize)]
pub struct StepCommon {
    pub input: Option<String>,
    pub input_file: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct SuffixStep {
    #[serde(flatten)]
    pub common: StepCommon,
    pub suffix: String,
}

#[derive(Debug, Deserialize)]
pub struct TailStep {
    #[serde(flatten)]
    pub common: StepCommon,
    #[serde(default)]
    pub tails: Vec<String>,
}

impl PlanStep {
    pub fn common(&self) -> &StepCommon {
        match self {
            PlanStep::Slashes(common)
            | PlanStep::Quote(common)
            | PlanStep::Inout(common) => common,
            PlanStep::Suffix(step) => &step.common,
            PlanStep::Tail(step) | PlanStep::Group(step) => &step.common,
        }
    }

    pub fn to_request(&self) -> TransformRequest {
        match self {
            PlanStep::Slashes(_) => TransformRequest::Slashes,
            PlanStep::Quote(_) => TransformRequest::Quote,
            PlanStep::Suffix(step) => TransformRequest::Suffix {
                suffix: step.suffix.clone(),
            },
            PlanStep::Tail(step) => TransformRequest::Tail {
                tails: step.tails.join("\n"),
            },
            PlanStep::Group(step) => TransformRequest::Group {
                tails: step.tails.join("\n"),
            },
            PlanStep::Inout(_) => TransformRequest::InOut,
        }
    }
}

impl StepCommon {
    pub fn resolve_input(&self) -> Result<String> {
        if let Some(text) = &self.input {
            return Ok(text.clone());
        }
        if let Some(path) = &self.input_file {
            return fs::read_to_string(path)
                .with_context(|| format!("reading step input from {}", path.display()));
        }
        Ok(String::new())
    }
}

pub fn load_plan(path: &Path) -> Result<BatchPlan> {
    let data = fs::read(path).with_context(|| format!("reading plan {}", path.display()))?;
    if path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
    {
        Ok(serde_json::from_slice(&data)?)
    } else {
        Ok(serde_yaml::from_slice(&data)?)
    }
}
