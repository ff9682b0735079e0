use crate::engine::{
    self, InOutVersions, convert_slashes, group_tail, in_out_versions, quote_join, suffix_replace,
    tail_replace,
};

#[derive(Debug, Clone)]
pub enum TransformRequest {
    Slashes,
    Quote,
    Suffix { suffix: String },
    Tail { tails: String },
    Group { tails: String },
    InOut,
}

impl TransformRequest {
    pub fn mode(&self) -> &'static str {
        match self {
            TransformRequest::Slashes => "slashes",
            TransformRequest::Quote => "quote",
            TransformRequest::Suffix { .. } => "suffix",
            TransformRequest::Tail { .. } => "tail",
            TransformRequest::Group { .. } => "group",
            TransformRequest::InOut => "inout",
        }
    }
}

pub enum TransformOutput {
    Text(String),
    Lines(Vec<String>),
    InOut(InOutVersions),
}

impl TransformOutput {
    pub fn render(&self) -> String {
        match self {
            TransformOutput::Text(text) => text.clone(),
            TransformOutput::Lines(lines) => lines.join("\n"),
            TransformOutput::InOut(versions) => {
                format!("IN: {}\nOUT: {}", versions.in_version, versions.out_version)
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            TransformOutput::Text(text) => text.is_empty(),
            TransformOutput::Lines(lines) => lines.is_empty(),
            TransformOutput::InOut(versions) => {
                versions.in_version.is_empty() && versions.out_version.is_empty()
            }
        }
    }

    pub fn line_count(&self) -> usize {
        match self {
            TransformOutput::Text(text) => usize::from(!text.is_empty()),
            TransformOutput::Lines(lines) => lines.len(),
            TransformOutput::InOut(_) => 2,
        }
    }
}

pub fn run_transform(request: &TransformRequest, raw: &str) -> TransformOutput {
    match request {
        TransformRequest::Slashes => TransformOutput::Text(convert_slashes(raw)),
        TransformRequest::Quote => TransformOutput::Text(quote_join(raw)),
        TransformRequest::Suffix { suffix } => TransformOutput::Text(suffix_replace(raw, suffix)),
        TransformRequest::Tail { tails } => TransformOutput::Lines(tail_replace(raw, tails)),
        TransformRequest::Group { tails } => TransformOutput::Lines(group_tail(raw, tails)),
        TransformRequest::InOut => TransformOutput::InOut(in_out_versions(raw)),
    }
}

pub fn input_line_count(raw: &str) -> usize {
    engine::line_batch(raw).len()
}
