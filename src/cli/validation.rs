use crate::cli::args::CliArgs;
use crate::record::Attribute;
use crate::source::api;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    Api,
    File,
}

impl SourceKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "api" => Some(Self::Api),
            "file" | "json" => Some(Self::File),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::File => "file",
        }
    }
}

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(raw) = args.source.as_deref() {
        if SourceKind::parse(raw).is_none() {
            return Err(format!("invalid --source '{raw}', expected api or file"));
        }
    }
    if let Some(raw) = args.filter_by.as_deref() {
        if Attribute::parse(raw).is_none() {
            return Err(format!(
                "invalid --filter-by '{raw}', expected skin_type, diet, type, color or most_distinctive_feature"
            ));
        }
    }
    if let Some(name) = args.name.as_deref() {
        api::validate_query(name).map_err(|e| e.to_string())?;
    }
    if let Some(url) = args.api_url.as_deref() {
        reqwest::Url::parse(url).map_err(|e| format!("invalid --api-url '{url}': {e}"))?;
    }
    Ok(())
}
