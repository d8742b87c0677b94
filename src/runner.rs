use std::time::Duration;

use thiserror::Error;

use crate::record::{Animal, Attribute};
use crate::render::{self, Filter};
use crate::source::api::{self, ApiClient, ApiKey};
use crate::source::{self, AnimalLookup};
use crate::template;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordSource {
    FilePath(String),
    Api { query: String },
}

#[derive(Clone, Debug)]
pub struct ApiSettings {
    pub url: String,
    pub key: Option<ApiKey>,
    pub timeout: Option<Duration>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            url: api::DEFAULT_API_URL.to_string(),
            key: None,
            timeout: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Options {
    pub source: RecordSource,
    pub api: ApiSettings,
    pub template: String,
    pub output: String,
    pub filter_by: Attribute,
    pub escape_html: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            source: RecordSource::FilePath("./animals_data.json".to_string()),
            api: ApiSettings::default(),
            template: "./animals_template.html".to_string(),
            output: "./animals.html".to_string(),
            filter_by: Attribute::SkinType,
            escape_html: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("{kind} not found: {path}")]
    NotFound { kind: &'static str, path: String },

    #[error("{kind} is empty: {path}")]
    EmptyInput { kind: &'static str, path: String },

    #[error("malformed {kind}: {path}: {source}")]
    Malformed {
        kind: &'static str,
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read {kind}: {path}: {source}")]
    FileRead {
        kind: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output file: {path}: {source}")]
    FileWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("missing API key, set API_KEY in the environment or in a .env file")]
    MissingApiKey,

    #[error("invalid API key, expected 40 characters but got {length}")]
    InvalidApiKey { length: usize },

    #[error("animal name must be at least 3 characters, got '{query}'")]
    InvalidQuery { query: String },

    #[error("failed to build HTTP client: {source}")]
    HttpClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API request failed with status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("failed to read selection: {source}")]
    Prompt {
        #[source]
        source: std::io::Error,
    },

    #[error("input closed before a valid selection was made")]
    PromptClosed,
}

// the finished page, ready to be written
#[derive(Clone, Debug)]
pub struct Page {
    pub html: String,
    pub cards: usize,
    pub marker_found: bool,
    pub not_found: bool,
}

pub struct Runner {
    options: Options,
    lookup: Option<Box<dyn AnimalLookup>>,
}

impl Runner {
    pub fn new(options: Options) -> Result<Self, RunnerError> {
        let lookup: Option<Box<dyn AnimalLookup>> = match &options.source {
            RecordSource::FilePath(_) => None,
            RecordSource::Api { query } => {
                api::validate_query(query)?;
                let key = options.api.key.clone().ok_or(RunnerError::MissingApiKey)?;
                let client = ApiClient::new(&options.api.url, key, options.api.timeout)?;
                Some(Box::new(client))
            }
        };
        Ok(Self { options, lookup })
    }

    // use a caller-supplied lookup instead of the HTTP client
    pub fn with_lookup(
        options: Options,
        lookup: Box<dyn AnimalLookup>,
    ) -> Result<Self, RunnerError> {
        if let RecordSource::Api { query } = &options.source {
            api::validate_query(query)?;
        }
        Ok(Self {
            options,
            lookup: Some(lookup),
        })
    }

    pub fn query(&self) -> Option<&str> {
        match &self.options.source {
            RecordSource::Api { query } => Some(query.trim()),
            RecordSource::FilePath(_) => None,
        }
    }

    pub fn load_records(&self) -> Result<Vec<Animal>, RunnerError> {
        match &self.options.source {
            RecordSource::FilePath(path) => source::load_records(path),
            RecordSource::Api { query } => {
                let lookup = self.lookup.as_ref().ok_or(RunnerError::MissingApiKey)?;
                lookup.lookup(query.trim())
            }
        }
    }

    pub fn load_template(&self) -> Result<String, RunnerError> {
        template::load_template(&self.options.template)
    }

    pub fn render_page(
        &self,
        template_html: &str,
        animals: &[Animal],
        filter: Option<&Filter>,
    ) -> Page {
        let escape = self.options.escape_html;
        let (fragment, cards, not_found) = match self.query() {
            Some(query) if animals.is_empty() => (render::not_found_message(query, escape), 0, true),
            _ => {
                let cards = render::matching(animals, filter).count();
                (render::serialize_animals(animals, filter, escape), cards, false)
            }
        };
        Page {
            html: template::compose(template_html, &fragment),
            cards,
            marker_found: template_html.contains(template::MARKER),
            not_found,
        }
    }

    pub fn write_page(&self, page: &Page) -> Result<(), RunnerError> {
        template::write_page(&self.options.output, &page.html)
    }

    // load, render and write without prompting
    pub fn generate(&self, filter_value: Option<&str>) -> Result<Page, RunnerError> {
        let animals = self.load_records()?;
        let template = self.load_template()?;
        let filter = filter_value.map(|value| Filter {
            attribute: self.options.filter_by,
            value: value.to_string(),
        });
        let page = self.render_page(&template, &animals, filter.as_ref());
        self.write_page(&page)?;
        Ok(page)
    }
}
