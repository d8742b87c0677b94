use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "zoocards",
    version,
    about = "static animal page generator",
    long_about = "zoocards renders animal records into HTML cards and fills them into a page template.\n\nExamples:\n  zoocards\n  zoocards -n fox\n  zoocards -s file -d ./animals_data.json -f Hair\n  zoocards --config ~/.zoocards/config.yml\n\nThe API key is read from API_KEY (a .env file in the working directory is loaded first)."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "vb",
        visible_alias = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Print the resolved settings before running."
    )]
    pub verbose: u8,

    #[arg(
        long = "nc",
        visible_alias = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        long = "no-open",
        help_heading = "Output",
        help = "Do not open the generated page in the browser."
    )]
    pub no_open: bool,

    #[arg(
        short = 'o',
        long = "out",
        visible_alias = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Where to write the generated page (default ./animals.html)."
    )]
    pub output: Option<String>,

    #[arg(
        short = 't',
        long = "tpl",
        visible_alias = "template",
        value_name = "FILE",
        help_heading = "Output",
        help = "Template containing the __REPLACE_ANIMALS_INFO__ marker (default ./animals_template.html)."
    )]
    pub template: Option<String>,

    #[arg(
        long = "eh",
        visible_alias = "escape-html",
        help_heading = "Output",
        help = "Escape HTML special characters in record values."
    )]
    pub escape_html: bool,

    #[arg(
        short = 's',
        long = "src",
        visible_alias = "source",
        value_name = "SOURCE",
        help_heading = "Input",
        help = "Where records come from: api or file (default api)."
    )]
    pub source: Option<String>,

    #[arg(
        short = 'n',
        long = "name",
        value_name = "QUERY",
        help_heading = "Input",
        help = "Animal name to look up (skips the prompt)."
    )]
    pub name: Option<String>,

    #[arg(
        short = 'd',
        long = "df",
        visible_alias = "data-file",
        value_name = "FILE",
        help_heading = "Input",
        help = "JSON file of records used with --source file (default ./animals_data.json)."
    )]
    pub data_file: Option<String>,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.zoocards/config.yml when it exists)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "init-config",
        help_heading = "Input",
        help = "Write a default config file to ~/.zoocards/config.yml and exit."
    )]
    pub init_config: bool,

    #[arg(
        short = 'b',
        long = "fb",
        visible_alias = "filter-by",
        value_name = "ATTR",
        help_heading = "Filters",
        help = "Attribute offered in the filter menu: skin_type, diet, type, color (default skin_type)."
    )]
    pub filter_by: Option<String>,

    #[arg(
        short = 'f',
        long = "fv",
        visible_alias = "filter",
        value_name = "VALUE",
        help_heading = "Filters",
        help = "Only render animals whose attribute equals VALUE (skips the menu)."
    )]
    pub filter: Option<String>,

    #[arg(
        long = "api",
        visible_alias = "api-url",
        value_name = "URL",
        help_heading = "HTTP",
        help = "Animals API endpoint."
    )]
    pub api_url: Option<String>,

    #[arg(
        short = 'T',
        long = "to",
        visible_alias = "timeout",
        value_name = "SECONDS",
        help_heading = "HTTP",
        help = "Request timeout in seconds (0 = wait forever, the default)."
    )]
    pub timeout: Option<u64>,
}
