use std::io::Write;
use std::time::Duration;

use clap::{error::ErrorKind, Parser};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::cli::args::CliArgs;
use crate::cli::validation::{self, SourceKind};
use crate::config::{self, ConfigFile};
use crate::menu;
use crate::record::{Animal, Attribute};
use crate::render::Filter;
use crate::runner::{ApiSettings, Options, RecordSource, Runner};
use crate::source::api::{self, ApiKey};
use crate::utils;

fn print_banner(no_color: bool) {
    const BANNER: &str = r#"
                                        __
   ____  ____  ____  _________ ______/ /____
  /_  / / __ \/ __ \/ ___/ __ `/ ___/ __/ ___/
   / /_/ /_/ / /_/ / /__/ /_/ / /  / /_(__  )
  /___/\____/\____/\___/\__,_/_/   \__/____/
                       v0.2.1 - animal page generator
    "#;
    if no_color {
        print!("{}", BANNER);
    } else {
        let _ = write!(&mut rainbowcoat::stdout(), "{}", BANNER);
    }
    println!();
}

fn format_bool(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

#[derive(Clone, Debug)]
struct RunConfig {
    source: SourceKind,
    query: Option<String>,
    data_file: String,
    template: String,
    output: String,
    api_url: String,
    timeout: Option<Duration>,
    filter_by: Attribute,
    filter: Option<String>,
    open_browser: bool,
    escape_html: bool,
    no_color: bool,
    verbose: u8,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let source_raw = args.source.or(cfg.source).unwrap_or_else(|| "api".to_string());
    let source = SourceKind::parse(&source_raw)
        .ok_or_else(|| format!("invalid source '{source_raw}', expected api or file"))?;

    let filter_by_raw = args
        .filter_by
        .or(cfg.filter_by)
        .unwrap_or_else(|| "skin_type".to_string());
    let filter_by = Attribute::parse(&filter_by_raw)
        .ok_or_else(|| format!("invalid filter attribute '{filter_by_raw}'"))?;

    let data_file = config::expand_tilde_string(
        &args
            .data_file
            .or(cfg.data_file)
            .unwrap_or_else(|| "./animals_data.json".to_string()),
    );
    let template = config::expand_tilde_string(
        &args
            .template
            .or(cfg.template)
            .unwrap_or_else(|| "./animals_template.html".to_string()),
    );
    let output = config::expand_tilde_string(
        &args
            .output
            .or(cfg.output)
            .unwrap_or_else(|| "./animals.html".to_string()),
    );

    let api_url = args
        .api_url
        .or(cfg.api_url)
        .unwrap_or_else(|| api::DEFAULT_API_URL.to_string());
    let timeout = match args.timeout.or(cfg.timeout).unwrap_or(0) {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };

    let open_browser = !args.no_open && cfg.open_browser.unwrap_or(true);
    let escape_html = args.escape_html || cfg.escape_html.unwrap_or(false);
    let no_color = args.no_color || cfg.no_color.unwrap_or(false);

    Ok(RunConfig {
        source,
        query: args.name.map(|name| name.trim().to_string()),
        data_file,
        template,
        output,
        api_url,
        timeout,
        filter_by,
        filter: args.filter,
        open_browser,
        escape_html,
        no_color,
        verbose: args.verbose,
    })
}

fn print_settings(run: &RunConfig) {
    utils::format_kv_line("Source", run.source.label());
    match run.source {
        SourceKind::Api => utils::format_kv_line("API", &run.api_url),
        SourceKind::File => utils::format_kv_line("Data file", &run.data_file),
    }
    utils::format_kv_line("Template", &run.template);
    utils::format_kv_line("Output", &run.output);
    utils::format_kv_line("Filter by", run.filter_by.key());
    if let Some(filter) = run.filter.as_deref() {
        utils::format_kv_line("Filter", filter);
    }
    if let Some(timeout) = run.timeout {
        utils::format_kv_line("Timeout", &format!("{}s", timeout.as_secs()));
    }
    utils::format_kv_line("Escape", format_bool(run.escape_html));
    utils::format_kv_line("Open", format_bool(run.open_browser));
    println!();
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.set_style(
        ProgressStyle::with_template(":: {spinner} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

fn choose_filter(run: &RunConfig, animals: &[Animal]) -> Result<Option<Filter>, String> {
    if let Some(value) = run.filter.as_ref() {
        return Ok(Some(Filter {
            attribute: run.filter_by,
            value: value.clone(),
        }));
    }
    let values = menu::distinct_values(animals, run.filter_by);
    if values.is_empty() {
        return Ok(None);
    }
    let options = menu::menu_options(&values);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let choice = menu::prompt_choice(
        &mut stdin.lock(),
        &mut stdout.lock(),
        run.filter_by,
        &options,
    )
    .map_err(|e| e.to_string())?;
    Ok(menu::filter_for_choice(run.filter_by, &options, choice))
}

fn run(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }
    print_banner(run.no_color);
    if run.verbose > 0 {
        print_settings(&run);
    }

    let source = match run.source {
        SourceKind::File => RecordSource::FilePath(run.data_file.clone()),
        SourceKind::Api => {
            let query = match run.query.clone() {
                Some(query) => query,
                None => {
                    let stdin = std::io::stdin();
                    let stdout = std::io::stdout();
                    menu::prompt_query(&mut stdin.lock(), &mut stdout.lock())
                        .map_err(|e| e.to_string())?
                }
            };
            RecordSource::Api { query }
        }
    };

    let key = match run.source {
        SourceKind::Api => {
            if let Err(e) = api::load_env_file() {
                utils::warn(&format!("failed to load .env: {e}"));
            }
            Some(ApiKey::from_env().map_err(|e| e.to_string())?)
        }
        SourceKind::File => None,
    };
    let options = Options {
        source,
        api: ApiSettings {
            url: run.api_url.clone(),
            key,
            timeout: run.timeout,
        },
        template: run.template.clone(),
        output: run.output.clone(),
        filter_by: run.filter_by,
        escape_html: run.escape_html,
    };
    let runner = Runner::new(options).map_err(|e| e.to_string())?;

    let animals = match runner.query() {
        Some(query) => {
            let pb = spinner(format!("looking up '{query}'"));
            let result = runner.load_records();
            pb.finish_and_clear();
            result
        }
        None => runner.load_records(),
    }
    .map_err(|e| e.to_string())?;
    utils::info(&format!("loaded {} animal(s)", animals.len()));

    let template = runner.load_template().map_err(|e| e.to_string())?;

    let filter = if animals.is_empty() {
        None
    } else {
        choose_filter(&run, &animals)?
    };

    let page = runner.render_page(&template, &animals, filter.as_ref());
    if !page.marker_found {
        utils::warn(&format!(
            "template {} has no {} marker, writing it unchanged",
            run.template,
            crate::template::MARKER
        ));
    }
    if page.not_found {
        utils::warn(&format!(
            "the animal '{}' doesn't exist",
            runner.query().unwrap_or_default()
        ));
    }
    runner.write_page(&page).map_err(|e| e.to_string())?;

    utils::success(&format!(
        "Website was successfully generated to the file {} ({} card(s)).",
        run.output, page.cards
    ));

    if run.open_browser {
        if let Err(e) = open::that(&run.output) {
            utils::warn(&format!("could not open {} in a browser: {e}", run.output));
        }
    }
    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = e.print();
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };
    if args.no_color {
        colored::control::set_override(false);
    }

    if args.init_config {
        let path = config::default_config_path()
            .ok_or_else(|| "could not determine home directory".to_string())?;
        if config::ensure_default_config_file(&path)? {
            utils::info(&format!("wrote default config to {}", path.display()));
        } else {
            utils::info(&format!("config already exists at {}", path.display()));
        }
        return Ok(());
    }

    let cfg = match args.config.as_deref() {
        Some(path) => config::load_config(&config::expand_tilde(path), false)?,
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, true)?,
            None => ConfigFile::default(),
        },
    };

    let run_config = build_run_config(args, cfg)?;
    run(run_config)
}
