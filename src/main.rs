use clap::{Parser, Subcommand};
use simple_site::config::{self, WizardConfig};
use simple_site::definition::WizardDefinition;
use simple_site::locale::Locale;
use simple_site::view::{self, render_page, render_wizard};
use simple_site::wizard::{NavAction, WizardController, completion_fn};
use simple_site::output;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Field assignments shared by commands that pre-fill the form.
#[derive(clap::Args, Clone)]
struct FieldArgs {
    /// Set a form field before running (repeatable): --set email=ada@example.com
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    fields: Vec<(String, String)>,

    /// Locale to render in (defaults to [locale] default in wizard.toml)
    #[arg(long)]
    locale: Option<Locale>,
}

#[derive(Parser)]
#[command(name = "simple-site")]
#[command(about = "Render and exercise Simple Site step wizards")]
#[command(long_about = "\
Render and exercise Simple Site step wizards

A wizard is described in a TOML definition file:

  title = { en = \"Start a project\", fr = \"Démarrer un projet\" }

  [[steps]]
  title = { en = \"Your details\", fr = \"Vos coordonnées\" }

  [[steps.fields]]
  name = \"email\"
  label = { en = \"Email\", fr = \"Courriel\" }
  kind = \"email\"          # text | email | tel | textarea
  required = true

Presentation (back navigation, progress, transitions, colors, submission
timeout) comes from wizard.toml in the --config directory.

Run 'simple-site gen-config' to generate a documented wizard.toml.")]
#[command(version)]
struct Cli {
    /// Directory containing wizard.toml
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    /// Log navigation decisions to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render one step of a wizard as a standalone HTML page
    Render {
        /// Wizard definition file
        definition: PathBuf,
        /// 1-based step to render
        #[arg(long, default_value_t = 1)]
        step: usize,
        /// Write HTML here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Drive a wizard through a sequence of actions and print each transition
    Simulate {
        /// Wizard definition file
        definition: PathBuf,
        /// Comma-separated actions: next, previous, goto:N (N is 1-based)
        #[arg(long, value_delimiter = ',', default_value = "next")]
        actions: Vec<String>,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Validate a wizard definition and wizard.toml without rendering
    Check {
        /// Wizard definition file
        definition: PathBuf,
    },
    /// Print a stock wizard.toml with all options documented
    GenConfig,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Render {
            definition,
            step,
            output,
            fields,
        } => {
            let site_config = config::load_config(&cli.config)?;
            let wizard_def = WizardDefinition::load(&definition)?;
            let options = site_config.options(fields.locale);
            let locale = options.locale;
            let registry = wizard_def.registry()?;
            let index = step_index(step, registry.len())?;
            let wizard = WizardController::new(registry, options);
            for (name, value) in fields.fields {
                wizard.set_field(name, value);
            }
            wizard.go_to_step(index);

            let css = view::wizard_css(&site_config.colors, &site_config.layout.padding);
            let body = render_wizard(&wizard, site_config.motion());
            let page = render_page(wizard_def.page_title(locale), locale, &css, body);
            match output {
                Some(path) => {
                    std::fs::write(&path, page.into_string())?;
                    println!(
                        "Rendered step {} → {}",
                        wizard.state().current_step_index + 1,
                        path.display()
                    );
                }
                None => println!("{}", page.into_string()),
            }
        }
        Command::Simulate {
            definition,
            actions,
            fields,
        } => {
            let site_config = config::load_config(&cli.config)?;
            let wizard_def = WizardDefinition::load(&definition)?;
            let options = site_config.options(fields.locale);
            let locale = options.locale;
            let wizard = WizardController::new(wizard_def.registry()?, options).with_completion(
                completion_fn(|data| async move {
                    match serde_json::to_string(&data) {
                        Ok(json) => println!("==> Submitted {json}"),
                        Err(e) => tracing::warn!(error = %e, "could not encode submission"),
                    }
                    Ok(())
                }),
            );
            for (name, value) in fields.fields {
                wizard.set_field(name, value);
            }

            for (i, raw) in actions.iter().enumerate() {
                let action = parse_cli_action(raw)?;
                let outcome = wizard.dispatch(action).await;
                let state = wizard.state();
                let title = wizard
                    .registry()
                    .get(state.current_step_index)
                    .map(|s| s.title.resolve(locale))
                    .unwrap_or("");
                let state_lines = output::format_state(&state, title, locale);
                output::print_transition(i + 1, action, outcome, &state_lines);
            }
            output::print_collected(&wizard.form());
        }
        Command::Check { definition } => {
            check(&cli.config, &definition)?;
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn check(config_dir: &Path, definition: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("==> Checking {}", definition.display());
    let site_config: WizardConfig = config::load_config(config_dir)?;
    let wizard_def = WizardDefinition::load(definition)?;
    let registry = wizard_def.registry()?;
    let locale = site_config.locale.default;
    for (i, step) in registry.iter().enumerate() {
        let gate = if step.validator().is_some() { " (validated)" } else { "" };
        println!("{:0>3} {}{}", i + 1, step.title.resolve(locale), gate);
    }
    println!("==> Definition is valid");
    Ok(())
}

/// Actions on the command line use 1-based step numbers.
fn parse_cli_action(raw: &str) -> Result<NavAction, Box<dyn std::error::Error>> {
    match raw.parse::<NavAction>()? {
        NavAction::GoTo(0) => Err(format!("step numbers start at 1: '{raw}'").into()),
        NavAction::GoTo(n) => Ok(NavAction::GoTo(n - 1)),
        other => Ok(other),
    }
}

/// Convert a 1-based `--step` to an index, rejecting steps the wizard lacks.
fn step_index(step: usize, total: usize) -> Result<usize, String> {
    if step == 0 || step > total {
        return Err(format!("--step {step} is out of range: the wizard has {total} step(s)"));
    }
    Ok(step - 1)
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    if name.trim().is_empty() {
        return Err(format!("missing field name in '{s}'"));
    }
    Ok((name.trim().to_string(), value.to_string()))
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "simple_site=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
