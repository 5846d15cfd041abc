//! Command handlers.
//!
//! Each handler renders its whole output to a `String`; the binary prints
//! it. Text and JSON renderings live side by side.

use std::fmt::Write as _;
use std::path::Path;

use bearcalc_core::calculations::{Calculation, CalculationItem, Evaluation, Keypad, Report, UnitConverterInput};
use bearcalc_core::calculations::keypad::tokenize;
use bearcalc_core::format::trimmed;
use bearcalc_core::registry::{self, CalculatorDescriptor, Category, FieldKind};
use bearcalc_core::{CalcError, FormState};
use chrono::NaiveDate;
use serde::Serialize;

use crate::cli::{ConfigAction, ConfigCommand, ConvertCommand, KeysCommand, ListCommand, RunCommand, ShowCommand};
use crate::config::Config;
use crate::error::{Error, Result};

/// Listing entry for `list --json`.
#[derive(Debug, Serialize)]
struct CalculatorSummary<'a> {
    id: &'a str,
    title: &'a str,
    description: &'a str,
    category: &'a str,
}

impl<'a> From<&'a CalculatorDescriptor> for CalculatorSummary<'a> {
    fn from(d: &'a CalculatorDescriptor) -> Self {
        Self {
            id: d.id.slug(),
            title: d.title,
            description: d.description,
            category: d.category.display_name(),
        }
    }
}

fn find_calculator(slug: &str) -> Result<&'static CalculatorDescriptor> {
    registry::find(slug).ok_or_else(|| {
        CalcError::UnknownCalculator {
            slug: slug.trim().to_string(),
        }
        .into()
    })
}

/// Width of the widest label, for aligned text output.
fn label_width<'a>(labels: impl Iterator<Item = &'a str>) -> usize {
    labels.map(|l| l.chars().count()).max().unwrap_or(0)
}

// ============================================================================
// list
// ============================================================================

/// `bearcalc list`
pub fn list(cmd: &ListCommand, json: bool) -> Result<String> {
    let category = match &cmd.category {
        Some(name) => Some(
            Category::parse(name).ok_or_else(|| Error::invalid_argument(format!("unknown category '{name}'")))?,
        ),
        None => None,
    };

    let matches: Vec<_> = registry::search(cmd.search.as_deref().unwrap_or(""))
        .into_iter()
        .filter(|d| category.map_or(true, |c| d.category == c))
        .collect();

    if json {
        let summaries: Vec<CalculatorSummary<'_>> = matches.iter().map(|d| CalculatorSummary::from(*d)).collect();
        return Ok(serde_json::to_string_pretty(&summaries)?);
    }

    if matches.is_empty() {
        return Ok("No calculators match.".to_string());
    }

    let width = label_width(matches.iter().map(|d| d.id.slug()));
    let mut out = String::new();
    for (category, descriptors) in registry::by_category(matches) {
        let _ = writeln!(out, "{category}");
        for d in descriptors {
            let _ = writeln!(out, "  {:<width$}  {}", d.id.slug(), d.title);
        }
        out.push('\n');
    }
    Ok(out.trim_end().to_string())
}

// ============================================================================
// show
// ============================================================================

/// `bearcalc show <slug>`
pub fn show(cmd: &ShowCommand, json: bool) -> Result<String> {
    let d = find_calculator(&cmd.slug)?;
    if json {
        return Ok(serde_json::to_string_pretty(d)?);
    }

    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", d.title, d.id);
    let _ = writeln!(out, "Category: {}", d.category);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", d.description);
    let _ = writeln!(out);
    let _ = writeln!(out, "How it works");
    let _ = writeln!(out, "  {}", d.explanation);
    let _ = writeln!(out);
    let _ = writeln!(out, "Fields");
    let width = label_width(d.fields.iter().map(|f| f.key));
    for field in d.fields {
        let unit = if field.unit.is_empty() {
            String::new()
        } else {
            format!(" ({})", field.unit)
        };
        let options = match field.kind {
            FieldKind::Choice(options) => format!(" [{}]", options.join("|")),
            _ => String::new(),
        };
        let _ = writeln!(
            out,
            "  {:<width$}  {}{}{}  default: {}",
            field.key,
            field.label,
            unit,
            options,
            if field.default.is_empty() { "(none)" } else { field.default },
        );
    }
    if !d.faq.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "FAQ");
        for faq in d.faq {
            let _ = writeln!(out, "  Q: {}", faq.question);
            let _ = writeln!(out, "  A: {}", faq.answer);
        }
    }
    Ok(out.trim_end().to_string())
}

// ============================================================================
// run
// ============================================================================

/// Seed a form with registry defaults, then config overrides, then the
/// command-line assignments.
pub fn build_form(
    descriptor: &CalculatorDescriptor,
    config: &Config,
    assignments: &[String],
    today: NaiveDate,
) -> Result<FormState> {
    let mut form = FormState::with_defaults(descriptor, today);
    for (key, value) in config.defaults_for(descriptor.id) {
        form.set(key, value);
    }
    for assignment in assignments {
        let (key, _) = assignment
            .split_once('=')
            .ok_or_else(|| Error::invalid_argument(format!("expected key=value, got '{assignment}'")))?;
        let key = key.trim();
        if descriptor.field(key).is_none() {
            return Err(Error::invalid_argument(format!("'{key}' is not a field of {}", descriptor.id)));
        }
        form.assign(assignment)?;
    }
    Ok(form)
}

fn render_evaluation(title: &str, evaluation: &Evaluation) -> String {
    let width = label_width(evaluation.report.iter().map(|l| l.label.as_str()));
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    for line in &evaluation.report {
        let _ = writeln!(out, "  {:<width$}  {}", line.label, line.value);
    }
    out.trim_end().to_string()
}

/// `bearcalc run <slug> [key=value ...]`
pub fn run(cmd: &RunCommand, config: &Config, today: NaiveDate) -> Result<String> {
    let descriptor = find_calculator(&cmd.slug)?;
    let today = cmd.today.unwrap_or(today);
    let form = build_form(descriptor, config, &cmd.assignments, today)?;
    let symbol = &config.output.currency_symbol;

    tracing::debug!(calculator = %descriptor.id, strict = cmd.strict, "running calculator");
    let evaluation = if cmd.strict {
        CalculationItem::try_from_form(descriptor.id, &form)?.calculate(symbol)?
    } else {
        CalculationItem::from_form(descriptor.id, &form).evaluate(symbol)?
    };

    if cmd.json || config.output.json {
        Ok(serde_json::to_string_pretty(&evaluation)?)
    } else {
        Ok(render_evaluation(descriptor.title, &evaluation))
    }
}

// ============================================================================
// convert
// ============================================================================

/// `bearcalc convert <value> <from> <to>`
pub fn convert(cmd: &ConvertCommand, config: &Config) -> Result<String> {
    let mut form = FormState::new()
        .with("value", cmd.value.as_str())
        .with("from_unit", cmd.from.as_str())
        .with("to_unit", cmd.to.as_str());
    if let Some(category) = &cmd.category {
        form.set("category", category.as_str());
    }

    let input = UnitConverterInput::from_form(&form);
    let result = input.calculate()?;

    if cmd.json || config.output.json {
        return Ok(serde_json::to_string_pretty(&result)?);
    }
    let converted = result
        .report(&config.output.currency_symbol)
        .into_iter()
        .next()
        .map(|line| line.value)
        .unwrap_or_default();
    Ok(format!("{} {} = {}", trimmed(input.value, 6), input.from_unit, converted))
}

// ============================================================================
// keys
// ============================================================================

/// `bearcalc keys <sequence>`
pub fn keys(cmd: &KeysCommand) -> Result<String> {
    let sequence = cmd.keys.join(" ");
    let keys = tokenize(&sequence)?;
    let mut keypad = Keypad::new();

    if !cmd.steps {
        keypad.press_all(&keys);
        return Ok(keypad.display().to_string());
    }

    let mut out = String::new();
    for (i, key) in keys.iter().enumerate() {
        keypad.press(*key);
        let _ = writeln!(out, "{:>3}  {}", i + 1, keypad.display());
    }
    Ok(out.trim_end().to_string())
}

// ============================================================================
// config
// ============================================================================

fn render_config(config: &Config) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Current Configuration");
    let _ = writeln!(out, "=====================");
    let _ = writeln!(out);
    let _ = writeln!(out, "[Output]");
    let _ = writeln!(out, "  JSON:             {}", config.output.json);
    let _ = writeln!(out, "  Currency symbol:  {}", config.output.currency_symbol);
    let _ = writeln!(out);
    let _ = writeln!(out, "[Defaults]");
    if config.defaults.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for (slug, fields) in &config.defaults {
        for (key, value) in fields {
            let _ = writeln!(out, "  {slug}.{key} = {value}");
        }
    }
    out.trim_end().to_string()
}

/// `bearcalc config [show|path|validate]`
pub fn config(cmd: &ConfigCommand, config: &Config) -> Result<String> {
    match cmd.action.clone().unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => {
            if cmd.json || config.output.json {
                Ok(serde_json::to_string_pretty(config)?)
            } else {
                Ok(render_config(config))
            }
        }
        ConfigAction::Path => Ok(Config::default_config_path().display().to_string()),
        ConfigAction::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            validate_file(&path)
        }
    }
}

fn validate_file(path: &Path) -> Result<String> {
    Config::load_from(Some(path.to_path_buf()))?;
    Ok(format!("Configuration is valid: {}", path.display()))
}
