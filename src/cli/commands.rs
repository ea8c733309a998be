use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::Path;

use fieldfmt::config::{FieldfmtConfig, STARTER_CONFIG};
use fieldfmt::registry::{self, FormatterRegistry};
use fieldfmt::{Direction, Formatter, FormatterClass};

/// Build the registry from config and make it the process-wide one
pub fn install_registry(config_path: Option<&Path>) -> Result<()> {
    let config = FieldfmtConfig::load(config_path)?;
    let registry =
        FormatterRegistry::from_config(&config).context("Invalid formatter definitions")?;

    tracing::info!(
        component = "cli",
        formatters = registry.len(),
        "Registry loaded"
    );

    registry::install(registry)?;
    Ok(())
}

pub fn format(name: &str, text: Option<&str>, reverse: bool) -> Result<()> {
    let formatter = registry::global().formatter(name)?;

    if let Some(text) = text {
        println!("{}", formatter.format_string(text, reverse)?);
        return Ok(());
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for (index, line) in stdin.lock().lines().enumerate() {
        let line = line.context("Failed to read value from stdin")?;
        let result = formatter
            .format_string(&line, reverse)
            .with_context(|| format!("Line {}", index + 1))?;
        writeln!(stdout, "{}", result)?;
    }

    Ok(())
}

/// Outcome of transforming a value and transforming it back
#[derive(Debug, PartialEq, Eq)]
pub struct RoundTrip {
    pub there: String,
    pub back: String,
}

impl RoundTrip {
    pub fn run(formatter: &dyn Formatter, text: &str, direction: Direction) -> Result<Self> {
        let there = formatter.apply(text, direction)?;
        let back = formatter.apply(&there, direction.opposite())?;
        Ok(Self { there, back })
    }

    pub fn is_exact(&self, original: &str) -> bool {
        self.back == original
    }
}

pub fn check(name: &str, text: &str, reverse: bool) -> Result<()> {
    let formatter = registry::global().formatter(name)?;
    let direction = Direction::from_reverse(reverse);
    let trip = RoundTrip::run(formatter.as_ref(), text, direction)?;

    println!("Formatter: {} ({})", formatter.name(), formatter.kind());
    println!("Input:     {}", text);
    println!("{:<10} {}", if reverse { "Raw:" } else { "Display:" }, trip.there);
    println!("Back:      {}", trip.back);

    if !trip.is_exact(text) {
        anyhow::bail!("Value changed after a round trip: '{}' became '{}'", text, trip.back);
    }
    println!("Round trip: ok");
    Ok(())
}

#[derive(Serialize)]
struct ListEntry<'a> {
    name: &'a str,
    #[serde(flatten)]
    class: &'a FormatterClass,
}

pub fn render_list(registry: &FormatterRegistry) -> String {
    let mut out = format!("{:<20} {:<10} {}\n", "Name", "Kind", "Details");
    out.push_str(&"-".repeat(60));
    out.push('\n');
    for (name, class) in registry.entries() {
        out.push_str(&format!("{:<20} {:<10} {}\n", name, class.kind(), describe(class)));
    }
    out
}

pub fn render_list_json(registry: &FormatterRegistry) -> Result<String> {
    let entries: Vec<ListEntry> = registry
        .entries()
        .map(|(name, class)| ListEntry { name, class })
        .collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}

/// One-line summary of a class's parameters
fn describe(class: &FormatterClass) -> String {
    match class {
        FormatterClass::Plain => String::new(),
        FormatterClass::Mask { pattern } => format!("pattern \"{}\"", pattern),
        FormatterClass::Affix { prefix, suffix } => {
            format!("prefix \"{}\" suffix \"{}\"", prefix, suffix)
        }
        FormatterClass::Grouping {
            size,
            separator,
            align,
        } => format!(
            "size {} separator \"{}\" align {}",
            size,
            separator,
            align.as_str()
        ),
        FormatterClass::Escape { chars, escape } => format!("escape '{}' in \"{}\"", escape, chars),
        FormatterClass::Chain { steps } => steps.join(" -> "),
    }
}

pub fn list(json: bool) -> Result<()> {
    let registry = registry::global();
    if json {
        println!("{}", render_list_json(registry)?);
    } else {
        print!("{}", render_list(registry));
        println!("\nUnknown names: {:?}", registry.unknown_policy());
    }
    Ok(())
}

pub fn show(name: &str) -> Result<()> {
    let registry = registry::global();
    let class = registry.formatter_class(name)?;
    if !registry.contains(name) {
        println!("# '{}' is not registered; unknown names fall back to plain", name.trim());
    }
    print!("{}", toml::to_string_pretty(&class)?);
    Ok(())
}

pub fn config_path(config_path: Option<&Path>) -> Result<()> {
    let path = FieldfmtConfig::resolve_path(config_path);
    let state = if path.exists() { "exists" } else { "not created" };
    println!("{} ({})", path.display(), state);
    Ok(())
}

pub fn config_init(config_path: Option<&Path>, force: bool) -> Result<()> {
    let path = FieldfmtConfig::resolve_path(config_path);
    if path.exists() && !force {
        anyhow::bail!(
            "Config file {} already exists (use --force to overwrite)",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }
    std::fs::write(&path, STARTER_CONFIG)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(component = "cli", path = %path.display(), "Wrote starter config");
    println!("Wrote {}", path.display());
    Ok(())
}
