use std::{
    fs,
    io::{self, Write},
    path::Path,
    sync::Arc,
};

use anyhow::{Context, Result, bail};
use clap::{Arg, ArgAction, ArgMatches, Command};
use datalist_engine::{
    CatalogModuleLoader, ConfigurationResolver, ModuleLoader, configuration_fields, convert_stored_value,
    default_registry, resolve_display_mode,
};
use datalist_registry::{MemoryErrorSink, ProviderRegistry, RegistryConfig, TeeErrorSink, TracingErrorSink, initialize};
use datalist_types::{ProviderFamily, RawConfiguration};
use datalist_util::expand_tilde;
use serde_json::Value;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_tracing();
    let matches = build_cli().get_matches();

    let config = RegistryConfig::load();
    let catalogs = match matches.get_many::<String>("catalog") {
        Some(values) => values.map(|path| expand_tilde(path)).collect(),
        None => config.module_catalog_paths(),
    };
    debug!(catalog_count = catalogs.len(), "module catalogs configured");

    let loader: Arc<dyn ModuleLoader> = Arc::new(CatalogModuleLoader::new(catalogs));
    let registry = initialize(default_registry(Arc::clone(&loader)).context("failed to build provider registry")?)?;

    let mut out = io::stdout().lock();
    let mut err = io::stderr().lock();
    run_command(registry, loader.as_ref(), &matches, &mut out, &mut err)
}

/// Dispatches a parsed command line. Results go to `out`, provider failure
/// summaries to `err`.
fn run_command(
    registry: &ProviderRegistry,
    loader: &dyn ModuleLoader,
    matches: &ArgMatches,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<()> {
    match matches.subcommand() {
        Some(("providers", sub)) => list_providers(registry, sub, out),
        Some(("resolve", sub)) => resolve_file(registry, sub, out, err),
        Some(("fields", _)) => write_json(out, &configuration_fields(registry)),
        Some(("convert", sub)) => convert_values(registry, sub, out),
        Some(("display-mode", sub)) => show_display_mode(registry, sub, out),
        Some(("modules", sub)) => list_modules(loader, sub, out),
        Some((other, _)) => bail!("unknown command: {other}"),
        None => bail!("a command is required; see --help"),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_cli() -> Command {
    let file_arg = || {
        Arg::new("file")
            .required(true)
            .action(ArgAction::Set)
            .help("Raw configuration file (YAML or JSON)")
    };

    Command::new("datalist")
        .about("Inspect data-list providers and resolve data-list configurations")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("catalog")
                .long("catalog")
                .short('c')
                .global(true)
                .action(ArgAction::Append)
                .help("Module catalog directory; overrides moduleCatalogs from the config file"),
        )
        .subcommand(
            Command::new("providers").about("List registered providers").arg(
                Arg::new("family")
                    .long("family")
                    .short('f')
                    .action(ArgAction::Set)
                    .help("Only list one family (data-source, list-editor, value-converter, display-mode)"),
            ),
        )
        .subcommand(
            Command::new("resolve")
                .about("Resolve a raw configuration and print the result")
                .arg(file_arg()),
        )
        .subcommand(Command::new("fields").about("Print the configuration editor field model"))
        .subcommand(
            Command::new("convert")
                .about("Convert stored values using the configured value converter")
                .arg(file_arg())
                .arg(
                    Arg::new("values")
                        .required(true)
                        .num_args(1..)
                        .action(ArgAction::Append)
                        .help("Stored values"),
                ),
        )
        .subcommand(
            Command::new("display-mode")
                .about("Print the selected display mode with its effective settings")
                .arg(file_arg()),
        )
        .subcommand(
            Command::new("modules")
                .about("List catalog modules, or the enumerations of one module")
                .arg(Arg::new("module").action(ArgAction::Set).help("Module identifier")),
        )
}

fn read_raw_configuration(path: &Path) -> Result<RawConfiguration> {
    let content = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let is_json = path.extension().and_then(|extension| extension.to_str()) == Some("json");
    let raw = if is_json {
        serde_json::from_str(&content).with_context(|| format!("failed to parse {} as JSON", path.display()))?
    } else {
        serde_yaml::from_str(&content).with_context(|| format!("failed to parse {} as YAML", path.display()))?
    };
    Ok(raw)
}

fn file_argument(matches: &ArgMatches) -> Result<RawConfiguration> {
    let file = matches.get_one::<String>("file").context("missing configuration file")?;
    read_raw_configuration(Path::new(file))
}

fn write_json(out: &mut dyn Write, value: &impl serde::Serialize) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

fn list_providers(registry: &ProviderRegistry, matches: &ArgMatches, out: &mut dyn Write) -> Result<()> {
    let families = match matches.get_one::<String>("family") {
        Some(family) => vec![family.parse::<ProviderFamily>()?],
        None => ProviderFamily::ALL.to_vec(),
    };

    for family in families {
        writeln!(out, "{family}:")?;
        for descriptor in registry.list(family) {
            let mut line = format!("  {:<20} {}", descriptor.key, descriptor.display_name);
            if !descriptor.description.is_empty() {
                line.push_str(&format!(" - {}", descriptor.description));
            }
            if let Some(view) = registry
                .get(family, &descriptor.key)
                .and_then(|entry| entry.provider.view())
            {
                line.push_str(&format!(" [view: {view}]"));
            }
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}

fn resolve_file(
    registry: &ProviderRegistry,
    matches: &ArgMatches,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<()> {
    let raw = file_argument(matches)?;
    let failures = MemoryErrorSink::new();
    let sink = TeeErrorSink::new(&TracingErrorSink, &failures);

    let resolved = ConfigurationResolver::new(registry)
        .with_error_sink(&sink)
        .resolve(&raw)
        .context("configuration is malformed")?;
    write_json(out, &resolved)?;

    if !failures.is_empty() {
        warn!(failure_count = failures.len(), "providers failed during resolution");
        for message in failures.messages() {
            writeln!(err, "provider failure: {message}")?;
        }
    }
    Ok(())
}

fn convert_values(registry: &ProviderRegistry, matches: &ArgMatches, out: &mut dyn Write) -> Result<()> {
    let raw = file_argument(matches)?;
    let mut values: Vec<Value> = matches
        .get_many::<String>("values")
        .into_iter()
        .flatten()
        .map(|value| Value::String(value.clone()))
        .collect();
    let stored = if values.len() == 1 {
        values.swap_remove(0)
    } else {
        Value::Array(values)
    };

    let converted = convert_stored_value(&raw, registry, &stored).context("configuration is malformed")?;
    write_json(out, &converted)
}

fn show_display_mode(registry: &ProviderRegistry, matches: &ArgMatches, out: &mut dyn Write) -> Result<()> {
    let raw = file_argument(matches)?;
    match resolve_display_mode(&raw, registry).context("configuration is malformed")? {
        Some(settings) => write_json(out, &settings),
        None => {
            writeln!(out, "No display mode selected")?;
            Ok(())
        }
    }
}

fn list_modules(loader: &dyn ModuleLoader, matches: &ArgMatches, out: &mut dyn Write) -> Result<()> {
    match matches.get_one::<String>("module") {
        Some(module) => {
            let handle = loader.load_module(module)?;
            for enumeration in loader.list_enumerations(&handle) {
                writeln!(out, "{enumeration}")?;
            }
        }
        None => {
            let modules = loader.list_modules()?;
            if modules.is_empty() {
                writeln!(out, "No modules found; configure moduleCatalogs or pass --catalog")?;
            }
            for module in modules {
                writeln!(out, "{module}")?;
            }
        }
    }
    Ok(())
}
