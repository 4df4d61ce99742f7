use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use lispabbrev_cli::Commands;
use lispabbrev_cli::KindArg;
use lispabbrev_cli::LispAbbrevCli;
use lispabbrev_cli::OutputFormat;
use lispabbrev_core::AbbrevConfig;
use lispabbrev_core::AbbrevError;
use lispabbrev_core::AnyEmptyResult;
use lispabbrev_core::AnyResult;
use lispabbrev_core::DefinitionIndex;
use lispabbrev_core::DefinitionKind;
use lispabbrev_core::DetachedHost;
use lispabbrev_core::EditorContext;
use lispabbrev_core::ExpansionService;
use lispabbrev_core::NavigationOutcome;
use lispabbrev_core::NavigationStack;
use lispabbrev_core::POINT_MARKER;
use lispabbrev_core::TextBuffer;
use lispabbrev_core::find_or_define;
use lispabbrev_core::syntax;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "LISPABBREV_LOG";

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = LispAbbrevCli::parse();

	// Respect NO_COLOR, --no-color and terminals without color support.
	let use_color = !args.no_color
		&& std::env::var_os("NO_COLOR").is_none()
		&& supports_color::on(supports_color::Stream::Stdout).is_some();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::List { format }) => run_list(&args, *format),
		Some(Commands::Expand { text, key }) => run_expand(&args, text, *key),
		Some(Commands::Goto {
			file,
			point,
			kind,
			write,
		}) => run_goto(&args, file, *point, *kind, *write),
		Some(Commands::Info) => run_info(&args),
		None => {
			eprintln!("No subcommand specified. Run `lispabbrev --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Render core errors through miette for codes and help text.
		match e.downcast::<AbbrevError>() {
			Ok(abbrev_err) => {
				let report: miette::Report = (*abbrev_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

fn init_tracing(verbose: bool, use_color: bool) {
	let fallback = if verbose { "debug" } else { "warn" };
	let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.init();
}

fn resolve_root(args: &LispAbbrevCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}

fn print_field(label: &str, value: impl std::fmt::Display) {
	println!("{label:<24} {value}");
}

/// The project configuration and an activated service built from it.
struct Session {
	config: AbbrevConfig,
	config_path: Option<PathBuf>,
	service: ExpansionService,
}

fn load_session(root: &Path) -> AnyResult<Session> {
	let config_path = AbbrevConfig::resolve_path(root);
	let config = AbbrevConfig::load(root)?.unwrap_or_default();
	let mut service = ExpansionService::new(config.entries()?);
	service.activate(&mut DetachedHost);

	tracing::debug!(
		abbrevs = service.table().len(),
		config = ?config_path,
		"loaded abbreviation table"
	);

	Ok(Session {
		config,
		config_path,
		service,
	})
}

fn run_list(args: &LispAbbrevCli, format: OutputFormat) -> AnyEmptyResult {
	let session = load_session(&resolve_root(args))?;
	let table = session.service.table();

	match format {
		OutputFormat::Json => {
			let entries: Vec<serde_json::Value> = table
				.iter()
				.map(|(trigger, template)| {
					serde_json::json!({
						"trigger": trigger,
						"kind": template.kind(),
						"template": template.to_string(),
					})
				})
				.collect();
			let output = serde_json::json!({
				"count": table.len(),
				"abbrevs": entries,
			});
			println!("{}", serde_json::to_string_pretty(&output)?);
		}
		OutputFormat::Text => {
			if table.is_empty() {
				println!("No abbreviations defined.");
				return Ok(());
			}

			println!("{}", colored!("Abbreviations:", bold));
			let width = table.triggers().map(str::len).max().unwrap_or(0);
			for (trigger, template) in table.iter() {
				let text = template.to_string();
				println!("  {trigger:<width$} {:<9} {text:?}", template.kind());
			}
			println!("\n{} abbreviation(s)", table.len());
		}
	}

	Ok(())
}

fn run_expand(args: &LispAbbrevCli, text: &str, key: char) -> AnyEmptyResult {
	let session = load_session(&resolve_root(args))?;
	let mut buffer = TextBuffer::from_marked(text, POINT_MARKER);

	let outcome = session.service.self_insert(&mut buffer, key);
	if let Some(expansion) = outcome.expansion() {
		tracing::debug!(trigger = %expansion.trigger, stops = ?expansion.stops, "expanded");
	}

	println!("{buffer}");

	Ok(())
}

fn run_goto(
	args: &LispAbbrevCli,
	file: &Path,
	point: usize,
	kind: KindArg,
	write: bool,
) -> AnyEmptyResult {
	let root = resolve_root(args);
	let path = if file.is_absolute() {
		file.to_path_buf()
	} else {
		root.join(file)
	};

	let content = std::fs::read_to_string(&path).map_err(AbbrevError::from)?;
	let mut buffer = TextBuffer::with_point(content, point)?;
	let index = DefinitionIndex::build(&root)?;
	let mut stack = NavigationStack::new();

	let rel = make_relative(&path, &root);
	match find_or_define(&mut buffer, &index, &mut stack, kind.into()) {
		NavigationOutcome::NoSymbol => {
			println!("No symbol at point {point} in {rel}");
		}
		NavigationOutcome::Local { name, point } => {
			let source = buffer.contents();
			let (line, column) = syntax::line_column(&source, syntax::char_to_byte(&source, point));
			println!(
				"{} {name} {rel}:{line}:{column}",
				colored!("found", green)
			);
		}
		NavigationOutcome::External { name, location } => {
			println!(
				"{} {name} {}:{}:{}",
				colored!("found", green),
				make_relative(&location.path, &root),
				location.line,
				location.column
			);
		}
		NavigationOutcome::Inserted { name, start, .. } => {
			let source = buffer.contents();
			let (line, _) = syntax::line_column(&source, syntax::char_to_byte(&source, start));
			let head = DefinitionKind::from(kind).head();
			println!(
				"{} ({head} {name}) {rel}:{}",
				colored!("inserted", green),
				line + 2
			);

			if write {
				std::fs::write(&path, buffer.text()).map_err(AbbrevError::from)?;
				println!("Wrote {rel}");
			} else {
				println!();
				println!("{buffer}");
			}
		}
	}

	Ok(())
}

fn run_info(args: &LispAbbrevCli) -> AnyEmptyResult {
	let root = resolve_root(args);
	let session = load_session(&root)?;
	let config = &session.config;

	println!("{}", colored!("lispabbrev", bold));
	print_field("Root", root.display());
	print_field(
		"Config",
		session
			.config_path
			.as_deref()
			.map_or_else(|| "none".to_string(), |path| make_relative(path, &root)),
	);
	print_field("Marker", config.marker);
	print_field(
		"Built-in abbreviations",
		if config.use_defaults {
			"enabled"
		} else {
			"disabled"
		},
	);
	print_field("Disabled triggers", config.disabled.len());
	print_field("Configured abbrevs", config.abbrevs.len());
	print_field("Configured skeletons", config.skeletons.len());
	print_field("Table size", session.service.table().len());

	Ok(())
}
