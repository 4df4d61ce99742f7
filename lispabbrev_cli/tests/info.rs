mod common;

use lispabbrev_core::AnyEmptyResult;
use predicates::prelude::PredicateBooleanExt;

#[test]
fn info_without_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::lispabbrev_cmd()
		.args(["info", "--path"])
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(
			predicates::str::contains(format!("{:<24} none", "Config"))
				.and(predicates::str::contains(format!("{:<24} $", "Marker")))
				.and(predicates::str::contains(format!(
					"{:<24} enabled",
					"Built-in abbreviations"
				))),
		);

	Ok(())
}

#[test]
fn info_reports_discovered_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::create_dir(tmp.path().join(".config"))?;
	std::fs::write(
		tmp.path().join(".config/lispabbrev.toml"),
		"marker = \"@\"\nuse_defaults = false\n\n[abbrevs]\npm = \"pcase @\"\nht = \
		 \"make-hash-table\"\n",
	)?;

	common::lispabbrev_cmd()
		.args(["info", "--path"])
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(
			predicates::str::contains(format!("{:<24} .config/lispabbrev.toml", "Config"))
				.and(predicates::str::contains(format!("{:<24} @", "Marker")))
				.and(predicates::str::contains(format!(
					"{:<24} disabled",
					"Built-in abbreviations"
				)))
				.and(predicates::str::contains(format!("{:<24} 2", "Configured abbrevs")))
				.and(predicates::str::contains(format!("{:<24} 2", "Table size"))),
		);

	Ok(())
}

#[test]
fn missing_subcommand_fails() {
	common::lispabbrev_cmd()
		.assert()
		.code(1)
		.stderr(predicates::str::contains("No subcommand specified"));
}
