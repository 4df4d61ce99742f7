mod common;

use clap::Parser;
use lispabbrev_cli::Commands;
use lispabbrev_cli::KindArg;
use lispabbrev_cli::LispAbbrevCli;
use lispabbrev_core::AnyEmptyResult;

#[test]
fn goto_jumps_to_local_definition() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("a.el"),
		"(defun helper ()\n  1)\n\n(defun main ()\n  (helper))\n",
	)?;

	common::lispabbrev_cmd()
		.args(["goto", "a.el", "--point", "43", "--path"])
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("found helper a.el:1:8\n");

	Ok(())
}

#[test]
fn goto_finds_definition_in_project() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("b.el"), "(defun main ()\n  (other-fn))\n")?;
	std::fs::create_dir(tmp.path().join("lisp"))?;
	std::fs::write(
		tmp.path().join("lisp/lib.el"),
		";; helpers\n(defun other-fn ()\n  t)\n",
	)?;

	common::lispabbrev_cmd()
		.args(["goto", "b.el", "--point", "18", "--path"])
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("found other-fn lisp/lib.el:2:8\n");

	Ok(())
}

#[test]
fn goto_prints_inserted_definition() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let source = "(defun main ()\n  (missing))\n";
	std::fs::write(tmp.path().join("c.el"), source)?;

	common::lispabbrev_cmd()
		.args(["goto", "c.el", "--point", "18", "--path"])
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(
			"inserted (defun missing) c.el:4\n\n(defun main ()\n  (missing))\n\n(defun missing \
			 ()\n  |)\n\n",
		);

	// Nothing is written without --write.
	assert_eq!(std::fs::read_to_string(tmp.path().join("c.el"))?, source);

	Ok(())
}

#[test]
fn goto_writes_inserted_definition() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("d.el"), "(setq x (foo-var))\n")?;

	common::lispabbrev_cmd()
		.args(["goto", "d.el", "--point", "10", "--kind", "variable", "--write"])
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Wrote d.el"));

	similar_asserts::assert_eq!(
		std::fs::read_to_string(tmp.path().join("d.el"))?,
		"(setq x (foo-var))\n\n(defvar foo-var )\n"
	);

	Ok(())
}

#[test]
fn goto_reports_missing_symbol() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("e.el"), "(foo)   \n")?;

	common::lispabbrev_cmd()
		.args(["goto", "e.el", "--point", "7", "--path"])
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("No symbol at point 7 in e.el\n");

	Ok(())
}

#[test]
fn goto_rejects_point_outside_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("f.el"), "(foo)\n")?;

	common::lispabbrev_cmd()
		.args(["goto", "f.el", "--point", "99", "--path"])
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("outside of the buffer"));

	Ok(())
}

#[test]
fn goto_fails_for_missing_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::lispabbrev_cmd()
		.args(["goto", "missing.el", "--point", "0", "--path"])
		.arg(tmp.path())
		.assert()
		.code(2);

	Ok(())
}

#[test]
fn goto_arguments_parse() {
	let cli = LispAbbrevCli::parse_from(["lispabbrev", "goto", "a.el", "-p", "3"]);
	match cli.command {
		Some(Commands::Goto {
			point, kind, write, ..
		}) => {
			assert_eq!(point, 3);
			assert_eq!(kind, KindArg::Function);
			assert!(!write);
		}
		_ => panic!("expected Goto command"),
	}

	let cli = LispAbbrevCli::parse_from([
		"lispabbrev",
		"goto",
		"a.el",
		"--point",
		"3",
		"--kind",
		"macro",
		"--write",
	]);
	match cli.command {
		Some(Commands::Goto { kind, write, .. }) => {
			assert_eq!(kind, KindArg::Macro);
			assert!(write);
		}
		_ => panic!("expected Goto command"),
	}
}
