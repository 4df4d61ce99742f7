mod common;

use lispabbrev_core::AnyEmptyResult;
use rstest::rstest;

#[rstest]
#[case::literal("(w|", " ", "(when |\n")]
#[case::cursor_template("(df|", " ", "(defun | ()\n")]
#[case::closing_paren("(w|", ")", "(when)|\n")]
#[case::closing_paren_after_cursor("(df|", ")", "(defun | ())\n")]
#[case::function_quote("#'l|", " ", "#'lambda |\n")]
#[case::after_space("(foo w|", " ", "(foo w |\n")]
#[case::inside_string("(message \"(w|", " ", "(message \"(w |\n")]
#[case::point_at_end("(u", " ", "(unless |\n")]
fn expand_types_key_at_point(
	#[case] text: &str,
	#[case] key: &str,
	#[case] expected: &str,
) -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::lispabbrev_cmd()
		.arg("expand")
		.arg(text)
		.arg("--key")
		.arg(key)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(expected.to_string());

	Ok(())
}

#[test]
fn expand_uses_configured_abbrevs() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("lispabbrev.toml"),
		"disabled = [\"w\"]\n\n[abbrevs]\npm = \"pcase $\"\n",
	)?;

	common::lispabbrev_cmd()
		.args(["expand", "(pm|", "--path"])
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("(pcase |\n");

	common::lispabbrev_cmd()
		.args(["expand", "(w|", "--path"])
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("(w |\n");

	Ok(())
}

#[test]
fn expand_reports_invalid_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("lispabbrev.toml"), "[abbrevs\n")?;

	common::lispabbrev_cmd()
		.args(["expand", "(w|", "--path"])
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("failed to parse config file"));

	Ok(())
}

#[test]
fn expand_reports_invalid_trigger() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join(".lispabbrev.toml"),
		"[abbrevs]\n\"foo-bar\" = \"x\"\n",
	)?;

	common::lispabbrev_cmd()
		.args(["expand", "(w|", "--path"])
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("invalid trigger"));

	Ok(())
}

#[test]
fn expand_logs_rejections_when_verbose() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::lispabbrev_cmd()
		.args(["expand", "(foo w|", "--verbose", "--path"])
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("(foo w |\n")
		.stderr(predicates::str::contains("abbrev rejected"));

	Ok(())
}

#[test]
fn expand_skeleton_indents_body() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	let output = common::lispabbrev_cmd()
		.args(["expand", "(dfi|", "--path"])
		.arg(tmp.path())
		.output()?;
	assert!(output.status.success());

	let stdout = String::from_utf8(output.stdout)?;
	insta::assert_snapshot!(stdout.trim_end(), @r#"
	(defun | ()
	  ""
	  (interactive)
	"#);

	Ok(())
}
