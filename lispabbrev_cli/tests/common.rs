use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub fn lispabbrev_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("lispabbrev"));
	cmd.env("NO_COLOR", "1").env_remove("LISPABBREV_LOG");
	cmd
}
