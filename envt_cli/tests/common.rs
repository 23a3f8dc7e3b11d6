use assert_cmd::Command;
use envt_core::AnyResult;

pub fn envt_cmd() -> AnyResult<Command> {
	let mut cmd = Command::cargo_bin("envt")?;
	cmd.env("NO_COLOR", "1").env_remove("ENVT_LOG");
	Ok(cmd)
}
