use eyre::eyre;
use std::path::Path;
use std::process::Command;
use std::str;
use tracing::{debug, trace};

use crate::error::{handle_exec_error, handle_generic_error, Error};

pub struct ExecOutput {
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutput {
    /**
       The command's output with both streams combined. Some binaries,
       e.g. `gaiad version`, print to stderr only.
    */
    pub fn combined(&self) -> String {
        format!("{}{}", self.stdout, self.stderr).trim().to_string()
    }
}

pub fn simple_exec(desc: &str, command_path: &str, args: &[&str]) -> Result<ExecOutput, Error> {
    debug!(
        "Executing command for {}: {} {}",
        desc,
        command_path,
        itertools::join(args, " ")
    );

    let mut command = Command::new(command_path);
    command.args(args);

    run_command(command_path, command)
}

/**
   Same as [`simple_exec`], with `dir` as the working directory.
*/
pub fn exec_in_dir(
    desc: &str,
    dir: &Path,
    command_path: &str,
    args: &[&str],
) -> Result<ExecOutput, Error> {
    debug!(
        "Executing command for {} in {}: {} {}",
        desc,
        dir.display(),
        command_path,
        itertools::join(args, " ")
    );

    let mut command = Command::new(command_path);
    command.current_dir(dir).args(args);

    run_command(command_path, command)
}

fn run_command(command_path: &str, mut command: Command) -> Result<ExecOutput, Error> {
    let output = command.output().map_err(handle_exec_error(command_path))?;

    if output.status.success() {
        let stdout = str::from_utf8(&output.stdout)
            .map_err(handle_generic_error)?
            .to_string();

        let stderr = str::from_utf8(&output.stderr)
            .map_err(handle_generic_error)?
            .to_string();

        trace!(
            "command executed successfully with stdout: {}, stderr: {}",
            stdout,
            stderr
        );

        Ok(ExecOutput { stdout, stderr })
    } else {
        let message = str::from_utf8(&output.stderr).map_err(handle_generic_error)?;

        Err(Error::generic(eyre!(
            "command exited with error status {:?} and message: {}",
            output.status.code(),
            message
        )))
    }
}
