//! Reading the plan from standard input.

use crate::error::{Result, TpfError};
use std::io::{IsTerminal, Read};

/// Fail unless the input comes from a pipe or a redirected file.
pub fn ensure_piped<T: IsTerminal>(stdin: &T) -> Result<()> {
	if stdin.is_terminal() {
		return Err(TpfError::NotPiped);
	}
	Ok(())
}

/// Read the whole plan into memory.
pub fn read_plan<R: Read>(mut reader: R) -> Result<String> {
	let mut plan = String::new();
	reader
		.read_to_string(&mut plan)
		.map_err(|source| TpfError::InputReadError { source })?;
	Ok(plan)
}
