/// Value validation command.
pub mod check;
/// Schema-level information command.
pub mod info;
/// Compiled namespace inspection command.
pub mod types;
