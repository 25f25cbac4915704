use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum MdrefError {
	#[error(transparent)]
	#[diagnostic(code(mdref::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse realm config: {0}")]
	#[diagnostic(
		code(mdref::config_parse),
		help("check that mdref.toml is valid TOML with [[users]], [[channels]] and friends")
	)]
	ConfigParse(String),

	#[error("helpers bundle is missing the `{0}` collaborator")]
	#[diagnostic(
		code(mdref::missing_collaborator),
		help("every collaborator must be supplied before calling `HelpersBuilder::build`")
	)]
	MissingCollaborator(&'static str),

	#[error("invalid linkifier pattern `{pattern}`: {reason}")]
	#[diagnostic(code(mdref::invalid_linkifier))]
	InvalidLinkifier { pattern: String, reason: String },

	#[error("duplicate {kind} id `{id}` in realm config")]
	#[diagnostic(
		code(mdref::duplicate_id),
		help("ids must be unique within each of [[users]], [[groups]] and [[channels]]")
	)]
	DuplicateId { kind: &'static str, id: u64 },

	#[error("unknown capability: `{0}`")]
	#[diagnostic(
		code(mdref::unknown_capability),
		help("run `mdref capabilities` to list the available names")
	)]
	UnknownCapability(String),

	#[error("capability `{capability}` expects {expected}")]
	#[diagnostic(code(mdref::invalid_argument))]
	InvalidArgument {
		capability: &'static str,
		expected: &'static str,
	},
}

pub type MdrefResult<T> = Result<T, MdrefError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
