mod common;

use mdref_core::AnyEmptyResult;
use rstest::rstest;
use serde_json::Value;
use similar_asserts::assert_eq;

#[rstest]
#[case::channel(&["stream_by_name", "general"], r#"{"name":"general","stream_id":5}"#)]
#[case::group(&["user_group_from_name", "backend"], r#"{"id":10,"name":"backend"}"#)]
#[case::user_name(&["user_id_from_name", "iago"], "2")]
#[case::membership(&["is_member_of_user_group", "2", "10"], "true")]
#[case::topic_hash(&["stream_topic_hash", "8", "lunch plans"], r##""#narrow/channel/8-design-team/topic/lunch.20plans""##)]
#[case::emoticons_setting(&["should_translate_emoticons"], "true")]
#[case::realm_emoji(&["realm_emoji_url", "1"], r#""/user_avatars/2/emoji/images/1.gif""#)]
#[case::unresolved(&["stream_by_name", "nowhere"], "null")]
fn resolve_prints_json(#[case] args: &[&str], #[case] expected: &str) -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_realm(tmp.path(), common::REALM_TOML)?;

	let output = common::mdref_cmd()
		.arg("resolve")
		.args(args)
		.arg("--format")
		.arg("compact")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.get_output()
		.stdout
		.clone();

	let actual: Value = serde_json::from_slice(&output)?;
	let expected: Value = serde_json::from_str(expected)?;
	assert_eq!(actual, expected);

	Ok(())
}

#[test]
fn resolve_unknown_capability_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_realm(tmp.path(), common::REALM_TOML)?;

	common::mdref_cmd()
		.arg("resolve")
		.arg("get_everything")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("unknown capability"));

	Ok(())
}

#[test]
fn resolve_with_bad_argument_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_realm(tmp.path(), common::REALM_TOML)?;

	common::mdref_cmd()
		.arg("resolve")
		.arg("stream_hash")
		.arg("general")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("expects <stream_id>"));

	Ok(())
}

#[test]
fn resolve_without_config_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::mdref_cmd()
		.arg("resolve")
		.arg("my_user_id")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("no realm config found"));

	Ok(())
}

#[test]
fn resolve_pretty_prints_by_default() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_realm(tmp.path(), common::REALM_TOML)?;

	common::mdref_cmd()
		.arg("resolve")
		.arg("stream_by_name")
		.arg("general")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("  \"stream_id\": 5"));

	Ok(())
}

#[rstest]
#[case::user_name(&["user_id_from_name", "--", "-bot"], "null")]
#[case::topic(&["stream_topic_hash", "--", "5", "-1"], r##""#narrow/channel/5-general/topic/-1""##)]
fn resolve_accepts_hyphen_values_after_separator(
	#[case] args: &[&str],
	#[case] expected: &str,
) -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_realm(tmp.path(), common::REALM_TOML)?;

	let output = common::mdref_cmd()
		.arg("resolve")
		.arg("--format")
		.arg("compact")
		.arg("--path")
		.arg(tmp.path())
		.args(args)
		.assert()
		.success()
		.get_output()
		.stdout
		.clone();

	let actual: Value = serde_json::from_slice(&output)?;
	let expected: Value = serde_json::from_str(expected)?;
	assert_eq!(actual, expected);

	Ok(())
}
