mod common;

use mdref_core::AnyEmptyResult;

#[test]
fn capabilities_lists_every_lookup() -> AnyEmptyResult {
	let output = common::mdref_cmd()
		.arg("capabilities")
		.assert()
		.success()
		.get_output()
		.stdout
		.clone();

	insta::assert_snapshot!(String::from_utf8(output)?, @r"
	actual_name_from_user_id <user_id>
	user_id_from_name <full_name>
	is_valid_full_name_and_user_id <full_name> <user_id>
	my_user_id
	is_valid_user_id <user_id>
	user_group_from_name <group_name>
	is_member_of_user_group <user_id> <group_id>
	stream_by_name <channel_name>
	stream_hash <stream_id>
	stream_topic_hash <stream_id> <topic>
	should_translate_emoticons
	emoji_name <emoji_name>
	emoji_codepoint <emoji_name>
	emoticon_translations
	realm_emoji_url <emoji_name_or_id>
	linkifier_map
	");

	Ok(())
}

#[test]
fn linkifiers_lists_patterns() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_realm(tmp.path(), common::REALM_TOML)?;

	common::mdref_cmd()
		.arg("linkifiers")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"#(?P<id>[0-9]+) -> https://github.com/zulip/zulip/issues/{id}",
		));

	Ok(())
}

#[test]
fn linkifiers_reports_empty_realm() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_realm(tmp.path(), "my_user_id = 1\n")?;

	common::mdref_cmd()
		.arg("linkifiers")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("No linkifiers registered."));

	Ok(())
}

#[test]
fn check_summarizes_valid_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_realm(tmp.path(), common::REALM_TOML)?;

	common::mdref_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"2 user(s), 1 group(s), 2 channel(s), 1 realm emoji, 1 linkifier(s)",
		));

	Ok(())
}

#[test]
fn check_reads_dot_config_location() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::create_dir_all(tmp.path().join(".config"))?;
	std::fs::write(tmp.path().join(".config/mdref.toml"), "my_user_id = 1\n")?;

	common::mdref_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Realm config is valid"));

	Ok(())
}

#[test]
fn check_rejects_duplicate_ids() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_realm(
		tmp.path(),
		"my_user_id = 1\n[[channels]]\nstream_id = 5\nname = \"a\"\n[[channels]]\nstream_id = \
		 5\nname = \"b\"\n",
	)?;

	common::mdref_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("duplicate channel id `5`"));

	Ok(())
}

#[test]
fn check_rejects_invalid_linkifier() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_realm(
		tmp.path(),
		"my_user_id = 1\n[[linkifiers]]\npattern = \"#(?P<id>[0-9]+)\"\nurl_template = \
		 \"https://example.com/{number}\"\n",
	)?;

	common::mdref_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("mdref::invalid_linkifier"));

	Ok(())
}

#[test]
fn missing_subcommand_exits_with_usage_hint() {
	common::mdref_cmd()
		.assert()
		.code(1)
		.stderr(predicates::str::contains("No subcommand specified"));
}
