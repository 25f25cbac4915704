use std::path::Path;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub const REALM_TOML: &str = r##"my_user_id = 1

[settings]
translate_emoticons = true

[[users]]
user_id = 1
full_name = "Desdemona"

[[users]]
user_id = 2
full_name = "Iago"

[[groups]]
id = 10
name = "backend"
members = [2]

[[channels]]
stream_id = 5
name = "general"
description = "For everything"

[[channels]]
stream_id = 8
name = "design team"

[emoji.codepoints]
smile = "1f642"

[[emoji.realm]]
id = "1"
name = "parrot"
source_url = "/user_avatars/2/emoji/images/1.gif"

[[linkifiers]]
pattern = "#(?P<id>[0-9]+)"
url_template = "https://github.com/zulip/zulip/issues/{id}"
"##;

pub fn mdref_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("mdref"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("MDREF_LOG");
	cmd
}

pub fn write_realm(root: &Path, content: &str) -> std::io::Result<()> {
	std::fs::write(root.join("mdref.toml"), content)
}
