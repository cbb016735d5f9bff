// Known inputs and expected TSV outputs for golden-file tests
// Format: index<TAB>type<TAB>location<TAB>length<TAB>text[<TAB>link]

/// One mention, one hashtag and one bare URL
pub const SIMPLE_TEXT: &str =
    "Ping @alice about #release, notes at https://example.com/releases/v2 ok";

/// Default run: URLs are kept whole
pub const SIMPLE_EXPECTED: &str = "0\turl\t37\t31\thttps://example.com/releases/v2\thttps://example.com/releases/v2
1\tmention\t4\t7\talice
2\thashtag\t17\t9\trelease";

/// `--max-url-length 12 --ellipsis ...`
pub const SIMPLE_SHORTENED_EXPECTED: &str = "0\turl\t37\t12\thttps://e...\thttps://example.com/releases/v2
1\tmention\t4\t7\talice
2\thashtag\t17\t9\trelease";

/// Labeled and explicit links ahead of a mention, so the mention moves
pub const LINKS_TEXT: &str = "[Docs](https://docs.rs/regex) and <https://crates.io|crates> by @carol";

/// After rewriting: "Docs and crates by @carol"
pub const LINKS_EXPECTED: &str = "0\turl\t0\t4\tDocs\thttps://docs.rs/regex
1\turl\t9\t6\tcrates\thttps://crates.io
2\tmention\t18\t7\tcarol";

/// Config with a custom ticket rule and a mention blocklist
pub const TICKET_CONFIG: &str = r#"
enabled = ["mention", "custom:ticket"]

[[custom]]
id = "ticket"
pattern = '\sT-\d+'

[filters]
mention_blocklist = ["bot"]
"#;

pub const TICKET_TEXT: &str = "@bot closed T-9 for @dana";

pub const TICKET_EXPECTED: &str = "0\tmention\t19\t6\tdana
1\tcustom:ticket\t11\t4\tT-9";
