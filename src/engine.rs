use std::collections::HashSet;

pub fn normalize(line: &str) -> &str {
    let trimmed = line.trim();
    let bytes = trimmed.as_bytes();
    if trimmed.len() >= 2 {
        let (first, last) = (bytes[0], bytes[trimmed.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &trimmed[1..trimmed.len() - 1];
        }
    }
    trimmed
}

pub fn line_batch(raw: &str) -> Vec<&str> {
    raw.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

pub fn convert_slashes(raw: &str) -> String {
    normalize(raw).replace('\\', "/")
}

pub fn quote_join(raw: &str) -> String {
    join_quoted(line_batch(raw).into_iter().map(normalize))
}

pub fn suffix_replace(raw: &str, suffix: &str) -> String {
    let suffix = suffix.trim();
    if suffix.is_empty() {
        return String::new();
    }
    join_quoted(line_batch(raw).into_iter().map(|line| {
        let line = normalize(line);
        match line.rfind('.') {
            Some(dot) => format!("{}.{suffix}", &line[..dot]),
            None => line.to_string(),
        }
    }))
}

pub fn tail_replace(raw: &str, tails: &str) -> Vec<String> {
    if tails.trim().is_empty() {
        return Vec::new();
    }
    let prefix = convert_slashes(raw);
    let Some(last_slash) = prefix.rfind('/') else {
        return Vec::new();
    };
    let base = &prefix[..=last_slash];
    line_batch(tails)
        .into_iter()
        .map(|tail| format!("{base}{tail}"))
        .collect()
}

pub fn group_tail(raw: &str, tails: &str) -> Vec<String> {
    if tails.trim().is_empty() {
        return Vec::new();
    }
    let mut seen = HashSet::new();
    let mut prefixes = Vec::new();
    for line in line_batch(raw) {
        let mut prefix = convert_slashes(line);
        if !prefix.ends_with('/') {
            prefix.push('/');
        }
        if seen.insert(prefix.clone()) {
            prefixes.push(prefix);
        }
    }
    let tails = line_batch(tails);
    let mut out = Vec::with_capacity(tails.len() * prefixes.len());
    for tail in &tails {
        for prefix in &prefixes {
            out.push(format!("{prefix}{tail}"));
        }
    }
    out
}

pub struct InOutVersions {
    pub in_version: String,
    pub out_version: String,
}

// The `in` -> `out` replacement is a plain substring match and also rewrites
// `in` inside unrelated words; that is the intended behavior.
pub fn in_out_versions(raw: &str) -> InOutVersions {
    let lines: Vec<&str> = line_batch(raw).into_iter().map(normalize).collect();
    InOutVersions {
        in_version: join_quoted(lines.iter().copied()),
        out_version: join_quoted(lines.iter().map(|line| line.replace("in", "out"))),
    }
}

fn join_quoted<I, S>(lines: I) -> String
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .map(|line| format!("\"{}\"", line.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_one_quote_layer() {
        assert_eq!(normalize("  \"/a/b\"  "), "/a/b");
        assert_eq!(normalize("'/a/b'"), "/a/b");
        assert_eq!(normalize("\"\"/a\"\""), "\"/a\"");
    }

    #[test]
    fn normalize_leaves_mismatched_quotes() {
        assert_eq!(normalize("\"/a/b'"), "\"/a/b'");
        assert_eq!(normalize("\""), "\"");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn normalize_is_idempotent_on_path_text() {
        for s in ["/a/b", "  /a/b  ", "\"/a/b\"", "'x'", "C:\\dir\\f.txt", ""] {
            assert_eq!(normalize(normalize(s)), normalize(s), "input {s:?}");
        }
    }

    #[test]
    fn line_batch_drops_empty_lines_keeps_duplicates() {
        assert_eq!(line_batch("a\n\n  b  \na\n"), vec!["a", "b", "a"]);
        assert!(line_batch("\n \n").is_empty());
    }

    #[test]
    fn convert_slashes_handles_quoted_windows_path() {
        assert_eq!(convert_slashes("\"C:\\dir\\file.txt\""), "C:/dir/file.txt");
        assert_eq!(convert_slashes("no-backslashes"), "no-backslashes");
    }

    #[test]
    fn quote_join_basic() {
        assert_eq!(quote_join("a\nb\n"), "\"a\",\"b\"");
        assert_eq!(quote_join(""), "");
    }

    #[test]
    fn quote_join_strips_existing_quotes_first() {
        assert_eq!(quote_join("\"a\"\n'b'"), "\"a\",\"b\"");
    }

    #[test]
    fn suffix_replace_swaps_last_extension() {
        assert_eq!(suffix_replace("/x/file.in\n", "out"), "\"/x/file.out\"");
        assert_eq!(suffix_replace("a.b.c", "txt"), "\"a.b.txt\"");
    }

    #[test]
    fn suffix_replace_passes_through_without_dot() {
        assert_eq!(suffix_replace("noext\n", "out"), "\"noext\"");
    }

    #[test]
    fn suffix_replace_empty_suffix_is_no_op() {
        assert_eq!(suffix_replace("/x/file.in", ""), "");
        assert_eq!(suffix_replace("/x/file.in", "   "), "");
    }

    #[test]
    fn tail_replace_keeps_tail_order_and_duplicates() {
        assert_eq!(
            tail_replace("/a/b/old.txt", "c.txt\nd.txt\nc.txt"),
            vec!["/a/b/c.txt", "/a/b/d.txt", "/a/b/c.txt"]
        );
    }

    #[test]
    fn tail_replace_without_slash_emits_nothing() {
        assert!(tail_replace("noslash", "x").is_empty());
        assert!(tail_replace("/a/b", "").is_empty());
    }

    #[test]
    fn tail_replace_converts_backslashes_in_prefix() {
        assert_eq!(tail_replace("C:\\a\\old", "new"), vec!["C:/a/new"]);
    }

    #[test]
    fn group_tail_cross_product_is_tail_major() {
        assert_eq!(
            group_tail("/a\n/a\n/b", "x\ny"),
            vec!["/a/x", "/b/x", "/a/y", "/b/y"]
        );
    }

    #[test]
    fn group_tail_preserves_existing_trailing_slash() {
        assert_eq!(group_tail("/a/\n\"/b\"", "x"), vec!["/a/x", "/b/x"]);
    }

    #[test]
    fn group_tail_empty_tails_is_no_op() {
        assert!(group_tail("/a\n/b", " \n ").is_empty());
    }

    #[test]
    fn in_out_versions_replaces_every_in_substring() {
        let versions = in_out_versions("bin.txt");
        assert_eq!(versions.in_version, "\"bin.txt\"");
        assert_eq!(versions.out_version, "\"bout.txt\"");
    }

    #[test]
    fn in_out_versions_multi_line() {
        let versions = in_out_versions("/data/in/a.in\n\"input\"");
        assert_eq!(versions.in_version, "\"/data/in/a.in\",\"input\"");
        assert_eq!(versions.out_version, "\"/data/out/a.out\",\"output\"");
    }

    #[test]
    fn all_operations_tolerate_empty_input() {
        assert_eq!(convert_slashes(""), "");
        assert_eq!(quote_join(""), "");
        assert_eq!(suffix_replace("", "out"), "");
        assert!(tail_replace("", "x").is_empty());
        assert!(group_tail("", "x").is_empty());
        let versions = in_out_versions("");
        assert_eq!(versions.in_version, "");
        assert_eq!(versions.out_version, "");
    }
}
