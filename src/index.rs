//! Markdown index of exported files.

const HEADER: &str = "| File | URL |\n|------|-----|\n";

/// Render a two-column markdown table linking every file under `url_prefix`.
///
/// Both cells of a row link to `<url_prefix>/<name>`: the first shows the
/// name, the second the URL. Rows are sorted by file name, so the output does
/// not depend on the order the files were written in.
pub fn render<S: AsRef<str>>(filenames: &[S], url_prefix: &str) -> String {
    let prefix = url_prefix.trim_end_matches('/');
    let mut names: Vec<&str> = filenames.iter().map(|s| s.as_ref()).collect();
    names.sort_unstable();

    let mut out = String::from(HEADER);
    for name in names {
        let url = format!("{}/{}", prefix, name);
        out.push_str(&format!(
            "| {} | {} |\n",
            link(name, &url),
            link(&url, &url)
        ));
    }
    out
}

/// `[text](<url>)`, escaped for use inside a table cell.
///
/// The destination is wrapped in angle brackets so spaces need no encoding.
/// `|` is escaped in both parts, otherwise it would end the cell.
fn link(text: &str, url: &str) -> String {
    format!("[{}](<{}>)", escape(text, "\\[]<>|`"), escape(url, "\\<>|"))
}

fn escape(s: &str, special: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if special.contains(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
