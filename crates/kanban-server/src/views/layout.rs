use std::fmt::Write;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "KanbanPro";

/// URL of the drag-and-drop module loaded by the dashboard.
pub const BOARD_SCRIPT: &str = "/pkg/kanban_dnd.js";

/// File under `public_dir` that answers [`BOARD_SCRIPT`]. `cargo xtask dnd`
/// writes it there.
pub fn board_script_file(public_dir: &Path) -> PathBuf {
    public_dir.join(BOARD_SCRIPT.trim_start_matches('/'))
}

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap a page body in the shared document shell. `with_board_script`
/// loads the drag-and-drop module, which only the dashboard needs.
pub fn page(title: &str, body: &str, with_board_script: bool) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} · {app}</title>
<link rel="stylesheet" href="/styles.css">
</head>
<body>
<header class="topbar">
<a class="brand" href="/">{app}</a>
<nav><a href="/dashboard">Dashboard</a> <a href="/login">Login</a> <a href="/register">Register</a></nav>
</header>
<main>
{body}
</main>
"#,
        title = escape(title),
        app = APP_NAME,
        body = body,
    );
    if with_board_script {
        let _ = writeln!(
            html,
            "<script type=\"module\">import init from '{}'; init();</script>",
            BOARD_SCRIPT
        );
    }
    html.push_str("</body>\n</html>\n");
    html
}
