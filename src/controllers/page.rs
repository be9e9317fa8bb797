/// Render the single-page UI: upload form plus generated audio, newest first.
///
/// `artifacts` holds `(filename, audio_url)` pairs in display order.
pub fn render_index_page(artifacts: &[(String, String)]) -> String {
    let mut rows = String::new();
    for (filename, audio_url) in artifacts {
        let name = escape_html(filename);
        let url = escape_html(audio_url);
        let path_segment = escape_html(&urlencoding::encode(filename));
        rows.push_str(&format!(
            r#"      <li>
        <span class="name">{name}</span>
        <audio controls preload="none" src="{url}"></audio>
        <a href="/download/{path_segment}">Download</a>
        <button type="button" data-delete="{path_segment}">Delete</button>
      </li>
"#
        ));
    }

    if rows.is_empty() {
        rows.push_str("      <li class=\"empty\">No audio files yet.</li>\n");
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>PDF Narrator</title>
  <style>
    body {{ font-family: sans-serif; max-width: 48rem; margin: 2rem auto; }}
    li {{ margin: 0.5rem 0; display: flex; gap: 0.75rem; align-items: center; }}
    .name {{ flex: 1; word-break: break-all; }}
    #status {{ min-height: 1.5rem; }}
  </style>
</head>
<body>
  <h1>PDF Narrator</h1>
  <form id="upload" enctype="multipart/form-data">
    <input type="file" name="file" accept="application/pdf,.pdf" required>
    <select name="voice">
      <option value="Male">Male</option>
      <option value="Female">Female</option>
    </select>
    <label>Speed <input type="number" name="speed" value="1.0" min="0.25" max="4" step="0.05"></label>
    <button type="submit">Convert</button>
  </form>
  <p id="status"></p>
  <p><a href="/download_app">Download the desktop app</a></p>
  <h2>Audio files</h2>
  <ul id="files">
{rows}  </ul>
  <script>
    const status = document.getElementById("status");
    document.getElementById("upload").addEventListener("submit", async (event) => {{
      event.preventDefault();
      status.textContent = "Converting...";
      const response = await fetch("/", {{ method: "POST", body: new FormData(event.target) }});
      const body = await response.json();
      if (response.ok) {{
        location.reload();
      }} else {{
        status.textContent = body.error;
      }}
    }});
    document.querySelectorAll("[data-delete]").forEach((button) => {{
      button.addEventListener("click", async () => {{
        await fetch("/delete/" + button.dataset.delete, {{ method: "POST" }});
        location.reload();
      }});
    }});
  </script>
</body>
</html>
"#
    )
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
