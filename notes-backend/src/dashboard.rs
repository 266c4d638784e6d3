//! Minimal browser chat page served at `GET /`.

use crate::routes::AppState;
use axum::extract::State;
use axum::response::Html;
use std::sync::Arc;

const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Notes Agent</title>
<style>
  body { font-family: system-ui, sans-serif; max-width: 760px; margin: 2rem auto; padding: 0 1rem; background: #111; color: #eee; }
  #log { display: flex; flex-direction: column; gap: .75rem; margin-bottom: 1rem; }
  .msg { padding: .6rem .9rem; border-radius: 8px; white-space: pre-wrap; }
  .user { background: #234; align-self: flex-end; }
  .agent { background: #222; }
  .error { background: #522; }
  form { display: flex; gap: .5rem; }
  textarea { flex: 1; min-height: 3rem; background: #1a1a1a; color: #eee; border: 1px solid #444; border-radius: 6px; padding: .5rem; }
  button { padding: 0 1.2rem; }
  small { color: #888; }
</style>
</head>
<body>
<h1>Notes Agent</h1>
<small>Model: {{MODEL}}</small>
<div id="log"></div>
<form id="form">
  <textarea id="prompt" maxlength="{{MAX_PROMPT}}" placeholder="Ask me to read, write, list or delete notes"></textarea>
  <button type="submit">Send</button>
</form>
<script>
const log = document.getElementById('log');
const input = document.getElementById('prompt');

function add(text, cls) {
  const div = document.createElement('div');
  div.className = 'msg ' + cls;
  div.textContent = text;
  log.appendChild(div);
  return div;
}

document.getElementById('form').addEventListener('submit', async (e) => {
  e.preventDefault();
  const prompt = input.value.trim();
  if (!prompt) return;
  add(prompt, 'user');
  input.value = '';
  const pending = add('...', 'agent');
  try {
    const res = await fetch('/agent', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ prompt }),
    });
    const data = await res.json();
    if (res.ok) {
      pending.textContent = data.response;
    } else {
      pending.textContent = data.detail || ('HTTP ' + res.status);
      pending.className = 'msg error';
    }
  } catch (err) {
    pending.textContent = String(err);
    pending.className = 'msg error';
  }
});
</script>
</body>
</html>
"#;

// GET /
pub async fn dashboard(State(state): State<Arc<AppState>>) -> Html<String> {
    let model = state
        .agent
        .model_name()
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");

    Html(
        PAGE.replace("{{MODEL}}", &model)
            .replace("{{MAX_PROMPT}}", &state.gate.max_prompt_chars().to_string()),
    )
}
